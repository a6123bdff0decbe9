use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        4
    }

    /// IME takes effect immediately, so an interrupt that is already pending
    /// is dispatched at the end of this very step.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime = true;
        4
    }
}

use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        16
    }

    /// RET that also sets IME; the usual way a handler re-enables interrupts.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        16
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, target: u8) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = target as u16;
        16
    }
}

use crate::config::GameBoyConfig;

use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(&GameBoyConfig::default())
    }

    pub fn with_config(config: &GameBoyConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            fault: None,
            opcode_policy: config.opcode_policy,
        };
        cpu.reset(config);
        cpu
    }

    /// Return to the power-on state described by `config`.
    pub fn reset(&mut self, config: &GameBoyConfig) {
        self.regs = Registers::default();
        if config.dmg_boot_state {
            self.apply_dmg_boot_state();
        }
        self.regs.pc = config.entry_point;
        self.regs.sp = config.stack_pointer;
        self.ime = false;
        self.halted = false;
        self.fault = None;
        self.opcode_policy = config.opcode_policy;
    }

    /// Registers as the DMG boot ROM leaves them when it jumps to 0x0100.
    fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
    }

    /// The error that stopped the CPU, if any.
    pub fn fault(&self) -> Option<crate::CpuError> {
        self.fault
    }
}

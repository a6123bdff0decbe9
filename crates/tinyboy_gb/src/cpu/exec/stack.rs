use crate::cpu::ops::R16Stack;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: R16Stack) -> u32 {
        let value = match reg {
            R16Stack::BC => self.regs.bc(),
            R16Stack::DE => self.regs.de(),
            R16Stack::HL => self.regs.hl(),
            R16Stack::AF => self.regs.af(),
        };
        self.push_u16(bus, value);
        16
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: R16Stack) -> u32 {
        let value = self.pop_u16(bus);
        match reg {
            R16Stack::BC => self.regs.set_bc(value),
            R16Stack::DE => self.regs.set_de(value),
            R16Stack::HL => self.regs.set_hl(value),
            // F has no storage behind its low nibble.
            R16Stack::AF => self.regs.set_af(value & 0xFFF0),
        }
        12
    }
}

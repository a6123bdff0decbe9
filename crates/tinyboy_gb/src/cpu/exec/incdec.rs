use crate::cpu::ops::{R16, R8};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_r8(bus, reg, result);
        if reg == R8::HlInd { 12 } else { 4 }
    }

    pub(super) fn exec_dec_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_r8(bus, reg, result);
        if reg == R8::HlInd { 12 } else { 4 }
    }

    /// 16-bit increments never touch flags.
    pub(super) fn exec_inc_r16(&mut self, reg: R16) -> u32 {
        let value = self.read_r16(reg).wrapping_add(1);
        self.write_r16(reg, value);
        8
    }

    pub(super) fn exec_dec_r16(&mut self, reg: R16) -> u32 {
        let value = self.read_r16(reg).wrapping_sub(1);
        self.write_r16(reg, value);
        8
    }

    pub(super) fn exec_add_hl(&mut self, reg: R16) -> u32 {
        let value = self.read_r16(reg);
        self.alu_add_hl(value);
        8
    }
}

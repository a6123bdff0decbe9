use crate::cpu::ops::{Indirect, R16, R8};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_r16_imm<B: Bus>(&mut self, bus: &mut B, reg: R16) -> u32 {
        let value = self.fetch16(bus);
        self.write_r16(reg, value);
        12
    }

    pub(super) fn exec_ld_r8_imm<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.fetch8(bus);
        self.write_r8(bus, reg, value);
        if reg == R8::HlInd { 12 } else { 8 }
    }

    pub(super) fn exec_ld_r8_r8<B: Bus>(&mut self, bus: &mut B, dst: R8, src: R8) -> u32 {
        let value = self.read_r8(bus, src);
        self.write_r8(bus, dst, value);
        if dst == R8::HlInd || src == R8::HlInd { 8 } else { 4 }
    }

    /// Resolve a register-indirect address, applying the HL post-step.
    fn indirect_addr(&mut self, mode: Indirect) -> u16 {
        match mode {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, target: Indirect) -> u32 {
        let addr = self.indirect_addr(target);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, source: Indirect) -> u32 {
        let addr = self.indirect_addr(source);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, store: bool) -> u32 {
        let addr = self.fetch16(bus);
        if store {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        16
    }

    /// `LDH (a8),A` / `LDH A,(a8)` on the I/O page 0xFF00+n.
    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, store: bool) -> u32 {
        let addr = 0xFF00 | self.fetch8(bus) as u16;
        if store {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        12
    }

    /// `LD (C),A` / `LD A,(C)` on the I/O page 0xFF00+C.
    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, store: bool) -> u32 {
        let addr = 0xFF00 | self.regs.c as u16;
        if store {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        8
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(super) fn exec_ld_hl_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let value = self.alu_sp_offset(imm);
        self.regs.set_hl(value);
        12
    }
}

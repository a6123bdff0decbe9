use super::ops::{Cond, R16, R8};
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Read an 8-bit operand; `(HL)` goes through the bus.
    #[inline]
    pub(super) fn read_r8<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u8 {
        match reg {
            R8::B => self.regs.b,
            R8::C => self.regs.c,
            R8::D => self.regs.d,
            R8::E => self.regs.e,
            R8::H => self.regs.h,
            R8::L => self.regs.l,
            R8::HlInd => bus.read8(self.regs.hl()),
            R8::A => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_r8<B: Bus>(&mut self, bus: &mut B, reg: R8, value: u8) {
        match reg {
            R8::B => self.regs.b = value,
            R8::C => self.regs.c = value,
            R8::D => self.regs.d = value,
            R8::E => self.regs.e = value,
            R8::H => self.regs.h = value,
            R8::L => self.regs.l = value,
            R8::HlInd => bus.write8(self.regs.hl(), value),
            R8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn read_r16(&self, reg: R16) -> u16 {
        match reg {
            R16::BC => self.regs.bc(),
            R16::DE => self.regs.de(),
            R16::HL => self.regs.hl(),
            R16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_r16(&mut self, reg: R16, value: u16) {
        match reg {
            R16::BC => self.regs.set_bc(value),
            R16::DE => self.regs.set_de(value),
            R16::HL => self.regs.set_hl(value),
            R16::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn condition(&self, cond: Cond) -> bool {
        match cond {
            Cond::NZ => !self.regs.flag(Flag::Z),
            Cond::Z => self.regs.flag(Flag::Z),
            Cond::NC => !self.regs.flag(Flag::C),
            Cond::C => self.regs.flag(Flag::C),
        }
    }

    /// Read the byte at PC and advance PC by one.
    #[inline]
    pub fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Read a little-endian word at PC and advance PC by two.
    #[inline]
    pub fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push a word: high byte at SP-1, low byte at SP-2.
    #[inline]
    pub fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    /// Pop a word pushed by `push_u16`: low byte first, then high byte.
    #[inline]
    pub fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// Relative jump helper used by JR/JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
            12
        } else {
            8
        }
    }

    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }
}

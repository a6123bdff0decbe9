use super::ops::AluOp;
use super::{Cpu, Flag};

impl Cpu {
    /// Apply an accumulator operation with `value` as the right operand.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.regs.a = self.alu_sub(value, false),
            AluOp::Sbc => self.regs.a = self.alu_sub(value, true),
            AluOp::And => {
                self.regs.a &= value;
                self.regs.set_flags(self.regs.a == 0, false, true, false);
            }
            AluOp::Xor => {
                self.regs.a ^= value;
                self.regs.set_flags(self.regs.a == 0, false, false, false);
            }
            AluOp::Or => {
                self.regs.a |= value;
                self.regs.set_flags(self.regs.a == 0, false, false, false);
            }
            // CP is SUB with the result thrown away.
            AluOp::Cp => {
                self.alu_sub(value, false);
            }
        }
    }

    fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry = (use_carry && self.regs.flag(Flag::C)) as u8;
        let half = (a & 0x0F) + (value & 0x0F) + carry;
        let full = a as u16 + value as u16 + carry as u16;
        let result = full as u8;

        self.regs.a = result;
        self.regs.set_flags(result == 0, false, half > 0x0F, full > 0xFF);
    }

    /// Compute `A - value (- carry)`, update flags and return the result
    /// without storing it.
    fn alu_sub(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry = (use_carry && self.regs.flag(Flag::C)) as i16;
        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry;
        let full = a as i16 - value as i16 - carry;
        let result = full as u8;

        self.regs.set_flags(result == 0, true, half < 0, full < 0);
        result
    }

    /// Z, N and H follow the increment; C is untouched.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, value & 0x0F == 0x0F);
        result
    }

    /// Z, N and H follow the decrement; C is untouched.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, value & 0x0F == 0);
        result
    }

    /// `ADD HL,rr`: Z is preserved, H and C come from bits 11 and 15.
    pub(super) fn alu_add_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        self.regs.set_flag(Flag::N, false);
        self.regs
            .set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs.set_flag(Flag::C, hl as u32 + value as u32 > 0xFFFF);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// `SP + r8` as used by `ADD SP,r8` and `LD HL,SP+r8`.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    pub(super) fn alu_sp_offset(&mut self, imm: u8) -> u16 {
        let sp = self.regs.sp;
        let offset = imm as i8 as i16 as u16;
        let half = (sp & 0x000F) + (offset & 0x000F) > 0x000F;
        let carry = (sp & 0x00FF) + (offset & 0x00FF) > 0x00FF;
        self.regs.set_flags(false, false, half, carry);
        sp.wrapping_add(offset)
    }

    /// Decimal adjust A after a BCD add or subtract. N is preserved.
    pub(super) fn alu_daa(&mut self) {
        let subtract = self.regs.flag(Flag::N);
        let mut a = self.regs.a;
        let mut adjust = 0u8;
        let mut carry = self.regs.flag(Flag::C);

        if self.regs.flag(Flag::H) || (!subtract && a & 0x0F > 0x09) {
            adjust |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            adjust |= 0x60;
            carry = true;
        }

        a = if subtract {
            a.wrapping_sub(adjust)
        } else {
            a.wrapping_add(adjust)
        };

        self.regs.a = a;
        self.regs.set_flags(a == 0, subtract, false, carry);
    }

    /// Rotate A; `through_carry` selects RLA/RRA over RLCA/RRCA.
    ///
    /// Z is always cleared for the accumulator forms.
    pub(super) fn alu_rotate_a(&mut self, left: bool, through_carry: bool) {
        let a = self.regs.a;
        let old_carry = self.regs.flag(Flag::C) as u8;
        let (result, carry_out) = if left {
            let fill = if through_carry { old_carry } else { a >> 7 };
            ((a << 1) | fill, a & 0x80 != 0)
        } else {
            let fill = if through_carry { old_carry } else { a & 0x01 };
            ((a >> 1) | (fill << 7), a & 0x01 != 0)
        };
        self.regs.a = result;
        self.regs.set_flags(false, false, false, carry_out);
    }
}

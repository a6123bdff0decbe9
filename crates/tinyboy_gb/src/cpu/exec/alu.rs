use crate::cpu::ops::{AluOp, R8};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(super) fn exec_alu_r8<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: R8) -> u32 {
        let value = self.read_r8(bus, src);
        self.alu(op, value);
        if src == R8::HlInd { 8 } else { 4 }
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.fetch8(bus);
        self.alu(op, value);
        8
    }

    pub(super) fn exec_add_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_sp_offset(imm);
        16
    }

    pub(super) fn exec_rotate_a(&mut self, left: bool, through_carry: bool) -> u32 {
        self.alu_rotate_a(left, through_carry);
        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.regs.flag(Flag::C);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, !carry);
        4
    }
}

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::ops::Op;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded instruction and return its cost in T-cycles.
    ///
    /// The opcode byte has already been consumed; operand bytes are fetched
    /// here.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) -> u32 {
        match op {
            Op::Nop => 4,
            Op::Halt => self.exec_halt(),

            Op::LdR16Imm(reg) => self.exec_ld_r16_imm(bus, reg),
            Op::LdR8Imm(reg) => self.exec_ld_r8_imm(bus, reg),
            Op::LdR8R8 { dst, src } => self.exec_ld_r8_r8(bus, dst, src),
            Op::LdIndirectA(target) => self.exec_ld_indirect_a(bus, target),
            Op::LdAIndirect(source) => self.exec_ld_a_indirect(bus, source),
            Op::LdA16A => self.exec_ld_a16_a(bus, true),
            Op::LdAA16 => self.exec_ld_a16_a(bus, false),
            Op::LdSpHl => self.exec_ld_sp_hl(),
            Op::LdHlSpImm => self.exec_ld_hl_sp_imm(bus),
            Op::LdhA8A => self.exec_ldh_a8(bus, true),
            Op::LdhAA8 => self.exec_ldh_a8(bus, false),
            Op::LdhCA => self.exec_ldh_c(bus, true),
            Op::LdhAC => self.exec_ldh_c(bus, false),

            Op::IncR8(reg) => self.exec_inc_r8(bus, reg),
            Op::DecR8(reg) => self.exec_dec_r8(bus, reg),
            Op::IncR16(reg) => self.exec_inc_r16(reg),
            Op::DecR16(reg) => self.exec_dec_r16(reg),
            Op::AddHl(reg) => self.exec_add_hl(reg),
            Op::AddSpImm => self.exec_add_sp_imm(bus),
            Op::Alu(op, src) => self.exec_alu_r8(bus, op, src),
            Op::AluImm(op) => self.exec_alu_imm(bus, op),
            Op::Rlca => self.exec_rotate_a(true, false),
            Op::Rrca => self.exec_rotate_a(false, false),
            Op::Rla => self.exec_rotate_a(true, true),
            Op::Rra => self.exec_rotate_a(false, true),
            Op::Daa => self.exec_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr => self.jr(bus, true),
            Op::JrCond(cond) => self.jr(bus, self.condition(cond)),
            Op::Jp => self.jp(bus, true),
            Op::JpCond(cond) => self.jp(bus, self.condition(cond)),
            Op::JpHl => self.exec_jp_hl(),
            Op::Call => self.call(bus, true),
            Op::CallCond(cond) => self.call(bus, self.condition(cond)),
            Op::Ret => self.exec_ret(bus),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(target) => self.exec_rst(bus, target),

            Op::Push(reg) => self.exec_push(bus, reg),
            Op::Pop(reg) => self.exec_pop(bus, reg),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),
        }
    }
}

//! Static opcode table.
//!
//! Every opcode byte maps to an [`Op`] descriptor or to `None`. The table is
//! built at compile time and never changes; executing an `Op` is a plain
//! `match`, so adding a variant without handling it fails to compile.

/// 8-bit operand in standard opcode order: B, C, D, E, H, L, (HL), A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    /// Byte in memory at HL.
    HlInd,
    A,
}

impl R8 {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => R8::B,
            1 => R8::C,
            2 => R8::D,
            3 => R8::E,
            4 => R8::H,
            5 => R8::L,
            6 => R8::HlInd,
            _ => R8::A,
        }
    }
}

/// 16-bit operand of loads and 16-bit arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16 {
    BC,
    DE,
    HL,
    SP,
}

impl R16 {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16::BC,
            1 => R16::DE,
            2 => R16::HL,
            _ => R16::SP,
        }
    }
}

/// 16-bit operand of PUSH/POP; AF takes SP's slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl R16Stack {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16Stack::BC,
            1 => R16Stack::DE,
            2 => R16Stack::HL,
            _ => R16Stack::AF,
        }
    }
}

/// Register-indirect address used by `LD (rr),A` and `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    /// (HL), then HL += 1.
    HlInc,
    /// (HL), then HL -= 1.
    HlDec,
}

impl Indirect {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Indirect::BC,
            1 => Indirect::DE,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Halt,

    // Loads.
    LdR16Imm(R16),
    LdR8Imm(R8),
    LdR8R8 { dst: R8, src: R8 },
    LdIndirectA(Indirect),
    LdAIndirect(Indirect),
    LdA16A,
    LdAA16,
    LdSpHl,
    LdHlSpImm,
    /// LDH (a8),A: write A to 0xFF00+n.
    LdhA8A,
    /// LDH A,(a8): read A from 0xFF00+n.
    LdhAA8,
    /// LD (C),A: write A to 0xFF00+C.
    LdhCA,
    /// LD A,(C): read A from 0xFF00+C.
    LdhAC,

    // Arithmetic and logic.
    IncR8(R8),
    DecR8(R8),
    IncR16(R16),
    DecR16(R16),
    AddHl(R16),
    AddSpImm,
    Alu(AluOp, R8),
    AluImm(AluOp),
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    // Control flow.
    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    Reti,
    Rst(u8),

    // Stack and interrupt control.
    Push(R16Stack),
    Pop(R16Stack),
    Di,
    Ei,
}

/// Opcode byte to instruction; `None` marks an unimplemented opcode.
pub static OPCODE_TABLE: [Option<Op>; 256] = build_table();

/// Look up `opcode` in the table.
#[inline]
pub fn lookup(opcode: u8) -> Option<Op> {
    OPCODE_TABLE[opcode as usize]
}

const fn build_table() -> [Option<Op>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

/// Decode a single opcode byte.
///
/// Not populated: the 0xCB prefix, STOP, `LD (a16),SP`, `RET cc` and the
/// eleven opcode holes.
pub const fn decode(opcode: u8) -> Option<Op> {
    // Standard x/y/z/p field split of the opcode byte.
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = (opcode >> 4) & 0x03;

    let op = match opcode {
        0x00 => Op::Nop,
        0x76 => Op::Halt,

        0x01 | 0x11 | 0x21 | 0x31 => Op::LdR16Imm(R16::from_index(p)),
        0x02 | 0x12 | 0x22 | 0x32 => Op::LdIndirectA(Indirect::from_index(p)),
        0x0A | 0x1A | 0x2A | 0x3A => Op::LdAIndirect(Indirect::from_index(p)),
        0x03 | 0x13 | 0x23 | 0x33 => Op::IncR16(R16::from_index(p)),
        0x0B | 0x1B | 0x2B | 0x3B => Op::DecR16(R16::from_index(p)),
        0x09 | 0x19 | 0x29 | 0x39 => Op::AddHl(R16::from_index(p)),

        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => Op::IncR8(R8::from_index(y)),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => Op::DecR8(R8::from_index(y)),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => Op::LdR8Imm(R8::from_index(y)),

        0x07 => Op::Rlca,
        0x0F => Op::Rrca,
        0x17 => Op::Rla,
        0x1F => Op::Rra,
        0x27 => Op::Daa,
        0x2F => Op::Cpl,
        0x37 => Op::Scf,
        0x3F => Op::Ccf,

        0x18 => Op::Jr,
        0x20 | 0x28 | 0x30 | 0x38 => Op::JrCond(Cond::from_index(y)),

        0x40..=0x7F => Op::LdR8R8 {
            dst: R8::from_index(y),
            src: R8::from_index(z),
        },
        0x80..=0xBF => Op::Alu(AluOp::from_index(y), R8::from_index(z)),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => Op::AluImm(AluOp::from_index(y)),

        0xC1 | 0xD1 | 0xE1 | 0xF1 => Op::Pop(R16Stack::from_index(p)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => Op::Push(R16Stack::from_index(p)),

        0xC3 => Op::Jp,
        0xC2 | 0xCA | 0xD2 | 0xDA => Op::JpCond(Cond::from_index(y)),
        0xE9 => Op::JpHl,
        0xCD => Op::Call,
        0xC4 | 0xCC | 0xD4 | 0xDC => Op::CallCond(Cond::from_index(y)),
        0xC9 => Op::Ret,
        0xD9 => Op::Reti,
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => Op::Rst(opcode & 0x38),

        0xE0 => Op::LdhA8A,
        0xF0 => Op::LdhAA8,
        0xE2 => Op::LdhCA,
        0xF2 => Op::LdhAC,
        0xEA => Op::LdA16A,
        0xFA => Op::LdAA16,
        0xE8 => Op::AddSpImm,
        0xF8 => Op::LdHlSpImm,
        0xF9 => Op::LdSpHl,

        0xF3 => Op::Di,
        0xFB => Op::Ei,

        _ => return None,
    };
    Some(op)
}

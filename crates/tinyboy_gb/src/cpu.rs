mod alu;
mod bus;
mod exec;
mod helpers;
mod init;
mod interrupts;
pub mod ops;
mod regs;
mod step;

pub use bus::Bus;
pub use interrupts::{Interrupt, InterruptFlags};
pub use regs::{Flag, Registers};

use crate::config::OpcodePolicy;
use crate::error::CpuError;

/// Sharp LR35902 core.
///
/// The CPU owns nothing but its register file and a few control latches;
/// every memory access goes through a [`Bus`]. One call to [`Cpu::step`]
/// fetches, decodes through [`ops::OPCODE_TABLE`], executes, hands the
/// cycle cost to the bus so the timer and PPU advance by the same amount,
/// and finally runs interrupt dispatch.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// Latched by an unimplemented opcode under `OpcodePolicy::Halt`. Once
    /// set, `step` keeps returning it without touching the machine.
    fault: Option<CpuError>,
    opcode_policy: OpcodePolicy,
}

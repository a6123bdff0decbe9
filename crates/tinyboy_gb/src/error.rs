use thiserror::Error;

/// Conditions that stop the CPU core.
///
/// Memory accesses never fail (every address decodes to something), so the
/// only fatal case is fetching an opcode that has no entry in the opcode
/// table: without it the core cannot know how many cycles to charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("unimplemented opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },
}

impl CpuError {
    /// Address of the instruction that caused the error.
    pub fn pc(&self) -> u16 {
        match self {
            CpuError::UnimplementedOpcode { pc, .. } => *pc,
        }
    }
}

pub mod config;
pub mod cpu;
pub mod error;
pub mod io;
pub mod machine;

pub use config::{GameBoyConfig, OpcodePolicy};
pub use cpu::{Cpu, InterruptFlags, Registers};
pub use error::CpuError;
pub use machine::{Button, GameBoy, MemoryBus};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;

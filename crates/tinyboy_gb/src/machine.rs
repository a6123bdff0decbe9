mod apu;
mod bus;
mod gameboy;
mod joypad;
mod memory;
mod ppu;
mod timer;

pub use apu::{Apu, ChannelSnapshot};
pub use bus::GameBoyBus;
pub use gameboy::GameBoy;
pub use joypad::Button;
pub use memory::{MemoryBus, Region};
pub use ppu::{LcdControl, Ppu};
pub use timer::Timer;

#[cfg(test)]
mod tests;

use super::{Apu, Button, GameBoyBus};
use crate::config::GameBoyConfig;
use crate::cpu::Cpu;
use crate::error::CpuError;

/// A DMG: CPU plus everything on its bus.
#[derive(Clone)]
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: GameBoyBus,
    config: GameBoyConfig,
    cycles: u64,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(GameBoyConfig::default())
    }

    pub fn with_config(config: GameBoyConfig) -> Self {
        Self {
            cpu: Cpu::with_config(&config),
            bus: GameBoyBus::new(&config),
            config,
            cycles: 0,
        }
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    /// T-cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Power-cycle the machine, keeping the cartridge.
    pub fn reset(&mut self) {
        self.cpu.reset(&self.config);
        self.bus.reset(&self.config);
        self.cycles = 0;
        log::info!("GB reset: PC=0x{:04X}", self.cpu.regs.pc);
    }

    /// Insert a cartridge and reset.
    pub fn load_rom(&mut self, rom: &[u8]) {
        self.bus.memory.load_rom(rom);
        self.reset();
    }

    /// Execute one instruction; see [`Cpu::step`].
    pub fn step(&mut self) -> Result<u32, CpuError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Run until the PPU next enters V-Blank, i.e. one full frame has been
    /// drawn into the frame buffer. Returns the cycles spent.
    pub fn step_frame(&mut self) -> Result<u64, CpuError> {
        let target = self.bus.ppu.frames() + 1;
        let start = self.cycles;
        while self.bus.ppu.frames() < target {
            self.step()?;
        }
        Ok(self.cycles - start)
    }

    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.ppu.frame_buffer()
    }

    pub fn press_button(&mut self, button: Button) {
        self.bus.memory.press_button(button);
    }

    pub fn release_button(&mut self, button: Button) {
        self.bus.memory.release_button(button);
    }

    pub fn apu(&self) -> &Apu {
        &self.bus.apu
    }
}

use super::{Apu, MemoryBus, Ppu, Timer};
use crate::config::GameBoyConfig;
use crate::cpu::Bus;
use crate::io::{DIV, DMA, LY, STAT};

/// STAT bits 0-2 are owned by the PPU.
const STAT_READ_ONLY: u8 = 0x07;

/// The CPU's view of the machine: memory plus the peripherals clocked by it.
///
/// `tick` is the single place time passes. Every peripheral receives the
/// same cycle count, so they can never drift apart.
#[derive(Clone)]
pub struct GameBoyBus {
    pub memory: MemoryBus,
    pub timer: Timer,
    pub ppu: Ppu,
    pub apu: Apu,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        Self::new(&GameBoyConfig::default())
    }
}

impl GameBoyBus {
    pub fn new(config: &GameBoyConfig) -> Self {
        let mut bus = Self {
            memory: MemoryBus::new(),
            timer: Timer::new(),
            ppu: Ppu::new(),
            apu: Apu::new(),
        };
        bus.reset(config);
        bus
    }

    /// Power-cycle everything except the loaded ROM.
    pub fn reset(&mut self, config: &GameBoyConfig) {
        self.memory.reset();
        if config.dmg_boot_state {
            self.memory.apply_dmg_io_state();
        }
        self.timer.reset();
        self.ppu.reset();
        self.apu.reset();
    }
}

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory.read_byte(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            DMA => {
                self.memory.write_byte(DMA, value);
                self.memory.dma_transfer(value);
            }
            DIV => {
                self.memory.write_byte(DIV, 0);
                self.timer.reset_divider();
            }
            LY => self.ppu.reset_line(&mut self.memory),
            STAT => {
                let stat = self.memory.read_byte(STAT);
                self.memory
                    .write_byte(STAT, (stat & STAT_READ_ONLY) | (value & !STAT_READ_ONLY));
            }
            _ => self.memory.write_byte(addr, value),
        }
    }

    fn tick(&mut self, cycles: u32) {
        self.timer.step(&mut self.memory, cycles);
        self.ppu.step(&mut self.memory, cycles);
        self.apu.step(&self.memory, cycles);
    }
}

use crate::cpu::InterruptFlags;
use crate::io::IF;

mod dma;
mod init;
mod map;

pub use map::Region;

pub(crate) const ROM_SIZE: usize = 0x8000;
pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const ERAM_SIZE: usize = 0x2000;
pub(crate) const WRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;
pub(crate) const IO_SIZE: usize = 0x80;
pub(crate) const HRAM_SIZE: usize = 0x7F;

/// Every byte the DMG can address, split by region.
///
/// This is pure storage plus address decoding: no timing and no register
/// side effects. Those belong to whoever owns the bus (see `GameBoyBus`).
/// Reads from unmapped addresses return 0xFF and writes to them, or to ROM,
/// are dropped, so no access can fail.
#[derive(Clone)]
pub struct MemoryBus {
    rom: Box<[u8; ROM_SIZE]>,
    vram: [u8; VRAM_SIZE],
    eram: [u8; ERAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    /// 0xFF00..=0xFF7F. Index 0x7F doubles as IE, aliased at 0xFFFF.
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus {
    /// Zeroed memory with no buttons held (P1 = 0xFF).
    pub fn new() -> Self {
        let mut memory = Self {
            rom: Box::new([0; ROM_SIZE]),
            vram: [0; VRAM_SIZE],
            eram: [0; ERAM_SIZE],
            wram: [0; WRAM_SIZE],
            oam: [0; OAM_SIZE],
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
        };
        memory.release_all_buttons();
        memory
    }

    /// Clear every RAM region and I/O register. ROM is kept.
    pub fn reset(&mut self) {
        self.vram.fill(0);
        self.eram.fill(0);
        self.wram.fill(0);
        self.oam.fill(0);
        self.io.fill(0);
        self.hram.fill(0);
        self.release_all_buttons();
    }

    /// Copy a cartridge image into the 32 KiB ROM window and return how many
    /// bytes were mapped. No bank switching: anything past 32 KiB is ignored.
    pub fn load_rom(&mut self, rom: &[u8]) -> usize {
        let len = rom.len().min(ROM_SIZE);
        self.rom.fill(0);
        self.rom[..len].copy_from_slice(&rom[..len]);
        if rom.len() > ROM_SIZE {
            log::warn!(
                "GB ROM is {} bytes; only the first {} are mapped (no MBC support)",
                rom.len(),
                ROM_SIZE
            );
        }
        log::info!("GB ROM loaded: {len} bytes");
        len
    }

    /// Read `len` consecutive bytes starting at `addr`, wrapping at 0xFFFF.
    pub fn read_bytes(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read_byte(addr.wrapping_add(offset as u16)))
            .collect()
    }

    /// Write `bytes` to consecutive addresses starting at `addr`.
    pub fn write_bytes(&mut self, addr: u16, bytes: &[u8]) {
        for (offset, &value) in bytes.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), value);
        }
    }

    /// Set `flags` in IF.
    pub fn request_interrupt(&mut self, flags: InterruptFlags) {
        let iflags = self.read_byte(IF) | flags.bits();
        self.write_byte(IF, iflags);
    }

    pub fn interrupt_flags(&self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(self.read_byte(IF))
    }

    /// Raw OAM contents, 40 entries of 4 bytes.
    pub fn oam(&self) -> &[u8] {
        &self.oam
    }
}

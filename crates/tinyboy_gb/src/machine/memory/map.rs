use super::MemoryBus;

/// Where a 16-bit address lands, with the offset into that region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// 0x0000..=0x7FFF
    Rom(usize),
    /// 0x8000..=0x9FFF
    Vram(usize),
    /// 0xA000..=0xBFFF
    ExternalRam(usize),
    /// 0xC000..=0xDFFF
    WorkRam(usize),
    /// 0xFE00..=0xFE9F
    Oam(usize),
    /// 0xFF00..=0xFF7F
    Io(usize),
    /// 0xFF80..=0xFFFE
    HighRam(usize),
    /// 0xFFFF, stored in the last byte of the I/O block.
    InterruptEnable,
    /// Echo RAM and the 0xFEA0..=0xFEFF gap: reads 0xFF, ignores writes.
    Unmapped,
}

impl Region {
    pub const fn decode(addr: u16) -> Self {
        match addr {
            0x0000..=0x7FFF => Region::Rom(addr as usize),
            0x8000..=0x9FFF => Region::Vram((addr - 0x8000) as usize),
            0xA000..=0xBFFF => Region::ExternalRam((addr - 0xA000) as usize),
            0xC000..=0xDFFF => Region::WorkRam((addr - 0xC000) as usize),
            0xFE00..=0xFE9F => Region::Oam((addr - 0xFE00) as usize),
            0xFF00..=0xFF7F => Region::Io((addr - 0xFF00) as usize),
            0xFF80..=0xFFFE => Region::HighRam((addr - 0xFF80) as usize),
            0xFFFF => Region::InterruptEnable,
            _ => Region::Unmapped,
        }
    }
}

/// Index of IE inside the I/O block.
const IE_INDEX: usize = 0x7F;

impl MemoryBus {
    pub fn read_byte(&self, addr: u16) -> u8 {
        match Region::decode(addr) {
            Region::Rom(offset) => self.rom[offset],
            Region::Vram(offset) => self.vram[offset],
            Region::ExternalRam(offset) => self.eram[offset],
            Region::WorkRam(offset) => self.wram[offset],
            Region::Oam(offset) => self.oam[offset],
            Region::Io(offset) => self.io[offset],
            Region::HighRam(offset) => self.hram[offset],
            Region::InterruptEnable => self.io[IE_INDEX],
            Region::Unmapped => 0xFF,
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match Region::decode(addr) {
            // Cartridge ROM is read-only from the CPU's side.
            Region::Rom(_) => {}
            Region::Vram(offset) => self.vram[offset] = value,
            Region::ExternalRam(offset) => self.eram[offset] = value,
            Region::WorkRam(offset) => self.wram[offset] = value,
            Region::Oam(offset) => self.oam[offset] = value,
            Region::Io(offset) => self.io[offset] = value,
            Region::HighRam(offset) => self.hram[offset] = value,
            Region::InterruptEnable => self.io[IE_INDEX] = value,
            Region::Unmapped => {}
        }
    }
}

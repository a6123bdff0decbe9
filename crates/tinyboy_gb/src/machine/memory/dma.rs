use super::{MemoryBus, OAM_SIZE};

const OAM_BASE: u16 = 0xFE00;

impl MemoryBus {
    /// OAM DMA: copy 160 bytes from `source_high << 8` into OAM.
    ///
    /// The real transfer takes 160 machine cycles; here it completes in one
    /// call, so callers never observe a half-copied OAM.
    pub fn dma_transfer(&mut self, source_high: u8) {
        let base = (source_high as u16) << 8;
        let mut buffer = [0u8; OAM_SIZE];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read_byte(base.wrapping_add(i as u16));
        }
        for (i, &byte) in buffer.iter().enumerate() {
            self.write_byte(OAM_BASE + i as u16, byte);
        }
        log::debug!("GB DMA: 0x{base:04X} -> OAM");
    }
}

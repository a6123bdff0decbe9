use super::MemoryBus;
use crate::io::{
    BGP, DIV, IF, LCDC, NR12, NR13, NR14, NR22, NR23, NR24, NR30, NR32, NR33, NR34, NR42, NR43,
    P1, STAT, TAC,
};

impl MemoryBus {
    /// I/O registers as the DMG boot ROM leaves them at PC=0x0100.
    pub fn apply_dmg_io_state(&mut self) {
        self.release_all_buttons();

        self.write_byte(DIV, 0xAB);
        self.write_byte(TAC, 0xF8);

        // V-Blank is already requested when the cartridge takes over.
        self.write_byte(IF, 0x01);

        // Sound.
        self.write_byte(0xFF10, 0x80);
        self.write_byte(0xFF11, 0xBF);
        self.write_byte(NR12, 0xF3);
        self.write_byte(NR13, 0xFF);
        self.write_byte(NR14, 0xBF);
        self.write_byte(0xFF16, 0x3F);
        self.write_byte(NR22, 0x00);
        self.write_byte(NR23, 0xFF);
        self.write_byte(NR24, 0xBF);
        self.write_byte(NR30, 0x7F);
        self.write_byte(0xFF1B, 0xFF);
        self.write_byte(NR32, 0x9F);
        self.write_byte(NR33, 0xFF);
        self.write_byte(NR34, 0xBF);
        self.write_byte(0xFF20, 0xFF);
        self.write_byte(NR42, 0x00);
        self.write_byte(NR43, 0x00);
        self.write_byte(0xFF23, 0xBF);
        self.write_byte(0xFF24, 0x77);
        self.write_byte(0xFF25, 0xF3);
        self.write_byte(0xFF26, 0xF1);

        // LCD on, BG on, unsigned tile data.
        self.write_byte(LCDC, 0x91);
        self.write_byte(STAT, 0x85);
        self.write_byte(BGP, 0xFC);
    }

    pub(crate) fn release_all_buttons(&mut self) {
        self.write_byte(P1, 0xFF);
    }
}

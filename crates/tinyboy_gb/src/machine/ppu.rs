use bitflags::bitflags;

use super::MemoryBus;
use crate::cpu::InterruptFlags;
use crate::io::{LCDC, LY, LYC, STAT};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

mod render;

/// CPU cycles per PPU cycle.
pub const CPU_CYCLES_PER_DOT: u32 = 4;
/// PPU cycles per scanline.
pub const DOTS_PER_LINE: u32 = 456;
pub const LINES_PER_FRAME: u16 = 154;
pub const VBLANK_LINE: u8 = 144;

const OAM_SCAN_DOTS: u32 = 80;
const TRANSFER_DOTS: u32 = 172;

const STAT_MODE_MASK: u8 = 0x03;
const STAT_COINCIDENCE: u8 = 0x04;
const STAT_LYC_INTERRUPT: u8 = 0x40;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        const OBJ_TALL = 0x04;
        const BG_MAP_HIGH = 0x08;
        /// Set: tiles at 0x8000 indexed unsigned. Clear: 0x9000 signed.
        const TILE_DATA_LOW = 0x10;
        const WINDOW_ENABLE = 0x20;
        const WINDOW_MAP_HIGH = 0x40;
        const LCD_ENABLE = 0x80;
    }
}

/// Scanline renderer and LY sequencer.
///
/// Lines are rendered whole when they end, in BG, window, sprite order.
/// Pixels are 0 or 1 (the low tile bitplane); there is no palette.
#[derive(Clone, Debug)]
pub struct Ppu {
    /// CPU cycles not yet worth a full PPU cycle.
    pending: u32,
    /// PPU cycles into the current line.
    dot: u32,
    frame_buffer: Vec<u8>,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            pending: 0,
            dot: 0,
            frame_buffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            frames: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pending = 0;
        self.dot = 0;
        self.frame_buffer.fill(0);
        self.frames = 0;
    }

    /// 160x144 pixels, row-major, one byte per pixel.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// Number of times LY has entered V-Blank.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn step(&mut self, memory: &mut MemoryBus, cycles: u32) {
        self.pending += cycles;
        while self.pending >= CPU_CYCLES_PER_DOT {
            self.pending -= CPU_CYCLES_PER_DOT;
            self.tick(memory);
        }
    }

    /// A write to LY restarts the current frame at line 0.
    pub(crate) fn reset_line(&mut self, memory: &mut MemoryBus) {
        self.dot = 0;
        memory.write_byte(LY, 0);
        Self::compare_lyc(memory);
        self.update_mode(memory);
    }

    fn tick(&mut self, memory: &mut MemoryBus) {
        self.dot += 1;
        if self.dot >= DOTS_PER_LINE {
            self.dot = 0;
            self.finish_line(memory);
        }
        self.update_mode(memory);
    }

    fn finish_line(&mut self, memory: &mut MemoryBus) {
        let ly = memory.read_byte(LY);
        let lcdc = LcdControl::from_bits_retain(memory.read_byte(LCDC));

        if ly < VBLANK_LINE && lcdc.contains(LcdControl::LCD_ENABLE) {
            self.render_line(memory, lcdc, ly);
        }

        let next = ((ly as u16 + 1) % LINES_PER_FRAME) as u8;
        memory.write_byte(LY, next);

        if next == VBLANK_LINE {
            memory.request_interrupt(InterruptFlags::VBLANK);
            self.frames += 1;
            log::debug!("GB PPU: VBlank, frame {}", self.frames);
        }

        Self::compare_lyc(memory);
    }

    fn compare_lyc(memory: &mut MemoryBus) {
        let stat = memory.read_byte(STAT);
        if memory.read_byte(LY) == memory.read_byte(LYC) {
            memory.write_byte(STAT, stat | STAT_COINCIDENCE);
            if stat & STAT_LYC_INTERRUPT != 0 {
                memory.request_interrupt(InterruptFlags::LCD_STAT);
            }
        } else {
            memory.write_byte(STAT, stat & !STAT_COINCIDENCE);
        }
    }

    fn update_mode(&self, memory: &mut MemoryBus) {
        let mode = if memory.read_byte(LY) >= VBLANK_LINE {
            1
        } else if self.dot < OAM_SCAN_DOTS {
            2
        } else if self.dot < OAM_SCAN_DOTS + TRANSFER_DOTS {
            3
        } else {
            0
        };

        let stat = memory.read_byte(STAT);
        if stat & STAT_MODE_MASK != mode {
            memory.write_byte(STAT, (stat & !STAT_MODE_MASK) | mode);
        }
    }
}

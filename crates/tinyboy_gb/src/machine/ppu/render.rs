use super::{LcdControl, Ppu};
use crate::io::{SCX, SCY, WX, WY};
use crate::machine::MemoryBus;
use crate::SCREEN_WIDTH;

const TILE_BYTES: u16 = 16;
const MAP_LOW: u16 = 0x9800;
const MAP_HIGH: u16 = 0x9C00;
const OAM_BASE: u16 = 0xFE00;
const SPRITE_COUNT: u16 = 40;

const ATTR_FLIP_X: u8 = 0x20;
const ATTR_FLIP_Y: u8 = 0x40;

impl Ppu {
    pub(super) fn render_line(&mut self, memory: &MemoryBus, lcdc: LcdControl, ly: u8) {
        if lcdc.contains(LcdControl::BG_ENABLE) {
            self.render_background(memory, lcdc, ly);
        }
        if lcdc.contains(LcdControl::WINDOW_ENABLE) {
            self.render_window(memory, lcdc, ly);
        }
        if lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(memory, lcdc, ly);
        }
    }

    fn render_background(&mut self, memory: &MemoryBus, lcdc: LcdControl, ly: u8) {
        let scx = memory.read_byte(SCX);
        let scy = memory.read_byte(SCY);
        let map = if lcdc.contains(LcdControl::BG_MAP_HIGH) {
            MAP_HIGH
        } else {
            MAP_LOW
        };

        let y = ly.wrapping_add(scy);
        for x in 0..SCREEN_WIDTH {
            let bg_x = (x as u8).wrapping_add(scx);
            let pixel = map_pixel(memory, lcdc, map, bg_x, y);
            self.put_pixel(x, ly, pixel);
        }
    }

    fn render_window(&mut self, memory: &MemoryBus, lcdc: LcdControl, ly: u8) {
        let wy = memory.read_byte(WY);
        // WX is offset by 7 and may place the window's left edge off-screen.
        let wx = memory.read_byte(WX) as i16 - 7;
        if ly < wy || wx >= SCREEN_WIDTH as i16 {
            return;
        }

        let map = if lcdc.contains(LcdControl::WINDOW_MAP_HIGH) {
            MAP_HIGH
        } else {
            MAP_LOW
        };

        let y = ly - wy;
        for x in wx.max(0)..SCREEN_WIDTH as i16 {
            let win_x = (x - wx) as u8;
            let pixel = map_pixel(memory, lcdc, map, win_x, y);
            self.put_pixel(x as usize, ly, pixel);
        }
    }

    fn render_sprites(&mut self, memory: &MemoryBus, lcdc: LcdControl, ly: u8) {
        let height: i16 = if lcdc.contains(LcdControl::OBJ_TALL) {
            16
        } else {
            8
        };

        for index in 0..SPRITE_COUNT {
            let entry = OAM_BASE + index * 4;
            let top = memory.read_byte(entry) as i16 - 16;
            let left = memory.read_byte(entry + 1) as i16 - 8;
            let mut tile = memory.read_byte(entry + 2);
            let attrs = memory.read_byte(entry + 3);

            let mut row = ly as i16 - top;
            if !(0..height).contains(&row) {
                continue;
            }
            if attrs & ATTR_FLIP_Y != 0 {
                row = height - 1 - row;
            }
            if height == 16 {
                tile &= 0xFE;
            }

            // Sprites always use unsigned addressing from 0x8000.
            let tile_addr = 0x8000 + tile as u16 * TILE_BYTES;
            for col in 0..8 {
                let x = left + col;
                if !(0..SCREEN_WIDTH as i16).contains(&x) {
                    continue;
                }
                let bit = if attrs & ATTR_FLIP_X != 0 { 7 - col } else { col };
                let pixel = tile_pixel(memory, tile_addr, row as u16, bit as u8);
                if pixel == 0 {
                    continue;
                }
                self.put_pixel(x as usize, ly, pixel);
            }
        }
    }

    fn put_pixel(&mut self, x: usize, y: u8, pixel: u8) {
        self.frame_buffer[y as usize * SCREEN_WIDTH + x] = pixel;
    }
}

/// Pixel at (`x`, `y`) of the 256x256 plane described by the tile map at `map`.
fn map_pixel(memory: &MemoryBus, lcdc: LcdControl, map: u16, x: u8, y: u8) -> u8 {
    let map_addr = map + (y as u16 / 8) * 32 + x as u16 / 8;
    let tile_id = memory.read_byte(map_addr);
    let tile_addr = tile_data_address(lcdc, tile_id);
    tile_pixel(memory, tile_addr, (y % 8) as u16, x % 8)
}

fn tile_data_address(lcdc: LcdControl, tile_id: u8) -> u16 {
    if lcdc.contains(LcdControl::TILE_DATA_LOW) {
        0x8000 + tile_id as u16 * TILE_BYTES
    } else {
        0x9000u16.wrapping_add_signed(tile_id as i8 as i16 * TILE_BYTES as i16)
    }
}

/// Colour index from the low bitplane only.
fn tile_pixel(memory: &MemoryBus, tile_addr: u16, row: u16, col: u8) -> u8 {
    let low = memory.read_byte(tile_addr + row * 2);
    (low >> (7 - col)) & 0x01
}

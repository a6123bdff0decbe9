use super::*;
use crate::config::GameBoyConfig;
use crate::cpu::{Bus, InterruptFlags};
use crate::io::{
    DIV, DMA, IE, IF, LCDC, LY, LYC, NR12, NR13, NR14, NR30, NR33, NR34, P1, SCX, STAT, TAC, TIMA,
    TMA, WX, WY,
};
use crate::{CpuError, SCREEN_HEIGHT, SCREEN_WIDTH};

/// CPU cycles per scanline.
const LINE_CYCLES: u32 = 456 * 4;

fn cold_bus() -> GameBoyBus {
    GameBoyBus::new(&GameBoyConfig::builder().dmg_boot_state(false).build())
}

fn run(bus: &mut GameBoyBus, cycles: u32) {
    let mut left = cycles;
    while left > 0 {
        let chunk = left.min(4);
        bus.tick(chunk);
        left -= chunk;
    }
}

fn rom_with(at: usize, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[at..at + program.len()].copy_from_slice(program);
    rom
}

#[test]
fn regions_decode_per_memory_map() {
    assert_eq!(Region::decode(0x0000), Region::Rom(0));
    assert_eq!(Region::decode(0x7FFF), Region::Rom(0x7FFF));
    assert_eq!(Region::decode(0x8001), Region::Vram(1));
    assert_eq!(Region::decode(0xBFFF), Region::ExternalRam(0x1FFF));
    assert_eq!(Region::decode(0xC000), Region::WorkRam(0));
    assert_eq!(Region::decode(0xE000), Region::Unmapped);
    assert_eq!(Region::decode(0xFDFF), Region::Unmapped);
    assert_eq!(Region::decode(0xFE9F), Region::Oam(0x9F));
    assert_eq!(Region::decode(0xFEA0), Region::Unmapped);
    assert_eq!(Region::decode(0xFF0F), Region::Io(0x0F));
    assert_eq!(Region::decode(0xFF80), Region::HighRam(0));
    assert_eq!(Region::decode(0xFFFE), Region::HighRam(0x7E));
    assert_eq!(Region::decode(0xFFFF), Region::InterruptEnable);
}

#[test]
fn ram_regions_read_back_and_rom_is_read_only() {
    let mut memory = MemoryBus::new();
    memory.write_byte(0x8000, 0x12);
    memory.write_byte(0xA123, 0x34);
    memory.write_byte(0xC000, 0x56);
    memory.write_byte(0xFE00, 0x78);
    memory.write_byte(0xFF80, 0x9A);
    assert_eq!(memory.read_byte(0x8000), 0x12);
    assert_eq!(memory.read_byte(0xA123), 0x34);
    assert_eq!(memory.read_byte(0xC000), 0x56);
    assert_eq!(memory.read_byte(0xFE00), 0x78);
    assert_eq!(memory.read_byte(0xFF80), 0x9A);

    memory.load_rom(&[0x31, 0xFE, 0xFF]);
    memory.write_byte(0x0000, 0x00);
    assert_eq!(memory.read_bytes(0x0000, 3), vec![0x31, 0xFE, 0xFF]);
}

#[test]
fn unmapped_addresses_read_ff_and_drop_writes() {
    let mut memory = MemoryBus::new();
    for addr in [0xE000, 0xF123, 0xFDFF, 0xFEA0, 0xFEFF] {
        memory.write_byte(addr, 0x00);
        assert_eq!(memory.read_byte(addr), 0xFF, "addr {addr:#06x}");
    }
    // Echo RAM does not mirror work RAM.
    memory.write_byte(0xC010, 0x42);
    assert_eq!(memory.read_byte(0xE010), 0xFF);
}

#[test]
fn interrupt_enable_lives_at_ffff() {
    let mut memory = MemoryBus::new();
    memory.write_byte(IE, 0x1F);
    assert_eq!(memory.read_byte(0xFFFF), 0x1F);

    memory.request_interrupt(InterruptFlags::TIMER);
    memory.request_interrupt(InterruptFlags::VBLANK);
    assert_eq!(memory.read_byte(IF), 0x05);
    assert_eq!(
        memory.interrupt_flags(),
        InterruptFlags::TIMER | InterruptFlags::VBLANK
    );
}

#[test]
fn block_access_wraps_address_space() {
    let mut memory = MemoryBus::new();
    memory.write_bytes(0xFFFE, &[0x01, 0x02, 0x03]);
    assert_eq!(memory.read_byte(0xFFFE), 0x01);
    assert_eq!(memory.read_byte(0xFFFF), 0x02);
    assert_eq!(memory.read_bytes(0xFFFE, 3), vec![0x01, 0x02, 0x00]);
}

#[test]
fn oversized_rom_maps_first_32k() {
    let mut memory = MemoryBus::new();
    let rom: Vec<u8> = (0..0x9000u32).map(|i| (i >> 8) as u8).collect();
    assert_eq!(memory.load_rom(&rom), 0x8000);
    assert_eq!(memory.read_byte(0x7FFF), 0x7F);
    assert_eq!(memory.read_byte(0x8000), 0x00);
}

#[test]
fn dma_register_copies_into_oam() {
    let mut bus = cold_bus();
    for i in 0..0xA0u16 {
        bus.memory.write_byte(0xC000 + i, i as u8 ^ 0x5A);
    }
    bus.write8(DMA, 0xC0);

    assert_eq!(bus.read8(DMA), 0xC0);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read8(0xFE00 + i), i as u8 ^ 0x5A);
    }
    assert_eq!(bus.memory.oam().len(), 0xA0);
    assert_eq!(bus.memory.oam()[1], 0x5B);
}

#[test]
fn power_on_io_state() {
    let boot = GameBoyBus::default();
    assert_eq!(boot.memory.read_byte(P1), 0xFF);
    assert_eq!(boot.memory.read_byte(LCDC), 0x91);
    assert_eq!(boot.memory.read_byte(IF), 0x01);

    let cold = cold_bus();
    assert_eq!(cold.memory.read_byte(P1), 0xFF);
    assert_eq!(cold.memory.read_byte(LCDC), 0x00);
}

#[test]
fn divider_counts_every_256_cycles() {
    let mut bus = cold_bus();
    run(&mut bus, 256 * 3 + 100);
    assert_eq!(bus.read8(DIV), 3);

    // Writing DIV clears it and restarts the count.
    bus.write8(DIV, 0x55);
    assert_eq!(bus.read8(DIV), 0);
    run(&mut bus, 200);
    assert_eq!(bus.read8(DIV), 0);
    run(&mut bus, 56);
    assert_eq!(bus.read8(DIV), 1);
}

#[test]
fn tima_follows_selected_period() {
    for (tac, period) in [(0x04, 1024), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut bus = cold_bus();
        bus.write8(TAC, tac);
        let cycles = 5000;
        run(&mut bus, cycles);
        assert_eq!(
            bus.read8(TIMA) as u32,
            (cycles / period) % 256,
            "TAC {tac:#04x}"
        );
    }
}

#[test]
fn tima_overflow_reloads_tma_and_requests_timer() {
    let mut bus = cold_bus();
    bus.write8(TMA, 0xAB);
    bus.write8(TIMA, 0xFF);
    bus.write8(TAC, 0x05);

    run(&mut bus, 15);
    assert_eq!(bus.read8(TIMA), 0xFF);
    assert_eq!(bus.read8(IF) & InterruptFlags::TIMER.bits(), 0);

    run(&mut bus, 1);
    assert_eq!(bus.read8(TIMA), 0xAB);
    assert_ne!(bus.read8(IF) & InterruptFlags::TIMER.bits(), 0);
}

#[test]
fn one_long_tick_handles_every_timer_period() {
    let mut bus = cold_bus();
    bus.write8(TAC, 0x05);

    bus.tick(5000);

    // 312 increments: one wrap through TMA (0), then 56 more.
    assert_eq!(bus.read8(TIMA), 56);
    assert_eq!(bus.read8(DIV), 19);
    assert_ne!(bus.read8(IF) & InterruptFlags::TIMER.bits(), 0);
}

#[test]
fn one_long_tick_advances_many_lines() {
    let mut bus = cold_bus();

    bus.tick(LINE_CYCLES * 150);

    assert_eq!(bus.read8(LY), 150);
    assert_eq!(bus.ppu.frames(), 1);
    assert_ne!(bus.read8(IF) & InterruptFlags::VBLANK.bits(), 0);
}

#[test]
fn tima_idle_while_disabled() {
    let mut bus = cold_bus();
    bus.write8(TAC, 0x01);
    run(&mut bus, 4096);
    assert_eq!(bus.read8(TIMA), 0);
}

#[test]
fn ly_enters_vblank_after_one_line() {
    let mut bus = cold_bus();
    bus.memory.write_byte(LY, 143);

    run(&mut bus, LINE_CYCLES - 4);
    assert_eq!(bus.read8(LY), 143);
    assert_eq!(bus.read8(IF) & InterruptFlags::VBLANK.bits(), 0);

    run(&mut bus, 4);
    assert_eq!(bus.read8(LY), 144);
    assert_ne!(bus.read8(IF) & InterruptFlags::VBLANK.bits(), 0);
    assert_eq!(bus.read8(STAT) & 0x03, 1);
    assert_eq!(bus.ppu.frames(), 1);
}

#[test]
fn ly_wraps_after_line_153() {
    let mut bus = cold_bus();
    bus.memory.write_byte(LY, 153);
    run(&mut bus, LINE_CYCLES);
    assert_eq!(bus.read8(LY), 0);
}

#[test]
fn ly_write_restarts_frame() {
    let mut bus = cold_bus();
    run(&mut bus, LINE_CYCLES * 3 + 40);
    assert_eq!(bus.read8(LY), 3);

    bus.write8(LY, 0x77);
    assert_eq!(bus.read8(LY), 0);
    run(&mut bus, LINE_CYCLES - 4);
    assert_eq!(bus.read8(LY), 0);
    run(&mut bus, 4);
    assert_eq!(bus.read8(LY), 1);
}

#[test]
fn lyc_match_sets_coincidence_and_requests_stat() {
    let mut bus = cold_bus();
    bus.write8(STAT, 0x40);
    bus.write8(LYC, 2);

    run(&mut bus, LINE_CYCLES);
    assert_eq!(bus.read8(STAT) & 0x04, 0);
    assert_eq!(bus.read8(IF) & InterruptFlags::LCD_STAT.bits(), 0);

    run(&mut bus, LINE_CYCLES);
    assert_ne!(bus.read8(STAT) & 0x04, 0);
    assert_ne!(bus.read8(IF) & InterruptFlags::LCD_STAT.bits(), 0);

    run(&mut bus, LINE_CYCLES);
    assert_eq!(bus.read8(STAT) & 0x04, 0);
}

#[test]
fn stat_mode_tracks_line_position() {
    let mut bus = cold_bus();
    run(&mut bus, 4);
    assert_eq!(bus.read8(STAT) & 0x03, 2);
    run(&mut bus, 80 * 4);
    assert_eq!(bus.read8(STAT) & 0x03, 3);
    run(&mut bus, 172 * 4);
    assert_eq!(bus.read8(STAT) & 0x03, 0);

    // Mode bits cannot be written by the CPU.
    bus.write8(STAT, 0x43);
    assert_eq!(bus.read8(STAT) & 0x03, 0);
    assert_eq!(bus.read8(STAT) & 0x40, 0x40);
}

fn row(bus: &GameBoyBus, y: usize) -> &[u8] {
    &bus.ppu.frame_buffer()[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH]
}

#[test]
fn background_uses_unsigned_tile_data() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x91);
    // Tile 0: left half set on every row.
    for r in 0..8 {
        bus.write8(0x8000 + r * 2, 0xF0);
    }

    run(&mut bus, LINE_CYCLES);

    assert_eq!(bus.ppu.frame_buffer().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    assert_eq!(&row(&bus, 0)[..8], &[1, 1, 1, 1, 0, 0, 0, 0]);
    assert_eq!(&row(&bus, 0)[152..], &[1, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn background_scroll_x_shifts_pixels() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x91);
    bus.write8(SCX, 4);
    bus.write8(0x8000, 0xF0);

    run(&mut bus, LINE_CYCLES);

    assert_eq!(&row(&bus, 0)[..8], &[0, 0, 0, 0, 1, 1, 1, 1]);
}

#[test]
fn background_signed_tile_data() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x81);
    bus.write8(0x9800, 0xFF);
    // Tile -1 sits just below 0x9000.
    bus.write8(0x8FF0, 0x80);
    // Tile 0 at 0x9000 for the rest of the row.
    bus.write8(0x9000, 0x01);

    run(&mut bus, LINE_CYCLES);

    assert_eq!(&row(&bus, 0)[..8], &[1, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(&row(&bus, 0)[8..16], &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn window_draws_from_wx_minus_seven() {
    let mut bus = cold_bus();
    // LCD, window map 0x9C00, window, unsigned tiles, BG.
    bus.write8(LCDC, 0xF1);
    bus.write8(WY, 0);
    bus.write8(WX, 7 + 80);
    for i in 0..32 {
        bus.write8(0x9C00 + i, 1);
    }
    bus.write8(0x8010, 0xFF);

    run(&mut bus, LINE_CYCLES);

    assert!(row(&bus, 0)[..80].iter().all(|&p| p == 0));
    assert!(row(&bus, 0)[80..].iter().all(|&p| p == 1));
}

#[test]
fn window_with_wx_below_seven_clips_left_edge() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0xF1);
    bus.write8(WY, 0);
    bus.write8(WX, 3);
    bus.write8(0x9C00, 1);
    bus.write8(0x8010, 0xFF);

    run(&mut bus, LINE_CYCLES);

    // Window column 4 lands on screen column 0.
    assert_eq!(&row(&bus, 0)[..8], &[1, 1, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn window_below_wy_is_hidden() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0xF1);
    bus.write8(WY, 1);
    bus.write8(WX, 7);
    bus.write8(0x9C00, 1);
    bus.write8(0x8010, 0xFF);

    run(&mut bus, LINE_CYCLES);
    assert!(row(&bus, 0).iter().all(|&p| p == 0));

    run(&mut bus, LINE_CYCLES);
    assert_eq!(&row(&bus, 1)[..8], &[1; 8]);
}

#[test]
fn sprites_flip_and_treat_zero_as_transparent() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x93);
    // Background solid 1 through tile 0.
    for r in 0..8 {
        bus.write8(0x8000 + r * 2, 0xFF);
    }
    // Tile 2 row 0: two leftmost pixels.
    bus.write8(0x8020, 0xC0);
    // Sprite 0 at x=10: its colour-0 pixels must leave the background intact.
    bus.write8(0xFE00, 16);
    bus.write8(0xFE01, 8 + 10);
    bus.write8(0xFE02, 2);
    bus.write8(0xFE03, 0);

    run(&mut bus, LINE_CYCLES);
    assert!(row(&bus, 0).iter().all(|&p| p == 1));

    // Blank background and flip X.
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x93);
    bus.write8(0x8020, 0xC0);
    bus.write8(0xFE00, 16);
    bus.write8(0xFE01, 8 + 10);
    bus.write8(0xFE02, 2);
    bus.write8(0xFE03, 0x20);

    run(&mut bus, LINE_CYCLES);
    let line = row(&bus, 0);
    assert_eq!(&line[10..18], &[0, 0, 0, 0, 0, 0, 1, 1]);
    assert!(line[..10].iter().all(|&p| p == 0));
}

#[test]
fn sprites_clip_at_left_and_top_edges() {
    // X=4: the left half of the sprite is off-screen.
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x92);
    bus.write8(0x8020, 0xFF);
    bus.write8(0xFE00, 16);
    bus.write8(0xFE01, 4);
    bus.write8(0xFE02, 2);

    run(&mut bus, LINE_CYCLES);
    assert_eq!(&row(&bus, 0)[..8], &[1, 1, 1, 1, 0, 0, 0, 0]);

    // Y=12: screen line 0 shows sprite row 4.
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x92);
    bus.write8(0x8030, 0xFF);
    bus.write8(0x8038, 0x80);
    bus.write8(0xFE00, 12);
    bus.write8(0xFE01, 8);
    bus.write8(0xFE02, 3);

    run(&mut bus, LINE_CYCLES);
    assert_eq!(&row(&bus, 0)[..8], &[1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn tall_sprites_span_two_tiles_and_flip_y() {
    let mut bus = cold_bus();
    // LCD, 8x16 sprites, sprites on, BG off.
    bus.write8(LCDC, 0x86);
    // Tile 4 row 0 and tile 5 row 7 (row 15 of the pair).
    bus.write8(0x8040, 0x80);
    bus.write8(0x805E, 0x01);
    bus.write8(0xFE00, 16);
    bus.write8(0xFE01, 8);
    // Odd tile index is rounded down in 8x16 mode.
    bus.write8(0xFE02, 5);
    bus.write8(0xFE03, 0x40);

    run(&mut bus, LINE_CYCLES);
    // Flipped: line 0 shows row 15.
    assert_eq!(&row(&bus, 0)[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn lcd_off_skips_rendering_but_ly_advances() {
    let mut bus = cold_bus();
    bus.write8(LCDC, 0x11);
    bus.write8(0x8000, 0xFF);

    run(&mut bus, LINE_CYCLES);
    assert_eq!(bus.read8(LY), 1);
    assert!(row(&bus, 0).iter().all(|&p| p == 0));
}

#[test]
fn joypad_press_and_release() {
    let mut memory = MemoryBus::new();
    memory.press_button(Button::A);
    assert_eq!(memory.read_byte(P1), 0xEF);
    assert!(memory.is_pressed(Button::A));
    assert_ne!(memory.read_byte(IF) & InterruptFlags::JOYPAD.bits(), 0);

    memory.press_button(Button::Start);
    assert_eq!(memory.read_byte(P1), 0x6F);

    memory.write_byte(IF, 0);
    memory.release_button(Button::A);
    memory.release_button(Button::Start);
    assert_eq!(memory.read_byte(P1), 0xFF);
    assert_eq!(memory.read_byte(IF), 0);
}

#[test]
fn button_masks_cover_p1() {
    let all = Button::ALL.iter().fold(0u8, |acc, b| acc | b.mask());
    assert_eq!(all, 0xFF);
    assert_eq!(Button::Right.mask(), 0x01);
    assert_eq!(Button::Down.mask(), 0x08);
}

#[test]
fn apu_latches_channel_registers_every_1024_cycles() {
    let mut bus = cold_bus();
    bus.write8(NR13, 0x34);
    bus.write8(NR14, 0x85);
    bus.write8(NR12, 0xF3);

    run(&mut bus, 1020);
    assert_eq!(bus.apu.channel(0), ChannelSnapshot::default());

    run(&mut bus, 4);
    assert_eq!(
        bus.apu.channel(0),
        ChannelSnapshot {
            frequency: 0x534,
            volume: 0xF3
        }
    );
    assert_eq!(bus.apu.channel(7), ChannelSnapshot::default());
}

#[test]
fn apu_wave_channel_waits_for_dac() {
    let mut bus = cold_bus();
    bus.write8(NR33, 0x10);
    bus.write8(NR34, 0x02);

    run(&mut bus, 2048);
    assert_eq!(bus.apu.channel(2).frequency, 0);

    bus.write8(NR30, 0x80);
    run(&mut bus, 1024);
    assert_eq!(bus.apu.channel(2).frequency, 0x210);
}

#[test]
fn gameboy_runs_a_frame() {
    // JR -2 at the entry point.
    let mut gb = GameBoy::new();
    gb.load_rom(&rom_with(0x0100, &[0x18, 0xFE]));

    let cycles = gb.step_frame().unwrap();
    assert!((144 * LINE_CYCLES as u64..144 * LINE_CYCLES as u64 + 12).contains(&cycles));
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.frame_buffer().len(), SCREEN_WIDTH * SCREEN_HEIGHT);

    let next = gb.step_frame().unwrap();
    assert!(next >= 154 * LINE_CYCLES as u64 - 12);
}

#[test]
fn gameboy_surfaces_unimplemented_opcode() {
    let mut gb = GameBoy::new();
    gb.load_rom(&rom_with(0x0100, &[0x00, 0xED]));

    let err = gb.step_frame().unwrap_err();
    assert_eq!(
        err,
        CpuError::UnimplementedOpcode {
            opcode: 0xED,
            pc: 0x0101
        }
    );
    assert_eq!(gb.cycles(), 4);
}

#[test]
fn gameboy_dispatches_vblank_handler() {
    // EI ; JR -2. Handler at 0x40: INC B ; RETI.
    let mut rom = rom_with(0x0100, &[0xFB, 0x18, 0xFE]);
    rom[0x40] = 0x04;
    rom[0x41] = 0xD9;
    let mut gb = GameBoy::new();
    gb.load_rom(&rom);
    gb.bus.write8(IE, InterruptFlags::VBLANK.bits());

    // Boot state leaves V-Blank pending, so EI dispatches at once.
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0040);
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.b, 0x01);
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0101);
    assert!(gb.cpu.ime);
}

#[test]
fn gameboy_reset_keeps_cartridge() {
    let mut gb = GameBoy::new();
    gb.load_rom(&rom_with(0x0100, &[0x3C]));
    gb.bus.write8(0xC000, 0x99);
    gb.step().unwrap();

    gb.reset();
    assert_eq!(gb.cpu.regs.pc, gb.config().entry_point);
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.cycles(), 0);
    assert_eq!(gb.bus.read8(0x0100), 0x3C);
    assert_eq!(gb.bus.read8(0xC000), 0x00);
}

#[test]
fn gameboy_buttons_reach_p1() {
    let mut gb = GameBoy::new();
    gb.press_button(Button::Left);
    assert_eq!(gb.bus.read8(P1), 0xFD);
    gb.release_button(Button::Left);
    assert_eq!(gb.bus.read8(P1), 0xFF);
    assert_eq!(gb.apu().channels().len(), 4);
}

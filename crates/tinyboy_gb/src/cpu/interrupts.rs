use bitflags::bitflags;

use super::{Bus, Cpu};
use crate::io::{IE, IF};

bitflags! {
    /// Interrupt sources as laid out in both IE (0xFFFF) and IF (0xFF0F).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// A single interrupt source, ordered from highest to lowest priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// All sources in dispatch priority order.
    pub const PRIORITY: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub const fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Fixed handler address.
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::LcdStat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Serial => 0x0058,
            Interrupt::Joypad => 0x0060,
        }
    }

    /// Highest-priority source present in `pending`.
    pub fn highest(pending: InterruptFlags) -> Option<Interrupt> {
        Self::PRIORITY
            .into_iter()
            .find(|source| pending.contains(source.flag()))
    }
}

impl Cpu {
    /// Sources that are both enabled (IE) and requested (IF).
    pub fn pending_interrupts<B: Bus>(&self, bus: &mut B) -> InterruptFlags {
        let ie = InterruptFlags::from_bits_truncate(bus.read8(IE));
        let iflags = InterruptFlags::from_bits_truncate(bus.read8(IF));
        ie & iflags
    }

    /// Dispatch at most one pending interrupt.
    ///
    /// Does nothing while IME is clear. Otherwise the highest-priority
    /// source in `IE & IF` is serviced: IME and HALT are cleared, PC is
    /// pushed, PC jumps to the vector and only that source's IF bit is
    /// acknowledged. IME stays clear until the program sets it again
    /// (`EI` or `RETI`).
    pub fn check_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<Interrupt> {
        if !self.ime {
            return None;
        }

        let interrupt = Interrupt::highest(self.pending_interrupts(bus))?;

        self.ime = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();

        let remaining = bus.read8(IF) & !interrupt.flag().bits();
        bus.write8(IF, remaining);

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} from pc=0x{:04X} sp=0x{:04X} IF=0x{:02X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
            remaining,
        );

        Some(interrupt)
    }
}

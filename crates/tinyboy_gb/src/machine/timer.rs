use super::MemoryBus;
use crate::cpu::InterruptFlags;
use crate::io::{DIV, TAC, TIMA, TMA};

/// CPU cycles per DIV increment.
pub const DIV_PERIOD: u32 = 256;

/// CPU cycles per TIMA increment, indexed by TAC bits 0-1.
pub const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

const TAC_ENABLE: u8 = 0x04;

/// DIV/TIMA counters.
///
/// Both registers live in memory; this only tracks the cycles that have not
/// yet amounted to a full increment.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    div_cycles: u32,
    tima_cycles: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// A write to DIV restarts the divider from zero.
    pub(crate) fn reset_divider(&mut self) {
        self.div_cycles = 0;
    }

    pub fn step(&mut self, memory: &mut MemoryBus, cycles: u32) {
        self.div_cycles += cycles;
        while self.div_cycles >= DIV_PERIOD {
            self.div_cycles -= DIV_PERIOD;
            let div = memory.read_byte(DIV).wrapping_add(1);
            memory.write_byte(DIV, div);
        }

        let tac = memory.read_byte(TAC);
        if tac & TAC_ENABLE == 0 {
            return;
        }

        let period = TIMA_PERIODS[(tac & 0x03) as usize];
        self.tima_cycles += cycles;
        while self.tima_cycles >= period {
            self.tima_cycles -= period;
            Self::increment_tima(memory);
        }
    }

    fn increment_tima(memory: &mut MemoryBus) {
        let (tima, overflow) = memory.read_byte(TIMA).overflowing_add(1);
        if overflow {
            let tma = memory.read_byte(TMA);
            memory.write_byte(TIMA, tma);
            memory.request_interrupt(InterruptFlags::TIMER);
            log::trace!("GB timer: TIMA overflow, reload 0x{tma:02X}");
        } else {
            memory.write_byte(TIMA, tima);
        }
    }
}

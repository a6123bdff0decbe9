use super::MemoryBus;
use crate::io::{NR12, NR13, NR14, NR22, NR23, NR24, NR30, NR32, NR33, NR34, NR42, NR43};

/// CPU cycles between two register snapshots of a channel.
pub const SNAPSHOT_PERIOD: u32 = 1024;

const NR30_DAC_ON: u8 = 0x80;

/// Frequency and volume registers of one channel as last latched.
///
/// Nothing is synthesized: this is the state a mixer would read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelSnapshot {
    /// 11-bit period for channels 1-3, raw NR43 for the noise channel.
    pub frequency: u16,
    /// Raw envelope/level register.
    pub volume: u8,
}

/// Register source of one channel.
struct ChannelRegs {
    freq_lo: u16,
    freq_hi: Option<u16>,
    volume: u16,
}

const CHANNELS: [ChannelRegs; 4] = [
    ChannelRegs {
        freq_lo: NR13,
        freq_hi: Some(NR14),
        volume: NR12,
    },
    ChannelRegs {
        freq_lo: NR23,
        freq_hi: Some(NR24),
        volume: NR22,
    },
    ChannelRegs {
        freq_lo: NR33,
        freq_hi: Some(NR34),
        volume: NR32,
    },
    ChannelRegs {
        freq_lo: NR43,
        freq_hi: None,
        volume: NR42,
    },
];

#[derive(Clone, Debug, Default)]
pub struct Apu {
    counters: [u32; 4],
    channels: [ChannelSnapshot; 4],
}

impl Apu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot of channel `index` (0-3). Out-of-range indices yield a
    /// silent channel.
    pub fn channel(&self, index: usize) -> ChannelSnapshot {
        self.channels.get(index).copied().unwrap_or_default()
    }

    pub fn channels(&self) -> &[ChannelSnapshot; 4] {
        &self.channels
    }

    pub fn step(&mut self, memory: &MemoryBus, cycles: u32) {
        for (index, regs) in CHANNELS.iter().enumerate() {
            // The wave channel only runs while its DAC is on.
            if index == 2 && memory.read_byte(NR30) & NR30_DAC_ON == 0 {
                continue;
            }

            self.counters[index] += cycles;
            while self.counters[index] >= SNAPSHOT_PERIOD {
                self.counters[index] -= SNAPSHOT_PERIOD;
                self.channels[index] = Self::latch(memory, regs);
            }
        }
    }

    fn latch(memory: &MemoryBus, regs: &ChannelRegs) -> ChannelSnapshot {
        let lo = memory.read_byte(regs.freq_lo) as u16;
        let frequency = match regs.freq_hi {
            Some(hi) => ((memory.read_byte(hi) as u16 & 0x07) << 8) | lo,
            None => lo,
        };
        ChannelSnapshot {
            frequency,
            volume: memory.read_byte(regs.volume),
        }
    }
}

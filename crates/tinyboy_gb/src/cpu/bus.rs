/// Abstraction over everything the CPU can address.
///
/// The CPU only ever talks to the machine through this trait: byte reads and
/// writes, plus `tick`, which it calls once per executed instruction with the
/// instruction's full cycle cost.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance bus-side peripherals by `cycles` CPU clock cycles.
    ///
    /// System buses override this to drive the timer, PPU and APU with the
    /// same cycle count so all of them stay on one clock. The default does
    /// nothing, which is what a plain RAM test bus wants.
    fn tick(&mut self, _cycles: u32) {}
}

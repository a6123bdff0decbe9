use super::MemoryBus;
use crate::cpu::InterruptFlags;
use crate::io::P1;

/// Joypad buttons with their bit in the active-low P1 mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    pub const fn mask(self) -> u8 {
        match self {
            Button::Right => 0x01,
            Button::Left => 0x02,
            Button::Up => 0x04,
            Button::Down => 0x08,
            Button::A => 0x10,
            Button::B => 0x20,
            Button::Select => 0x40,
            Button::Start => 0x80,
        }
    }
}

impl MemoryBus {
    /// Pull the button's P1 bit low and request the joypad interrupt.
    pub fn press_button(&mut self, button: Button) {
        let p1 = self.read_byte(P1) & !button.mask();
        self.write_byte(P1, p1);
        self.request_interrupt(InterruptFlags::JOYPAD);
    }

    pub fn release_button(&mut self, button: Button) {
        let p1 = self.read_byte(P1) | button.mask();
        self.write_byte(P1, p1);
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.read_byte(P1) & button.mask() == 0
    }
}

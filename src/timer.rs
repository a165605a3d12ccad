/// The status reported by a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The sound timer ran out
    Ok,
    /// The sound timer is still running, the host should play a tone
    SoundOn,
}

pub trait Timed {
    /// Will create a new timer with the given value.
    fn new(value: u8) -> Self;

    /// Will set the value from which the timer shall count down from.
    fn set_value(&mut self, value: u8);

    /// Will get the value that the counter is currently at.
    fn get_value(&self) -> u8;

    /// Counts down by one, stopping at zero.
    fn tick(&mut self);
}

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given.
///
/// There is no clock inside, the host has to tick it at 60Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timed for Timer {
    fn new(value: u8) -> Self {
        Self { value }
    }

    fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    fn get_value(&self) -> u8 {
        self.value
    }

    fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// The delay and sound timer pair of the chip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub delay: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub sound: Timer,
}

impl Timers {
    /// Will count both timers down and report if the sound is still on afterwards.
    pub fn tick(&mut self) -> TickStatus {
        self.delay.tick();
        self.sound.tick();

        if self.sound.get_value() > 0 {
            TickStatus::SoundOn
        } else {
            TickStatus::Ok
        }
    }
}

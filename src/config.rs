//! The run configuration of the virtual machine.
use std::{fmt, str::FromStr};

use crate::{definitions::timer, ConfigError};

/// The instruction clock, given as the amount of instructions per second.
///
/// The host runs a burst of [`steps_per_frame`](ClockSpeed::steps_per_frame) instructions for
/// every 60Hz frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockSpeed {
    /// A single instruction per frame
    Hz60,
    #[default]
    Hz480,
    Hz1020,
}

impl ClockSpeed {
    /// # Example
    /// ```rust
    /// # use chip::config::ClockSpeed;
    /// assert_eq!(ClockSpeed::Hz60.steps_per_frame(), 1);
    /// assert_eq!(ClockSpeed::Hz480.steps_per_frame(), 8);
    /// assert_eq!(ClockSpeed::Hz1020.steps_per_frame(), 17);
    /// ```
    pub fn steps_per_frame(&self) -> usize {
        (self.hertz() / timer::HERTZ) as usize
    }

    pub fn hertz(&self) -> u32 {
        match self {
            ClockSpeed::Hz60 => 60,
            ClockSpeed::Hz480 => 480,
            ClockSpeed::Hz1020 => 1020,
        }
    }
}

impl fmt::Display for ClockSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hertz())
    }
}

/// Accepts the plain number as well as a `hz` suffix, `480` and `480Hz` are the same.
impl FromStr for ClockSpeed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let value = lower.strip_suffix("hz").unwrap_or(&lower);
        match value {
            "60" => Ok(ClockSpeed::Hz60),
            "480" => Ok(ClockSpeed::Hz480),
            "1020" => Ok(ClockSpeed::Hz1020),
            _ => Err(ConfigError::UnknownClockSpeed(s.to_string())),
        }
    }
}

/// How a single run of the virtual machine is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub clock: ClockSpeed,
    /// Writes every executed instruction to the `chip::trace` log target
    pub trace: bool,
    /// A fixed seed makes `CXKK` reproducible, without one the os randomness is used
    pub seed: Option<u64>,
    /// The amount of frames to run, without a limit the run only ends on a halt
    pub frames: Option<u32>,
}

impl Config {
    pub fn steps_per_frame(&self) -> usize {
        self.clock.steps_per_frame()
    }
}

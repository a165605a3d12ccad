use crate::{
    chip8::ChipSet,
    config::Config,
    devices::{self, DisplayCommands, KeyboardCommands},
    opcode::Operation,
    timer::TickStatus,
    ProcessError,
};

/// What happened during a single 60Hz frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The amount of instructions executed
    pub steps: usize,
    /// The operation reported by the last executed instruction
    pub operation: Operation,
    /// The sound status after the timers ticked
    pub sound: TickStatus,
}

impl FrameReport {
    pub fn halted(&self) -> bool {
        self.operation == Operation::Halt
    }
}

/// Will run a single frame on the chip.
///
/// The frame is made up of a burst of `steps` instructions, a timer tick, reading the keyboard
/// and, if the display changed, rendering it. The burst stops early if the chip waits for a key
/// or halted.
pub fn run_frame<D, K>(
    chip: &mut ChipSet,
    display: &mut D,
    keyboard: &K,
    steps: usize,
) -> Result<FrameReport, ProcessError>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    let mut executed = 0;
    let mut operation = Operation::None;

    while executed < steps {
        operation = chip.step()?;
        executed += 1;

        if matches!(operation, Operation::Wait | Operation::Halt) {
            break;
        }
    }

    let sound = chip.tick_60hz();
    chip.set_keys(devices::key_mask(&keyboard.get_keyboard()));

    if chip.redraw_needed() {
        /* draw the screen */
        display.display(chip.get_display());
        chip.redraw_ack();
    }

    Ok(FrameReport {
        steps: executed,
        operation,
        sound,
    })
}

/// Will run frames until the configured frame count is reached or the chip halts.
///
/// Returns the report of the last frame, `None` if no frame ran.
pub fn run<D, K>(
    chip: &mut ChipSet,
    display: &mut D,
    keyboard: &K,
    config: &Config,
) -> Result<Option<FrameReport>, ProcessError>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    let steps = config.steps_per_frame();
    let mut last = None;
    let mut frame: u32 = 0;

    while config.frames.map_or(true, |frames| frame < frames) {
        let report = run_frame(chip, display, keyboard, steps)?;
        frame += 1;
        last = Some(report);

        if report.halted() {
            log::info!("chip halted after {} frames", frame);
            break;
        }
    }

    Ok(last)
}

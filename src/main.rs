use std::error::Error;

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use chip::{
    chip8::ChipSet,
    config::{ClockSpeed, Config},
    definitions::{display, keyboard},
    devices::{self, DisplayCommands, KeyboardCommands},
    resources::Rom,
    run,
    timer::TickStatus,
};

#[derive(Parser)]
#[command(name = "chip8")]
#[command(about = "Runs a chip8 rom headless and prints the final machine state")]
struct Args {
    #[arg(help = "The rom file to run, `archive.zip:NAME` selects a rom from a zip archive")]
    rom: String,

    #[arg(long, default_value_t = ClockSpeed::Hz480, help = "Instructions per second: 60, 480 or 1020")]
    clock: ClockSpeed,

    #[arg(long, help = "The amount of 60Hz frames to run, runs until the rom halts if not set")]
    frames: Option<u32>,

    #[arg(long, help = "Log every executed instruction")]
    trace: bool,

    #[arg(long, help = "Seed for the random numbers, makes runs reproducible")]
    seed: Option<u64>,

    #[arg(long, default_value = "", help = "Host keys held down for the whole run, e.g. `1q`")]
    keys: String,

    #[arg(long, default_value_t = LevelFilter::Warn, help = "off, error, warn, info, debug or trace")]
    log_level: LevelFilter,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            clock: self.clock,
            trace: self.trace,
            seed: self.seed,
            frames: self.frames,
        }
    }
}

/// Counts the frames that had to be redrawn.
#[derive(Default)]
struct HeadlessDisplay {
    redraws: usize,
}

impl DisplayCommands for HeadlessDisplay {
    fn display(&mut self, _pixels: &[[bool; display::WIDTH]]) {
        self.redraws += 1;
    }
}

/// A keypad with the same keys held for the whole run.
struct HeldKeys {
    keys: [bool; keyboard::SIZE],
}

impl HeldKeys {
    fn new(keys: &str) -> Result<Self, String> {
        let mut held = [false; keyboard::SIZE];
        for key in keys.chars() {
            let index = devices::key_index(key).ok_or_else(|| format!("Unknown key '{}'.", key))?;
            held[index] = true;
        }
        Ok(Self { keys: held })
    }
}

impl KeyboardCommands for HeldKeys {
    fn get_keyboard(&self) -> [bool; keyboard::SIZE] {
        self.keys
    }
}

fn init_logger(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    if let Err(err) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("unable to setup the logger: {}", err);
    }
}

fn execute(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.config();
    let rom = Rom::open(&args.rom)?;
    let keys = HeldKeys::new(&args.keys)?;

    let mut chip = ChipSet::from_config(&config);
    chip.load_rom(&rom)?;
    log::info!(
        "running '{}' at {}Hz, {} steps per frame",
        rom.get_name(),
        config.clock,
        config.steps_per_frame()
    );

    let mut display = HeadlessDisplay::default();
    let report = match run(&mut chip, &mut display, &keys, &config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", chip.dump_state());
            return Err(err.into());
        }
    };

    println!("{}", chip.dump_state());
    println!("{}", chip.dump_display());

    if let Some(report) = report {
        log::info!(
            "{} redraws, last frame ran {} steps",
            display.redraws,
            report.steps
        );
        if report.sound == TickStatus::SoundOn {
            log::info!("sound still on");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.trace {
        args.log_level.max(LevelFilter::Info)
    } else {
        args.log_level
    };
    init_logger(level);

    if let Err(err) = execute(&args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

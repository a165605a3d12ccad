use chip::{
    chip8::ChipSet,
    config::{ClockSpeed, Config},
    resources::Rom,
};
use criterion::{criterion_group, criterion_main, Criterion};

const ROM_NAME: &str = "BENCH";

/// Draws the font glyphs over and over again, `V1` walks through the glyphs and
/// the loop never halts.
const PROGRAM: [u16; 9] = [
    0x00E0, // CLS
    0xF129, // LD F, V1
    0xD015, // DRW V0, V1, 5
    0x7101, // ADD V1, 0x01
    0x7006, // ADD V0, 0x06
    0x8214, // ADD V2, V1
    0xA300, // LD I, 0x300
    0xF233, // LD B, V2
    0x1202, // JP 0x202
];

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    let data: Vec<u8> = PROGRAM.iter().flat_map(|op| op.to_be_bytes()).collect();
    Rom::new(ROM_NAME, data)
});

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    let config = Config {
        clock: ClockSpeed::Hz1020,
        seed: Some(0xC8),
        ..Config::default()
    };
    let mut chip = ChipSet::from_config(&config);
    chip.load_rom(&BASE_ROM)
        .expect("The bench rom has to fit into memory.");
    chip
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    let steps = ClockSpeed::Hz1020.steps_per_frame();
    c.bench_function("step_bench", |b| {
        b.iter(|| {
            for _ in 0..steps {
                chip.step().expect("The bench rom only has valid instructions.");
            }
            chip.tick_60hz();
        });
    });
}

pub fn display_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    for _ in 0..64 {
        chip.step().expect("The bench rom only has valid instructions.");
    }
    c.bench_function("display_bench", |b| {
        b.iter(|| chip.dump_display());
    });
}

criterion_group!(benches, print_bench, step_bench, display_bench);
criterion_main!(benches);

use {
    crate::{
        config::Config,
        definitions::{cpu, display, memory},
        devices::{Display, Keyboard},
        opcode::{
            self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep,
        },
        resources::Rom,
        timer::{TickStatus, Timed, Timers},
        ProcessError, StackError,
    },
    rand::{
        rngs::{OsRng, StdRng},
        RngCore, SeedableRng,
    },
};

#[cfg_attr(test, mockall::automock)]
/// The source of the random bytes used by `CXKK`.
pub trait Randomizer {
    fn random_byte(&mut self) -> u8;
}

impl Randomizer for OsRng {
    fn random_byte(&mut self) -> u8 {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.fill_bytes(&mut rand);
        rand[0]
    }
}

impl Randomizer for StdRng {
    fn random_byte(&mut self) -> u8 {
        let mut rand: [u8; 1] = [0];
        self.fill_bytes(&mut rand);
        rand[0]
    }
}

/// The most recently fetched instruction, kept for tracing and debugging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LastInstruction {
    /// The fetched opcode
    pub opcode: Opcode,
    /// Where the opcode was fetched from
    pub pc: u16,
    /// The decoded instruction, `None` if the opcode is invalid
    pub instruction: Option<Instruction>,
}

impl LastInstruction {
    /// The assembler mnemonic, invalid opcodes are shown as a data word.
    pub fn mnemonic(&self) -> String {
        match self.instruction {
            Some(instruction) => instruction.to_string(),
            None => format!("DW {:#06X}", self.opcode),
        }
    }
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Free, historically the interpreter
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8; memory::SIZE]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: [u16; cpu::stack::SIZE],
    /// Points at the next free stack entry
    pub(super) stack_pointer: u8,
    /// The delay and the sound timer, both count down at 60 hertz, until they reach 0.
    pub(super) timers: Timers,
    pub(super) display: Display,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn Randomizer + Send>,
    pub(super) last: LastInstruction,
    /// If set every step is written to the `chip::trace` log target
    pub(super) trace: bool,
    /// Set by every change to the display, reset by the host
    pub(super) redraw: bool,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipSet {
    /// will create a new chipset object
    pub fn new() -> Self {
        Self::with_randomizer(Box::new(OsRng))
    }

    /// will create a new chipset object, that draws its random numbers from the given source
    pub fn with_randomizer(rng: Box<dyn Randomizer + Send>) -> Self {
        // initialize all the memory with 0
        let mut ram = Box::new([0; memory::SIZE]);

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        Self {
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: 0,
            stack: [0; cpu::stack::SIZE],
            stack_pointer: 0,
            timers: Timers::default(),
            display: Display::new(),
            keyboard: Keyboard::new(),
            rng,
            last: LastInstruction::default(),
            trace: false,
            redraw: false,
        }
    }

    /// will create a new chipset object as configured, a seed makes `CXKK` reproducible
    pub fn from_config(config: &Config) -> Self {
        let rng: Box<dyn Randomizer + Send> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(OsRng),
        };
        let mut chip = Self::with_randomizer(rng);
        chip.set_trace(config.trace);
        chip
    }

    /// Will copy the data into memory starting at the address.
    ///
    /// Nothing is written if the data does not fit.
    pub fn load(&mut self, address: u16, data: &[u8]) -> Result<(), ProcessError> {
        let start = address as usize;
        let end = start + data.len();
        if end > memory::SIZE {
            return Err(ProcessError::OutOfMemory {
                address,
                len: data.len(),
            });
        }

        self.memory[start..end].copy_from_slice(data);
        log::debug!("loaded {} bytes at {:#06X}", data.len(), address);
        Ok(())
    }

    /// Will load the rom at the program start and point the program counter at it.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), ProcessError> {
        self.load(cpu::PROGRAM_COUNTER, rom.get_data())?;
        self.set_pc(cpu::PROGRAM_COUNTER);
        log::debug!("rom '{}' ready", rom.get_name());
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// On error the program counter still points at the failing instruction and nothing
    /// else changed.
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        let pc = self.program_counter;
        let opcode = opcode::build_opcode(&self.memory[..], pc as usize);
        let instruction = Instruction::try_from(opcode).ok();

        self.last = LastInstruction {
            opcode,
            pc,
            instruction,
        };

        let instruction = match instruction {
            Some(instruction) => instruction,
            None => {
                log::warn!("Illegal instruction {:#06X} at {:#06X}", opcode, pc);
                return Err(ProcessError::InvalidOpcode { opcode, pc });
            }
        };

        self.program_counter = pc.wrapping_add(memory::opcodes::SIZE) & memory::ADDRESS_MASK;

        let result = self.calc(instruction);
        if let Err(err) = result {
            log::warn!("{} at {:#06X}", err, pc);
            self.program_counter = pc;
        }

        if self.trace {
            log::info!(target: "chip::trace", "{:#06X} {:#06X} {}", pc, opcode, instruction);
        }

        result
    }

    /// Will count both timers down, has to be called at 60Hz.
    pub fn tick_60hz(&mut self) -> TickStatus {
        self.timers.tick()
    }

    /// The address is reduced to 12 bits.
    pub fn set_pc(&mut self, pc: u16) {
        self.program_counter = pc & memory::ADDRESS_MASK;
    }

    /// Will replace the whole keypad state, key `n` is bit `n`.
    pub fn set_keys(&mut self, keys: u16) {
        self.keyboard.set_mask(keys);
    }

    /// Out of range coordinates are reported as unset.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.display.get_pixel(x, y)
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn get_trace(&self) -> bool {
        self.trace
    }

    pub fn get_last(&self) -> LastInstruction {
        self.last
    }

    /// If the display changed since the last [`redraw_ack`](Self::redraw_ack).
    pub fn redraw_needed(&self) -> bool {
        self.redraw
    }

    pub fn redraw_ack(&mut self) {
        self.redraw = false;
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn get_stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    /// The used part of the stack, the oldest entry first
    pub fn get_stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer as usize]
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory[..]
    }

    pub fn get_keyboard(&self) -> u16 {
        self.keyboard.get_mask()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.timers.sound.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.timers.delay.get_value()
    }

    /// Will return a immutable slice of the current display configuration
    pub fn get_display(&self) -> &[[bool; display::WIDTH]] {
        self.display.rows()
    }

    /// Will push the pointer to the stack
    /// stack_pointer is always one bigger then the
    /// entry it points to
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        let sp = self.stack_pointer as usize;
        if sp >= cpu::stack::SIZE {
            return Err(StackError::Overflow);
        }
        self.stack[sp] = pointer;
        self.stack_pointer += 1;
        log::debug!("push {:#06X}, sp {}", pointer, self.stack_pointer);
        Ok(())
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, StackError> {
        if self.stack_pointer == 0 {
            return Err(StackError::Underflow);
        }
        self.stack_pointer -= 1;
        let pointer = self.stack[self.stack_pointer as usize];
        log::debug!("pop {:#06X}, sp {}", pointer, self.stack_pointer);
        Ok(pointer)
    }

    /// The memory location `offset` bytes behind `I`, wrapping around the end of memory.
    pub(super) fn index_address(&self, offset: usize) -> usize {
        (self.index_register as usize + offset) % memory::SIZE
    }
}

impl ProgramCounter for ChipSet {
    fn step_counter(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}

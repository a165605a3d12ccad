//! Opcode abstractions, functionality and constants.
use std::fmt;

use crate::{definitions::memory, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the mask selecting the top nibble and the lowest nibble (`8XYN`, `5XY0`, ...)
pub(crate) const OPCODE_MASK_F00F: u16 = OPCODE_MASK_F000 | OPCODE_MASK_000F;

/// the mask selecting the top nibble and the lowest byte (`EX9E`, `FX07`, ...)
pub(crate) const OPCODE_MASK_F0FF: u16 = OPCODE_MASK_F000 | OPCODE_MASK_00FF;

/// the size of a single byte
const BYTE_SIZE: u16 = 0x8;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up. Both wrap around the end of `data`.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      assert_eq!(build_opcode(&SPLIT_OPCODE, i * 2), *val);
///  }
///  // the low byte is taken from the beginning again
///  assert_eq!(build_opcode(&SPLIT_OPCODE, 3), 0xDA00);
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Opcode {
    debug_assert!(!data.is_empty());
    let len = data.len();
    Opcode::from_be_bytes([data[pointer % len], data[(pointer + 1) % len]])
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// opcode number form any opcode
    /// - `T` is the opcode type
    fn t(&self) -> u8;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `T` is the opcode type
    /// - `NNN` is an address
    fn nnn(&self) -> u16;

    /// this is an opcode extractor for the opcode type `TXKK`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `KK` is a constant
    fn xkk(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a nibble constant
    fn xyn(&self) -> (usize, usize, u8);

    /// this is an opcode extractor for the opcode type `TXYT`
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * BYTE_SIZE / 2)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xkk(), (0xE, 0xDA));
    /// ```
    fn xkk(&self) -> (usize, u8) {
        let x = self.x();
        let kk = (self & OPCODE_MASK_00FF) as u8;
        (x, kk)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, u8) {
        let (x, y) = self.xy();
        let n = (self & OPCODE_MASK_000F) as u8;
        (x, y, n)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        let x = self.x();
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        const NIBBLE: u16 = BYTE_SIZE / 2;
        let y = ((self & MASK) >> NIBBLE) as usize;
        (x, y)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> BYTE_SIZE) as usize
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents how the program counter moves after an instruction ran.
///
/// The program counter already points past the executed instruction when
/// the step is applied.
pub enum ProgramCounterStep {
    /// Continue with the instruction following the executed one
    Next,
    /// Skip the following instruction
    Skip,
    /// Move the program counter to the given location (reduced to 12 bits)
    Jump(u16),
    /// Run the same instruction again on the next step
    Repeat,
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the step onto the program counter, which already points past the
    /// executed instruction. The result is reduced to 12 bits.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x202), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x202), 0x204);
    /// assert_eq!(ProgramCounterStep::Repeat.apply(0x202), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x1234).apply(0x202), 0x234);
    /// // the counter stays inside of memory
    /// assert_eq!(ProgramCounterStep::Skip.apply(0xFFF), 0x001);
    /// assert_eq!(ProgramCounterStep::Repeat.apply(0x000), 0xFFE);
    /// ```
    #[inline]
    pub fn apply(&self, program_counter: u16) -> u16 {
        let next = match *self {
            ProgramCounterStep::Next => program_counter,
            ProgramCounterStep::Skip => program_counter.wrapping_add(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
            ProgramCounterStep::Repeat => program_counter.wrapping_sub(memory::opcodes::SIZE),
        };
        next & memory::ADDRESS_MASK
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the status an executed instruction reports up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The display was changed and should be redrawn.
    Draw,
    /// No key is pressed for `FX0A`, the instruction will run again.
    Wait,
    /// The program jumped onto itself and will never leave this address.
    Halt,
}

/// The register-register operations of the `8XYN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// `8XY0` - `Vx = Vy`
    Load,
    /// `8XY1` - `Vx |= Vy`
    Or,
    /// `8XY2` - `Vx &= Vy`
    And,
    /// `8XY3` - `Vx ^= Vy`
    Xor,
    /// `8XY4` - `Vx += Vy`, `VF` carry
    Add,
    /// `8XY5` - `Vx -= Vy`, `VF` no borrow
    Sub,
    /// `8XY6` - `Vx = Vy >> 1`, `VF` shifted out bit
    ShiftRight,
    /// `8XY7` - `Vx = Vy - Vx`, `VF` no borrow
    SubN,
    /// `8XYE` - `Vx = Vy << 1`, `VF` shifted out bit
    ShiftLeft,
}

impl AluOp {
    fn mnemonic(&self) -> &'static str {
        match self {
            AluOp::Load => "LD",
            AluOp::Or => "OR",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::ShiftRight => "SHR",
            AluOp::SubN => "SUBN",
            AluOp::ShiftLeft => "SHL",
        }
    }
}

/// The instruction shape selected by an entry of the [`DECODE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Clear,
    Return,
    Jump,
    Call,
    SkipEqualByte,
    SkipNotEqualByte,
    SkipEqualRegister,
    LoadByte,
    AddByte,
    Alu(AluOp),
    SkipNotEqualRegister,
    LoadIndex,
    JumpOffset,
    Random,
    Draw,
    SkipPressed,
    SkipNotPressed,
    GetDelay,
    WaitKey,
    SetDelay,
    SetSound,
    AddIndex,
    LoadFont,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
}

/// A single row of the decode table, an opcode matches if
/// `opcode & mask == pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub mask: Opcode,
    pub pattern: Opcode,
    pub kind: Kind,
}

const fn entry(mask: Opcode, pattern: Opcode, kind: Kind) -> Entry {
    Entry {
        mask,
        pattern,
        kind,
    }
}

/// The ordered decode table, the first matching entry wins.
pub const DECODE_TABLE: [Entry; 34] = [
    entry(OPCODE_MASK_FFFF, 0x00E0, Kind::Clear),
    entry(OPCODE_MASK_FFFF, 0x00EE, Kind::Return),
    entry(OPCODE_MASK_F000, 0x1000, Kind::Jump),
    entry(OPCODE_MASK_F000, 0x2000, Kind::Call),
    entry(OPCODE_MASK_F000, 0x3000, Kind::SkipEqualByte),
    entry(OPCODE_MASK_F000, 0x4000, Kind::SkipNotEqualByte),
    entry(OPCODE_MASK_F00F, 0x5000, Kind::SkipEqualRegister),
    entry(OPCODE_MASK_F000, 0x6000, Kind::LoadByte),
    entry(OPCODE_MASK_F000, 0x7000, Kind::AddByte),
    entry(OPCODE_MASK_F00F, 0x8000, Kind::Alu(AluOp::Load)),
    entry(OPCODE_MASK_F00F, 0x8001, Kind::Alu(AluOp::Or)),
    entry(OPCODE_MASK_F00F, 0x8002, Kind::Alu(AluOp::And)),
    entry(OPCODE_MASK_F00F, 0x8003, Kind::Alu(AluOp::Xor)),
    entry(OPCODE_MASK_F00F, 0x8004, Kind::Alu(AluOp::Add)),
    entry(OPCODE_MASK_F00F, 0x8005, Kind::Alu(AluOp::Sub)),
    entry(OPCODE_MASK_F00F, 0x8006, Kind::Alu(AluOp::ShiftRight)),
    entry(OPCODE_MASK_F00F, 0x8007, Kind::Alu(AluOp::SubN)),
    entry(OPCODE_MASK_F00F, 0x800E, Kind::Alu(AluOp::ShiftLeft)),
    entry(OPCODE_MASK_F00F, 0x9000, Kind::SkipNotEqualRegister),
    entry(OPCODE_MASK_F000, 0xA000, Kind::LoadIndex),
    entry(OPCODE_MASK_F000, 0xB000, Kind::JumpOffset),
    entry(OPCODE_MASK_F000, 0xC000, Kind::Random),
    entry(OPCODE_MASK_F000, 0xD000, Kind::Draw),
    entry(OPCODE_MASK_F0FF, 0xE09E, Kind::SkipPressed),
    entry(OPCODE_MASK_F0FF, 0xE0A1, Kind::SkipNotPressed),
    entry(OPCODE_MASK_F0FF, 0xF007, Kind::GetDelay),
    entry(OPCODE_MASK_F0FF, 0xF00A, Kind::WaitKey),
    entry(OPCODE_MASK_F0FF, 0xF015, Kind::SetDelay),
    entry(OPCODE_MASK_F0FF, 0xF018, Kind::SetSound),
    entry(OPCODE_MASK_F0FF, 0xF01E, Kind::AddIndex),
    entry(OPCODE_MASK_F0FF, 0xF029, Kind::LoadFont),
    entry(OPCODE_MASK_F0FF, 0xF033, Kind::StoreBcd),
    entry(OPCODE_MASK_F0FF, 0xF055, Kind::StoreRegisters),
    entry(OPCODE_MASK_F0FF, 0xF065, Kind::LoadRegisters),
];

/// Looks up the first entry of the [`DECODE_TABLE`] matching the opcode.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// assert_eq!(lookup(0x8124).map(|e| e.kind), Some(Kind::Alu(AluOp::Add)));
/// assert_eq!(lookup(0x8128), None);
/// ```
pub fn lookup(opcode: Opcode) -> Option<&'static Entry> {
    DECODE_TABLE
        .iter()
        .find(|entry| opcode & entry.mask == entry.pattern)
}

/// A decoded instruction with its operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Clear,
    Return,
    Jump { nnn: u16 },
    Call { nnn: u16 },
    SkipEqualByte { x: usize, kk: u8 },
    SkipNotEqualByte { x: usize, kk: u8 },
    SkipEqualRegister { x: usize, y: usize },
    LoadByte { x: usize, kk: u8 },
    AddByte { x: usize, kk: u8 },
    Alu { op: AluOp, x: usize, y: usize },
    SkipNotEqualRegister { x: usize, y: usize },
    LoadIndex { nnn: u16 },
    JumpOffset { nnn: u16 },
    Random { x: usize, kk: u8 },
    Draw { x: usize, y: usize, n: u8 },
    SkipPressed { x: usize },
    SkipNotPressed { x: usize },
    GetDelay { x: usize },
    WaitKey { x: usize },
    SetDelay { x: usize },
    SetSound { x: usize },
    AddIndex { x: usize },
    LoadFont { x: usize },
    StoreBcd { x: usize },
    StoreRegisters { x: usize },
    LoadRegisters { x: usize },
}

impl Instruction {
    /// Fills the operand fields of the given kind from the opcode.
    pub fn build(kind: Kind, opcode: Opcode) -> Self {
        let x = opcode.x();
        let (_, y) = opcode.xy();
        let (_, kk) = opcode.xkk();
        let (_, _, n) = opcode.xyn();
        let nnn = opcode.nnn();

        match kind {
            Kind::Clear => Instruction::Clear,
            Kind::Return => Instruction::Return,
            Kind::Jump => Instruction::Jump { nnn },
            Kind::Call => Instruction::Call { nnn },
            Kind::SkipEqualByte => Instruction::SkipEqualByte { x, kk },
            Kind::SkipNotEqualByte => Instruction::SkipNotEqualByte { x, kk },
            Kind::SkipEqualRegister => Instruction::SkipEqualRegister { x, y },
            Kind::LoadByte => Instruction::LoadByte { x, kk },
            Kind::AddByte => Instruction::AddByte { x, kk },
            Kind::Alu(op) => Instruction::Alu { op, x, y },
            Kind::SkipNotEqualRegister => Instruction::SkipNotEqualRegister { x, y },
            Kind::LoadIndex => Instruction::LoadIndex { nnn },
            Kind::JumpOffset => Instruction::JumpOffset { nnn },
            Kind::Random => Instruction::Random { x, kk },
            Kind::Draw => Instruction::Draw { x, y, n },
            Kind::SkipPressed => Instruction::SkipPressed { x },
            Kind::SkipNotPressed => Instruction::SkipNotPressed { x },
            Kind::GetDelay => Instruction::GetDelay { x },
            Kind::WaitKey => Instruction::WaitKey { x },
            Kind::SetDelay => Instruction::SetDelay { x },
            Kind::SetSound => Instruction::SetSound { x },
            Kind::AddIndex => Instruction::AddIndex { x },
            Kind::LoadFont => Instruction::LoadFont { x },
            Kind::StoreBcd => Instruction::StoreBcd { x },
            Kind::StoreRegisters => Instruction::StoreRegisters { x },
            Kind::LoadRegisters => Instruction::LoadRegisters { x },
        }
    }
}

/// Decoding failures carry no program counter, the caller attaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOpcode(pub Opcode);

impl TryFrom<Opcode> for Instruction {
    type Error = UnknownOpcode;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        lookup(value)
            .map(|entry| Instruction::build(entry.kind, value))
            .ok_or(UnknownOpcode(value))
    }
}

/// Renders the assembler mnemonic, e.g. `LD V4, 0xAB`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipEqualByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNotEqualByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqualRegister { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Alu { op, x, y } => write!(f, "{} V{:X}, V{:X}", op.mnemonic(), x, y),
            Instruction::SkipNotEqualRegister { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::GetDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFont { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by the given step.
    fn step_counter(&mut self, step: ProgramCounterStep);
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// every handler reports how the program counter moves instead of moving it itself.
/// The program counter already points past the executed instruction, when a handler runs.
pub trait ChipOpcodes: ProgramCounter {
    /// will run a single decoded instruction
    ///
    /// On error nothing was changed, all fallible handlers check before they write.
    fn calc(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let mut step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::Clear => step_op(self.clear()),
            Instruction::Return => self.return_subroutine()?,
            Instruction::Jump { nnn } => step_op(self.jump(nnn)),
            Instruction::Call { nnn } => self.call_subroutine(nnn)?,
            Instruction::SkipEqualByte { x, kk } => self.skip_byte(x, kk, true),
            Instruction::SkipNotEqualByte { x, kk } => self.skip_byte(x, kk, false),
            Instruction::SkipEqualRegister { x, y } => self.skip_register(x, y, true),
            Instruction::LoadByte { x, kk } => self.load_byte(x, kk),
            Instruction::AddByte { x, kk } => self.add_byte(x, kk),
            Instruction::Alu { op, x, y } => self.alu(op, x, y),
            Instruction::SkipNotEqualRegister { x, y } => self.skip_register(x, y, false),
            Instruction::LoadIndex { nnn } => self.load_index(nnn),
            Instruction::JumpOffset { nnn } => self.jump_offset(nnn),
            Instruction::Random { x, kk } => self.random(x, kk),
            Instruction::Draw { x, y, n } => step_op(self.draw(x, y, n)),
            Instruction::SkipPressed { x } => self.skip_key(x, true),
            Instruction::SkipNotPressed { x } => self.skip_key(x, false),
            Instruction::GetDelay { x } => self.get_delay(x),
            Instruction::WaitKey { x } => step_op(self.wait_key(x)),
            Instruction::SetDelay { x } => self.set_delay(x),
            Instruction::SetSound { x } => self.set_sound(x),
            Instruction::AddIndex { x } => self.add_index(x),
            Instruction::LoadFont { x } => self.load_font(x),
            Instruction::StoreBcd { x } => self.store_bcd(x),
            Instruction::StoreRegisters { x } => self.store_registers(x),
            Instruction::LoadRegisters { x } => self.load_registers(x),
        };

        self.step_counter(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear(&mut self) -> (ProgramCounterStep, Operation);

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    ///
    /// Returns an error if the stack is empty
    fn return_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    ///
    /// Reports [`Operation::Halt`] if the jump targets the jump itself.
    fn jump(&self, nnn: u16) -> (ProgramCounterStep, Operation);

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    ///
    /// Returns an error if the stack is full
    fn call_subroutine(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XKK` - Cond     - `if(Vx==KK)`          - Skips the next instruction if `VX` equals `KK`.
    /// - `4XKK` - Cond     - `if(Vx!=KK)`          - Skips the next instruction if `VX` doesn't equal `KK`.
    fn skip_byte(&self, x: usize, kk: u8, equal: bool) -> ProgramCounterStep;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_register(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep;

    /// - `6XKK` - Const    - `Vx = KK`             - Sets `VX` to `KK`.
    fn load_byte(&mut self, x: usize, kk: u8) -> ProgramCounterStep;

    /// - `7XKK` - Const    - `Vx += KK`            - Adds `KK` to `VX`. (Carry flag is not changed)
    fn add_byte(&mut self, x: usize, kk: u8) -> ProgramCounterStep;

    /// The `8XYN` family, see [`AluOp`] for the single operations.
    ///
    /// `VF` and the result are both calculated from the values before the instruction, `VF` is
    /// written first and `VX` second.
    fn alu(&mut self, op: AluOp, x: usize, y: usize) -> ProgramCounterStep;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn load_index(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, nnn: u16) -> ProgramCounterStep;

    /// - `CXKK` - Rand     - `Vx=rand()&KK`        - Sets `VX` to a random byte masked with `KK`.
    fn random(&mut self, x: usize, kk: u8) -> ProgramCounterStep;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen
    fn draw(&mut self, x: usize, y: usize, n: u8) -> (ProgramCounterStep, Operation);

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn skip_key(&self, x: usize, pressed: bool) -> ProgramCounterStep;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    fn get_delay(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    fn wait_key(&mut self, x: usize) -> (ProgramCounterStep, Operation);

    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    fn set_delay(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    fn set_sound(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is set to `1` when `I + VX > 0xFFF`.
    fn add_index(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for the character in `VX`.
    fn load_font(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX33` - BCD      - `246 => 2, 4, 6`      - Stores the binary-coded decimal representation of `VX` at `I`, `I+1` and `I+2`.
    fn store_bcd(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`. `I` is increased by `1` for each value written.
    fn store_registers(&mut self, x: usize) -> ProgramCounterStep;

    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`. `I` is increased by `1` for each value read.
    fn load_registers(&mut self, x: usize) -> ProgramCounterStep;
}

use crate::{
    definitions::{cpu, display, memory},
    opcode::{AluOp, ChipOpcodes, Operation, ProgramCounterStep},
    timer::Timed,
    ProcessError,
};

use super::ChipSet;

impl ChipOpcodes for ChipSet {
    fn clear(&mut self) -> (ProgramCounterStep, Operation) {
        // 00E0
        // clear display
        self.display.clear();
        self.redraw = true;
        (ProgramCounterStep::Next, Operation::Draw)
    }

    fn return_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError> {
        // 00EE
        // Return from sub routine => pop from stack
        let pc = self.pop_stack()?;
        Ok(ProgramCounterStep::Jump(pc))
    }

    fn jump(&self, nnn: u16) -> (ProgramCounterStep, Operation) {
        // 1NNN
        // Jumps to address NNN.
        let own = self.program_counter.wrapping_sub(memory::opcodes::SIZE) & memory::ADDRESS_MASK;
        let op = if own == nnn {
            log::debug!("endless loop at {:#06X}", nnn);
            Operation::Halt
        } else {
            Operation::None
        };
        (ProgramCounterStep::Jump(nnn), op)
    }

    fn call_subroutine(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN, the program counter already points at the return address
        self.push_stack(self.program_counter)?;
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_byte(&self, x: usize, kk: u8, equal: bool) -> ProgramCounterStep {
        // 3XKK / 4XKK
        ProgramCounterStep::cond((self.registers[x] == kk) == equal)
    }

    fn skip_register(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep {
        // 5XY0 / 9XY0
        ProgramCounterStep::cond((self.registers[x] == self.registers[y]) == equal)
    }

    fn load_byte(&mut self, x: usize, kk: u8) -> ProgramCounterStep {
        // 6XKK
        // Sets VX to KK.
        self.registers[x] = kk;
        ProgramCounterStep::Next
    }

    fn add_byte(&mut self, x: usize, kk: u8) -> ProgramCounterStep {
        // 7XKK
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(kk);
        ProgramCounterStep::Next
    }

    fn alu(&mut self, op: AluOp, x: usize, y: usize) -> ProgramCounterStep {
        let vx = self.registers[x];
        let vy = self.registers[y];

        let (result, flag) = match op {
            AluOp::Load => (vy, None),
            AluOp::Or => (vx | vy, None),
            AluOp::And => (vx & vy, None),
            AluOp::Xor => (vx ^ vy, None),
            AluOp::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            AluOp::Sub => (vx.wrapping_sub(vy), Some((vx > vy) as u8)),
            // the shifts read VY, not VX
            AluOp::ShiftRight => (vy >> 1, Some(vy & 0x01)),
            AluOp::SubN => (vy.wrapping_sub(vx), Some((vy > vx) as u8)),
            AluOp::ShiftLeft => (vy << 1, Some(vy >> 7)),
        };

        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        self.registers[x] = result;
        ProgramCounterStep::Next
    }

    fn load_index(&mut self, nnn: u16) -> ProgramCounterStep {
        // ANNN
        self.index_register = nnn;
        ProgramCounterStep::Next
    }

    fn jump_offset(&self, nnn: u16) -> ProgramCounterStep {
        // BNNN
        // Jumps to the address NNN plus V0.
        ProgramCounterStep::Jump(self.registers[0] as u16 + nnn)
    }

    fn random(&mut self, x: usize, kk: u8) -> ProgramCounterStep {
        // CXKK
        self.registers[x] = self.rng.random_byte() & kk;
        ProgramCounterStep::Next
    }

    fn draw(&mut self, x: usize, y: usize, n: u8) -> (ProgramCounterStep, Operation) {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        // the coordinates have to be read before VF is cleared, as X or Y may be F
        let coorx = self.registers[x] as usize & (display::WIDTH - 1);
        let coory = self.registers[y] as usize & (display::HEIGHT - 1);

        self.registers[cpu::register::LAST] = 0;

        let ram = &self.memory;
        let index = self.index_register as usize;
        let sprite = (0..n as usize).map(|row| ram[(index + row) % memory::SIZE]);

        let collision = self.display.draw_sprite(coorx, coory, sprite);
        self.registers[cpu::register::LAST] = collision as u8;
        self.redraw = true;

        (ProgramCounterStep::Next, Operation::Draw)
    }

    fn skip_key(&self, x: usize, pressed: bool) -> ProgramCounterStep {
        // EX9E / EXA1
        let key = self.registers[x] as usize;
        ProgramCounterStep::cond(self.keyboard.is_pressed(key) == pressed)
    }

    fn get_delay(&mut self, x: usize) -> ProgramCounterStep {
        // FX07
        self.registers[x] = self.timers.delay.get_value();
        ProgramCounterStep::Next
    }

    fn wait_key(&mut self, x: usize) -> (ProgramCounterStep, Operation) {
        // FX0A
        // A key press is awaited, and then stored in VX.
        match self.keyboard.first_pressed() {
            Some(key) => {
                self.registers[x] = key;
                (ProgramCounterStep::Next, Operation::None)
            }
            None => (ProgramCounterStep::Repeat, Operation::Wait),
        }
    }

    fn set_delay(&mut self, x: usize) -> ProgramCounterStep {
        // FX15
        self.timers.delay.set_value(self.registers[x]);
        ProgramCounterStep::Next
    }

    fn set_sound(&mut self, x: usize) -> ProgramCounterStep {
        // FX18
        self.timers.sound.set_value(self.registers[x]);
        ProgramCounterStep::Next
    }

    fn add_index(&mut self, x: usize) -> ProgramCounterStep {
        // FX1E
        let vx = self.registers[x] as u16;
        let overflow = self.index_register as u32 + vx as u32 > memory::ADDRESS_MASK as u32;
        self.registers[cpu::register::LAST] = overflow as u8;
        self.index_register = self.index_register.wrapping_add(vx);
        ProgramCounterStep::Next
    }

    fn load_font(&mut self, x: usize) -> ProgramCounterStep {
        // FX29
        let glyph = self.registers[x] as usize * display::fontset::GLYPH_SIZE;
        self.index_register = (display::fontset::LOCATION + glyph) as u16;
        ProgramCounterStep::Next
    }

    fn store_bcd(&mut self, x: usize) -> ProgramCounterStep {
        // FX33
        let r = self.registers[x];
        let digits = [r / 100, r / 10 % 10, r % 10]; // 246u8 => [2, 4, 6]

        for (offset, digit) in digits.iter().enumerate() {
            let address = self.index_address(offset);
            self.memory[address] = *digit;
        }
        ProgramCounterStep::Next
    }

    fn store_registers(&mut self, x: usize) -> ProgramCounterStep {
        // FX55
        for offset in 0..=x {
            let address = self.index_address(offset);
            self.memory[address] = self.registers[offset];
        }
        self.index_register = self.index_register.wrapping_add(x as u16 + 1);
        ProgramCounterStep::Next
    }

    fn load_registers(&mut self, x: usize) -> ProgramCounterStep {
        // FX65
        for offset in 0..=x {
            let address = self.index_address(offset);
            self.registers[offset] = self.memory[address];
        }
        self.index_register = self.index_register.wrapping_add(x as u16 + 1);
        ProgramCounterStep::Next
    }
}

//! The pretty print implementation of the [`ChipSet`](super::ChipSet), used by the state dumps.
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use std::fmt;

use once_cell::sync::Lazy;

use super::ChipSet;
use crate::definitions::{display, memory};

/// The length of the pretty print data
/// as a single instruction is u16 the octa
/// size will show how often the block shall
/// be repeated has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

const PIXEL_ON: char = '#';
const PIXEL_OFF: char = '.';

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intformat {
    () => {
        // The formatted string will be 2 sysbols for the prefix (0x)
        // and 4 for the rest long.
        "{:#06X}"
    };
}

static POINTER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut line = String::with_capacity(20);
    // writing into a string can not fail
    let _ = pointer_print::formatter(&mut line, 0, 0);
    line.len()
});

static INTEGER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    let _ = integer_print::formatter(&mut string, 0u8);
    string.len()
});

/// calculate a line lenght (This is a bit bigger then the actual line will be)
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will formatt the pointers according to definition
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(line, concat!(intformat!(), " - ", intformat!(), " :"), from, to)
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use std::fmt::{self, Write};

    use once_cell::sync::Lazy;

    use super::{integer_print, pointer_print, HEX_PRINT_STEP};
    use crate::{
        definitions::memory,
        opcode::{self, Opcode},
    };

    /// The internal length of the given data
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE as usize;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that a row only holds zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut formatted = String::new();
        let _ = integer_print::formatter(&mut formatted, 0u16);
        match HEX_PRINT_STEP {
            1 => formatted,
            2 => format!("{} {}", formatted, formatted),
            _ => {
                let lenght = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
                    - FILLER_BASE.len();
                let filler = " ".repeat(lenght / 2);

                format!(
                    "{}{}{}{}{}",
                    formatted, filler, FILLER_BASE, filler, formatted
                )
            }
        }
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        len: usize,
        only_null: bool,
    }

    /// using the fmt::Display` for simple printing of the data later on
    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(
                &mut res,
                self.from % memory::SIZE,
                self.to % memory::SIZE,
            )?;
            res.push(' ');

            if self.only_null {
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data[..self.len].iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                if let Some(index) = res.rfind(' ') {
                    res.truncate(index);
                }
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory, `base` is the address of the first
    /// byte. Rows made up of only zeros are folded together.
    pub(super) fn printer(data: &[u8], base: usize, indent: usize) -> Result<String, fmt::Error> {
        if data.is_empty() {
            return Ok(String::new());
        }

        let data_last_index = data.len() - 1;
        let mut rows: Vec<Row> = Vec::with_capacity(data.len() / POINTER_INCREMENT + 1);

        for from in (0..data.len()).step_by(POINTER_INCREMENT) {
            // precalculate the end location
            let to = (from + POINTER_INCREMENT - 1).min(data_last_index);

            let mut row = Row {
                from: base + from,
                to: base + to,
                data: [0; HEX_PRINT_STEP],
                len: 0,
                only_null: true,
            };

            // loop over all the opcodes u8 pairs
            for index in (from..=to).step_by(memory::opcodes::SIZE as usize) {
                // a trailing single byte is shown as the high byte
                let entry = if index < data_last_index {
                    opcode::build_opcode(data, index)
                } else {
                    (data[index] as Opcode) << 8
                };

                if entry > 0 {
                    row.only_null = false;
                }
                row.data[row.len] = entry;
                row.len += 1;
            }

            if row.only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        // create the end structure to be used for calculations
        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, super::END_OF_LINE)?;
        }
        string.pop();
        Ok(string)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use std::fmt::{self, Write};

    use num_traits::Unsigned;

    use super::{pointer_print, HEX_PRINT_STEP};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);
        for i in (0..data.len()).step_by(HEX_PRINT_STEP) {
            let n = (i + HEX_PRINT_STEP - 1).min(data.len() - 1);

            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, i, n)?;

            for entry in &data[i..=n] {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(super::END_OF_LINE);
        }

        // Remove unneded new line
        res.pop();
        Ok(res)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use std::fmt;

    use once_cell::sync::Lazy;

    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// a function to keep the correct format length
    fn formatter(message: &str) -> String {
        format!("{:<width$}", message, width = *super::INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    /// the offset will be calculated automatically from
    /// the data block
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, fmt::Error> {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);

        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for i in (0..data.len()).step_by(HEX_PRINT_STEP) {
            let n = (i + HEX_PRINT_STEP - 1).min(data.len() - 1);
            super::indent_helper(&mut res, indent);

            pointer_print::formatter(&mut res, i, n)?;
            res.push(' ');

            for value in &data[i..n] {
                res.push_str(check_type(*value));
                res.push(' ');
            }
            // Append the last missing entry
            res.push_str(check_type(data[n]).trim_end());
            res.push(END_OF_LINE);
        }
        // Remove unneeded new line
        res.pop();
        Ok(res)
    }
}

/// Will add a titled block to the chipset print.
fn section(text: &mut String, title: &str, body: &str) {
    indent_helper(text, 1);
    text.push_str(title);
    text.push_str(" :");
    text.push(END_OF_LINE);
    text.push_str(body);
    text.push(END_OF_LINE);
}

/// A single indented value
fn single<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::UpperHex + num_traits::Unsigned + Copy,
{
    let mut line = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut line, INDENT_SIZE);
    integer_print::formatter(&mut line, value)?;
    Ok(line)
}

impl ChipSet {
    fn format_state(&self, with_memory: bool) -> Result<String, fmt::Error> {
        let mut res = String::with_capacity(*LENLINE * 16);
        res.push_str("Chipset {");
        res.push(END_OF_LINE);

        section(&mut res, "Program Counter", &single(self.program_counter)?);
        section(&mut res, "Index Register", &single(self.index_register)?);
        section(&mut res, "Stack Pointer", &single(self.stack_pointer)?);
        section(&mut res, "Delay Timer", &single(self.get_delay_timer())?);
        section(&mut res, "Sound Timer", &single(self.get_sound_timer())?);

        let mut last = String::with_capacity(*LENLINE);
        indent_helper(&mut last, INDENT_SIZE);
        integer_print::formatter(&mut last, self.last.pc)?;
        last.push_str(" : ");
        integer_print::formatter(&mut last, self.last.opcode)?;
        last.push(' ');
        last.push_str(&self.last.mnemonic());
        section(&mut res, "Last Instruction", &last);

        section(
            &mut res,
            "Register",
            &integer_print::printer(&self.registers, INDENT_SIZE)?,
        );
        // the whole stack is shown, the stack pointer marks the used part
        section(
            &mut res,
            "Stack",
            &integer_print::printer(&self.stack, INDENT_SIZE)?,
        );
        section(
            &mut res,
            "Keyboard",
            &bool_print::printer(&self.keyboard.get_keys(), INDENT_SIZE)?,
        );

        if with_memory {
            section(
                &mut res,
                "Memory",
                &opcode_print::printer(&self.memory[..], 0, INDENT_SIZE)?,
            );
        }

        res.push('}');
        Ok(res)
    }

    /// Will pretty print `len` bytes of memory starting at `address`, wrapping around the end of
    /// memory. Rows of only zeros are folded together.
    pub fn dump_memory(&self, address: u16, len: usize) -> String {
        // longer dumps would only repeat the memory
        let len = len.min(memory::SIZE);
        let start = address as usize;
        let data: Vec<u8> = (0..len).map(|offset| self.memory[self.wrap(start + offset)]).collect();

        // writing into a string can not fail
        let dump = opcode_print::printer(&data, start, 0).unwrap_or_default();
        log::debug!("memory dump {:#06X} +{}\n{}", address, len, dump);
        dump
    }

    /// Will pretty print the registers, timers, stack and keyboard.
    pub fn dump_state(&self) -> String {
        let dump = self.format_state(false).unwrap_or_default();
        log::debug!("state dump\n{}", dump);
        dump
    }

    /// Will render the display as text, a row per line, `#` for set pixels.
    pub fn dump_display(&self) -> String {
        let mut dump = String::with_capacity(display::RESOLUTION + display::HEIGHT);
        for row in self.display.rows() {
            dump.extend(row.iter().map(|on| if *on { PIXEL_ON } else { PIXEL_OFF }));
            dump.push(END_OF_LINE);
        }
        dump.pop();
        log::debug!("display dump\n{}", dump);
        dump
    }

    fn wrap(&self, address: usize) -> usize {
        address % self.memory.len()
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_state(true)?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{tests, ChipSet};
    use crate::definitions::{cpu, display, memory};

    const ZERO_ROW: &str = "0x0000                    ...                    0x0000";

    fn chip_after_single_step() -> ChipSet {
        let mut chip = tests::get_default_chip();
        // LD V0, 0x12
        chip.load(cpu::PROGRAM_COUNTER, &[0x60, 0x12]).unwrap();
        chip.step().unwrap();
        chip.set_keys(0xAAAA);
        chip
    }

    const OUTPUT_STATE: &str = "\
        Chipset {\n\
            \tProgram Counter :\n\
                \t\t0x0202\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tStack Pointer :\n\
                \t\t0x0000\n\
            \tDelay Timer :\n\
                \t\t0x0000\n\
            \tSound Timer :\n\
                \t\t0x0000\n\
            \tLast Instruction :\n\
                \t\t0x0200 : 0x6012 LD V0, 0x12\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0012 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tStack :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tKeyboard :\n\
                \t\t0x0000 - 0x0007 : false  true   false  true   false  true   false  true\n\
                \t\t0x0008 - 0x000F : false  true   false  true   false  true   false  true\n\
        }";

    const OUTPUT_MEMORY: &str = "\
        \tMemory :\n\
            \t\t0x0000 - 0x000F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
            \t\t0x0010 - 0x001F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
            \t\t0x0020 - 0x002F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
            \t\t0x0030 - 0x003F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
            \t\t0x0040 - 0x004F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
            \t\t0x0050 - 0x01FF : 0x0000                    ...                    0x0000\n\
            \t\t0x0200 - 0x020F : 0x6012 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \t\t0x0210 - 0x0FFF : 0x0000                    ...                    0x0000\n\
        }";

    #[test]
    fn test_dump_state() {
        let chip = chip_after_single_step();
        let actual = chip.dump_state();

        for (exp, act) in OUTPUT_STATE.split('\n').zip(actual.split('\n')) {
            assert_eq!(exp, act);
        }
        assert_eq!(OUTPUT_STATE, actual);
    }

    #[test]
    /// tests if the pretty print output is as expected, the full print is the state with the
    /// memory appended
    fn test_full_print() {
        let chip = chip_after_single_step();
        let actual = format!("{}", chip);

        let state = OUTPUT_STATE.trim_end_matches('}');
        let expected = format!("{}{}", state, OUTPUT_MEMORY);

        for (exp, act) in expected.split('\n').zip(actual.split('\n')) {
            assert_eq!(exp, act);
        }
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_dump_memory() {
        let mut chip = tests::get_default_chip();
        chip.load(0x200, &[0x00, 0xE0, 0x6C, 0x00, 0x12, 0x04]).unwrap();

        assert_eq!(
            chip.dump_memory(0x200, 6),
            "0x0200 - 0x0205 : 0x00E0 0x6C00 0x1204"
        );
        // an odd length shows the last byte as the high byte
        assert_eq!(chip.dump_memory(0x200, 3), "0x0200 - 0x0202 : 0x00E0 0x6C00");
        assert_eq!(chip.dump_memory(0x200, 0), "");
    }

    #[test]
    fn test_dump_memory_folds_zeros() {
        let chip = tests::get_default_chip();
        assert_eq!(
            chip.dump_memory(0x300, 64),
            format!("0x0300 - 0x033F : {}", ZERO_ROW)
        );
    }

    #[test]
    fn test_dump_memory_wraps() {
        let mut chip = tests::get_default_chip();
        chip.load(0xFFE, &[0xAB, 0xCD]).unwrap();
        // continues with the font at the start of memory
        assert_eq!(
            chip.dump_memory(0xFFE, 4),
            "0x0FFE - 0x0001 : 0xABCD 0xF090"
        );
    }

    #[test]
    fn test_dump_memory_length_is_clamped() {
        let chip = tests::get_default_chip();
        let full = chip.dump_memory(0xFFF, memory::SIZE);
        assert_eq!(chip.dump_memory(0xFFF, usize::MAX), full);
        assert_eq!(chip.dump_memory(0xFFF, memory::SIZE + 1), full);
    }

    #[test]
    fn test_dump_display() {
        let mut chip = tests::get_default_chip();
        chip.display.draw_sprite(0, 0, [0xF0]);
        chip.display.draw_sprite(display::WIDTH - 1, display::HEIGHT - 1, [0x80]);

        let dump = chip.dump_display();
        let rows: Vec<&str> = dump.split('\n').collect();

        assert_eq!(rows.len(), display::HEIGHT);
        assert!(rows.iter().all(|row| row.len() == display::WIDTH));
        assert_eq!(&rows[0][..6], "####..");
        assert_eq!(&rows[display::HEIGHT - 1][display::WIDTH - 2..], ".#");
        assert_eq!(dump.matches('#').count(), 5);
    }
}

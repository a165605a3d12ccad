use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, row by row
    fn display(&mut self, pixels: &[[bool; display::WIDTH]]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// The pressed state of the keys `0x0` to `0xF`
    fn get_keyboard(&self) -> [bool; keyboard::SIZE];
}

/// Folds the pressed state of the single keys into the keypad mask, key `n` is bit `n`.
///
/// # Example
/// ```rust
/// # use chip::devices::key_mask;
/// let mut keys = [false; 16];
/// keys[0x0] = true;
/// keys[0xF] = true;
/// assert_eq!(key_mask(&keys), 0x8001);
/// ```
pub fn key_mask(keys: &[bool]) -> u16 {
    keys.iter()
        .take(keyboard::SIZE)
        .enumerate()
        .filter(|(_, pressed)| **pressed)
        .fold(0, |mask, (index, _)| mask | 1u16 << index)
}

/// Will look up the keypad key bound to the host key, following the
/// [`LAYOUT`](keyboard::LAYOUT) rows.
///
/// # Example
/// ```rust
/// # use chip::devices::key_index;
/// assert_eq!(key_index('1'), Some(0x0));
/// assert_eq!(key_index('Q'), Some(0x4));
/// assert_eq!(key_index('v'), Some(0xF));
/// assert_eq!(key_index('p'), None);
/// ```
pub fn key_index(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    keyboard::LAYOUT
        .iter()
        .flatten()
        .position(|bound| *bound == key)
}

/// The keypad as seen by the chip.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. The whole state is replaced at once, a key
/// pressed and released between two updates is never seen.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyboard {
    keys: u16,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Replaces the state of all the keys.
    pub fn set_mask(&mut self, keys: u16) {
        self.keys = keys;
    }

    pub fn get_mask(&self) -> u16 {
        self.keys
    }

    /// Keys outside of `0x0..=0xF` are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        key < keyboard::SIZE && self.keys & (1u16 << key) != 0
    }

    /// The lowest pressed key, if there is one.
    pub fn first_pressed(&self) -> Option<u8> {
        if self.keys == 0 {
            None
        } else {
            Some(self.keys.trailing_zeros() as u8)
        }
    }

    pub fn get_keys(&self) -> [bool; keyboard::SIZE] {
        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = self.is_pressed(index);
        }
        keys
    }
}

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pixels: [[bool; display::WIDTH]; display::HEIGHT],
}

impl Default for Display {
    fn default() -> Self {
        Self {
            pixels: [[false; display::WIDTH]; display::HEIGHT],
        }
    }
}

impl Display {
    pub fn new() -> Self {
        Display::default()
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// Will XOR the sprite rows onto the display and report if any set pixel was turned off.
    ///
    /// The origin wraps around the display, the sprite itself is clipped at the right and
    /// bottom edge.
    pub fn draw_sprite<I>(&mut self, x: usize, y: usize, sprite: I) -> bool
    where
        I: IntoIterator<Item = u8>,
    {
        const BYTE: usize = 8;

        let coorx = x % display::WIDTH;
        let coory = y % display::HEIGHT;
        let mut collision = false;

        for (i, row) in sprite.into_iter().enumerate() {
            let y = coory + i;
            if y >= display::HEIGHT {
                break;
            }

            for (m, j) in (0..BYTE).rev().zip(0..BYTE) {
                let x = coorx + j;
                if x >= display::WIDTH {
                    break;
                }

                let mask = 1u8 << m;
                if row & mask == 0 {
                    continue;
                }

                let spixel = self.pixels[y][x];
                self.pixels[y][x] = !spixel;
                collision |= spixel;
            }
        }

        collision
    }

    /// Out of range coordinates are reported as unset.
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.pixels[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mask_ignores_extra_keys() {
        let keys = [true; keyboard::SIZE + 4];
        assert_eq!(key_mask(&keys), u16::MAX);
        assert_eq!(key_mask(&[]), 0);
    }

    #[test]
    fn test_key_index_layout() {
        for (row, keys) in keyboard::LAYOUT.iter().enumerate() {
            for (column, key) in keys.iter().enumerate() {
                assert_eq!(key_index(*key), Some(row * 4 + column));
            }
        }
        assert_eq!(key_index(' '), None);
    }

    #[test]
    fn test_keyboard_replaces_state() {
        let mut keyboard = Keyboard::new();
        keyboard.set_mask(0b0000_0000_0010_0100);
        assert!(keyboard.is_pressed(2));
        assert!(keyboard.is_pressed(5));
        assert!(!keyboard.is_pressed(0));
        assert_eq!(keyboard.first_pressed(), Some(2));

        keyboard.set_mask(0b1000_0000_0000_0000);
        assert!(!keyboard.is_pressed(2));
        assert!(keyboard.is_pressed(0xF));
        assert_eq!(keyboard.first_pressed(), Some(0xF));

        keyboard.set_mask(0);
        assert_eq!(keyboard.first_pressed(), None);
    }

    #[test]
    fn test_keyboard_out_of_range() {
        let mut keyboard = Keyboard::new();
        keyboard.set_mask(u16::MAX);
        assert!(!keyboard.is_pressed(keyboard::SIZE));
        assert!(!keyboard.is_pressed(0xFF));
    }

    #[test]
    fn test_draw_sprite_collision() {
        let mut display = Display::new();
        assert!(!display.draw_sprite(0, 0, [0xF0]));
        for x in 0..4 {
            assert!(display.get_pixel(x, 0));
        }
        assert!(!display.get_pixel(4, 0));

        // drawing the same sprite again erases it
        assert!(display.draw_sprite(0, 0, [0xF0]));
        assert!(display.rows().iter().flatten().all(|pixel| !pixel));
    }

    #[test]
    fn test_draw_sprite_clips_right_and_bottom() {
        let mut display = Display::new();
        // starts at the last two columns and the last row
        assert!(!display.draw_sprite(display::WIDTH - 2, display::HEIGHT - 1, [0xFF, 0xFF]));

        let lit: usize = display.rows().iter().flatten().filter(|p| **p).count();
        assert_eq!(lit, 2);
        assert!(display.get_pixel(display::WIDTH - 2, display::HEIGHT - 1));
        assert!(display.get_pixel(display::WIDTH - 1, display::HEIGHT - 1));
        // nothing wrapped onto the left or top edge
        assert!(!display.get_pixel(0, display::HEIGHT - 1));
        assert!(!display.get_pixel(0, 0));
    }

    #[test]
    fn test_draw_sprite_wraps_origin() {
        let mut display = Display::new();
        display.draw_sprite(display::WIDTH + 3, display::HEIGHT + 1, [0x80]);
        assert!(display.get_pixel(3, 1));
    }

    #[test]
    fn test_get_pixel_out_of_range() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, [0xFF]);
        assert!(!display.get_pixel(display::WIDTH, 0));
        assert!(!display.get_pixel(0, display::HEIGHT));
        assert!(!display.get_pixel(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_clear() {
        let mut display = Display::new();
        display.draw_sprite(10, 10, [0xAA, 0x55]);
        display.clear();
        assert_eq!(display, Display::new());
    }
}

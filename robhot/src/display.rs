// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Text fitting for the 16x2 character display.
//!
//! The HD44780 character ROM only has useful glyphs for printable ASCII, so every line is reduced
//! to at most [`COLUMNS`] single-byte character codes before it reaches the bus.

/// Characters per display line.
pub const COLUMNS: usize = 16;

/// Display lines.
pub const ROWS: u8 = 2;

/// Shown in place of characters the display cannot render.
pub const PLACEHOLDER: u8 = b'?';

/// One display line, already truncated to [`COLUMNS`] characters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLine {
    codes: [u8; COLUMNS],
    len: u8,
}

impl TextLine {
    /// Fit `text` onto a line, keeping its first 16 characters.
    pub fn new(text: &str) -> Self {
        let mut line = Self::default();
        for ch in text.chars() {
            if !line.push(char_code(ch)) {
                break;
            }
        }
        line
    }

    /// Append one byte, mapped onto the display character set like [`char_code`]; bytes above
    /// ASCII become [`PLACEHOLDER`]. Returns `false` (and drops the byte) once the line is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.codes[self.len as usize] = if byte.is_ascii() {
            ascii_code(byte)
        } else {
            PLACEHOLDER
        };
        self.len += 1;
        true
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.codes[..self.len as usize]
    }

    /// The line as text. Every stored code is printable ASCII.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == COLUMNS
    }
}

/// Map a character onto the display's character set.
///
/// Control characters become a space so a stray newline never garbles the panel.
pub fn char_code(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        c if c.is_control() => b' ',
        _ => PLACEHOLDER,
    }
}

/// Same mapping as [`char_code`] for a single ASCII byte.
#[inline]
pub(crate) fn ascii_code(byte: u8) -> u8 {
    char_code(byte as char)
}

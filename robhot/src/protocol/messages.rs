// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command messages accepted over the serial link.
//!
//! Every command is one ASCII line terminated by `\n`; a preceding `\r` is tolerated:
//!
//! ```text
//! W                 wave the servo
//! M<line1>|<line2>  show two lines on the LCD (line 2 and the '|' are optional)
//! A<degrees>        move the servo, e.g. "A135"
//! C                 clear the LCD
//! ```

use crate::display::TextLine;

/// Link speed of the host serial helper.
pub const BAUD_RATE: u32 = 9_600;

/// Ends every command.
pub const TERMINATOR: u8 = b'\n';
/// Splits the two lines of a message.
pub const LINE_SEPARATOR: u8 = b'|';

// Command letters
pub const CMD_WAVE: u8 = b'W';
pub const CMD_MESSAGE: u8 = b'M';
pub const CMD_ANGLE: u8 = b'A';
pub const CMD_CLEAR: u8 = b'C';

/// One decoded command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Wave,
    Message { line1: TextLine, line2: TextLine },
    /// Target angle as sent; the servo clamps it to 180.
    MoveServo(u8),
    Clear,
}

impl Command {
    /// Build a message command, fitting both lines onto the display.
    pub fn message(line1: &str, line2: &str) -> Self {
        Command::Message {
            line1: TextLine::new(line1),
            line2: TextLine::new(line2),
        }
    }

    /// Write the wire form of the command, terminator included, into `out`.
    ///
    /// Returns the number of bytes written, or `None` if `out` is too small.
    pub fn encode(&self, out: &mut [u8]) -> Option<usize> {
        let mut w = Writer { out, pos: 0 };
        match self {
            Command::Wave => w.put(CMD_WAVE)?,
            Command::Clear => w.put(CMD_CLEAR)?,
            Command::Message { line1, line2 } => {
                w.put(CMD_MESSAGE)?;
                w.put_all(line1.as_bytes())?;
                w.put(LINE_SEPARATOR)?;
                w.put_all(line2.as_bytes())?;
            }
            Command::MoveServo(angle) => {
                w.put(CMD_ANGLE)?;
                let mut digits = [0u8; 3];
                let mut n = *angle;
                let mut i = digits.len();
                loop {
                    i -= 1;
                    digits[i] = b'0' + n % 10;
                    n /= 10;
                    if n == 0 {
                        break;
                    }
                }
                w.put_all(&digits[i..])?;
            }
        }
        w.put(TERMINATOR)?;
        Some(w.pos)
    }
}

struct Writer<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl Writer<'_> {
    fn put(&mut self, byte: u8) -> Option<()> {
        *self.out.get_mut(self.pos)? = byte;
        self.pos += 1;
        Some(())
    }

    fn put_all(&mut self, bytes: &[u8]) -> Option<()> {
        bytes.iter().try_for_each(|&b| self.put(b))
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line parser for the RobHot serial command protocol.
//!
//! Bytes are fed one at a time as they arrive on the UART. The parser never buffers more than the
//! two display lines: text past 16 characters is consumed and dropped on the spot. Any line it
//! cannot make sense of is skipped up to the next `\n`, which is also how it resynchronizes after
//! a receive error.

use embedded_hal::serial;

use crate::display::{self, TextLine, PLACEHOLDER};
use crate::protocol::messages::*;

enum State {
    /// Start of a line, waiting for the command letter.
    Idle,
    /// Seen a bare command letter, waiting for the terminator.
    Bare(Command),
    Message { second_line: bool },
    Angle { value: u8, digits: u8 },
    /// Skipping the rest of an invalid line.
    Discard,
}

pub struct Parser {
    state: State,
    line1: TextLine,
    line2: TextLine,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            line1: TextLine::default(),
            line2: TextLine::default(),
        }
    }

    /// Process a single incoming byte. Returns `Some(Command)` when it completes a valid line.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        if byte == b'\r' {
            return None;
        }
        if byte == TERMINATOR {
            let state = core::mem::replace(&mut self.state, State::Idle);
            return self.finish(state);
        }

        match self.state {
            State::Idle => {
                self.state = match byte {
                    CMD_WAVE => State::Bare(Command::Wave),
                    CMD_CLEAR => State::Bare(Command::Clear),
                    CMD_MESSAGE => {
                        self.line1 = TextLine::default();
                        self.line2 = TextLine::default();
                        State::Message { second_line: false }
                    }
                    CMD_ANGLE => State::Angle {
                        value: 0,
                        digits: 0,
                    },
                    // Unknown command letter
                    _ => State::Discard,
                };
            }
            State::Bare(_) => self.state = State::Discard,
            State::Message { second_line } => {
                if byte == LINE_SEPARATOR && !second_line {
                    self.state = State::Message { second_line: true };
                } else if let Some(code) = text_code(byte) {
                    let line = if second_line {
                        &mut self.line2
                    } else {
                        &mut self.line1
                    };
                    // Full line: the rest is truncated away.
                    let _ = line.push(code);
                }
            }
            State::Angle { value, digits } => {
                self.state = match byte {
                    b'0'..=b'9' => State::Angle {
                        value: value.saturating_mul(10).saturating_add(byte - b'0'),
                        digits: digits.saturating_add(1),
                    },
                    _ => State::Discard,
                };
            }
            State::Discard => {}
        }
        None
    }

    /// Drain every byte currently available from `rx`, stopping early at the first complete
    /// command. Never blocks.
    ///
    /// A receive error (overrun, framing, noise) may have eaten any byte of the current line, so
    /// the rest of that line is dropped.
    pub fn poll<R>(&mut self, rx: &mut R) -> Option<Command>
    where
        R: serial::Read<u8>,
    {
        loop {
            match rx.read() {
                Ok(byte) => {
                    if let Some(cmd) = self.push(byte) {
                        return Some(cmd);
                    }
                }
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(_)) => self.state = State::Discard,
            }
        }
    }

    /// Forget any partially received line.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn finish(&mut self, state: State) -> Option<Command> {
        match state {
            State::Bare(cmd) => Some(cmd),
            State::Message { .. } => Some(Command::Message {
                line1: self.line1,
                line2: self.line2,
            }),
            State::Angle { value, digits } if digits > 0 => Some(Command::MoveServo(value)),
            _ => None,
        }
    }
}

/// Display code for one byte of UTF-8 text, or `None` for bytes that do not start a character.
fn text_code(byte: u8) -> Option<u8> {
    match byte {
        0x00..=0x7F => Some(display::ascii_code(byte)),
        // UTF-8 continuation byte
        0x80..=0xBF => None,
        // UTF-8 lead byte: one character the display cannot show
        _ => Some(PLACEHOLDER),
    }
}

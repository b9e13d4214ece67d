// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HD44780-compatible character LCD driver (4-bit parallel bus).
//!
//! Wiring (R/W tied to ground, so the bus is write-only):
//! - RS: register select (low = instruction, high = data)
//! - E:  enable strobe, data latches on the falling edge
//! - D4..D7: upper half of the data bus; D0..D3 are left unconnected
//!
//! Every byte goes out as two nibbles, high nibble first. Since the busy flag cannot be read
//! back, each transfer is followed by a fixed settle delay long enough for the slowest
//! instruction in its class.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;

use crate::display::{TextLine, COLUMNS, ROWS};

// Instructions
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

// Instruction flags
pub mod flag {
    // ENTRY_MODE_SET
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

    // DISPLAY_CONTROL
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // FUNCTION_SET
    pub const EIGHT_BIT: u8 = 0x10;
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X10: u8 = 0x04;
}

/// DDRAM address of the first column of each row on a 16x2 panel.
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

/// Execution time of clear / home.
const SLOW_CMD_US: u16 = 2_000;
/// Execution time of every other instruction and data write, with margin.
const SETTLE_US: u16 = 100;

/// 16x2 character LCD on a 4-bit bus.
///
/// All six lines share one pin type; on the MCU side that is an erased push-pull output.
pub struct Hd44780<P> {
    rs: P,
    en: P,
    data: [P; 4],
    display_control: u8,
}

impl<P, E> Hd44780<P>
where
    P: OutputPin<Error = E>,
{
    /// `data` is `[d4, d5, d6, d7]`.
    pub fn new(rs: P, en: P, data: [P; 4]) -> Self {
        Self {
            rs,
            en,
            data,
            display_control: 0,
        }
    }

    /// Power-on initialization by instruction, for a 2-line, 5x8 dot panel.
    ///
    /// Leaves the display on, cursor and blink off, cleared, writing left to right.
    pub fn begin<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16> + DelayMs<u16>,
    {
        // Vcc rise to 4.5 V takes up to 40 ms.
        delay.delay_ms(50);
        self.rs.set_low()?;
        self.en.set_low()?;

        // Force 8-bit mode three times, whatever state the controller woke up in.
        self.write_nibble(0x03, delay)?;
        delay.delay_us(4_500);
        self.write_nibble(0x03, delay)?;
        delay.delay_us(4_500);
        self.write_nibble(0x03, delay)?;
        delay.delay_us(150);

        // Switch to 4-bit mode. From here on every byte is two nibbles.
        self.write_nibble(0x02, delay)?;

        self.command(cmd::FUNCTION_SET | flag::TWO_LINE, delay)?;

        self.display_control = flag::DISPLAY_ON;
        self.command(cmd::DISPLAY_CONTROL | self.display_control, delay)?;

        self.clear(delay)?;

        self.command(cmd::ENTRY_MODE_SET | flag::ENTRY_LEFT, delay)
    }

    /// Blank the display and return the cursor to (0, 0).
    pub fn clear<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.command(cmd::CLEAR_DISPLAY, delay)?;
        delay.delay_us(SLOW_CMD_US);
        Ok(())
    }

    /// Return the cursor to (0, 0) without clearing.
    pub fn home<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.command(cmd::RETURN_HOME, delay)?;
        delay.delay_us(SLOW_CMD_US);
        Ok(())
    }

    /// Move the cursor. Out-of-range positions are clamped to the last row / column.
    pub fn set_cursor<D>(&mut self, col: u8, row: u8, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        let row = row.min(ROWS - 1);
        let col = col.min(COLUMNS as u8 - 1);
        self.command(cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col), delay)
    }

    /// Write a line of text at the current cursor position.
    pub fn print<D>(&mut self, line: &TextLine, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        for &code in line.as_bytes() {
            self.write(code, delay)?;
        }
        Ok(())
    }

    pub fn display_on<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.display_control |= flag::DISPLAY_ON;
        self.command(cmd::DISPLAY_CONTROL | self.display_control, delay)
    }

    /// Blank the panel without losing DDRAM contents.
    pub fn display_off<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.display_control &= !flag::DISPLAY_ON;
        self.command(cmd::DISPLAY_CONTROL | self.display_control, delay)
    }

    /// Send one instruction byte (RS low).
    #[inline]
    pub fn command<D>(&mut self, value: u8, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.send(value, false, delay)
    }

    /// Send one data byte (RS high) to DDRAM at the cursor.
    #[inline]
    pub fn write<D>(&mut self, value: u8, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.send(value, true, delay)
    }

    fn send<D>(&mut self, value: u8, data_reg: bool, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        if data_reg {
            self.rs.set_high()?;
        } else {
            self.rs.set_low()?;
        }
        self.write_nibble(value >> 4, delay)?;
        self.write_nibble(value & 0x0F, delay)
    }

    fn write_nibble<D>(&mut self, nibble: u8, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble & (1 << bit) != 0 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        self.pulse_enable(delay)
    }

    /// Enable pulse width must be > 450 ns; commands need > 37 µs to execute.
    fn pulse_enable<D>(&mut self, delay: &mut D) -> Result<(), E>
    where
        D: DelayUs<u16>,
    {
        self.en.set_low()?;
        delay.delay_us(1);
        self.en.set_high()?;
        delay.delay_us(1);
        self.en.set_low()?;
        delay.delay_us(SETTLE_US);
        Ok(())
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Recording fakes for the `embedded-hal` traits used by the drivers.
//!
//! Every fake appends to a shared [`Log`] so a test can assert the exact sequence of pin levels,
//! PWM duties and delays a driver produced.

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use embedded_hal::PwmPin;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    PwmEnable(bool),
    Duty(u16),
    DelayUs(u32),
    DelayMs(u32),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug, PartialEq, Eq)]
pub struct PinFault;

pub struct FakePin {
    name: &'static str,
    log: Log,
    broken: bool,
}

impl FakePin {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            broken: false,
        }
    }

    /// A pin whose every write fails.
    pub fn broken(name: &'static str, log: &Log) -> Self {
        Self {
            broken: true,
            ..Self::new(name, log)
        }
    }

    fn drive(&mut self, high: bool) -> Result<(), PinFault> {
        if self.broken {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(Event::Pin(self.name, high));
        Ok(())
    }
}

impl OutputPin for FakePin {
    type Error = PinFault;

    fn set_low(&mut self) -> Result<(), PinFault> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.drive(true)
    }
}

/// Four HD44780 wires named after their LCD pin: `rs`, `en`, `d4`..`d7`.
pub fn lcd_pins(log: &Log) -> (FakePin, FakePin, [FakePin; 4]) {
    (
        FakePin::new("rs", log),
        FakePin::new("en", log),
        [
            FakePin::new("d4", log),
            FakePin::new("d5", log),
            FakePin::new("d6", log),
            FakePin::new("d7", log),
        ],
    )
}

/// 16-bit timer channel, 20 ms period at 1 µs per tick.
pub struct FakePwm {
    log: Log,
    duty: u16,
    max_duty: u16,
}

impl FakePwm {
    pub const MAX_DUTY: u16 = 20_000;

    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            duty: 0,
            max_duty: Self::MAX_DUTY,
        }
    }
}

impl PwmPin for FakePwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.log.borrow_mut().push(Event::PwmEnable(false));
    }

    fn enable(&mut self) {
        self.log.borrow_mut().push(Event::PwmEnable(true));
    }

    fn get_duty(&self) -> u16 {
        self.duty
    }

    fn get_max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.log.borrow_mut().push(Event::Duty(duty));
    }
}

pub struct FakeDelay {
    log: Log,
}

impl FakeDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayUs<u16> for FakeDelay {
    fn delay_us(&mut self, us: u16) {
        self.log.borrow_mut().push(Event::DelayUs(us.into()));
    }
}

impl DelayMs<u16> for FakeDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.log.borrow_mut().push(Event::DelayMs(ms.into()));
    }
}

/// Serial receiver fed from a script of bytes and line errors.
pub struct FakeRx {
    script: VecDeque<Result<u8, ()>>,
}

impl FakeRx {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            script: bytes.iter().copied().map(Ok).collect(),
        }
    }

    /// Inject a receive error (e.g. overrun) after the bytes queued so far.
    pub fn then_error(mut self) -> Self {
        self.script.push_back(Err(()));
        self
    }

    pub fn then_bytes(mut self, bytes: &[u8]) -> Self {
        self.script.extend(bytes.iter().copied().map(Ok));
        self
    }
}

impl serial::Read<u8> for FakeRx {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        match self.script.pop_front() {
            Some(Ok(b)) => Ok(b),
            Some(Err(())) => Err(nb::Error::Other(())),
            None => Err(nb::Error::WouldBlock),
        }
    }
}

/// Replays the log through an HD44780 and returns every latched nibble as `(rs, nibble)`.
///
/// A nibble latches on the falling edge of `en`, sampling whatever `rs` and `d4..d7` hold.
pub fn latched_nibbles(log: &Log) -> Vec<(bool, u8)> {
    let mut rs = false;
    let mut en = false;
    let mut data = 0u8;
    let mut out = Vec::new();

    for event in log.borrow().iter() {
        if let Event::Pin(name, high) = *event {
            let bit = match name {
                "d4" => Some(0),
                "d5" => Some(1),
                "d6" => Some(2),
                "d7" => Some(3),
                _ => None,
            };
            match (name, bit) {
                (_, Some(bit)) => {
                    if high {
                        data |= 1 << bit;
                    } else {
                        data &= !(1 << bit);
                    }
                }
                ("rs", None) => rs = high,
                ("en", None) => {
                    if en && !high {
                        out.push((rs, data));
                    }
                    en = high;
                }
                _ => {}
            }
        }
    }
    out
}

/// Pairs latched nibbles into full bus bytes as `(rs, byte)`, skipping `skip` leading nibbles.
pub fn latched_bytes(log: &Log, skip: usize) -> Vec<(bool, u8)> {
    latched_nibbles(log)[skip..]
        .chunks(2)
        .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
        .collect()
}

pub fn duties(log: &Log) -> Vec<u16> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Duty(d) => Some(*d),
            _ => None,
        })
        .collect()
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The RobHot panel: one character LCD and one servo, owned for the lifetime of the firmware.
//!
//! Both devices are optional. A device is installed once at startup and only if it came up
//! cleanly. Every operation on a missing device is a silent no-op, so the rest of the firmware
//! never has to care whether the LCD or the servo is actually wired.
//!
//! Each operation returns `true` when the device was present and every bus write went through.
//! Callers are free to ignore it.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut panel = Panel::new();
//! panel.setup_lcd_with_banner(lcd, "RobHot Ready", "", &mut delay);
//! panel.setup_servo(servo);
//!
//! loop {
//!     if let Some(cmd) = parser.poll(&mut rx) {
//!         panel.handle(&cmd, &mut delay);
//!     }
//! }
//! ```

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

use crate::display::TextLine;
use crate::drivers::{Hd44780, Servo};
use crate::protocol::Command;

/// One swing of the wave gesture, in degrees.
pub const WAVE_PATTERN: [u8; 4] = [60, 120, 60, 90];
/// Swings per wave.
pub const WAVE_REPEATS: usize = 2;
/// Hold time after every step of the wave.
pub const WAVE_STEP_MS: u16 = 200;

pub struct Panel<P, W> {
    lcd: Option<Hd44780<P>>,
    servo: Option<Servo<W>>,
}

impl<P, W> Default for Panel<P, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, W> Panel<P, W> {
    /// A panel with neither device installed.
    pub const fn new() -> Self {
        Self {
            lcd: None,
            servo: None,
        }
    }

    #[inline]
    pub fn has_lcd(&self) -> bool {
        self.lcd.is_some()
    }

    #[inline]
    pub fn has_servo(&self) -> bool {
        self.servo.is_some()
    }
}

impl<P, E, W> Panel<P, W>
where
    P: OutputPin<Error = E>,
    W: PwmPin<Duty = u16>,
{
    /// Initialize the LCD for 16x2 operation and clear it.
    ///
    /// The driver is kept only if initialization succeeded.
    pub fn setup_lcd<D>(&mut self, mut lcd: Hd44780<P>, delay: &mut D) -> bool
    where
        D: DelayUs<u16> + DelayMs<u16>,
    {
        let ready = lcd.begin(delay).is_ok() && lcd.clear(delay).is_ok();
        self.lcd = if ready { Some(lcd) } else { None };
        ready
    }

    /// [`Panel::setup_lcd`], then show a banner.
    pub fn setup_lcd_with_banner<D>(
        &mut self,
        lcd: Hd44780<P>,
        line1: &str,
        line2: &str,
        delay: &mut D,
    ) -> bool
    where
        D: DelayUs<u16> + DelayMs<u16>,
    {
        self.setup_lcd(lcd, delay) && self.display_message(line1, line2, delay)
    }

    pub fn clear_lcd<D>(&mut self, delay: &mut D) -> bool
    where
        D: DelayUs<u16>,
    {
        match self.lcd.as_mut() {
            Some(lcd) => lcd.clear(delay).is_ok(),
            None => false,
        }
    }

    /// Replace the screen with two lines, each truncated to 16 characters.
    pub fn display_message<D>(&mut self, line1: &str, line2: &str, delay: &mut D) -> bool
    where
        D: DelayUs<u16>,
    {
        self.show(&TextLine::new(line1), &TextLine::new(line2), delay)
    }

    /// Attach the servo, center it, and keep it.
    pub fn setup_servo(&mut self, mut servo: Servo<W>) -> bool {
        servo.attach();
        self.servo = Some(servo);
        true
    }

    /// Move the servo to `angle` degrees, clamped to 180.
    pub fn move_servo(&mut self, angle: u8) -> bool {
        match self.servo.as_mut() {
            Some(servo) => {
                servo.write(angle);
                true
            }
            None => false,
        }
    }

    /// Last commanded servo angle, if a servo is installed.
    pub fn servo_angle(&self) -> Option<u8> {
        self.servo.as_ref().map(Servo::angle)
    }

    /// Play the wave gesture. Blocks for `WAVE_REPEATS * WAVE_PATTERN.len() * WAVE_STEP_MS`.
    pub fn wave<D>(&mut self, delay: &mut D) -> bool
    where
        D: DelayMs<u16>,
    {
        let Some(servo) = self.servo.as_mut() else {
            return false;
        };

        for _ in 0..WAVE_REPEATS {
            for &angle in WAVE_PATTERN.iter() {
                servo.write(angle);
                delay.delay_ms(WAVE_STEP_MS);
            }
        }
        true
    }

    /// Run one command received over the serial link.
    pub fn handle<D>(&mut self, command: &Command, delay: &mut D) -> bool
    where
        D: DelayUs<u16> + DelayMs<u16>,
    {
        match command {
            Command::Wave => self.wave(delay),
            Command::Message { line1, line2 } => self.show(line1, line2, delay),
            Command::MoveServo(angle) => self.move_servo(*angle),
            Command::Clear => self.clear_lcd(delay),
        }
    }

    fn show<D>(&mut self, line1: &TextLine, line2: &TextLine, delay: &mut D) -> bool
    where
        D: DelayUs<u16>,
    {
        match self.lcd.as_mut() {
            Some(lcd) => write_screen(lcd, line1, line2, delay).is_ok(),
            None => false,
        }
    }
}

fn write_screen<P, E, D>(
    lcd: &mut Hd44780<P>,
    line1: &TextLine,
    line2: &TextLine,
    delay: &mut D,
) -> Result<(), E>
where
    P: OutputPin<Error = E>,
    D: DelayUs<u16>,
{
    lcd.clear(delay)?;
    lcd.set_cursor(0, 0, delay)?;
    lcd.print(line1, delay)?;
    lcd.set_cursor(0, 1, delay)?;
    lcd.print(line2, delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::servo::{MAX_PULSE_US, MIN_PULSE_US};
    use crate::testing::{self, Event, FakeDelay, FakePin, FakePwm, Log};

    type TestPanel = Panel<FakePin, FakePwm>;

    fn lcd(log: &Log) -> Hd44780<FakePin> {
        let (rs, en, data) = testing::lcd_pins(log);
        Hd44780::new(rs, en, data)
    }

    fn delays_ms(log: &Log) -> Vec<u32> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn missing_devices_are_silent_noops() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();

        assert!(!panel.has_lcd());
        assert!(!panel.has_servo());
        assert!(!panel.clear_lcd(&mut delay));
        assert!(!panel.display_message("hello", "world", &mut delay));
        assert!(!panel.move_servo(45));
        assert!(!panel.wave(&mut delay));
        assert!(!panel.handle(&Command::Wave, &mut delay));
        assert_eq!(panel.servo_angle(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn lcd_that_fails_init_is_not_installed() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let (rs, _, data) = testing::lcd_pins(&log);
        let broken = Hd44780::new(rs, FakePin::broken("en", &log), data);

        let mut panel = TestPanel::new();
        assert!(!panel.setup_lcd(broken, &mut delay));
        assert!(!panel.has_lcd());
        assert!(!panel.display_message("hello", "", &mut delay));
    }

    #[test]
    fn setup_lcd_initializes_and_clears() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();

        assert!(panel.setup_lcd(lcd(&log), &mut delay));
        assert!(panel.has_lcd());

        // init: 4 wake-up nibbles, function set, display control, clear, entry mode; then clear
        let bytes = testing::latched_bytes(&log, 4);
        assert_eq!(bytes.last(), Some(&(false, 0x01)));
        assert_eq!(bytes.len(), 5);
    }

    #[test]
    fn banner_is_shown_after_setup() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();

        assert!(panel.setup_lcd_with_banner(lcd(&log), "RobHot Ready", "", &mut delay));

        let data: Vec<u8> = testing::latched_bytes(&log, 4)
            .into_iter()
            .filter(|&(rs, _)| rs)
            .map(|(_, b)| b)
            .collect();
        assert_eq!(data, b"RobHot Ready");
    }

    #[test]
    fn message_lines_are_truncated_to_sixteen() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();
        panel.setup_lcd(lcd(&log), &mut delay);
        log.borrow_mut().clear();

        assert!(panel.display_message(
            "Ciao, come stai oggi?",
            "Californiaaaaaaaa!",
            &mut delay
        ));

        let mut expected = vec![(false, 0x01), (false, 0x80)];
        expected.extend(b"Ciao, come stai ".iter().map(|&b| (true, b)));
        expected.push((false, 0xC0));
        expected.extend(b"Californiaaaaaaa".iter().map(|&b| (true, b)));
        assert_eq!(testing::latched_bytes(&log, 0), expected);
    }

    #[test]
    fn setup_servo_centers_it() {
        let log = testing::log();
        let mut panel = TestPanel::new();

        assert!(panel.setup_servo(Servo::new(FakePwm::new(&log))));
        assert_eq!(panel.servo_angle(), Some(90));
        assert_eq!(log.borrow().last(), Some(&Event::PwmEnable(true)));
    }

    #[test]
    fn servo_angle_above_180_is_clamped() {
        let log = testing::log();
        let mut panel = TestPanel::new();
        panel.setup_servo(Servo::new(FakePwm::new(&log)));

        assert!(panel.move_servo(250));
        assert_eq!(panel.servo_angle(), Some(180));
        assert_eq!(testing::duties(&log).last(), Some(&MAX_PULSE_US));

        assert!(panel.move_servo(0));
        assert_eq!(testing::duties(&log).last(), Some(&MIN_PULSE_US));
    }

    #[test]
    fn wave_plays_the_pattern_twice_and_recenters() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();
        panel.setup_servo(Servo::new(FakePwm::new(&log)));
        log.borrow_mut().clear();

        assert!(panel.wave(&mut delay));

        let servo = Servo::new(FakePwm::new(&testing::log()));
        let expected: Vec<u16> = [60, 120, 60, 90, 60, 120, 60, 90]
            .iter()
            .map(|&a| servo.pulse_us(a))
            .collect();
        assert_eq!(testing::duties(&log), expected);
        assert_eq!(delays_ms(&log), vec![200; 8]);
        assert_eq!(panel.servo_angle(), Some(90));
    }

    #[test]
    fn commands_are_dispatched() {
        let log = testing::log();
        let mut delay = FakeDelay::new(&log);
        let mut panel = TestPanel::new();
        panel.setup_lcd(lcd(&log), &mut delay);
        panel.setup_servo(Servo::new(FakePwm::new(&log)));

        log.borrow_mut().clear();
        assert!(panel.handle(&Command::message("Peace", "hello"), &mut delay));
        let data: Vec<u8> = testing::latched_bytes(&log, 0)
            .into_iter()
            .filter(|&(rs, _)| rs)
            .map(|(_, b)| b)
            .collect();
        assert_eq!(data, b"Peacehello");

        log.borrow_mut().clear();
        assert!(panel.handle(&Command::Clear, &mut delay));
        assert_eq!(testing::latched_bytes(&log, 0), vec![(false, 0x01)]);

        assert!(panel.handle(&Command::MoveServo(30), &mut delay));
        assert_eq!(panel.servo_angle(), Some(30));

        log.borrow_mut().clear();
        assert!(panel.handle(&Command::Wave, &mut delay));
        assert_eq!(delays_ms(&log).len(), 8);
    }
}

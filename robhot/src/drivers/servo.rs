// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby servo on a single PWM channel.
//!
//! The servo holds the position encoded by the width of a pulse repeated every 20 ms (50 Hz).
//! Pulse widths default to the 544–2400 µs range of the Arduino `Servo` library, which covers
//! 0–180° on the common SG90 / MG996R class of servos.
//!
//! The PWM timer must already run at [`PERIOD_US`]; the driver only scales the duty cycle.

use embedded_hal::PwmPin;

/// Highest commandable angle in degrees.
pub const MAX_ANGLE: u8 = 180;

/// Neutral position written on attach.
pub const CENTER_ANGLE: u8 = 90;

/// PWM period for a 50 Hz servo signal.
pub const PERIOD_US: u32 = 20_000;

/// Pulse width at 0°.
pub const MIN_PULSE_US: u16 = 544;

/// Pulse width at 180°.
pub const MAX_PULSE_US: u16 = 2_400;

/// Position-controlled hobby servo.
pub struct Servo<P> {
    pwm: P,
    min_pulse_us: u16,
    max_pulse_us: u16,
    angle: u8,
}

impl<P> Servo<P>
where
    P: PwmPin<Duty = u16>,
{
    /// Wrap a PWM channel. The output stays untouched until [`Servo::attach`].
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            min_pulse_us: MIN_PULSE_US,
            max_pulse_us: MAX_PULSE_US,
            angle: CENTER_ANGLE,
        }
    }

    /// Override the pulse range for servos that stall at the Arduino defaults.
    pub fn with_pulse_range(mut self, min_us: u16, max_us: u16) -> Self {
        self.min_pulse_us = min_us.min(max_us);
        self.max_pulse_us = max_us.max(min_us);
        self
    }

    /// Start driving pulses and move to the center position.
    pub fn attach(&mut self) {
        self.write(CENTER_ANGLE);
        self.pwm.enable();
    }

    /// Stop driving pulses (the servo goes limp) and release the channel.
    pub fn detach(mut self) -> P {
        self.pwm.disable();
        self.pwm
    }

    /// Move to `angle` degrees. Angles past 180 are clamped to 180.
    pub fn write(&mut self, angle: u8) {
        let angle = angle.min(MAX_ANGLE);
        let pulse = self.pulse_us(angle) as u32;
        let max_duty = self.pwm.get_max_duty() as u32;

        self.pwm.set_duty((max_duty * pulse / PERIOD_US) as u16);
        self.angle = angle;
    }

    /// Last commanded angle, after clamping.
    #[inline]
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Pulse width in µs for `angle` degrees (clamped to 180).
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let angle = angle.min(MAX_ANGLE) as u32;
        let span = (self.max_pulse_us - self.min_pulse_us) as u32;
        self.min_pulse_us + (span * angle / MAX_ANGLE as u32) as u16
    }
}

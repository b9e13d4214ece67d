// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LEDs. The NUCLEO user LEDs are all active-high.

use embedded_hal::digital::v2::OutputPin;

/// LED that remembers whether it is lit.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    lit: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Take the pin and switch the LED off.
    pub fn new(mut pin: PIN) -> Self {
        pin.set_low().ok();
        Self { pin, lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        if lit {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.lit = lit;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(true);
    }

    /// Flip the LED; used as a per-command activity blink.
    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }
}

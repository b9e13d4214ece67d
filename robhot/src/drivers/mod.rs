// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit on top of `embedded-hal` pins and timers
//! and below the panel logic.
//!
//! ## Existing drivers
//!
//! - [`hd44780`] – HD44780-compatible character LCD on a 4-bit parallel bus
//! - [`servo`] – Hobby servo on a 50 Hz PWM channel

pub mod hd44780;
pub mod servo;

pub use hd44780::Hd44780;
pub use servo::Servo;

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RobHot Panel Firmware
//!
//! Board-independent half of the RobHot panel firmware: a 16x2 character LCD and a hobby servo,
//! driven from a serial command link. The `robhot-firmware` crate binds everything here to the
//! STM32F767ZI peripherals through `embedded-hal` 0.2 traits.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`display`] | Fitting text onto a 16-column LCD line |
//! | [`drivers`] | Device-level drivers (HD44780 LCD, PWM hobby servo) |
//! | [`panel`]   | The LCD + servo pair and its convenience operations |
//! | [`protocol`] | Newline-terminated ASCII commands received over serial |
//!
//! ## Getting Started
//!
//! Run the host-side tests from the workspace root:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board from `firmware/`:
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod display;
pub mod drivers;
pub mod panel;
pub mod protocol;

#[cfg(test)]
pub(crate) mod testing;

pub use display::TextLine;
pub use panel::Panel;
pub use protocol::{Command, Parser};

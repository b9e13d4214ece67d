// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers for the NUCLEO-F767ZI.

pub mod led;
pub mod pins;
pub mod usart;

pub use led::Led;
pub use pins::BoardPins;
pub use usart::Usart;

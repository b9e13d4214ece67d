// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI board running the RobHot panel.
//!
//! The LCD and servo are wired to the Arduino-compatible headers, so the sketch wiring carries
//! over unchanged:
//!
//! | Signal   | Arduino | MCU  |
//! | -------- | ------- | ---- |
//! | LCD RS   | D12     | PA6  |
//! | LCD E    | D11     | PA7  |
//! | LCD D4   | D5      | PE11 |
//! | LCD D5   | D4      | PF14 |
//! | LCD D6   | D3      | PE13 |
//! | LCD D7   | D2      | PF15 |
//! | Servo    | D9      | PD15 (TIM4_CH4) |

use stm32f7xx_hal::{
    gpio::{gpiob, gpiod, Alternate, ErasedPin, Output, PushPull},
    pac,
    prelude::*,
};

/// Any LCD bus line. Erased so the driver can hold all six in one type.
pub type LcdPin = ErasedPin<Output<PushPull>>;

pub struct BoardPins {
    pub leds: Leds,
    pub usart3: Usart3Pins,
    pub lcd: LcdPins,
    pub servo: ServoPins,
}

pub struct Leds {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1
    pub blue: gpiob::PB7<Output<PushPull>>,  // LD2
    pub red: gpiob::PB14<Output<PushPull>>,  // LD3
}

/// USART3, routed to the ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// HD44780 4-bit bus. R/W is tied to GND on the shield.
pub struct LcdPins {
    pub rs: LcdPin,
    pub en: LcdPin,
    pub d4: LcdPin,
    pub d5: LcdPin,
    pub d6: LcdPin,
    pub d7: LcdPin,
}

pub struct ServoPins {
    pub pwm: gpiod::PD15<Alternate<2>>, // TIM4_CH4
}

impl BoardPins {
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
        gpiof: pac::GPIOF,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();

        Self {
            leds: Leds {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            lcd: LcdPins {
                rs: gpioa.pa6.into_push_pull_output().erase(),
                en: gpioa.pa7.into_push_pull_output().erase(),
                d4: gpioe.pe11.into_push_pull_output().erase(),
                d5: gpiof.pf14.into_push_pull_output().erase(),
                d6: gpioe.pe13.into_push_pull_output().erase(),
                d7: gpiof.pf15.into_push_pull_output().erase(),
            },

            servo: ServoPins {
                pwm: gpiod.pd15.into_alternate::<2>(),
            },
        }
    }
}

// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! RobHot panel firmware for the NUCLEO-F767ZI.
//!
//! Brings up the LCD and the servo, then runs commands from the ST-LINK serial port forever.
//! Activity and faults are reported on the same port and on the user LEDs:
//! - green: ready, waiting for commands
//! - blue: toggles on every command
//! - red: the LCD failed to initialize

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use robhot::drivers::servo::MAX_ANGLE;
use robhot::drivers::{Hd44780, Servo};
use robhot::protocol::messages::BAUD_RATE;
use robhot::{Command, Panel, Parser};

mod hw;
use hw::{BoardPins, Led, Usart};

/// Shown on the LCD once the panel is up.
const READY_BANNER: (&str, &str) = ("RobHot Ready", "");

/// Standard hobby servo frame rate.
const SERVO_PWM_HZ: u32 = 50;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE, dp.GPIOF);

    // LEDs
    let mut led_ready = Led::new(pins.leds.green);
    let mut led_activity = Led::new(pins.leds.blue);
    let mut led_fault = Led::new(pins.leds.red);

    // USART3 (ST-LINK VCP): commands in, log out
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let mut usart = Usart::new(serial);

    usart.println("");
    usart.println("RobHot panel firmware");

    // SysTick delay from cortex-m, needs core clock in Hz (u32)
    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    // TIM4 CH4 (D9) servo PWM
    let servo_pwm = dp
        .TIM4
        .pwm_hz(pins.servo.pwm, SERVO_PWM_HZ.Hz(), &clocks)
        .split();

    let lcd = Hd44780::new(
        pins.lcd.rs,
        pins.lcd.en,
        [pins.lcd.d4, pins.lcd.d5, pins.lcd.d6, pins.lcd.d7],
    );

    let mut panel = Panel::new();

    let (banner1, banner2) = READY_BANNER;
    if panel.setup_lcd_with_banner(lcd, banner1, banner2, &mut delay) {
        usart.println("lcd: 16x2 ready");
    } else {
        usart.println("lcd: init failed, display disabled");
        led_fault.on();
    }

    panel.setup_servo(Servo::new(servo_pwm));
    usart.write_str("servo: attached, angle ");
    usart.print_u32(panel.servo_angle().unwrap_or_default().into());
    usart.println("");

    usart.flush();
    led_ready.on();

    let mut parser = Parser::new();

    loop {
        let Some(command) = parser.poll(&mut usart) else {
            continue;
        };

        led_activity.toggle();
        log_command(&mut usart, &command);

        if !panel.handle(&command, &mut delay) {
            usart.println("  skipped: device missing or bus error");
        }
    }
}

fn log_command<U: hal::serial::Instance>(usart: &mut Usart<U>, command: &Command) {
    match command {
        Command::Wave => usart.println("cmd: wave"),
        Command::Clear => usart.println("cmd: clear"),
        Command::MoveServo(angle) => {
            usart.write_str("cmd: servo ");
            usart.print_u32((*angle).min(MAX_ANGLE).into());
            if *angle > MAX_ANGLE {
                usart.write_str(" (clamped)");
            }
            usart.println("");
        }
        Command::Message { line1, line2 } => {
            let _ = writeln!(
                usart,
                "cmd: message \"{}\" / \"{}\"\r",
                line1.as_str(),
                line2.as_str()
            );
        }
    }
}

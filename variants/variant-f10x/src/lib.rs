//! STM32F10x variant description
//!
//! Capability tables and bring-up for the STM32F10x variant (medium-density
//! F103 in a 48-pin package, as on "Blue Pill" boards):
//!
//! - 35 pins: PA0-PA15, PB0-PB15, PC13-PC15
//! - 4 timers: TIMER1 (advanced), TIMER2-TIMER4, all 16-bit with 4 channels
//! - 3 serial ports: USART1-USART3
//! - `LED_BUILTIN` on PA5
//!
//! # Features
//!
//! - `stm32` - Register-level bring-up through `variant-hal-stm32f1`,
//!   enabling [`variant_init`]
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod pins;
pub mod serial;
pub mod timers;

pub use pins::{parse_pin, Pin, PIN_TABLE};
pub use serial::{take_serial_ports, SerialPorts, SERIAL_BINDINGS};
pub use timers::{Timer, TIMER_TABLE};

use variant_core::{
    Board, InitGuard, PinCapability, PortBinding, SerialBinding, TimerChannel, TimerDescriptor,
    Variant,
};
use variant_hal::{BringUp, ClockConfig, ClockGate, ClockSource, Pll, Port};

/// On-board LED
pub const LED_BUILTIN: Pin = Pin::PA5;

/// 8 MHz crystal, PLL x9: 72 MHz SYSCLK/HCLK, 36 MHz APB1, 72 MHz APB2
pub const CLOCKS: ClockConfig = ClockConfig {
    source: ClockSource::Hse { freq_hz: 8_000_000 },
    pll: Some(Pll { prediv: 1, mul: 9 }),
    ahb_div: 1,
    apb1_div: 2,
    apb2_div: 1,
};

/// GPIO port clock gates (RCC_APB2ENR IOPxEN)
pub const PORTS: &[PortBinding] = &[
    PortBinding {
        port: Port::A,
        clock: ClockGate::apb2(2),
    },
    PortBinding {
        port: Port::B,
        clock: ClockGate::apb2(3),
    },
    PortBinding {
        port: Port::C,
        clock: ClockGate::apb2(4),
    },
];

/// AFIO, needed before any pin is routed to a peripheral
pub const AFIO_CLOCK: ClockGate = ClockGate::apb2(0);

/// Marker type for the STM32F10x variant
pub struct F10x;

impl Variant for F10x {
    type Pin = Pin;
    type Timer = Timer;

    const NAME: &'static str = "stm32f10x";
    const PINS: &'static [PinCapability<Timer>] = PIN_TABLE;
    const TIMERS: &'static [TimerDescriptor] = TIMER_TABLE;
    const PORTS: &'static [PortBinding] = PORTS;
    const SYSTEM_CLOCKS: &'static [ClockGate] = &[AFIO_CLOCK];
    const SERIALS: &'static [SerialBinding<Pin>] = SERIAL_BINDINGS;
    const LED_BUILTIN: Pin = LED_BUILTIN;
    const CLOCKS: ClockConfig = CLOCKS;
}

/// Whether the pin can be sampled by the ADC
pub fn is_analog_pin(pin: Pin) -> bool {
    variant_core::is_analog_pin::<F10x>(pin)
}

/// Whether the timer has a 32-bit counter
pub fn is_timer_32bit(tim: Timer) -> bool {
    variant_core::is_timer_32bit::<F10x>(tim)
}

/// Number of compare/capture channels of the timer
pub fn num_channels_in_timer(tim: Timer) -> u8 {
    variant_core::num_channels_in_timer::<F10x>(tim)
}

pub fn pin_capability(pin: Pin) -> &'static PinCapability<Timer> {
    variant_core::pin_capability::<F10x>(pin)
}

pub fn timer_descriptor(tim: Timer) -> &'static TimerDescriptor {
    variant_core::timer_descriptor::<F10x>(tim)
}

/// ADC input number of the pin
pub fn adc_channel(pin: Pin) -> Option<u8> {
    variant_core::adc_channel::<F10x>(pin)
}

/// Timer channel driving the pin
pub fn timer_channel(pin: Pin) -> Option<TimerChannel<Timer>> {
    variant_core::timer_channel::<F10x>(pin)
}

/// Bring the variant up through an arbitrary backend
///
/// See [`variant_core::variant_init`].
pub fn init_with<H: BringUp>(guard: &InitGuard, hal: &mut H) -> Option<Board<F10x>> {
    variant_core::variant_init::<F10x, H>(guard, hal)
}

#[cfg(feature = "stm32")]
static INIT: InitGuard = InitGuard::new();

/// Bring up the chip
///
/// Call once at startup, before any pin, timer or serial use. Returns the
/// board context on the first call and `None` afterwards.
///
/// # Panics
///
/// Panics (halting the chip) if the variant tables are inconsistent.
#[cfg(feature = "stm32")]
pub fn variant_init() -> Option<Board<F10x>> {
    let mut hal = variant_hal_stm32f1::Stm32f1BringUp::new();
    init_with(&INIT, &mut hal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use variant_core::{validate, Identifier};

    #[test]
    fn test_tables_consistent() {
        assert_eq!(validate::<F10x>(), Ok(()));
    }

    #[test]
    fn test_sixteen_bit_four_channel_timers() {
        for &tim in Timer::ALL {
            assert!(!is_timer_32bit(tim));
            assert_eq!(num_channels_in_timer(tim), 4);
        }
    }

    #[test]
    fn test_analog_pins() {
        let analog: [Pin; 10] = [
            Pin::PA0,
            Pin::PA1,
            Pin::PA2,
            Pin::PA3,
            Pin::PA4,
            Pin::PA5,
            Pin::PA6,
            Pin::PA7,
            Pin::PB0,
            Pin::PB1,
        ];
        for &pin in Pin::ALL {
            assert_eq!(is_analog_pin(pin), analog.contains(&pin), "{:?}", pin);
        }
        assert_eq!(adc_channel(Pin::PB1), Some(9));
    }

    #[test]
    fn test_led_builtin_is_pa5() {
        assert_eq!(LED_BUILTIN, Pin::PA5);
        assert!(core::ptr::eq(
            pin_capability(LED_BUILTIN),
            pin_capability(Pin::PA5)
        ));
        assert_eq!(<F10x as Variant>::LED_BUILTIN, Pin::PA5);
    }

    #[test]
    fn test_analog_without_timer() {
        // PA4 has an ADC input but no timer channel
        assert_eq!(pin_capability(Pin::PA4).driving_timer(), None);
        assert!(is_analog_pin(Pin::PA4));
        // PB6 has a timer channel but no ADC input
        assert_eq!(pin_capability(Pin::PB6).driving_timer(), Some(Timer::TIMER4));
        assert!(!is_analog_pin(Pin::PB6));
        // PB12 has neither
        assert_eq!(timer_channel(Pin::PB12), None);
        assert!(!is_analog_pin(Pin::PB12));
    }

    #[test]
    fn test_clock_frequencies() {
        assert_eq!(CLOCKS.sysclk_hz(), 72_000_000);
        assert_eq!(CLOCKS.pclk1_hz(), 36_000_000);
    }
}

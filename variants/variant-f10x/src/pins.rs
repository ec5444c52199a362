//! Pin capability table
//!
//! Analog inputs and timer routing follow the STM32F103 datasheet pinout
//! with the default (no remap) alternate functions:
//!
//! | Pins      | ADC       | Timer        |
//! |-----------|-----------|--------------|
//! | PA0-PA3   | IN0-IN3   | TIM2 ch1-4   |
//! | PA4-PA5   | IN4-IN5   | -            |
//! | PA6-PA7   | IN6-IN7   | TIM3 ch1-2   |
//! | PA8-PA11  | -         | TIM1 ch1-4   |
//! | PB0-PB1   | IN8-IN9   | TIM3 ch3-4   |
//! | PB6-PB9   | -         | TIM4 ch1-4   |
//!
//! PA13/PA14 (SWD) and PA15/PB3/PB4 (JTAG) belong to the debug port after
//! reset.

use variant_core::{Identifier, PinCapability};
use variant_hal::Port;

use crate::timers::Timer;

variant_core::identifiers! {
    /// Pins exposed by the STM32F10x variant
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Pin {
        PA0, PA1, PA2, PA3, PA4, PA5, PA6, PA7,
        PA8, PA9, PA10, PA11, PA12, PA13, PA14, PA15,
        PB0, PB1, PB2, PB3, PB4, PB5, PB6, PB7,
        PB8, PB9, PB10, PB11, PB12, PB13, PB14, PB15,
        PC13, PC14, PC15,
    }
}

const fn pa(line: u8) -> PinCapability<Timer> {
    PinCapability::gpio(Port::A, line)
}

const fn pb(line: u8) -> PinCapability<Timer> {
    PinCapability::gpio(Port::B, line)
}

const fn pc(line: u8) -> PinCapability<Timer> {
    PinCapability::gpio(Port::C, line)
}

/// One row per [`Pin`], in raw-value order
pub const PIN_TABLE: &[PinCapability<Timer>] = &[
    pa(0).with_adc(0).with_timer(Timer::TIMER2, 1),
    pa(1).with_adc(1).with_timer(Timer::TIMER2, 2),
    pa(2).with_adc(2).with_timer(Timer::TIMER2, 3),
    pa(3).with_adc(3).with_timer(Timer::TIMER2, 4),
    pa(4).with_adc(4),
    pa(5).with_adc(5),
    pa(6).with_adc(6).with_timer(Timer::TIMER3, 1),
    pa(7).with_adc(7).with_timer(Timer::TIMER3, 2),
    pa(8).with_timer(Timer::TIMER1, 1),
    pa(9).with_timer(Timer::TIMER1, 2),
    pa(10).with_timer(Timer::TIMER1, 3),
    pa(11).with_timer(Timer::TIMER1, 4),
    pa(12),
    pa(13).debug(),
    pa(14).debug(),
    pa(15).debug(),
    pb(0).with_adc(8).with_timer(Timer::TIMER3, 3),
    pb(1).with_adc(9).with_timer(Timer::TIMER3, 4),
    pb(2),
    pb(3).debug(),
    pb(4).debug(),
    pb(5),
    pb(6).with_timer(Timer::TIMER4, 1),
    pb(7).with_timer(Timer::TIMER4, 2),
    pb(8).with_timer(Timer::TIMER4, 3),
    pb(9).with_timer(Timer::TIMER4, 4),
    pb(10),
    pb(11),
    pb(12),
    pb(13),
    pb(14),
    pb(15),
    pc(13),
    pc(14),
    pc(15),
];

const _: () = assert!(PIN_TABLE.len() == <Pin as Identifier>::COUNT);

impl Pin {
    /// Capability record of this pin
    pub fn capability(self) -> &'static PinCapability<Timer> {
        &PIN_TABLE[self.index()]
    }

    pub fn port(self) -> Port {
        self.capability().port
    }

    /// Line within the port
    pub fn line(self) -> u8 {
        self.capability().line
    }
}

/// Parse a pin string from board config
///
/// Supports formats:
/// - "PA5" -> (PA5, false)
/// - "!PB1" -> (PB1, true/inverted)
///
/// Matching is case-insensitive. Pins the variant does not expose (e.g.
/// "PC0") are rejected.
pub fn parse_pin(s: &str) -> Option<(Pin, bool)> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    Pin::from_name(s).map(|pin| (pin, inverted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_geometry() {
        assert_eq!(Pin::PA5.port(), Port::A);
        assert_eq!(Pin::PA5.line(), 5);
        assert_eq!(Pin::PB12.port(), Port::B);
        assert_eq!(Pin::PB12.line(), 12);
        assert_eq!(Pin::PC13.port(), Port::C);
        assert_eq!(Pin::PC13.line(), 13);
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(Pin::PA0.raw(), 0);
        assert_eq!(Pin::PA15.raw(), 15);
        assert_eq!(Pin::PB0.raw(), 16);
        assert_eq!(Pin::PC13.raw(), 32);
        assert_eq!(Pin::PC15.raw(), 34);
        assert_eq!(Pin::COUNT, 35);
    }

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("PA5"), Some((Pin::PA5, false)));
        assert_eq!(parse_pin("!PB1"), Some((Pin::PB1, true)));
        assert_eq!(parse_pin("pc14"), Some((Pin::PC14, false)));
        assert_eq!(parse_pin(" PA10 "), Some((Pin::PA10, false)));

        // Invalid
        assert_eq!(parse_pin("PC0"), None);
        assert_eq!(parse_pin("PA16"), None);
        assert_eq!(parse_pin("gpio5"), None);
        assert_eq!(parse_pin(""), None);
    }
}

//! Property tests for the F10x capability tables

use proptest::prelude::*;
use variant_core::variant_hal::Port;
use variant_core::{timer_pins, Identifier, PinRole};
use variant_f10x::{
    adc_channel, is_analog_pin, is_timer_32bit, num_channels_in_timer, parse_pin,
    pin_capability, timer_channel, timer_descriptor, F10x, Pin, Timer, PIN_TABLE, TIMER_TABLE,
};

fn any_pin() -> impl Strategy<Value = Pin> {
    (0..Pin::COUNT).prop_map(|i| Pin::from_index(i).unwrap())
}

fn any_timer() -> impl Strategy<Value = Timer> {
    (0..Timer::COUNT).prop_map(|i| Timer::from_index(i).unwrap())
}

proptest! {
    #[test]
    fn analog_lookup_matches_table(pin in any_pin()) {
        let first = is_analog_pin(pin);
        prop_assert_eq!(first, is_analog_pin(pin));
        prop_assert_eq!(first, PIN_TABLE[pin.raw() as usize].adc.is_some());
        prop_assert_eq!(first, adc_channel(pin).is_some());
    }

    #[test]
    fn timer_lookup_matches_table(tim in any_timer()) {
        let desc = &TIMER_TABLE[tim.raw() as usize];
        prop_assert_eq!(is_timer_32bit(tim), desc.is_32bit());
        prop_assert_eq!(num_channels_in_timer(tim), desc.channels);
        prop_assert!(num_channels_in_timer(tim) >= 1);
        prop_assert!(core::ptr::eq(timer_descriptor(tim), tim.descriptor()));
    }

    #[test]
    fn driving_timer_resolves(pin in any_pin()) {
        if let Some(tc) = timer_channel(pin) {
            prop_assert!(tc.timer.index() < TIMER_TABLE.len());
            prop_assert!(timer_descriptor(tc.timer).is_valid_channel(tc.channel));
        }
    }

    #[test]
    fn name_round_trips(pin in any_pin(), inverted in any::<bool>()) {
        let mut s = String::new();
        if inverted {
            s.push('!');
        }
        s.push_str(pin.name());
        prop_assert_eq!(parse_pin(&s), Some((pin, inverted)));
        prop_assert_eq!(parse_pin(&s.to_lowercase()), Some((pin, inverted)));
    }

    #[test]
    fn raw_values_are_dense(raw in 0u8..=255) {
        match Pin::from_raw(raw) {
            Some(pin) => prop_assert_eq!(pin.raw(), raw),
            None => prop_assert!(raw as usize >= Pin::COUNT),
        }
    }
}

#[test]
fn pins_are_pairwise_distinct() {
    for (i, &a) in Pin::ALL.iter().enumerate() {
        for &b in &Pin::ALL[i + 1..] {
            let (ca, cb) = (pin_capability(a), pin_capability(b));
            assert!(
                (ca.port, ca.line) != (cb.port, cb.line),
                "{:?} and {:?} alias",
                a,
                b
            );
        }
    }
}

#[test]
fn pins_contiguous_per_port() {
    let expected: [(Port, std::ops::RangeInclusive<u8>); 3] =
        [(Port::A, 0..=15), (Port::B, 0..=15), (Port::C, 13..=15)];
    for (port, lines) in expected {
        let declared: Vec<u8> = Pin::ALL
            .iter()
            .filter(|p| p.port() == port)
            .map(|p| p.line())
            .collect();
        assert_eq!(declared, lines.collect::<Vec<_>>());
    }
}

#[test]
fn each_timer_drives_all_its_channels() {
    for &tim in Timer::ALL {
        let mut channels: Vec<u8> = timer_pins::<F10x>(tim).map(|(_, ch)| ch).collect();
        channels.sort_unstable();
        let expected: Vec<u8> = (1..=num_channels_in_timer(tim)).collect();
        assert_eq!(channels, expected, "{:?}", tim);
    }
}

#[test]
fn timer_one_routing() {
    let pins: Vec<(Pin, u8)> = timer_pins::<F10x>(Timer::TIMER1).collect();
    assert_eq!(
        pins,
        vec![(Pin::PA8, 1), (Pin::PA9, 2), (Pin::PA10, 3), (Pin::PA11, 4)]
    );
}

#[test]
fn debug_pins() {
    let debug: Vec<Pin> = Pin::ALL
        .iter()
        .copied()
        .filter(|p| p.capability().role == PinRole::Debug)
        .collect();
    assert_eq!(
        debug,
        vec![Pin::PA13, Pin::PA14, Pin::PA15, Pin::PB3, Pin::PB4]
    );
}

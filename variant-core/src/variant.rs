//! The variant description and lookups over it
//!
//! All lookups are O(1) indexed reads of `'static` tables. Identifiers are
//! enums whose raw value is the table row, so there is no invalid input.

use variant_hal::{ClockConfig, ClockGate};

use crate::capability::{PinCapability, PortBinding, TimerChannel, TimerDescriptor};
use crate::id::Identifier;
use crate::serial::SerialBinding;

/// A microcontroller variant
///
/// Implemented by a zero-sized marker type in each variant crate. Every
/// table is indexed by the matching identifier's [`Identifier::index`].
pub trait Variant: 'static {
    /// Pin identifiers
    type Pin: Identifier;
    /// Timer identifiers
    type Timer: Identifier;

    /// Human-readable variant name
    const NAME: &'static str;

    /// Pin capability table, one row per `Pin`
    const PINS: &'static [PinCapability<Self::Timer>];

    /// Timer descriptor table, one row per `Timer`
    const TIMERS: &'static [TimerDescriptor];

    /// GPIO ports and their clock gates
    const PORTS: &'static [PortBinding];

    /// Gates that must be open before any port is configured (e.g. AFIO)
    const SYSTEM_CLOCKS: &'static [ClockGate];

    /// Serial port bindings, ordered by logical port number
    const SERIALS: &'static [SerialBinding<Self::Pin>];

    /// On-board LED
    const LED_BUILTIN: Self::Pin;

    /// Clock tree applied during bring-up
    const CLOCKS: ClockConfig;
}

/// Capability record of a pin
pub fn pin_capability<V: Variant>(pin: V::Pin) -> &'static PinCapability<V::Timer> {
    &V::PINS[pin.index()]
}

/// Whether the pin can be sampled by the ADC
pub fn is_analog_pin<V: Variant>(pin: V::Pin) -> bool {
    pin_capability::<V>(pin).is_analog()
}

/// ADC input number of the pin
pub fn adc_channel<V: Variant>(pin: V::Pin) -> Option<u8> {
    pin_capability::<V>(pin).adc
}

/// Timer channel driving the pin
pub fn timer_channel<V: Variant>(pin: V::Pin) -> Option<TimerChannel<V::Timer>> {
    pin_capability::<V>(pin).timer
}

/// Whether a timer channel can drive the pin (PWM / input capture)
pub fn is_pwm_pin<V: Variant>(pin: V::Pin) -> bool {
    pin_capability::<V>(pin).timer.is_some()
}

/// Descriptor of a timer
pub fn timer_descriptor<V: Variant>(tim: V::Timer) -> &'static TimerDescriptor {
    &V::TIMERS[tim.index()]
}

/// Whether the timer has a 32-bit counter
///
/// Compare and overflow arithmetic for a 16-bit timer must stay within
/// [`timer_max_count`].
pub fn is_timer_32bit<V: Variant>(tim: V::Timer) -> bool {
    timer_descriptor::<V>(tim).is_32bit()
}

/// Number of compare/capture channels of the timer
pub fn num_channels_in_timer<V: Variant>(tim: V::Timer) -> u8 {
    timer_descriptor::<V>(tim).channels
}

/// Largest counter value of the timer
pub fn timer_max_count<V: Variant>(tim: V::Timer) -> u32 {
    timer_descriptor::<V>(tim).width.max_count()
}

/// Pins driven by `tim`, with their channel numbers
pub fn timer_pins<V: Variant>(tim: V::Timer) -> impl Iterator<Item = (V::Pin, u8)> {
    V::Pin::ALL.iter().copied().filter_map(move |pin| {
        pin_capability::<V>(pin)
            .timer
            .filter(|t| t.timer == tim)
            .map(|t| (pin, t.channel))
    })
}

//! Timer descriptor table
//!
//! The F10x general-purpose and advanced timers all have 16-bit counters
//! and four compare/capture channels.

use variant_core::{CounterWidth, Identifier, TimerDescriptor};
use variant_hal::ClockGate;

variant_core::identifiers! {
    /// Timers present on the STM32F10x variant
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Timer {
        TIMER1,
        TIMER2,
        TIMER3,
        TIMER4,
    }
}

/// One row per [`Timer`], in raw-value order
pub const TIMER_TABLE: &[TimerDescriptor] = &[
    // TIM1 (advanced)
    TimerDescriptor::new(CounterWidth::Bits16, 4, ClockGate::apb2(11)),
    // TIM2
    TimerDescriptor::new(CounterWidth::Bits16, 4, ClockGate::apb1(0)),
    // TIM3
    TimerDescriptor::new(CounterWidth::Bits16, 4, ClockGate::apb1(1)),
    // TIM4
    TimerDescriptor::new(CounterWidth::Bits16, 4, ClockGate::apb1(2)),
];

const _: () = assert!(TIMER_TABLE.len() == <Timer as Identifier>::COUNT);

impl Timer {
    /// Descriptor of this timer
    pub fn descriptor(self) -> &'static TimerDescriptor {
        &TIMER_TABLE[self.index()]
    }
}

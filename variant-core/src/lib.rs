//! Board-agnostic core of the variant description layer
//!
//! This crate contains everything that does not depend on a particular
//! chip variant's data:
//!
//! - Strongly-typed pin/timer identifiers ([`Identifier`], [`identifiers!`])
//! - Capability and descriptor types for the variant tables
//! - The [`Variant`] trait and the pure lookups over it
//! - Table validation
//! - Bring-up planning and the one-shot [`variant_init`] entry point
//!
//! A variant crate declares its identifiers and `'static` tables, implements
//! [`Variant`], and hands a chip backend implementing
//! [`variant_hal::BringUp`] to [`variant_init`].

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod capability;
pub mod id;
pub mod init;
pub mod plan;
pub mod serial;
pub mod validate;
pub mod variant;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use capability::{CounterWidth, PinCapability, PinRole, PortBinding, TimerChannel, TimerDescriptor};
pub use id::Identifier;
pub use init::{variant_init, Board, InitGuard};
pub use plan::{plan, BringUpPlan, Stage, Step};
pub use serial::{SerialBinding, SerialPort};
pub use validate::{validate, TableError};
pub use variant::{
    adc_channel, is_analog_pin, is_pwm_pin, is_timer_32bit, num_channels_in_timer,
    pin_capability, timer_channel, timer_descriptor, timer_max_count, timer_pins, Variant,
};

pub use variant_hal;

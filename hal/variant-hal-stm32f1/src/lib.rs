//! STM32F1-specific bring-up backend
//!
//! Implements the `variant-hal` bring-up traits by writing the STM32F1
//! reset and clock controller and GPIO configuration registers directly.
//! Supports STM32F1 chips, including:
//!
//! - STM32F103C8 / STM32F103CB ("Blue Pill")
//!
//! # Features
//!
//! - `stm32f103c8`, `stm32f103cb` - Select the chip. Without one only the
//!   register field encoders build, which keeps them testable on the host.
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The backend is used instead of `embassy_stm32::init`: bring-up order is
//! owned by `variant-core`, which calls into [`Stm32f1BringUp`] one step at
//! a time. Register bit positions follow RM0008.

#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod gpio;
pub mod rcc;

#[cfg(feature = "_chip")]
use variant_hal::{ClockConfig, ClockControl, ClockGate, Port, PortControl};

/// Bring-up backend for STM32F1 silicon
pub struct Stm32f1BringUp {
    _private: (),
}

impl Stm32f1BringUp {
    /// Create the backend
    ///
    /// Registers are only touched through the trait methods.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for Stm32f1BringUp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "_chip")]
impl ClockControl for Stm32f1BringUp {
    fn configure_clock_tree(&mut self, config: &ClockConfig) {
        rcc::configure(config);
    }

    fn enable_clock(&mut self, gate: ClockGate) {
        rcc::enable(gate);
    }
}

#[cfg(feature = "_chip")]
impl PortControl for Stm32f1BringUp {
    fn set_safe_input(&mut self, port: Port, lines: u16) {
        gpio::set_pull_down_inputs(port, lines);
    }
}

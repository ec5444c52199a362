//! Variant Hardware Abstraction Layer
//!
//! This crate defines the traits a chip backend implements so that the
//! board-agnostic bring-up sequence in `variant-core` can drive real
//! registers (or a test double) without knowing which chip it runs on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware / application                 │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  variant-f10x (tables) + variant-core   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  variant-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ variant-hal-  │
//!             │   stm32f1     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::ClockControl`] - Clock tree and peripheral clock gates
//! - [`gpio::PortControl`] - Default electrical state of GPIO lines
//! - [`BringUp`] - Everything the initializer needs

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key types at crate root for convenience
pub use clock::{Bus, ClockConfig, ClockControl, ClockGate, ClockSource, Pll};
pub use gpio::{Port, PortControl};

/// Combined bring-up interface
///
/// The variant initializer only needs clock and port control. Chip
/// backends implement the two halves; this trait is never implemented
/// by hand.
pub trait BringUp: ClockControl + PortControl {}

// Blanket implementation
impl<T: ClockControl + PortControl> BringUp for T {}

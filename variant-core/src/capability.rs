//! Capability and descriptor records
//!
//! These are the row types of a variant's static tables. They are built in
//! `const` context and never change at runtime.

use variant_hal::{ClockGate, Port};

/// Counter register width of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterWidth {
    Bits16,
    Bits32,
}

impl CounterWidth {
    pub const fn bits(self) -> u8 {
        match self {
            CounterWidth::Bits16 => 16,
            CounterWidth::Bits32 => 32,
        }
    }

    /// Largest value the counter (and its auto-reload) can hold
    pub const fn max_count(self) -> u32 {
        match self {
            CounterWidth::Bits16 => u16::MAX as u32,
            CounterWidth::Bits32 => u32::MAX,
        }
    }
}

/// Timer descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerDescriptor {
    /// Counter width
    pub width: CounterWidth,
    /// Number of compare/capture channels
    pub channels: u8,
    /// Clock gate of the timer peripheral
    pub clock: ClockGate,
}

impl TimerDescriptor {
    pub const fn new(width: CounterWidth, channels: u8, clock: ClockGate) -> Self {
        Self {
            width,
            channels,
            clock,
        }
    }

    pub const fn is_32bit(&self) -> bool {
        matches!(self.width, CounterWidth::Bits32)
    }

    /// Check a 1-based channel number against this timer
    pub const fn is_valid_channel(&self, channel: u8) -> bool {
        channel >= 1 && channel <= self.channels
    }
}

/// Timer channel routed to a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerChannel<T> {
    pub timer: T,
    /// 1-based channel number
    pub channel: u8,
}

/// What a pin is doing when the chip leaves reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// General purpose I/O, brought to a safe input state during bring-up
    Gpio,
    /// Debug port (SWD/JTAG) function after reset; left untouched
    Debug,
}

/// Electrical capabilities of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinCapability<T> {
    pub port: Port,
    /// Line within the port (0-15)
    pub line: u8,
    pub role: PinRole,
    /// ADC input number, if the pin is analog-capable
    pub adc: Option<u8>,
    /// Timer channel driving this pin, if any
    pub timer: Option<TimerChannel<T>>,
}

impl<T: Copy> PinCapability<T> {
    /// Digital-only GPIO pin
    pub const fn gpio(port: Port, line: u8) -> Self {
        Self {
            port,
            line,
            role: PinRole::Gpio,
            adc: None,
            timer: None,
        }
    }

    /// Mark the pin analog-capable on ADC input `input`
    pub const fn with_adc(self, input: u8) -> Self {
        Self {
            adc: Some(input),
            ..self
        }
    }

    /// Route `timer` channel `channel` to this pin
    pub const fn with_timer(self, timer: T, channel: u8) -> Self {
        Self {
            timer: Some(TimerChannel { timer, channel }),
            ..self
        }
    }

    /// Mark the pin as owned by the debug port after reset
    pub const fn debug(self) -> Self {
        Self {
            role: PinRole::Debug,
            ..self
        }
    }

    pub const fn is_analog(&self) -> bool {
        self.adc.is_some()
    }

    /// Timer driving this pin
    pub fn driving_timer(&self) -> Option<T> {
        self.timer.map(|t| t.timer)
    }
}

/// Clock gate of one GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortBinding {
    pub port: Port,
    pub clock: ClockGate,
}

//! Serial port bindings
//!
//! A variant fixes which hardware serial peripheral each logical port number
//! addresses. Handles are handed out by [`Board`](crate::Board), once each.

use core::fmt;

use variant_hal::ClockGate;

use crate::variant::Variant;

/// Maximum number of logical serial ports a variant may declare
pub const MAX_SERIAL_PORTS: usize = 8;

/// Logical serial port bound to a hardware peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialBinding<P> {
    /// Logical port number (1-based, "Serial1" is 1)
    pub index: u8,
    /// Peripheral instance name (e.g. "USART1")
    pub instance: &'static str,
    /// Clock gate of the peripheral
    pub clock: ClockGate,
    /// Transmit pin
    pub tx: P,
    /// Receive pin
    pub rx: P,
}

/// Handle to one logical serial port
///
/// Carries only the binding; the serial driver consumes it to know which
/// peripheral and pins to use. Not `Clone`, so a port has one owner.
pub struct SerialPort<V: Variant> {
    binding: &'static SerialBinding<V::Pin>,
}

impl<V: Variant> SerialPort<V> {
    pub(crate) fn new(binding: &'static SerialBinding<V::Pin>) -> Self {
        Self { binding }
    }

    /// Logical port number
    pub fn index(&self) -> u8 {
        self.binding.index
    }

    /// Peripheral instance name
    pub fn instance(&self) -> &'static str {
        self.binding.instance
    }

    pub fn tx_pin(&self) -> V::Pin {
        self.binding.tx
    }

    pub fn rx_pin(&self) -> V::Pin {
        self.binding.rx
    }

    pub fn clock(&self) -> ClockGate {
        self.binding.clock
    }
}

impl<V: Variant> fmt::Debug for SerialPort<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialPort")
            .field("index", &self.binding.index)
            .field("instance", &self.binding.instance)
            .field("tx", &self.binding.tx)
            .field("rx", &self.binding.rx)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<V: Variant> defmt::Format for SerialPort<V> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Serial{}({})", self.binding.index, self.binding.instance)
    }
}

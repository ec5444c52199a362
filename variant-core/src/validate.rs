//! Table consistency checks
//!
//! A variant's tables are plain data typed in by hand (or emitted by a
//! generator). [`validate`] checks every cross-table invariant the lookups
//! and the bring-up sequence rely on.

use variant_hal::gpio::{line_mask, LINES_PER_PORT};
use variant_hal::{ClockGate, Port};

use crate::id::Identifier;
use crate::serial::MAX_SERIAL_PORTS;
use crate::variant::Variant;

/// Inconsistency found in a variant's tables
///
/// Pins and timers are reported by raw identifier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Pin table row count differs from the number of pin identifiers
    PinTableLength { expected: usize, found: usize },
    /// Timer table row count differs from the number of timer identifiers
    TimerTableLength { expected: usize, found: usize },
    /// Pin name does not match the port/line of its row
    PinNameMismatch { pin: u8 },
    /// Line number beyond the port width
    LineOutOfRange { pin: u8 },
    /// Two pins describe the same physical port line
    DuplicatePin { pin: u8 },
    /// Lines declared on a port are not contiguous
    PortGap { port: Port },
    /// Pin on a port with no clock binding
    UnboundPort { port: Port },
    /// Pin refers to a timer missing from the timer table
    UnknownTimer { pin: u8 },
    /// Pin refers to a channel its timer does not have
    ChannelOutOfRange { pin: u8, channel: u8 },
    /// Timer declared with zero channels
    TimerWithoutChannels { timer: u8 },
    /// Serial bindings not numbered 1..=N in order
    SerialIndex { position: u8, index: u8 },
    /// Serial port uses the same pin for TX and RX
    SerialPinConflict { index: u8 },
    /// More serial ports than a board can hand out
    TooManySerialPorts,
    /// Clock configuration with a zero or non-power-of-two divider
    InvalidClockConfig,
    /// Clock gate bit outside the 32-bit enable register
    InvalidClockGate { gate: ClockGate },
    /// Bring-up sequence does not fit in the plan buffer
    PlanCapacity,
}

/// Check every table of `V`
///
/// Returns the first inconsistency found.
pub fn validate<V: Variant>() -> Result<(), TableError> {
    check_lengths::<V>()?;
    check_pins::<V>()?;
    check_timers::<V>()?;
    check_serials::<V>()?;
    check_clocks::<V>()?;
    check_gates::<V>()?;
    check_plan_capacity::<V>()
}

fn check_lengths<V: Variant>() -> Result<(), TableError> {
    if V::PINS.len() != V::Pin::COUNT {
        return Err(TableError::PinTableLength {
            expected: V::Pin::COUNT,
            found: V::PINS.len(),
        });
    }
    if V::TIMERS.len() != V::Timer::COUNT {
        return Err(TableError::TimerTableLength {
            expected: V::Timer::COUNT,
            found: V::TIMERS.len(),
        });
    }
    Ok(())
}

fn check_pins<V: Variant>() -> Result<(), TableError> {
    let mut seen = [0u16; Port::ALL.len()];

    for &pin in V::Pin::ALL {
        let cap = &V::PINS[pin.index()];
        let raw = pin.raw();

        if cap.line >= LINES_PER_PORT {
            return Err(TableError::LineOutOfRange { pin: raw });
        }
        if !name_matches(pin.name(), cap.port, cap.line) {
            return Err(TableError::PinNameMismatch { pin: raw });
        }
        if !V::PORTS.iter().any(|b| b.port == cap.port) {
            return Err(TableError::UnboundPort { port: cap.port });
        }

        let mask = line_mask(cap.line);
        let lines = &mut seen[cap.port.index()];
        if *lines & mask != 0 {
            return Err(TableError::DuplicatePin { pin: raw });
        }
        *lines |= mask;

        if let Some(tc) = cap.timer {
            let desc = V::TIMERS
                .get(tc.timer.index())
                .ok_or(TableError::UnknownTimer { pin: raw })?;
            if !desc.is_valid_channel(tc.channel) {
                return Err(TableError::ChannelOutOfRange {
                    pin: raw,
                    channel: tc.channel,
                });
            }
        }
    }

    for port in Port::ALL {
        if !is_contiguous(seen[port.index()]) {
            return Err(TableError::PortGap { port });
        }
    }

    Ok(())
}

fn check_timers<V: Variant>() -> Result<(), TableError> {
    for &tim in V::Timer::ALL {
        if V::TIMERS[tim.index()].channels == 0 {
            return Err(TableError::TimerWithoutChannels { timer: tim.raw() });
        }
    }
    Ok(())
}

fn check_serials<V: Variant>() -> Result<(), TableError> {
    if V::SERIALS.len() > MAX_SERIAL_PORTS {
        return Err(TableError::TooManySerialPorts);
    }
    for (position, binding) in V::SERIALS.iter().enumerate() {
        if binding.index as usize != position + 1 {
            return Err(TableError::SerialIndex {
                position: position as u8,
                index: binding.index,
            });
        }
        if binding.tx == binding.rx {
            return Err(TableError::SerialPinConflict {
                index: binding.index,
            });
        }
    }
    Ok(())
}

fn check_clocks<V: Variant>() -> Result<(), TableError> {
    if !V::CLOCKS.is_well_formed() || V::CLOCKS.sysclk_hz() == 0 {
        return Err(TableError::InvalidClockConfig);
    }
    Ok(())
}

fn check_gates<V: Variant>() -> Result<(), TableError> {
    let gates = V::SYSTEM_CLOCKS
        .iter()
        .copied()
        .chain(V::PORTS.iter().map(|b| b.clock))
        .chain(V::TIMERS.iter().map(|t| t.clock))
        .chain(V::SERIALS.iter().map(|s| s.clock));
    for gate in gates {
        if !gate.is_valid() {
            return Err(TableError::InvalidClockGate { gate });
        }
    }
    Ok(())
}

/// Runs last: the plan builder indexes tables the earlier checks vouched for
fn check_plan_capacity<V: Variant>() -> Result<(), TableError> {
    crate::plan::build::<V>().map(|_| ())
}

/// `"PB12"` matches port B line 12
fn name_matches(name: &str, port: Port, line: u8) -> bool {
    let mut chars = name.chars();
    if chars.next() != Some('P') || chars.next() != Some(port.letter()) {
        return false;
    }
    chars.as_str().parse::<u8>().ok() == Some(line)
}

/// Set bits form one run (an empty port is trivially contiguous)
fn is_contiguous(mask: u16) -> bool {
    if mask == 0 {
        return true;
    }
    let run = (mask as u32) >> mask.trailing_zeros();
    run & (run + 1) == 0
}

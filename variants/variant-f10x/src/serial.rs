//! Serial port bindings
//!
//! | Port    | Peripheral | TX   | RX   |
//! |---------|------------|------|------|
//! | Serial1 | USART1     | PA9  | PA10 |
//! | Serial2 | USART2     | PA2  | PA3  |
//! | Serial3 | USART3     | PB10 | PB11 |

use variant_core::{Board, SerialBinding, SerialPort};
use variant_hal::ClockGate;

use crate::pins::Pin;
use crate::F10x;

pub const SERIAL_BINDINGS: &[SerialBinding<Pin>] = &[
    SerialBinding {
        index: 1,
        instance: "USART1",
        clock: ClockGate::apb2(14),
        tx: Pin::PA9,
        rx: Pin::PA10,
    },
    SerialBinding {
        index: 2,
        instance: "USART2",
        clock: ClockGate::apb1(17),
        tx: Pin::PA2,
        rx: Pin::PA3,
    },
    SerialBinding {
        index: 3,
        instance: "USART3",
        clock: ClockGate::apb1(18),
        tx: Pin::PB10,
        rx: Pin::PB11,
    },
];

/// The variant's named serial ports
#[derive(Debug)]
pub struct SerialPorts {
    pub serial1: SerialPort<F10x>,
    pub serial2: SerialPort<F10x>,
    pub serial3: SerialPort<F10x>,
}

/// Take all three serial handles from the board
///
/// Returns `None` without taking anything if any of them is already taken.
pub fn take_serial_ports(board: &mut Board<F10x>) -> Option<SerialPorts> {
    if !(1..=3).all(|i| board.is_serial_available(i)) {
        return None;
    }
    Some(SerialPorts {
        serial1: board.take_serial(1)?,
        serial2: board.take_serial(2)?,
        serial3: board.take_serial(3)?,
    })
}

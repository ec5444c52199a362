//! GPIO configuration for STM32F1
//!
//! F1 ports have no PUPDR: a pulled input is CNF=10 with the pull direction
//! taken from ODR, so the output latch is cleared before the mode switches.

#[cfg(feature = "_chip")]
use embassy_stm32::pac::{self, gpio::Gpio};
#[cfg(feature = "_chip")]
use variant_hal::Port;

/// MODE=00 (input), CNF=10 (pull-up/pull-down)
const PULLED_INPUT: u32 = 0b1000;

/// Nibble-wise CRL/CRH update for the lines in `half_lines` within one half
pub fn pulled_input_config(current: u32, half_lines: u8) -> u32 {
    let mut value = current;
    for i in 0..8 {
        if half_lines & (1 << i) != 0 {
            let shift = i * 4;
            value = (value & !(0xF << shift)) | (PULLED_INPUT << shift);
        }
    }
    value
}

/// Split a port line mask into its CRL (0-7) and CRH (8-15) halves
pub fn config_halves(lines: u16) -> [u8; 2] {
    [lines as u8, (lines >> 8) as u8]
}

#[cfg(feature = "_chip")]
fn block(port: Port) -> Gpio {
    match port {
        Port::A => pac::GPIOA,
        Port::B => pac::GPIOB,
        Port::C => pac::GPIOC,
        Port::D => pac::GPIOD,
        other => panic!("port {:?} not present on this chip", other),
    }
}

/// Put `lines` of `port` into input with pull-down
#[cfg(feature = "_chip")]
pub fn set_pull_down_inputs(port: Port, lines: u16) {
    if lines == 0 {
        return;
    }
    let gpio = block(port);

    // BRR clears the latch, selecting pull-down once CNF=10
    gpio.brr().write(|w| w.0 = lines as u32);

    for (half, half_lines) in config_halves(lines).into_iter().enumerate() {
        if half_lines != 0 {
            gpio.cr(half).modify(|w| w.0 = pulled_input_config(w.0, half_lines));
        }
    }
    trace!("port {:?} lines {:#x} pulled down", port, lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulled_input_nibbles() {
        // Reset value of CRL/CRH: every line floating input (0b0100)
        let reset = 0x4444_4444;
        assert_eq!(pulled_input_config(reset, 0b0000_0001), 0x4444_4448);
        assert_eq!(pulled_input_config(reset, 0b1000_0000), 0x8444_4444);
        assert_eq!(pulled_input_config(reset, 0xFF), 0x8888_8888);
        assert_eq!(pulled_input_config(reset, 0), reset);
    }

    #[test]
    fn test_other_lines_untouched() {
        // Line 1 configured as push-pull output at 50 MHz (0b0011)
        let current = 0x4444_4434;
        assert_eq!(pulled_input_config(current, 0b0000_0100), 0x4444_4834);
    }

    #[test]
    fn test_config_halves() {
        assert_eq!(config_halves(0x1FFF), [0xFF, 0x1F]);
        assert_eq!(config_halves(0xE000), [0x00, 0xE0]);
        assert_eq!(config_halves(0xFFE7), [0xE7, 0xFF]);
    }
}

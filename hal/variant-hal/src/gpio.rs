//! GPIO port abstractions
//!
//! Provides the port vocabulary shared by variant tables and chip backends,
//! plus the trait used to put lines into their power-on default state.

/// Number of lines in one GPIO port
pub const LINES_PER_PORT: u8 = 16;

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Port {
    /// All ports in register-block order
    pub const ALL: [Port; 7] = [
        Port::A,
        Port::B,
        Port::C,
        Port::D,
        Port::E,
        Port::F,
        Port::G,
    ];

    /// Zero-based index of the port (A = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Port letter as used in pin names ("PA5" -> 'A')
    pub const fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
            Port::D => 'D',
            Port::E => 'E',
            Port::F => 'F',
            Port::G => 'G',
        }
    }
}

/// Bitmask selecting a single line within a port
pub const fn line_mask(line: u8) -> u16 {
    if line < LINES_PER_PORT {
        1 << line
    } else {
        0
    }
}

/// GPIO port control used during bring-up
///
/// Implementations write the chip's port configuration registers. Only
/// lines set in `lines` may be touched; everything else keeps its state.
pub trait PortControl {
    /// Configure the selected lines as inputs with pull-down
    ///
    /// After this call the lines sit at a defined low level and nothing
    /// on the chip drives them.
    fn set_safe_input(&mut self, port: Port, lines: u16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_letters() {
        assert_eq!(Port::A.letter(), 'A');
        assert_eq!(Port::G.letter(), 'G');
        assert_eq!(Port::B.index(), 1);
    }

    #[test]
    fn test_line_mask() {
        assert_eq!(line_mask(0), 0x0001);
        assert_eq!(line_mask(15), 0x8000);
        assert_eq!(line_mask(16), 0);
    }
}

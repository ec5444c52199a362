//! Clock tree abstractions
//!
//! Describes the system clock configuration and the individual peripheral
//! clock gates a variant needs opened during bring-up.

/// Peripheral bus a clock gate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    /// AHB (DMA, SRAM, flash interface)
    Ahb,
    /// Low-speed APB
    Apb1,
    /// High-speed APB
    Apb2,
}

/// One peripheral clock enable bit
///
/// `bit` is the bit position in the bus enable register of the chip's
/// reset and clock controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockGate {
    pub bus: Bus,
    pub bit: u8,
}

impl ClockGate {
    /// Gate on the low-speed APB bus
    pub const fn apb1(bit: u8) -> Self {
        Self { bus: Bus::Apb1, bit }
    }

    /// Gate on the high-speed APB bus
    pub const fn apb2(bit: u8) -> Self {
        Self { bus: Bus::Apb2, bit }
    }

    /// Whether `bit` names a position inside the 32-bit enable register
    pub const fn is_valid(self) -> bool {
        self.bit < 32
    }

    /// Mask of this gate within its enable register, 0 for an invalid gate
    pub const fn mask(self) -> u32 {
        if self.is_valid() {
            1 << self.bit
        } else {
            0
        }
    }
}

/// Oscillator feeding the system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal RC oscillator
    Hsi { freq_hz: u32 },
    /// External crystal
    Hse { freq_hz: u32 },
}

impl ClockSource {
    /// Oscillator frequency in Hz
    pub const fn freq_hz(self) -> u32 {
        match self {
            ClockSource::Hsi { freq_hz } | ClockSource::Hse { freq_hz } => freq_hz,
        }
    }
}

/// PLL settings
///
/// The PLL input is the source oscillator divided by `prediv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pll {
    pub prediv: u8,
    pub mul: u8,
}

/// System clock tree configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Oscillator feeding the tree
    pub source: ClockSource,
    /// PLL between the oscillator and SYSCLK, or `None` to run directly
    pub pll: Option<Pll>,
    /// AHB prescaler (SYSCLK -> HCLK)
    pub ahb_div: u16,
    /// APB1 prescaler (HCLK -> PCLK1)
    pub apb1_div: u8,
    /// APB2 prescaler (HCLK -> PCLK2)
    pub apb2_div: u8,
}

impl ClockConfig {
    /// SYSCLK frequency in Hz
    pub const fn sysclk_hz(&self) -> u32 {
        let src = self.source.freq_hz();
        match self.pll {
            Some(pll) if pll.prediv != 0 => src / pll.prediv as u32 * pll.mul as u32,
            Some(_) => 0,
            None => src,
        }
    }

    /// HCLK (AHB) frequency in Hz
    pub const fn hclk_hz(&self) -> u32 {
        div(self.sysclk_hz(), self.ahb_div as u32)
    }

    /// PCLK1 (APB1) frequency in Hz
    pub const fn pclk1_hz(&self) -> u32 {
        div(self.hclk_hz(), self.apb1_div as u32)
    }

    /// PCLK2 (APB2) frequency in Hz
    pub const fn pclk2_hz(&self) -> u32 {
        div(self.hclk_hz(), self.apb2_div as u32)
    }

    /// Check that every prescaler is a power of two and the PLL is usable
    pub const fn is_well_formed(&self) -> bool {
        let pll_ok = match self.pll {
            Some(pll) => pll.prediv != 0 && pll.mul != 0,
            None => true,
        };
        pll_ok
            && (self.ahb_div as u32).is_power_of_two()
            && (self.apb1_div as u32).is_power_of_two()
            && (self.apb2_div as u32).is_power_of_two()
    }
}

const fn div(hz: u32, by: u32) -> u32 {
    if by == 0 {
        0
    } else {
        hz / by
    }
}

/// Clock control used during bring-up
pub trait ClockControl {
    /// Switch the system clock tree to `config`
    ///
    /// Returns once SYSCLK runs from the requested source.
    fn configure_clock_tree(&mut self, config: &ClockConfig);

    /// Open a peripheral clock gate
    ///
    /// Opening an already open gate has no effect.
    fn enable_clock(&mut self, gate: ClockGate);
}

//! Reset and clock control for STM32F1
//!
//! Clock tree switch and peripheral gate enables. Field encodings are the
//! RM0008 RCC_CFGR layouts; everything else is left at its reset value.
//! The field encoders are plain functions and build without a chip selected.

#![cfg_attr(not(feature = "_chip"), allow(dead_code))]

#[cfg(feature = "_chip")]
use embassy_stm32::pac;
#[cfg(feature = "_chip")]
use variant_hal::{Bus, ClockConfig, ClockGate, ClockSource};

// RCC_CR
const CR_HSEON: u32 = 1 << 16;
const CR_HSERDY: u32 = 1 << 17;
const CR_PLLON: u32 = 1 << 24;
const CR_PLLRDY: u32 = 1 << 25;

// RCC_CFGR
const CFGR_SW_MASK: u32 = 0b11;
const CFGR_SWS_SHIFT: u32 = 2;
const CFGR_HPRE_SHIFT: u32 = 4;
const CFGR_PPRE1_SHIFT: u32 = 8;
const CFGR_PPRE2_SHIFT: u32 = 11;
const CFGR_PLLSRC: u32 = 1 << 16;
const CFGR_PLLXTPRE: u32 = 1 << 17;
const CFGR_PLLMUL_SHIFT: u32 = 18;
const CFGR_BUS_MASK: u32 = (0xF << CFGR_HPRE_SHIFT) | (0x7 << CFGR_PPRE1_SHIFT) | (0x7 << CFGR_PPRE2_SHIFT);
const CFGR_PLL_MASK: u32 = CFGR_PLLSRC | CFGR_PLLXTPRE | (0xF << CFGR_PLLMUL_SHIFT);

const SW_HSI: u32 = 0b00;
const SW_HSE: u32 = 0b01;
const SW_PLL: u32 = 0b10;

// FLASH_ACR
const ACR_LATENCY_MASK: u32 = 0b111;
const ACR_PRFTBE: u32 = 1 << 4;

/// Highest SYSCLK the F1 flash interface supports
pub const MAX_SYSCLK_HZ: u32 = 72_000_000;

/// HPRE field for an AHB divider
pub fn hpre_bits(div: u16) -> Option<u32> {
    Some(match div {
        1 => 0b0000,
        2 => 0b1000,
        4 => 0b1001,
        8 => 0b1010,
        16 => 0b1011,
        64 => 0b1100,
        128 => 0b1101,
        256 => 0b1110,
        512 => 0b1111,
        _ => return None,
    })
}

/// PPREx field for an APB divider
pub fn ppre_bits(div: u8) -> Option<u32> {
    Some(match div {
        1 => 0b000,
        2 => 0b100,
        4 => 0b101,
        8 => 0b110,
        16 => 0b111,
        _ => return None,
    })
}

/// PLLMUL field for a multiplier (x2..x16)
pub fn pllmul_bits(mul: u8) -> Option<u32> {
    match mul {
        2..=16 => Some((mul - 2) as u32),
        _ => None,
    }
}

/// Flash wait states for a SYSCLK frequency
pub fn flash_latency(sysclk_hz: u32) -> u32 {
    match sysclk_hz {
        0..=24_000_000 => 0,
        24_000_001..=48_000_000 => 1,
        _ => 2,
    }
}

/// When the flash wait states change relative to the SYSCLK switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatencyUpdate {
    /// Speeding up: more wait states before the faster clock arrives
    BeforeSwitch,
    /// Slowing down: keep the wait states until the slower clock runs
    AfterSwitch,
    Unchanged,
}

/// Order the latency write around the switch from `current` to `target`
pub fn latency_update(current: u32, target: u32) -> LatencyUpdate {
    match target.cmp(&current) {
        core::cmp::Ordering::Greater => LatencyUpdate::BeforeSwitch,
        core::cmp::Ordering::Less => LatencyUpdate::AfterSwitch,
        core::cmp::Ordering::Equal => LatencyUpdate::Unchanged,
    }
}

#[cfg(feature = "_chip")]
fn set_flash_latency(latency: u32) {
    pac::FLASH
        .acr()
        .modify(|w| w.0 = (w.0 & !ACR_LATENCY_MASK) | latency | ACR_PRFTBE);
}

/// Switch the clock tree to `config`
///
/// # Panics
///
/// Panics on a configuration the F1 RCC cannot produce.
#[cfg(feature = "_chip")]
pub fn configure(config: &ClockConfig) {
    let sysclk = config.sysclk_hz();
    if sysclk > MAX_SYSCLK_HZ {
        panic!("SYSCLK {} Hz above {} Hz", sysclk, MAX_SYSCLK_HZ);
    }
    let Some(hpre) = hpre_bits(config.ahb_div) else {
        panic!("unsupported AHB prescaler /{}", config.ahb_div);
    };
    let (Some(ppre1), Some(ppre2)) = (ppre_bits(config.apb1_div), ppre_bits(config.apb2_div)) else {
        panic!("unsupported APB prescaler");
    };

    if let ClockSource::Hse { .. } = config.source {
        pac::RCC.cr().modify(|w| w.0 |= CR_HSEON);
        while pac::RCC.cr().read().0 & CR_HSERDY == 0 {}
    }

    let latency = flash_latency(sysclk);
    let update = latency_update(pac::FLASH.acr().read().0 & ACR_LATENCY_MASK, latency);
    if update == LatencyUpdate::BeforeSwitch {
        set_flash_latency(latency);
    }

    pac::RCC.cfgr().modify(|w| {
        w.0 = (w.0 & !CFGR_BUS_MASK)
            | (hpre << CFGR_HPRE_SHIFT)
            | (ppre1 << CFGR_PPRE1_SHIFT)
            | (ppre2 << CFGR_PPRE2_SHIFT)
    });

    let sw = match config.pll {
        Some(pll) => {
            let src = match (config.source, pll.prediv) {
                (ClockSource::Hsi { .. }, 2) => 0,
                (ClockSource::Hse { .. }, 1) => CFGR_PLLSRC,
                (ClockSource::Hse { .. }, 2) => CFGR_PLLSRC | CFGR_PLLXTPRE,
                _ => panic!("unsupported PLL predivider /{}", pll.prediv),
            };
            let Some(mul) = pllmul_bits(pll.mul) else {
                panic!("unsupported PLL multiplier x{}", pll.mul);
            };

            // PLL settings are only writable while it is off
            if pac::RCC.cr().read().0 & CR_PLLON != 0 {
                pac::RCC.cfgr().modify(|w| w.0 &= !CFGR_SW_MASK);
                while (pac::RCC.cfgr().read().0 >> CFGR_SWS_SHIFT) & CFGR_SW_MASK != SW_HSI {}
                pac::RCC.cr().modify(|w| w.0 &= !CR_PLLON);
                while pac::RCC.cr().read().0 & CR_PLLRDY != 0 {}
            }

            pac::RCC
                .cfgr()
                .modify(|w| w.0 = (w.0 & !CFGR_PLL_MASK) | src | (mul << CFGR_PLLMUL_SHIFT));
            pac::RCC.cr().modify(|w| w.0 |= CR_PLLON);
            while pac::RCC.cr().read().0 & CR_PLLRDY == 0 {}
            SW_PLL
        }
        None => match config.source {
            ClockSource::Hsi { .. } => SW_HSI,
            ClockSource::Hse { .. } => SW_HSE,
        },
    };

    pac::RCC.cfgr().modify(|w| w.0 = (w.0 & !CFGR_SW_MASK) | sw);
    while (pac::RCC.cfgr().read().0 >> CFGR_SWS_SHIFT) & CFGR_SW_MASK != sw {}

    if update == LatencyUpdate::AfterSwitch {
        set_flash_latency(latency);
    }
    debug!("SYSCLK {} Hz, {} flash wait states", sysclk, latency);
}

/// Open a peripheral clock gate
#[cfg(feature = "_chip")]
pub fn enable(gate: ClockGate) {
    let mask = gate.mask();
    match gate.bus {
        Bus::Ahb => pac::RCC.ahbenr().modify(|w| w.0 |= mask),
        Bus::Apb1 => pac::RCC.apb1enr().modify(|w| w.0 |= mask),
        Bus::Apb2 => pac::RCC.apb2enr().modify(|w| w.0 |= mask),
    }
    // Enable must land before the peripheral's registers are accessed
    cortex_m::asm::dsb();
}

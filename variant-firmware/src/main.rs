//! Variant boot firmware
//!
//! Brings an STM32F103 "Blue Pill" up through the F10x variant description
//! and reports what the board offers over RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use variant_core::Identifier;
use variant_f10x::{
    adc_channel, take_serial_ports, timer_channel, timer_descriptor, Pin, Timer,
};
use {defmt_rtt as _, panic_probe as _};

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Variant firmware starting...");

    let Some(mut board) = variant_f10x::variant_init() else {
        // Only reachable if something ran bring-up before us
        warn!("Variant already initialized");
        return;
    };

    let clocks = board.clocks();
    info!(
        "SYSCLK {} Hz, PCLK1 {} Hz, PCLK2 {} Hz",
        clocks.sysclk_hz(),
        clocks.pclk1_hz(),
        clocks.pclk2_hz()
    );
    info!("LED_BUILTIN on {}", board.led_builtin().name());

    report_analog();
    report_timers();

    match take_serial_ports(&mut board) {
        Some(ports) => {
            for port in [&ports.serial1, &ports.serial2, &ports.serial3] {
                info!(
                    "Serial{}: {} tx={} rx={}",
                    port.index(),
                    port.instance(),
                    port.tx_pin().name(),
                    port.rx_pin().name()
                );
            }
        }
        None => error!("Serial ports unavailable"),
    }

    info!("Bring-up complete");
}

fn report_analog() {
    for &pin in Pin::ALL {
        if let Some(ch) = adc_channel(pin) {
            debug!("{} -> ADC_IN{}", pin.name(), ch);
        }
    }
}

fn report_timers() {
    for &tim in Timer::ALL {
        let desc = timer_descriptor(tim);
        info!(
            "{}: {}-bit, {} channels",
            tim.name(),
            desc.width.bits(),
            desc.channels
        );
    }
    for &pin in Pin::ALL {
        if let Some(tc) = timer_channel(pin) {
            debug!("{} -> {} CH{}", pin.name(), tc.timer.name(), tc.channel);
        }
    }
}

//! Test doubles
//!
//! [`RecordingBringUp`] implements [`BringUp`](variant_hal::BringUp) by
//! recording every call and mirroring its effect on a model of the
//! registers. [`TestBoard`] is a small consistent variant.

use heapless::Vec;
use variant_hal::{Bus, ClockConfig, ClockControl, ClockGate, ClockSource, Pll, Port, PortControl};

use crate::capability::{CounterWidth, PinCapability, PortBinding, TimerDescriptor};
use crate::serial::SerialBinding;
use crate::variant::Variant;

/// Maximum recorded operations
pub const MAX_OPS: usize = 64;

/// One recorded bring-up call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    ClockTree(ClockConfig),
    EnableClock(ClockGate),
    SafeInput(Port, u16),
}

/// Register-level effect of the recorded calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareState {
    pub clock_tree: Option<ClockConfig>,
    pub ahb_enr: u32,
    pub apb1_enr: u32,
    pub apb2_enr: u32,
    /// Lines in safe-input mode, per port
    pub safe_inputs: [u16; 7],
}

impl HardwareState {
    pub fn is_enabled(&self, gate: ClockGate) -> bool {
        let reg = match gate.bus {
            Bus::Ahb => self.ahb_enr,
            Bus::Apb1 => self.apb1_enr,
            Bus::Apb2 => self.apb2_enr,
        };
        reg & gate.mask() != 0
    }
}

/// Recording bring-up backend
#[derive(Debug, Default)]
pub struct RecordingBringUp {
    pub ops: Vec<Op, MAX_OPS>,
    pub state: HardwareState,
}

impl RecordingBringUp {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, op: Op) {
        // Overflow means the test itself is broken
        assert!(self.ops.push(op).is_ok(), "op log full");
    }
}

impl ClockControl for RecordingBringUp {
    fn configure_clock_tree(&mut self, config: &ClockConfig) {
        self.record(Op::ClockTree(*config));
        self.state.clock_tree = Some(*config);
    }

    fn enable_clock(&mut self, gate: ClockGate) {
        self.record(Op::EnableClock(gate));
        match gate.bus {
            Bus::Ahb => self.state.ahb_enr |= gate.mask(),
            Bus::Apb1 => self.state.apb1_enr |= gate.mask(),
            Bus::Apb2 => self.state.apb2_enr |= gate.mask(),
        }
    }
}

impl PortControl for RecordingBringUp {
    fn set_safe_input(&mut self, port: Port, lines: u16) {
        self.record(Op::SafeInput(port, lines));
        self.state.safe_inputs[port.index()] |= lines;
    }
}

crate::identifiers! {
    /// Pins of [`TestBoard`]
    pub enum TestPin {
        PA0,
        PA1,
        PA2,
        PB0,
        PB1,
    }
}

crate::identifiers! {
    /// Timers of [`TestBoard`]
    pub enum TestTimer {
        TIM1,
        TIM2,
    }
}

/// Small consistent variant: two ports, a 16-bit and a 32-bit timer
pub struct TestBoard;

pub const TEST_CLOCKS: ClockConfig = ClockConfig {
    source: ClockSource::Hse { freq_hz: 8_000_000 },
    pll: Some(Pll { prediv: 1, mul: 9 }),
    ahb_div: 1,
    apb1_div: 2,
    apb2_div: 1,
};

impl Variant for TestBoard {
    type Pin = TestPin;
    type Timer = TestTimer;

    const NAME: &'static str = "test";

    const PINS: &'static [PinCapability<TestTimer>] = &[
        PinCapability::gpio(Port::A, 0).with_adc(0).with_timer(TestTimer::TIM1, 1),
        PinCapability::gpio(Port::A, 1).with_adc(1),
        PinCapability::gpio(Port::A, 2).debug(),
        PinCapability::gpio(Port::B, 0).with_timer(TestTimer::TIM2, 1),
        PinCapability::gpio(Port::B, 1).with_timer(TestTimer::TIM2, 2),
    ];

    const TIMERS: &'static [TimerDescriptor] = &[
        TimerDescriptor::new(CounterWidth::Bits16, 4, ClockGate::apb2(11)),
        TimerDescriptor::new(CounterWidth::Bits32, 2, ClockGate::apb1(0)),
    ];

    const PORTS: &'static [PortBinding] = &[
        PortBinding {
            port: Port::A,
            clock: ClockGate::apb2(2),
        },
        PortBinding {
            port: Port::B,
            clock: ClockGate::apb2(3),
        },
    ];

    const SYSTEM_CLOCKS: &'static [ClockGate] = &[ClockGate::apb2(0)];

    const SERIALS: &'static [SerialBinding<TestPin>] = &[
        SerialBinding {
            index: 1,
            instance: "USART1",
            clock: ClockGate::apb2(14),
            tx: TestPin::PA0,
            rx: TestPin::PA1,
        },
        SerialBinding {
            index: 2,
            instance: "USART2",
            clock: ClockGate::apb1(17),
            tx: TestPin::PB0,
            rx: TestPin::PB1,
        },
    ];

    const LED_BUILTIN: TestPin = TestPin::PA1;

    const CLOCKS: ClockConfig = TEST_CLOCKS;
}

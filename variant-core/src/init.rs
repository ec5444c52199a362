//! One-time variant bring-up
//!
//! [`variant_init`] validates the tables, applies the bring-up plan, and
//! returns the [`Board`] context serial handles are taken from. It runs at
//! most once per [`InitGuard`]; later calls do nothing and return `None`.

use core::marker::PhantomData;

use portable_atomic::{AtomicBool, Ordering};
use variant_hal::{BringUp, ClockConfig};

use crate::plan::plan;
use crate::serial::SerialPort;
use crate::variant::Variant;

/// Once-only latch for [`variant_init`]
///
/// Lives in a `static` next to the chip backend.
pub struct InitGuard {
    done: AtomicBool,
}

impl InitGuard {
    pub const fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
        }
    }

    /// Whether bring-up already ran
    pub fn is_initialized(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Claim the right to run bring-up; true only for the first caller
    fn claim(&self) -> bool {
        !self.done.swap(true, Ordering::AcqRel)
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Context produced by a successful bring-up
///
/// Serial port handles are taken from here, once each.
pub struct Board<V: Variant> {
    /// Bit n set once Serial(n+1) was handed out
    taken: u8,
    _variant: PhantomData<V>,
}

impl<V: Variant> Board<V> {
    fn new() -> Self {
        Self {
            taken: 0,
            _variant: PhantomData,
        }
    }

    /// Take the handle of logical serial port `index` (1-based)
    ///
    /// Returns `None` if the variant has no such port or it was taken.
    pub fn take_serial(&mut self, index: u8) -> Option<SerialPort<V>> {
        let binding = V::SERIALS.iter().find(|b| b.index == index)?;
        let mask = 1u8 << (index - 1);
        if self.taken & mask != 0 {
            return None;
        }
        self.taken |= mask;
        Some(SerialPort::new(binding))
    }

    /// Whether logical serial port `index` exists and was not taken yet
    pub fn is_serial_available(&self, index: u8) -> bool {
        V::SERIALS.iter().any(|b| b.index == index) && self.taken & (1u8 << (index - 1)) == 0
    }

    /// Number of serial ports the variant declares
    pub fn serial_count(&self) -> usize {
        V::SERIALS.len()
    }

    pub fn led_builtin(&self) -> V::Pin {
        V::LED_BUILTIN
    }

    /// Clock tree the board was brought up with
    pub fn clocks(&self) -> ClockConfig {
        V::CLOCKS
    }
}

/// Bring the variant's hardware to its safe default state
///
/// Order: clock tree and bus gates, then every GPIO line to a pulled-down
/// input, then the gates of the declared timers and serial peripherals.
///
/// The first call per `guard` returns the [`Board`]. Any later call is a
/// no-op returning `None`; it touches no register.
///
/// # Panics
///
/// Panics if the variant's tables are inconsistent. Nothing has been
/// written to the hardware at that point.
pub fn variant_init<V: Variant, H: BringUp>(guard: &InitGuard, hal: &mut H) -> Option<Board<V>> {
    if !guard.claim() {
        debug!("variant already initialized");
        return None;
    }

    let plan = match plan::<V>() {
        Ok(plan) => plan,
        Err(e) => panic!("inconsistent variant tables: {:?}", e),
    };

    plan.apply(hal);

    info!(
        "variant {} up: {} Hz, {} bring-up steps",
        V::NAME,
        V::CLOCKS.sysclk_hz(),
        plan.steps().len()
    );

    Some(Board::new())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::capability::PinCapability;
    use crate::mock::{Op, RecordingBringUp, TestBoard, TestPin, TestTimer};
    use crate::plan::Step;
    use variant_hal::{ClockGate, Port};

    #[test]
    fn test_init_applies_plan() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        let board = variant_init::<TestBoard, _>(&guard, &mut hal);
        assert!(board.is_some());
        assert!(guard.is_initialized());

        let expected = plan::<TestBoard>().unwrap();
        assert_eq!(hal.ops.len(), expected.steps().len());
        assert_eq!(hal.state.clock_tree, Some(TestBoard::CLOCKS));
        assert!(hal.state.is_enabled(ClockGate::apb2(11)));
        assert!(hal.state.is_enabled(ClockGate::apb1(17)));
        assert_eq!(hal.state.safe_inputs[Port::A.index()], 0b011);
    }

    #[test]
    fn test_second_call_is_noop() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        assert!(variant_init::<TestBoard, _>(&guard, &mut hal).is_some());
        let once = hal.state;
        let ops_once = hal.ops.len();

        assert!(variant_init::<TestBoard, _>(&guard, &mut hal).is_none());
        assert_eq!(hal.state, once);
        assert_eq!(hal.ops.len(), ops_once);
    }

    #[test]
    fn test_stage_order_on_hardware() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        variant_init::<TestBoard, _>(&guard, &mut hal);

        let first_pin = hal
            .ops
            .iter()
            .position(|op| matches!(op, Op::SafeInput(..)))
            .unwrap();
        let last_pin = hal
            .ops
            .iter()
            .rposition(|op| matches!(op, Op::SafeInput(..)))
            .unwrap();

        // Port gates before any line is touched
        for op in &hal.ops[..first_pin] {
            assert!(matches!(op, Op::ClockTree(_) | Op::EnableClock(_)));
        }
        assert!(matches!(hal.ops[0], Op::ClockTree(_)));
        // Peripheral gates only after every line is safe
        for op in &hal.ops[last_pin + 1..] {
            assert!(matches!(op, Op::EnableClock(_)));
        }
    }

    #[test]
    fn test_only_declared_peripherals_enabled() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        variant_init::<TestBoard, _>(&guard, &mut hal);

        let plan = plan::<TestBoard>().unwrap();
        for gate in plan.peripheral_clocks() {
            let declared = TestBoard::TIMERS.iter().any(|t| t.clock == gate)
                || TestBoard::SERIALS.iter().any(|s| s.clock == gate);
            assert!(declared);
        }
        // USART3 gate is not part of the test board
        assert!(!hal.state.is_enabled(ClockGate::apb1(18)));
        assert!(plan
            .steps()
            .iter()
            .all(|s| !matches!(s, Step::PeripheralClock(g) if *g == ClockGate::apb1(18))));
    }

    #[test]
    fn test_serial_handles_taken_once() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        let mut board = variant_init::<TestBoard, _>(&guard, &mut hal).unwrap();

        assert_eq!(board.serial_count(), 2);
        let serial1 = board.take_serial(1).unwrap();
        assert_eq!(serial1.index(), 1);
        assert_eq!(serial1.instance(), "USART1");
        assert_eq!(serial1.tx_pin(), TestPin::PA0);
        assert_eq!(serial1.rx_pin(), TestPin::PA1);

        assert!(board.take_serial(1).is_none());
        assert!(board.take_serial(2).is_some());
        assert!(board.take_serial(3).is_none());
        assert!(board.take_serial(0).is_none());
        assert_eq!(board.led_builtin(), TestPin::PA1);
    }

    struct Dangling;

    impl Variant for Dangling {
        type Pin = TestPin;
        type Timer = TestTimer;
        const NAME: &'static str = "dangling";
        const PINS: &'static [PinCapability<TestTimer>] = &[
            PinCapability::gpio(Port::A, 0).with_timer(TestTimer::TIM1, 9),
            PinCapability::gpio(Port::A, 1),
            PinCapability::gpio(Port::A, 2),
            PinCapability::gpio(Port::B, 0),
            PinCapability::gpio(Port::B, 1),
        ];
        const TIMERS: &'static [crate::TimerDescriptor] = TestBoard::TIMERS;
        const PORTS: &'static [crate::PortBinding] = TestBoard::PORTS;
        const SYSTEM_CLOCKS: &'static [ClockGate] = TestBoard::SYSTEM_CLOCKS;
        const SERIALS: &'static [crate::SerialBinding<TestPin>] = TestBoard::SERIALS;
        const LED_BUILTIN: TestPin = TestPin::PA1;
        const CLOCKS: ClockConfig = TestBoard::CLOCKS;
    }

    #[test]
    #[should_panic(expected = "inconsistent variant tables")]
    fn test_inconsistent_tables_halt() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        let _ = variant_init::<Dangling, _>(&guard, &mut hal);
    }

    #[test]
    fn test_inconsistent_tables_touch_nothing() {
        let guard = InitGuard::new();
        let mut hal = RecordingBringUp::new();
        let result = std_catch(|| {
            let _ = variant_init::<Dangling, _>(&guard, &mut hal);
        });
        assert!(result);
        assert!(hal.ops.is_empty());
    }

    /// True if `f` panicked
    fn std_catch(f: impl FnOnce()) -> bool {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).is_err()
    }
}

//! Bring-up planning
//!
//! The bring-up sequence is computed from the tables before any register is
//! touched. A plan is an ordered list of steps in three stages:
//!
//! 1. [`Stage::Clocks`] - clock tree, system gates, GPIO port gates
//! 2. [`Stage::Pins`] - every GPIO line to a pulled-down input
//! 3. [`Stage::Peripherals`] - gates of the timers and serial ports the
//!    variant declares, and nothing else
//!
//! Steps never move backwards in stage order.

use heapless::Vec;
use variant_hal::gpio::line_mask;
use variant_hal::{BringUp, ClockConfig, ClockGate, Port};

use crate::capability::PinRole;
use crate::id::Identifier;
use crate::validate::{validate, TableError};
use crate::variant::Variant;

/// Maximum number of steps in a plan
pub const MAX_STEPS: usize = 48;

/// Bring-up stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    Clocks,
    Pins,
    Peripherals,
}

/// One bring-up operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Switch the system clock tree
    ClockTree(ClockConfig),
    /// Open a system or GPIO port gate
    BusClock(ClockGate),
    /// Put GPIO lines into pulled-down input mode
    SafeInput { port: Port, lines: u16 },
    /// Open the gate of a declared timer or serial peripheral
    PeripheralClock(ClockGate),
}

impl Step {
    pub fn stage(&self) -> Stage {
        match self {
            Step::ClockTree(_) | Step::BusClock(_) => Stage::Clocks,
            Step::SafeInput { .. } => Stage::Pins,
            Step::PeripheralClock(_) => Stage::Peripherals,
        }
    }

    fn gate(&self) -> Option<ClockGate> {
        match self {
            Step::BusClock(gate) | Step::PeripheralClock(gate) => Some(*gate),
            _ => None,
        }
    }
}

/// Validated, ordered bring-up sequence
#[derive(Debug, Clone, Default)]
pub struct BringUpPlan {
    steps: Vec<Step, MAX_STEPS>,
}

impl BringUpPlan {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Peripheral gates opened in the last stage
    pub fn peripheral_clocks(&self) -> impl Iterator<Item = ClockGate> + '_ {
        self.steps.iter().filter_map(|s| match s {
            Step::PeripheralClock(gate) => Some(*gate),
            _ => None,
        })
    }

    /// Execute the plan, in order
    pub fn apply<H: BringUp>(&self, hal: &mut H) {
        for step in &self.steps {
            trace!("bring-up step {:?}", step);
            match step {
                Step::ClockTree(config) => hal.configure_clock_tree(config),
                Step::BusClock(gate) | Step::PeripheralClock(gate) => hal.enable_clock(*gate),
                Step::SafeInput { port, lines } => hal.set_safe_input(*port, *lines),
            }
        }
    }

    /// Append a step; a gate already opened earlier in the plan is skipped
    fn push(&mut self, step: Step) -> Result<(), TableError> {
        if let Some(gate) = step.gate() {
            if self.steps.iter().any(|s| s.gate() == Some(gate)) {
                return Ok(());
            }
        }
        self.steps.push(step).map_err(|_| TableError::PlanCapacity)
    }
}

/// Validate `V` and compute its bring-up plan
pub fn plan<V: Variant>() -> Result<BringUpPlan, TableError> {
    validate::<V>()?;
    build::<V>()
}

/// Lay out the steps of `V`, assuming its per-row tables are consistent
pub(crate) fn build<V: Variant>() -> Result<BringUpPlan, TableError> {
    let mut plan = BringUpPlan::default();

    plan.push(Step::ClockTree(V::CLOCKS))?;
    for &gate in V::SYSTEM_CLOCKS {
        plan.push(Step::BusClock(gate))?;
    }
    for binding in V::PORTS {
        if port_in_use::<V>(binding.port) {
            plan.push(Step::BusClock(binding.clock))?;
        }
    }

    for binding in V::PORTS {
        let lines = gpio_lines::<V>(binding.port);
        if lines != 0 {
            plan.push(Step::SafeInput {
                port: binding.port,
                lines,
            })?;
        }
    }

    for timer in V::TIMERS {
        plan.push(Step::PeripheralClock(timer.clock))?;
    }
    for serial in V::SERIALS {
        plan.push(Step::PeripheralClock(serial.clock))?;
    }

    Ok(plan)
}

fn port_in_use<V: Variant>(port: Port) -> bool {
    V::Pin::ALL.iter().any(|p| V::PINS[p.index()].port == port)
}

/// Lines of `port` that bring-up owns (debug pins excluded)
fn gpio_lines<V: Variant>(port: Port) -> u16 {
    V::Pin::ALL
        .iter()
        .map(|p| &V::PINS[p.index()])
        .filter(|cap| cap.port == port && cap.role == PinRole::Gpio)
        .fold(0, |mask, cap| mask | line_mask(cap.line))
}

//! Bring-up sequencing of the F10x variant against the recording backend

use variant_core::mock::{Op, RecordingBringUp};
use variant_core::variant_hal::{ClockGate, Port};
use variant_core::{plan, InitGuard, Stage, Step};
use variant_f10x::{init_with, take_serial_ports, F10x, Pin, AFIO_CLOCK, CLOCKS};

fn brought_up() -> (RecordingBringUp, variant_core::Board<F10x>) {
    let guard = InitGuard::new();
    let mut hal = RecordingBringUp::new();
    let board = init_with(&guard, &mut hal).expect("first init returns the board");
    (hal, board)
}

#[test]
fn clock_tree_comes_first() {
    let (hal, _) = brought_up();
    assert_eq!(hal.ops[0], Op::ClockTree(CLOCKS));
    assert_eq!(hal.ops[1], Op::EnableClock(AFIO_CLOCK));
}

#[test]
fn every_gpio_line_is_safe() {
    let (hal, _) = brought_up();
    // PA13-PA15 and PB3/PB4 stay with the debug port
    assert_eq!(hal.state.safe_inputs[Port::A.index()], 0x1FFF);
    assert_eq!(hal.state.safe_inputs[Port::B.index()], 0xFFE7);
    assert_eq!(hal.state.safe_inputs[Port::C.index()], 0xE000);
    assert_eq!(hal.state.safe_inputs[Port::D.index()], 0);
}

#[test]
fn ports_clocked_before_configured() {
    let (hal, _) = brought_up();
    for (i, op) in hal.ops.iter().enumerate() {
        if let Op::SafeInput(port, _) = op {
            let gate = match port {
                Port::A => ClockGate::apb2(2),
                Port::B => ClockGate::apb2(3),
                Port::C => ClockGate::apb2(4),
                other => panic!("unexpected port {:?}", other),
            };
            assert!(hal.ops[..i].contains(&Op::EnableClock(gate)));
        }
    }
}

#[test]
fn only_declared_peripherals() {
    let (hal, _) = brought_up();
    let plan = plan::<F10x>().unwrap();
    let peripherals: Vec<ClockGate> = plan.peripheral_clocks().collect();
    assert_eq!(
        peripherals,
        vec![
            ClockGate::apb2(11), // TIM1
            ClockGate::apb1(0),  // TIM2
            ClockGate::apb1(1),  // TIM3
            ClockGate::apb1(2),  // TIM4
            ClockGate::apb2(14), // USART1
            ClockGate::apb1(17), // USART2
            ClockGate::apb1(18), // USART3
        ]
    );
    // No ADC, SPI or I2C gate
    assert!(!hal.state.is_enabled(ClockGate::apb2(9)));
    assert!(!hal.state.is_enabled(ClockGate::apb2(12)));
    assert!(!hal.state.is_enabled(ClockGate::apb1(21)));
}

#[test]
fn plan_stages_are_ordered() {
    let plan = plan::<F10x>().unwrap();
    let stages: Vec<Stage> = plan.steps().iter().map(Step::stage).collect();
    let mut sorted = stages.clone();
    sorted.sort();
    assert_eq!(stages, sorted);
}

#[test]
fn repeated_init_is_a_noop() {
    let guard = InitGuard::new();
    let mut hal = RecordingBringUp::new();
    assert!(init_with(&guard, &mut hal).is_some());
    let once = hal.state;
    let ops = hal.ops.len();

    assert!(init_with(&guard, &mut hal).is_none());
    assert!(init_with(&guard, &mut hal).is_none());
    assert_eq!(hal.state, once);
    assert_eq!(hal.ops.len(), ops);
}

#[test]
fn serial_ports_from_board() {
    let (_, mut board) = brought_up();
    let ports = take_serial_ports(&mut board).unwrap();
    assert_eq!(ports.serial1.instance(), "USART1");
    assert_eq!(ports.serial2.tx_pin(), Pin::PA2);
    assert_eq!(ports.serial3.rx_pin(), Pin::PB11);
    assert_eq!(ports.serial3.clock(), ClockGate::apb1(18));

    // Handles exist once
    assert!(take_serial_ports(&mut board).is_none());
    assert!(board.take_serial(1).is_none());
}

#[test]
fn partial_take_leaves_rest() {
    let (_, mut board) = brought_up();
    let serial2 = board.take_serial(2).unwrap();
    assert_eq!(serial2.index(), 2);

    assert!(take_serial_ports(&mut board).is_none());
    // Nothing was consumed by the failed bulk take
    assert!(board.take_serial(1).is_some());
    assert!(board.take_serial(3).is_some());
}

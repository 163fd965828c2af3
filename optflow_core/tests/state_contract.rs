// optflow_core/tests/state_contract.rs
#![cfg(feature = "optflow")]

use optflow_core::prelude::*;

fn block() -> OpticalFlowState {
    OptflowGate::new(true)
        .instantiate()
        .expect("optflow feature is compiled in")
}

fn zeroed(state: &OpticalFlowState) -> bool {
    state.read_mode() == OptflowMode::INACTIVE
        && Axis::ALL.into_iter().all(|axis| {
            state.read_displacement(axis) == 0
                && state.read_velocity(axis) == 0
                && state.read_acceleration(axis) == 0
        })
}

#[test]
fn velocity_stays_in_range_for_any_write() {
    let mut state = block();
    for value in (-40_000..=40_000).step_by(37) {
        for axis in Axis::ALL {
            state.set_velocity(axis, value);
            let stored = state.read_velocity(axis);
            assert!(
                (-VELOCITY_LIMIT_CMPS..=VELOCITY_LIMIT_CMPS).contains(&stored),
                "{value} stored as {stored}"
            );
            if (-100..=100).contains(&value) {
                assert_eq!(i32::from(stored), value);
            }
        }
    }
}

#[test]
fn initialize_then_reads_are_stable() {
    let mut state = block();
    state.set_mode(-3);
    state.set_displacement_pair(AxisPair::new(9, 9));
    state.set_acceleration_pair(AxisPair::new(-1, 1));

    state.initialize();
    for _ in 0..3 {
        assert!(zeroed(&state));
    }
    state.initialize();
    assert!(zeroed(&state));
}

#[test]
fn raw_indices_map_onto_axes() {
    let mut state = block();
    for (index, value) in [(0usize, 500i16), (1, -300)] {
        let axis = Axis::try_from(index).expect("valid index");
        state.set_displacement(axis, value);
    }
    assert_eq!(state.displacement(), AxisPair::new(500, -300));
    assert_eq!(Axis::try_from(2usize), Err(OptflowError::InvalidAxis(2)));
}

#[test]
fn gated_block_and_shared_wrapper_agree() {
    let shared = OptflowGate::new(true)
        .instantiate_shared()
        .expect("optflow feature is compiled in");

    shared.write(|state| {
        state.initialize();
        state.set_mode(1);
        state.set_velocity(Axis::Roll, 120);
        state.set_velocity(Axis::Pitch, -40);
        state.set_acceleration(Axis::Roll, 7);
    });

    let snap = shared.trusted().expect("mode is active");
    assert_eq!(snap.mode.raw(), 1);
    assert_eq!(snap.velocity, AxisPair::new(100, -40));
    assert_eq!(snap.acceleration, AxisPair::new(7, 0));
    assert_eq!(snap.displacement, AxisPair::new(0, 0));
    assert_eq!(
        snap.axis(Axis::Pitch),
        AxisSample {
            displacement: 0,
            velocity: -40,
            acceleration: 0
        }
    );
}

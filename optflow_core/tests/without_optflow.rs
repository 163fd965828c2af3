// optflow_core/tests/without_optflow.rs
//
// Run with `--no-default-features`. The state block has no public
// constructor, so the gate is the only way in and it must refuse.
#![cfg(not(feature = "optflow"))]

use optflow_core::prelude::*;

#[test]
fn enabled_gate_builds_nothing_without_the_feature() {
    let gate = OptflowGate::new(true);
    assert!(!OptflowGate::compiled_in());
    assert!(!gate.is_open());
    assert!(gate.instantiate().is_none());
    assert!(gate.instantiate_shared().is_none());
}

#[test]
fn default_gate_is_closed_without_the_feature() {
    assert_eq!(OptflowGate::default(), OptflowGate::new(false));
    assert!(OptflowGate::default().instantiate().is_none());
}

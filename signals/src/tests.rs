use crate::{Signals, StepRequest};

#[test]
fn power_on_state() {
    let s = Signals::default();
    assert!(!s.assert_address && !s.assert_data, "Buses asserted at power on - {s:?}");
    assert!(
        !s.pull_be_low && !s.pull_rwbar_low && !s.pull_rst_low,
        "Control lines pulled at power on - {s:?}"
    );
    assert!(!s.halt, "Halted at power on - {s:?}");
    assert!(s.step == StepRequest::None, "Step pending at power on - {s:?}");
}

#[test]
fn step_request_names() {
    assert_eq!(StepRequest::None.to_string(), "None");
    assert_eq!(StepRequest::Cycle.to_string(), "Cycle");
    assert_eq!(StepRequest::Instruction.to_string(), "Instruction");
}

//! `signals` defines the line state shared between the bus monitor
//! and the board it is attached to. Every field is a plain value the
//! monitor or the clocking logic reads and writes directly. Nothing
//! here is derived or computed.

use strum_macros::Display;

#[cfg(test)]
mod tests;

/// `StepRequest` is the granularity of a pending single step.
/// The monitor sets it and the clocking logic clears it back to
/// `None` once the requested step has completed.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum StepRequest {
    /// No step pending.
    #[default]
    None,

    /// Advance a single bus cycle.
    Cycle,

    /// Advance until the current instruction completes.
    Instruction,
}

/// `Signals` holds the electrical state of the monitored bus.
///
/// NOTE: Only one party drives this at a time. Normally that's the
///       board's clocking loop but while a command executes the
///       interpreter owns it and hands it back once done.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    /// Value placed on the address bus when `assert_address` is set.
    pub out_address: u16,

    /// Value placed on the data bus when `assert_data` is set.
    pub out_data: u8,

    /// Drive `out_address` onto the address bus.
    pub assert_address: bool,

    /// Drive `out_data` onto the data bus.
    pub assert_data: bool,

    /// Hold BE (bus enable) low which takes the processor off the bus.
    pub pull_be_low: bool,

    /// Hold R/W~ low which signals a write cycle.
    pub pull_rwbar_low: bool,

    /// Hold ~RST low keeping the processor in reset.
    pub pull_rst_low: bool,

    /// Stop free running the processor clock.
    pub halt: bool,

    /// Address bus as observed on the last cycle.
    pub address_bus: u16,

    /// Data bus as observed on the last cycle.
    pub data_bus: u8,

    /// Pending single step request.
    pub step: StepRequest,
}

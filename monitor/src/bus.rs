//! Ad hoc bus access. Reads and writes take over the bus for a handful of
//! cycles and then put every line they touched back the way it was so any
//! standing halt, asserted address, etc. survives.
use crate::line::EOL;
use crate::parse::{parse_or_report, Field};
use busmon::prelude::*;
use color_eyre::eyre::Result;
use std::io::Write;
use tracing::debug;

/// Snapshot of every line a transaction is allowed to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pull_be_low: bool,
    pull_rwbar_low: bool,
    assert_address: bool,
    assert_data: bool,
    out_address: u16,
    out_data: u8,
}

impl Snapshot {
    pub(crate) fn take(s: &Signals) -> Self {
        Self {
            pull_be_low: s.pull_be_low,
            pull_rwbar_low: s.pull_rwbar_low,
            assert_address: s.assert_address,
            assert_data: s.assert_data,
            out_address: s.out_address,
            out_data: s.out_data,
        }
    }

    pub(crate) fn restore(self, s: &mut Signals) {
        s.pull_be_low = self.pull_be_low;
        s.pull_rwbar_low = self.pull_rwbar_low;
        s.assert_address = self.assert_address;
        s.assert_data = self.assert_data;
        s.out_address = self.out_address;
        s.out_data = self.out_data;
    }
}

// Values are latched at bus width. Anything wider is dropped on the floor
// exactly as the hardware would.
#[allow(clippy::cast_possible_truncation)]
fn to_address(v: u32) -> u16 {
    v as u16
}

#[allow(clippy::cast_possible_truncation)]
fn to_data(v: u32) -> u8 {
    v as u8
}

/// Perform `write <addr> <data>`.
///
/// NOTE: The order here mirrors the bus timing of the target. Address goes
///       out before data and BE drops before R/W~. Don't reorder.
pub(crate) fn write<C: Clock, W: Write>(
    board: &mut Board<C>,
    addr: &[u8],
    data: &[u8],
    out: &mut W,
) -> Result<()> {
    let Some(a) = parse_or_report(addr, Field::Address, out)? else {
        return Ok(());
    };
    let Some(d) = parse_or_report(data, Field::Data, out)? else {
        return Ok(());
    };
    let (a, d) = (to_address(a), to_data(d));
    debug!(addr = a, data = d, "bus write");

    let saved = Snapshot::take(&board.signals);
    board.signals.out_address = a;
    board.signals.out_data = d;

    // Drop BE
    board.signals.pull_be_low = true;
    board.tick();

    // Assert address
    board.signals.assert_address = true;
    board.tick();

    // Drop R/W~
    board.signals.pull_rwbar_low = true;
    board.tick();

    // Assert data
    board.signals.assert_data = true;
    board.tick();

    // Raise R/W~
    board.signals.pull_rwbar_low = false;
    board.tick();

    saved.restore(&mut board.signals);
    Ok(())
}

/// Perform `read <addr>` and report the value seen on the data bus.
pub(crate) fn read<C: Clock, W: Write>(
    board: &mut Board<C>,
    addr: &[u8],
    out: &mut W,
) -> Result<()> {
    let Some(a) = parse_or_report(addr, Field::Address, out)? else {
        return Ok(());
    };
    let a = to_address(a);
    debug!(addr = a, "bus read");

    let saved = Snapshot::take(&board.signals);
    board.signals.out_address = a;

    // Drop BE
    board.signals.pull_be_low = true;
    board.tick();

    // Assert address
    board.signals.assert_address = true;
    board.tick();

    // Data is valid one cycle after the address.
    board.tick();
    let d = board.signals.data_bus;

    saved.restore(&mut board.signals);
    debug!(addr = a, data = d, "bus read complete");

    write!(out, "D: {d:X}{EOL}")?;
    Ok(())
}

/// Handle `addr (off | <address>)` which asserts (or stops asserting) a
/// value on the address bus until told otherwise.
pub(crate) fn assert_address<W: Write>(s: &mut Signals, arg: &[u8], out: &mut W) -> Result<()> {
    if arg == b"off" {
        s.assert_address = false;
        return Ok(());
    }
    if let Some(v) = parse_or_report(arg, Field::Address, out)? {
        s.out_address = to_address(v);
        s.assert_address = true;
    }
    Ok(())
}

/// Handle `data (off | <value>)`. Same as `assert_address` for the data bus.
pub(crate) fn assert_data<W: Write>(s: &mut Signals, arg: &[u8], out: &mut W) -> Result<()> {
    if arg == b"off" {
        s.assert_data = false;
        return Ok(());
    }
    if let Some(v) = parse_or_report(arg, Field::Data, out)? {
        s.out_data = to_data(v);
        s.assert_data = true;
    }
    Ok(())
}

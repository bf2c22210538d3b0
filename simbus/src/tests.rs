use crate::{SimBus, FLOATING, MAX_SIZE, RESET_VECTOR};
use busmon::prelude::*;
use color_eyre::eyre::Result;
use monitor::Monitor;
use std::io::Write;
use tempfile::NamedTempFile;

// Type each command in turn returning the response to the last one with
// echo and prompt removed.
fn session(board: &mut Board<SimBus>, cmds: &[&str]) -> Result<String> {
    let mut m = Monitor::new();
    let mut last = String::new();
    for c in cmds {
        let mut out = Vec::new();
        for b in c.bytes().chain(std::iter::once(b'\n')) {
            m.feed(b, board, &mut out)?;
        }
        let out = String::from_utf8_lossy(&out).into_owned();
        last = out
            .trim_start_matches(&format!("{c}\r\n"))
            .trim_end_matches("> ")
            .to_string();
    }
    Ok(last)
}

#[test]
fn write_then_read() -> Result<()> {
    let mut board = Board::new(SimBus::new(4));
    board.signals.halt = true;

    assert_eq!(session(&mut board, &["write $200 $AB", "read $200"])?, "D: AB\r\n");
    assert_eq!(board.clock.read(0x0200), 0xAB);

    // Decimal works too and neighbours are untouched.
    assert_eq!(session(&mut board, &["w 513 7", "r $201"])?, "D: 7\r\n");
    assert_eq!(board.clock.read(0x01FF), 0x00);

    // Nothing was left driving the bus.
    assert!(!board.signals.assert_address, "Address left asserted");
    assert!(!board.signals.assert_data, "Data left asserted");
    assert!(!board.signals.pull_be_low, "BE left low");
    assert!(!board.signals.pull_rwbar_low, "R/W~ left low");
    Ok(())
}

#[test]
fn read_keeps_asserted_address() -> Result<()> {
    let mut board = Board::new(SimBus::default());
    board.clock.write(0x1234, 0x56);
    board.clock.write(0x0010, 0x99);
    board.signals.halt = true;

    session(&mut board, &["addr $1234"])?;
    assert_eq!(session(&mut board, &["read $10"])?, "D: 99\r\n");
    assert!(board.signals.assert_address, "Standing address lost");
    assert_eq!(board.signals.out_address, 0x1234);

    // Next cycle shows the standing address again.
    session(&mut board, &["cycle"])?;
    assert_eq!(session(&mut board, &["print"])?, "A: 1234 D: 56\r\n");
    Ok(())
}

#[test]
fn stepping() -> Result<()> {
    let mut board = Board::new(SimBus::new(3));
    board.signals.halt = true;

    assert_eq!(session(&mut board, &["cycle 2"])?, "");
    assert_eq!(board.clock.cycles(), 2);
    assert_eq!(board.clock.pc(), 2);

    // Finishes the instruction already in progress.
    assert_eq!(session(&mut board, &["step"])?, "");
    assert_eq!(board.clock.cycles(), 3);

    assert_eq!(session(&mut board, &["step 2"])?, "");
    assert_eq!(board.clock.cycles(), 9);
    assert_eq!(session(&mut board, &["p"])?, "A: 8 D: 0\r\n");
    Ok(())
}

#[test]
fn stepping_needs_halt() -> Result<()> {
    let mut board = Board::new(SimBus::new(2));
    assert_eq!(
        session(&mut board, &["step 4"])?,
        "aborting: processor in incorrect state for stepping\r\n"
    );
    assert_eq!(board.clock.cycles(), 1);
    assert_eq!(board.signals.step, StepRequest::None);

    board.signals.halt = true;
    board.signals.pull_be_low = true;
    assert_eq!(
        session(&mut board, &["c"])?,
        "aborting: processor in incorrect state for stepping\r\n"
    );
    assert_eq!(board.clock.cycles(), 1, "Processor ran with BE low");
    Ok(())
}

#[test]
fn reset_loads_vector() -> Result<()> {
    let mut board = Board::new(SimBus::default());
    board.clock.load(&[0x00, 0xC0], RESET_VECTOR)?;
    board.signals.pull_rst_low = true;
    board.tick();
    assert_eq!(board.clock.pc(), 0xC000);
    assert_eq!(board.clock.cycles(), 0);

    board.signals.pull_rst_low = false;
    board.tick();
    assert_eq!(board.signals.address_bus, 0xC000);
    assert_eq!(board.clock.pc(), 0xC001);
    Ok(())
}

#[test]
fn bus_floats_with_be_low() {
    let mut board = Board::new(SimBus::default());
    board.signals.pull_be_low = true;
    board.tick();
    assert_eq!(board.signals.address_bus, FLOATING);
    assert_eq!(board.clock.cycles(), 0);
}

#[test]
fn load() -> Result<()> {
    let mut bus = SimBus::default();
    bus.load(&[1, 2, 3], 0x8000)?;
    assert_eq!(
        [bus.read(0x8000), bus.read(0x8001), bus.read(0x8002)],
        [1, 2, 3]
    );

    assert!(bus.load(&[1, 2], 0xFFFF).is_err(), "Load past end of RAM worked");
    assert!(bus.load(&[0; MAX_SIZE], 0).is_ok(), "Full size load failed");
    Ok(())
}

#[test]
fn load_file() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(&[0xEA, 0x4C, 0x00, 0x10])?;
    f.flush()?;

    let mut bus = SimBus::default();
    bus.load_file(f.path(), 0x1000)?;
    assert_eq!(bus.read(0x1001), 0x4C);

    assert!(
        bus.load_file("/no/such/file", 0).is_err(),
        "Missing file loaded"
    );
    Ok(())
}

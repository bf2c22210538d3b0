//! `monitor_tui` runs the bus monitor against a simulated board over stdin/stdout.
use busmon::prelude::*;
use clap::Parser;
use clap_num::maybe_hex;
use color_eyre::eyre::{eyre, Result};
use simbus::SimBus;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `monitor_tui` will start a simulated board with blank memory and hand
/// stdin/stdout to the bus monitor as its transport.
///
/// It can take an optional memory image file and load it before turning
/// over control. Logging goes to stderr and is controlled by `RUST_LOG`.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(help = "Filename containing binary image")]
    filename: Option<String>,

    #[arg(
        long, value_parser=maybe_hex::<u16>,
        help = "Offset into RAM to start loading data. All other RAM will be zero'd out."
    )]
    offset: Option<u16>,

    #[arg(
        long,
        default_value_t = 4,
        help = "Cycles the simulated processor takes per instruction."
    )]
    cycles_per_instruction: usize,

    #[arg(long, help = "Start with the processor halted.")]
    halted: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args: Args = Args::parse();

    if args.cycles_per_instruction == 0 {
        return Err(eyre!("cycles per instruction must be at least 1"));
    }

    let mut board = Board::new(SimBus::new(args.cycles_per_instruction));
    if let Some(file) = &args.filename {
        board.clock.load_file(file, args.offset.unwrap_or_default())?;
    }
    board.signals.halt = args.halted;
    info!(
        image = args.filename.as_deref().unwrap_or("none"),
        halted = args.halted,
        "starting monitor"
    );

    monitor::run(io::stdin().lock(), &mut board, io::stdout().lock())
}

//! monitor implements the command interpreter for a hardware bus monitor.
//! Bytes come in from a character transport one at a time and are edited
//! into a command line. Once submitted the line is tokenized and the command
//! executed against a `Board` which may mean single stepping the processor
//! or taking over the bus to read or write a location.
use busmon::prelude::*;
use color_eyre::eyre::Result;
use std::io::{Read, Write};
use tracing::debug;

mod bus;
mod commands;
mod line;
mod parse;
mod step;


use commands::Command;
use line::EOL;

pub use line::{CommandLine, Event, Tokens, MAX_CMD_LEN, MAX_TOKENS};
pub use parse::{parse_number, ParseError};

/// Emitted after every command before more input is read.
pub const PROMPT: &str = "> ";

const HELP: &[&str] = &[
    "?           - show brief help message",
    "p[rint]     - print current address/data bus",
    "h[alt]      - toggle halt state",
    "c[ycle] [n] - single cycle n times",
    "s[tep] [n]  - single step n times",
    "reset       - toggle ~RST line",
    "b[e]        - toggle BE line",
    "r[ead] <a>  - read memory at address a",
    "w[rite] <a> <d> - write d to memory at address a",
    "",
    "Specify decimal numbers with no prefix.",
    "Specify hexadecimal numbers with $ prefix.",
];

/// `Monitor` holds the interpreter state between input bytes.
#[derive(Clone, Debug, Default)]
pub struct Monitor {
    line: CommandLine,
}

impl Monitor {
    /// Create a new `Monitor` with an empty command line.
    ///
    /// NOTE: No prompt is emitted. Call `prompt` before feeding input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The line currently being edited.
    #[must_use]
    pub fn line(&self) -> &CommandLine {
        &self.line
    }

    /// Reset the command line and print the prompt.
    ///
    /// # Errors
    /// Only failures writing to `out` are returned.
    pub fn prompt<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.line.reset();
        out.write_all(PROMPT.as_bytes())?;
        Ok(())
    }

    /// Feed one input byte. If it completes a command that command is run
    /// against `board` before returning and a new prompt is emitted.
    ///
    /// # Errors
    /// Only failures writing to `out` are returned. Bad input of any sort is
    /// reported to the operator instead.
    pub fn feed<C: Clock, W: Write>(
        &mut self,
        ch: u8,
        board: &mut Board<C>,
        out: &mut W,
    ) -> Result<()> {
        if self.line.input(ch, out)? == Event::Submit {
            let tokens = self.line.tokenize();
            process_command(&tokens, board, out)?;
            self.prompt(out)?;
        }
        Ok(())
    }
}

/// `run` is the main transport loop. It prints the initial prompt and then
/// feeds every byte read from `input` to a fresh `Monitor` until EOF.
/// Output is flushed after each byte so echo happens as the operator types.
///
/// # Errors
/// Any I/O error on either side of the transport.
pub fn run<R: Read, C: Clock, W: Write>(
    input: R,
    board: &mut Board<C>,
    mut output: W,
) -> Result<()> {
    let mut monitor = Monitor::new();
    monitor.prompt(&mut output)?;
    output.flush()?;

    for ch in input.bytes() {
        monitor.feed(ch?, board, &mut output)?;
        output.flush()?;
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    for l in HELP {
        write!(out, "{l}{EOL}")?;
    }
    Ok(())
}

fn level(low: bool) -> &'static str {
    if low {
        "low"
    } else {
        "high"
    }
}

fn process_command<C: Clock, W: Write>(
    tokens: &Tokens<'_>,
    board: &mut Board<C>,
    out: &mut W,
) -> Result<()> {
    let cmd = Command::from_tokens(tokens);
    debug!(?cmd, "command");

    let s = &mut board.signals;
    match cmd {
        Command::Help => print_help(out)?,
        Command::Halt => {
            s.halt = !s.halt;
            write!(out, "halt {}{EOL}", if s.halt { "on" } else { "off" })?;
        }
        Command::Print => write!(out, "A: {:X} D: {:X}{EOL}", s.address_bus, s.data_bus)?,
        Command::Cycle(n) => step::perform(board, StepRequest::Cycle, n, out)?,
        Command::Step(n) => step::perform(board, StepRequest::Instruction, n, out)?,
        Command::Reset => {
            s.pull_rst_low = !s.pull_rst_low;
            write!(out, "~rst {}{EOL}", level(s.pull_rst_low))?;
        }
        Command::BusEnable => {
            s.pull_be_low = !s.pull_be_low;
            write!(out, "be {}{EOL}", level(s.pull_be_low))?;
        }
        Command::ReadWrite => {
            s.pull_rwbar_low = !s.pull_rwbar_low;
            write!(out, "rwbar {}{EOL}", level(s.pull_rwbar_low))?;
        }
        Command::Address(arg) => bus::assert_address(s, arg, out)?,
        Command::Data(arg) => bus::assert_data(s, arg, out)?,
        Command::Write(addr, data) => bus::write(board, addr, data, out)?,
        Command::Read(addr) => bus::read(board, addr, out)?,
        Command::Unknown => {
            write!(out, "unknown command{EOL}")?;
            print_help(out)?;
        }
    }
    Ok(())
}

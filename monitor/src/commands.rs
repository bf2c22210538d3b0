use crate::line::Tokens;

/// Command is a fully matched operator request. Arguments are still the raw
/// tokens as typed since each command decides how (and whether) to parse them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Help,
    Halt,
    Print,
    Cycle(Option<&'a [u8]>),
    Step(Option<&'a [u8]>),
    Reset,
    BusEnable,
    ReadWrite,
    Address(&'a [u8]),
    Data(&'a [u8]),
    Write(&'a [u8], &'a [u8]),
    Read(&'a [u8]),
    Unknown,
}

// True if cmd is name or the single character abbreviation of name.
fn prefix_eq(cmd: &[u8], name: &[u8]) -> bool {
    if let ([c], [first, ..]) = (cmd, name) {
        if c == first {
            return true;
        }
    }
    cmd == name
}

impl<'a> Command<'a> {
    /// Match a token list to a command. Checks happen in a fixed order and a
    /// name which matches with the wrong number of arguments simply moves on
    /// to the next candidate. i.e. `r` alone is `rw` but `r $10` is `read`.
    pub(crate) fn from_tokens(tokens: &Tokens<'a>) -> Self {
        let n = tokens.len();
        let Some(cmd) = tokens.get(0) else {
            return Command::Help;
        };
        let arg = |i: usize| tokens.get(i).unwrap_or_default();

        if prefix_eq(cmd, b"?") && n == 1 {
            Command::Help
        } else if prefix_eq(cmd, b"halt") && n == 1 {
            Command::Halt
        } else if prefix_eq(cmd, b"print") && n == 1 {
            Command::Print
        } else if prefix_eq(cmd, b"cycle") && n <= 2 {
            Command::Cycle(tokens.get(1))
        } else if prefix_eq(cmd, b"step") && n <= 2 {
            Command::Step(tokens.get(1))
        } else if cmd == b"reset" && n == 1 {
            Command::Reset
        } else if prefix_eq(cmd, b"be") && n == 1 {
            Command::BusEnable
        } else if prefix_eq(cmd, b"rw") && n == 1 {
            Command::ReadWrite
        } else if cmd == b"addr" && n == 2 {
            Command::Address(arg(1))
        } else if cmd == b"data" && n == 2 {
            Command::Data(arg(1))
        } else if prefix_eq(cmd, b"write") && n == 3 {
            Command::Write(arg(1), arg(2))
        } else if prefix_eq(cmd, b"read") && n == 2 {
            Command::Read(arg(1))
        } else {
            Command::Unknown
        }
    }
}

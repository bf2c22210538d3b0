//! Operator input handling. Bytes arrive one at a time and are echoed,
//! erased or rejected until a line is submitted. The finished line is then
//! split in place into whitespace separated tokens.
use color_eyre::eyre::Result;
use std::io::Write;
use tracing::trace;

/// Longest command line accepted (not counting the terminator).
pub const MAX_CMD_LEN: usize = 31;

/// Most tokens a single command line is split into.
pub const MAX_TOKENS: usize = 5;

pub(crate) const BEL: u8 = 0x07;
pub(crate) const BS: u8 = 0x08;
pub(crate) const LF: u8 = 0x0A;
pub(crate) const CR: u8 = 0x0D;
pub(crate) const DEL: u8 = 0x7F;

/// Line ending used for everything sent back over the transport.
pub(crate) const EOL: &str = "\r\n";

/// Event is the outcome of feeding one byte to a `CommandLine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keep reading.
    None,

    /// The operator hit enter and the line is ready to tokenize.
    Submit,
}

/// `CommandLine` is the line currently being typed along with its
/// editing rules. There's only one state (reading a command) so this is
/// the whole state machine.
#[derive(Clone, Debug)]
pub struct CommandLine {
    buf: [u8; MAX_CMD_LEN + 1],
    len: usize,
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLine {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_CMD_LEN + 1],
            len: 0,
        }
    }

    /// Number of characters currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The characters typed so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Throw away anything typed so far.
    pub fn reset(&mut self) {
        self.buf[0] = 0;
        self.len = 0;
    }

    /// Process a single input byte echoing/erasing/ringing on `out` as
    /// appropriate.
    ///
    /// # Errors
    /// Only failures writing to `out` are returned.
    pub fn input<W: Write>(&mut self, ch: u8, out: &mut W) -> Result<Event> {
        trace!(ch, len = self.len, "input byte");
        match ch {
            BS | DEL => {
                if self.len > 0 {
                    out.write_all(&[BS, b' ', BS])?;
                    self.len -= 1;
                    self.buf[self.len] = 0;
                } else {
                    out.write_all(&[BEL])?;
                }
            }
            LF | CR => {
                out.write_all(EOL.as_bytes())?;
                return Ok(Event::Submit);
            }
            // Only printable chars make it into the buffer.
            c if c < 0x20 => out.write_all(&[BEL])?,
            c if self.len < MAX_CMD_LEN => {
                self.buf[self.len] = c;
                self.len += 1;
                self.buf[self.len] = 0;
                out.write_all(&[c])?;
            }
            _ => out.write_all(&[BEL])?,
        }
        Ok(Event::None)
    }

    /// Split the line into space separated tokens. Each token is terminated
    /// in place and the line length drops back to 0 so the buffer contents
    /// past this point shouldn't be relied on.
    ///
    /// The returned `Tokens` borrow the line so it can't be reset or edited
    /// while they are still in use.
    pub fn tokenize(&mut self) -> Tokens<'_> {
        let len = self.len;
        let mut spans = [None; MAX_TOKENS + 1];
        let mut next = 0;
        let mut idx = 0;

        while next < MAX_TOKENS && idx < len {
            // Skip to next non-space char
            while idx < len && self.buf[idx] == b' ' {
                idx += 1;
            }
            if idx == len || self.buf[idx] == 0 {
                break;
            }

            let start = idx;
            while idx < len && self.buf[idx] != 0 && self.buf[idx] != b' ' {
                idx += 1;
            }
            spans[next] = Some((start, idx));
            next += 1;

            if idx < len {
                self.buf[idx] = 0;
            }
            idx += 1;
        }

        self.len = 0;

        // Always terminated no matter how many were found.
        spans[MAX_TOKENS] = None;
        Tokens {
            buf: &self.buf,
            spans,
        }
    }
}

/// `Tokens` is an ordered list of views into a tokenized `CommandLine`.
#[derive(Clone, Copy, Debug)]
pub struct Tokens<'a> {
    buf: &'a [u8],
    spans: [Option<(usize, usize)>; MAX_TOKENS + 1],
}

impl<'a> Tokens<'a> {
    /// Number of tokens found, counted up to the first absent entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans
            .iter()
            .take(MAX_TOKENS)
            .take_while(|s| s.is_some())
            .count()
    }

    /// True if the line held no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return token `i` if present.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&'a [u8]> {
        let buf = self.buf;
        self.spans
            .get(i)
            .copied()
            .flatten()
            .map(|(start, end)| &buf[start..end])
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> {
        let tokens = *self;
        (0..tokens.len()).filter_map(move |i| tokens.get(i))
    }
}

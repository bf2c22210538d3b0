use crate::line::EOL;
use color_eyre::eyre::Result;
use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

/// `ParseError` describes why a numeric argument was rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left to parse once any `$` prefix was removed.
    #[error("no input")]
    Empty,

    /// A character that isn't a digit in the selected base.
    #[error("invalid digit: {0:#04X}")]
    InvalidDigit(u8),

    /// The value doesn't fit in 32 bits.
    #[error("value out of range")]
    Overflow,
}

/// Field names the argument being parsed when reporting a failure.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Field {
    Address,
    Data,
    Number,
}

/// Parse a numeric command argument. A leading `$` selects hex, otherwise
/// it's decimal. No sign, whitespace or anything else is allowed.
///
/// # Errors
/// Returns a `ParseError` if the token is empty, contains any characters
/// which aren't digits in the selected base or overflows.
pub fn parse_number(val: &[u8]) -> Result<u32, ParseError> {
    let (digits, radix) = match val {
        [b'$', rest @ ..] => (rest, 16),
        _ => (val, 10),
    };

    if digits.is_empty() {
        return Err(ParseError::Empty);
    }

    digits.iter().try_fold(0u32, |acc, &b| {
        let d = char::from(b)
            .to_digit(radix)
            .ok_or(ParseError::InvalidDigit(b))?;
        acc.checked_mul(radix)
            .and_then(|v| v.checked_add(d))
            .ok_or(ParseError::Overflow)
    })
}

/// Parse `val` and on failure report it to the operator as
/// `invalid <field>: <val>`. `None` means the command shouldn't proceed
/// with this argument.
pub(crate) fn parse_or_report<W: Write>(
    val: &[u8],
    field: Field,
    out: &mut W,
) -> Result<Option<u32>> {
    match parse_number(val) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::debug!(%field, %e, "argument rejected");
            write!(out, "invalid {field}: ")?;
            out.write_all(val)?;
            write!(out, "{EOL}")?;
            Ok(None)
        }
    }
}

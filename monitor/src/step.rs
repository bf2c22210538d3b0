use crate::line::EOL;
use crate::parse::{parse_or_report, Field};
use busmon::prelude::*;
use color_eyre::eyre::Result;
use std::io::Write;
use tracing::{debug, warn};

/// Run `cycle`/`step` with an optional repeat count.
///
/// NOTE: Unlike other commands a bad count doesn't abort. It's reported and
///       then a single step happens anyway.
pub(crate) fn perform<C: Clock, W: Write>(
    board: &mut Board<C>,
    request: StepRequest,
    count: Option<&[u8]>,
    out: &mut W,
) -> Result<()> {
    let n = match count {
        Some(tok) => parse_or_report(tok, Field::Number, out)?.unwrap_or(1),
        None => 1,
    };
    debug!(%request, n, "stepping");

    for i in 0..n {
        board.signals.step = request;
        while board.signals.step != StepRequest::None {
            board.tick();

            if !board.steppable() {
                warn!(%request, i, n, "processor left steppable state");
                write!(
                    out,
                    "aborting: processor in incorrect state for stepping{EOL}"
                )?;
                board.signals.step = StepRequest::None;
                // Nothing useful can come from the rest of the count.
                return Ok(());
            }
        }
    }
    Ok(())
}

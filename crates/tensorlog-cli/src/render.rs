use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tensorlog::reader::ObservationStream;

/// Print every observation of `stream` to `out`, stopping after `limit`
/// observations if given. Returns the number printed.
///
/// Layout per observation: a `context:` line whenever the context changes,
/// an `observation:` line, then one `name: v0,v1,...` line per feature and
/// one for the score when present.
pub fn dump<R: BufRead>(
    stream: ObservationStream<R>,
    limit: Option<usize>,
    out: &mut dyn Write,
) -> Result<usize> {
    let mut last_context: Option<String> = None;
    let mut printed = 0;

    for (index, obs) in stream.take(limit.unwrap_or(usize::MAX)).enumerate() {
        let obs = obs.with_context(|| format!("decoding observation {index}"))?;

        if obs.context != last_context {
            writeln!(out, "context: {}", obs.context.as_deref().unwrap_or("none"))?;
            last_context = obs.context.clone();
        }
        match obs.observation_id {
            Some(id) => writeln!(out, "observation: {id}")?,
            None => writeln!(out, "observation: none")?,
        }
        for value in &obs.features {
            writeln!(out, "{value}")?;
        }
        if let Some(score) = &obs.score {
            writeln!(out, "{score}")?;
        }
        printed += 1;
    }
    Ok(printed)
}

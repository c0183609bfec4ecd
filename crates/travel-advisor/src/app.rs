use std::io::{self, BufRead, Write};

use crate::agent::Runner;
use crate::error::RunError;
use crate::prompts::{
    trip_prompt, CITY_PROMPT, EMPTY_CITY_MESSAGE, INPUT_REJECTED_MESSAGE,
    OUTPUT_REJECTED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};

/// Returns the trimmed city, prompting on `out` and reading one line from `input`
/// unless one was passed on the command line.
pub(crate) fn read_city<R, W>(
    explicit: Option<&str>,
    input: &mut R,
    out: &mut W,
) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    if let Some(city) = explicit {
        return Ok(city.trim().to_string());
    }
    write!(out, "{CITY_PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Runs the advisor for `city` and prints the itinerary or a canned message.
/// Returns the process exit code.
pub(crate) async fn run_session<W: Write>(
    city: &str,
    runner: &Runner,
    out: &mut W,
) -> io::Result<i32> {
    if city.is_empty() {
        writeln!(out, "{EMPTY_CITY_MESSAGE}")?;
        return Ok(1);
    }

    tracing::info!("Running TravelAdvisor for city: {city}");
    match runner.run(&trip_prompt(city)).await {
        Ok(result) => {
            tracing::info!(run_id = %result.run_id, turns = result.turns, "itinerary ready");
            writeln!(out, "{}", result.final_output)?;
        }
        Err(RunError::InputRejected(_)) => writeln!(out, "{INPUT_REJECTED_MESSAGE}")?,
        Err(RunError::OutputRejected(_)) => writeln!(out, "{OUTPUT_REJECTED_MESSAGE}")?,
        Err(RunError::Failed(err)) => {
            tracing::error!("Unexpected error during TravelAdvisor execution: {err:?}");
            writeln!(out, "{UNEXPECTED_ERROR_MESSAGE}")?;
        }
    }
    Ok(0)
}

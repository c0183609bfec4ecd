use std::fmt;
use travel_types::{InputScanResult, OutputScanResult};

/// Ways an agent run can end without a usable itinerary.
#[derive(Debug)]
pub(crate) enum RunError {
    /// The input guardrail flagged the request as off topic.
    InputRejected(InputScanResult),
    /// The output guardrail flagged the generated reply.
    OutputRejected(OutputScanResult),
    Failed(anyhow::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InputRejected(scan) => {
                write!(f, "input guardrail tripwire triggered: {}", scan.reason)
            }
            RunError::OutputRejected(scan) => {
                write!(f, "output guardrail tripwire triggered: {}", scan.explanation)
            }
            RunError::Failed(err) => write!(f, "agent run failed: {err:#}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Failed(err) => Some(&**err),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for RunError {
    fn from(err: anyhow::Error) -> Self {
        RunError::Failed(err)
    }
}

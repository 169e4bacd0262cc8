//! Error type shared by both front ends.

use std::io;
use thiserror::Error;

/// Why a pair of counts was refused before any work was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFault {
    /// Zero or a negative number.
    NonPositive(String),
    /// Token did not parse as an integer.
    Malformed(String),
    /// Input ended before the value was read.
    Missing,
    /// Positive, but larger than the target integer type can hold.
    OutOfRange(String),
    /// Fewer steps than workers, so each worker would get zero steps.
    TooFewSteps { total_steps: u64, workers: usize },
}

impl std::fmt::Display for InputFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFault::NonPositive(token) => write!(f, "non-positive value `{}`", token),
            InputFault::Malformed(token) => write!(f, "not an integer: `{}`", token),
            InputFault::Missing => write!(f, "input ended early"),
            InputFault::OutOfRange(token) => write!(f, "value `{}` out of range", token),
            InputFault::TooFewSteps { total_steps, workers } => write!(
                f,
                "{} steps cannot be split across {} workers",
                total_steps, workers
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum PiError {
    /// Every input problem reports the same user-facing message.
    #[error("Liczba wątków i podziałów musi być dodatnia!")]
    InvalidInput(InputFault),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {index} failed: {reason}")]
    WorkerFailed { index: usize, reason: String },
}

impl PiError {
    pub fn invalid(fault: InputFault) -> Self {
        tracing::debug!(%fault, "rejecting input");
        PiError::InvalidInput(fault)
    }
}

pub type Result<T> = std::result::Result<T, PiError>;

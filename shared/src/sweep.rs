//! Parameter sweep argument for command-line tools.
//!
//! A sweep is written `start:stop:step` and expands to the inclusive sequence
//! `start, start + step, ...` up to `stop`. Values are generated by index
//! rather than by repeated addition so long sweeps do not drift.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Slack (in units of `step`) allowed when deciding whether `stop` is reached.
const STOP_TOLERANCE: f64 = 1e-9;

/// Errors produced while parsing or expanding a sweep
#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error("sweep must be in format 'start:stop:step', got '{0}'")]
    Format(String),

    #[error("invalid {field} value '{value}'")]
    Number { field: &'static str, value: String },

    #[error("sweep values must be finite")]
    NonFinite,

    #[error("sweep step cannot be zero")]
    ZeroStep,

    #[error("step {step} moves away from stop ({start} -> {stop})")]
    WrongDirection { start: f64, stop: f64, step: f64 },
}

/// Inclusive `start:stop:step` sweep, e.g. satellite altitudes `10:90:5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepArg {
    start: f64,
    stop: f64,
    step: f64,
}

impl SweepArg {
    /// Build a validated sweep.
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, SweepError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(SweepError::NonFinite);
        }
        if step == 0.0 {
            return Err(SweepError::ZeroStep);
        }
        if (stop - start) * step < 0.0 {
            return Err(SweepError::WrongDirection { start, stop, step });
        }
        Ok(Self { start, stop, step })
    }

    /// A sweep holding exactly one value.
    pub fn single(value: f64) -> Self {
        Self {
            start: value,
            stop: value,
            step: 1.0,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of values in the sweep (always at least one).
    pub fn len(&self) -> usize {
        let steps = (self.stop - self.start) / self.step;
        (steps + STOP_TOLERANCE).floor() as usize + 1
    }

    /// Sweeps are never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the sweep values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

impl FromStr for SweepArg {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [start, stop, step] = parts.as_slice() else {
            return Err(SweepError::Format(s.to_string()));
        };

        let parse = |field: &'static str, value: &str| {
            value.parse::<f64>().map_err(|_| SweepError::Number {
                field,
                value: value.to_string(),
            })
        };

        SweepArg::new(
            parse("start", *start)?,
            parse("stop", *stop)?,
            parse("step", *step)?,
        )
    }
}

impl fmt::Display for SweepArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

use std::fmt;

/// A fatal solving failure, per spec: exhausting the widening loop is
/// the one error condition the solving stage itself can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// No feasible, every-actor-covered schedule was found within
    /// `max_it` widening iterations.
    Exhausted { max_it: u32, last_max_acts: i64 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Exhausted { max_it, last_max_acts } => write!(
                f,
                "maximum iterations reached: no feasible schedule with every actor assigned after {max_it} widening step(s) (last max_acts={last_max_acts})"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

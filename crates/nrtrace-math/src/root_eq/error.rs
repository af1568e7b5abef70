use thiserror::Error;

/// Errors raised while iterating towards a root.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum SolveError<T> {
    #[error("Cannot take a Newton step: derivative is zero at x = {x:?} (f(x) = {fx:?})")]
    DivisionByZero { x: T, fx: T },
    #[error("Newton step from x = {x:?} produced a non-finite guess {next:?}")]
    NonFiniteIterate { x: T, next: T },
    #[error("Tolerance must be strictly positive, got {0:?}")]
    InvalidTolerance(T),
    #[error("Did not converge after {iterations} steps (latest guess: {last:?})")]
    NonConvergence { iterations: usize, last: T },
}

impl<T: Copy> SolveError<T> {
    /// Most recent guess known when the error was raised, if any.
    pub fn best_guess(&self) -> Option<T> {
        match *self {
            Self::DivisionByZero { x, .. } | Self::NonFiniteIterate { x, .. } => Some(x),
            Self::NonConvergence { last, .. } => Some(last),
            Self::InvalidTolerance(_) => None,
        }
    }
}

use crate::root_eq::error::SolveError;
use crate::root_eq::trace::{IterationRecord, IterationTrace};
use crate::root_eq::{Differentiable, Function};
use az::CastFrom;
use num_traits::Float;
use numeric_literals::replace_float_literals;
use std::fmt;

/// Newton-Raphson solver
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NewtonRaphson<T> {
    /// Maximum number of Newton steps before giving up
    pub max_iterations: usize,
    /// Iteration stops once two consecutive guesses are no further apart than this
    pub tolerance: T,
}

impl<T> NewtonRaphson<T> {
    pub const fn new(max_iterations: usize, tolerance: T) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }
}

impl<T: Float + CastFrom<f64>> Default for NewtonRaphson<T> {
    #[replace_float_literals(T::cast_from(literal))]
    fn default() -> Self {
        Self::new(100, 1e-5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult<T> {
    /// Reported root, the last recorded guess
    pub value: T,
    /// Function value at `value`
    pub function_value: T,
    /// Number of recorded guesses
    pub iterations: usize,
}

/// Takes one Newton step from `x`, refusing to divide by a zero derivative.
fn newton_step<T: Float>(x: T, fx: T, dfx: T) -> Result<T, SolveError<T>> {
    if dfx.is_zero() {
        return Err(SolveError::DivisionByZero { x, fx });
    }
    let next = x - fx / dfx;
    if !next.is_finite() {
        return Err(SolveError::NonFiniteIterate { x, next });
    }
    Ok(next)
}

impl<T: Float + fmt::Debug> NewtonRaphson<T> {
    /// Iterates from `initial_guess`, recording every guess the stopping test is checked against.
    ///
    /// The guess produced by the step that satisfies `|x_n - x_{n+1}| <= tolerance` is discarded:
    /// the trace holds one record per step taken, and one fewer than the guesses computed. Fails with
    /// [`SolveError::NonConvergence`] once `max_iterations` steps were taken without converging.
    pub fn trace<F: Differentiable<Scalar = T>>(
        &self,
        function: &F,
        initial_guess: T,
    ) -> Result<IterationTrace<T>, SolveError<T>> {
        if self.tolerance.is_nan() || self.tolerance <= T::zero() {
            return Err(SolveError::InvalidTolerance(self.tolerance));
        }

        let mut x0 = initial_guess;
        let (fx, dfx) = function.eval_with_derivative(x0);
        let mut x1 = newton_step(x0, fx, dfx)?;
        let mut trace = IterationTrace::new(IterationRecord::new(x0, fx, dfx));
        log::trace!("[newton] x = {x0:?}, f(x) = {fx:?}, f'(x) = {dfx:?}");

        let mut steps = 1;
        while (x0 - x1).abs() > self.tolerance {
            if steps >= self.max_iterations {
                log::warn!(
                    "[newton] giving up after {steps} steps, latest gap {:?} > {:?}",
                    (x0 - x1).abs(),
                    self.tolerance
                );
                return Err(SolveError::NonConvergence {
                    iterations: steps,
                    last: x1,
                });
            }

            let (fx, dfx) = function.eval_with_derivative(x1);
            trace.push(IterationRecord::new(x1, fx, dfx));
            log::trace!("[newton] x = {x1:?}, f(x) = {fx:?}, f'(x) = {dfx:?}");

            x0 = x1;
            x1 = newton_step(x0, fx, dfx)?;
            steps += 1;
        }

        log::debug!("[newton] converged after {steps} steps, root ~ {:?}", trace.root());
        Ok(trace)
    }

    /// Solves the equation using the Newton-Raphson method
    pub fn solve<F: Differentiable<Scalar = T>>(
        &self,
        function: &F,
        initial_guess: T,
    ) -> Result<SolveResult<T>, SolveError<T>> {
        let trace = self.trace(function, initial_guess)?;
        let last = trace.last();
        Ok(SolveResult {
            value: last.x(),
            function_value: last.fx(),
            iterations: trace.len(),
        })
    }
}

/// Runs Newton-Raphson on `f` with its explicit derivative `df`, starting at `x0`.
///
/// There is no bound on the number of steps: a sequence that never settles within `tolerance`
/// keeps the caller blocked. Use [`NewtonRaphson::trace`] with a finite `max_iterations` to bound
/// the work.
///
/// # Errors
///
/// * [`SolveError::InvalidTolerance`] if `tolerance` is not strictly positive
/// * [`SolveError::DivisionByZero`] if `df` vanishes at a visited point
/// * [`SolveError::NonFiniteIterate`] if a step produces an infinite or NaN guess
pub fn find_root<T, F, D>(f: F, df: D, x0: T, tolerance: T) -> Result<IterationTrace<T>, SolveError<T>>
where
    T: Float + fmt::Debug,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    NewtonRaphson::new(usize::MAX, tolerance).trace(&Function::new(f, df), x0)
}

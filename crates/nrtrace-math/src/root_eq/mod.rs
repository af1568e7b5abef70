//! Root finding of scalar equations.
//!
//! The [`Differentiable`] trait describes an equation together with its first derivative; the
//! [`nr::NewtonRaphson`] solver refines an initial guess against it and records every visited
//! point in an [`IterationTrace`].
use std::marker::PhantomData;

pub mod error;
pub mod nr;
pub mod trace;

pub use error::SolveError;
pub use nr::{find_root, NewtonRaphson, SolveResult};
pub use trace::{ColumnSummary, IterationRecord, IterationTrace, TraceSummary};

/// Trait defining an equation and its derivative
pub trait Differentiable {
    /// Scalar type of the equation
    type Scalar: Clone;

    /// Evaluates both the function and its derivative at a point
    fn eval_with_derivative(&self, x: Self::Scalar) -> (Self::Scalar, Self::Scalar);

    /// Evaluates the function at a point
    fn eval(&self, x: Self::Scalar) -> Self::Scalar {
        self.eval_with_derivative(x).0
    }

    /// Evaluates the derivative of the function at a point
    fn derivative(&self, x: Self::Scalar) -> Self::Scalar {
        self.eval_with_derivative(x).1
    }
}

impl<D: ?Sized + Differentiable> Differentiable for &D {
    type Scalar = D::Scalar;

    fn eval_with_derivative(&self, x: Self::Scalar) -> (Self::Scalar, Self::Scalar) {
        D::eval_with_derivative(self, x)
    }
}

/// A [`Differentiable`] equation made of a function and its explicitly supplied derivative.
///
/// Nothing checks that `diff` is actually the derivative of `func`.
pub struct Function<T, F, D> {
    func: F,
    diff: D,
    __phantom: PhantomData<fn(T) -> T>,
}

impl<T, F: Fn(T) -> T, D: Fn(T) -> T> Function<T, F, D> {
    pub const fn new(func: F, diff: D) -> Self {
        Self {
            func,
            diff,
            __phantom: PhantomData,
        }
    }
}

impl<T: Clone, F: Fn(T) -> T, D: Fn(T) -> T> Differentiable for Function<T, F, D> {
    type Scalar = T;

    fn eval_with_derivative(&self, x: T) -> (T, T) {
        ((self.func)(x.clone()), (self.diff)(x))
    }

    fn eval(&self, x: T) -> T {
        (self.func)(x)
    }

    fn derivative(&self, x: T) -> T {
        (self.diff)(x)
    }
}

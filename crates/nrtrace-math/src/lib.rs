pub mod root_eq;

pub use root_eq::{find_root, IterationRecord, IterationTrace, NewtonRaphson, SolveError};

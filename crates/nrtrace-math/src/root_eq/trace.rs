use az::CastFrom;
use num_traits::Float;
use std::fmt;
use std::ops::Index;
use std::slice;

/// A point visited by the solver, along with the function and derivative values at that point.
///
/// Records are created by the solver and are read-only afterwards.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord<T = f64> {
    x: T,
    fx: T,
    dfx: T,
}

impl<T: Copy> IterationRecord<T> {
    pub(crate) const fn new(x: T, fx: T, dfx: T) -> Self {
        Self { x, fx, dfx }
    }

    /// Guess evaluated at this iteration
    pub fn x(&self) -> T {
        self.x
    }

    /// Function value at [`Self::x`]
    pub fn fx(&self) -> T {
        self.fx
    }

    /// Derivative value at [`Self::x`]
    pub fn dfx(&self) -> T {
        self.dfx
    }
}

/// Chronological, append-only sequence of [`IterationRecord`]s.
///
/// Index 0 is the initial guess. A trace is never empty. The guess computed by the final Newton
/// step (the one which satisfied the stopping test) is not part of the trace, so the reported
/// root is the `x` of the last record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationTrace<T = f64> {
    records: Vec<IterationRecord<T>>,
}

#[allow(clippy::len_without_is_empty)]
impl<T: Copy> IterationTrace<T> {
    pub(crate) fn new(initial: IterationRecord<T>) -> Self {
        Self { records: vec![initial] }
    }

    pub(crate) fn push(&mut self, record: IterationRecord<T>) {
        self.records.push(record);
    }

    /// Number of records, always at least 1.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn first(&self) -> &IterationRecord<T> {
        &self.records[0]
    }

    pub fn last(&self) -> &IterationRecord<T> {
        &self.records[self.records.len() - 1]
    }

    /// Approximate root, conventionally the `x` of the last record.
    pub fn root(&self) -> T {
        self.last().x
    }

    pub fn records(&self) -> &[IterationRecord<T>] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, IterationRecord<T>> {
        self.records.iter()
    }

    /// Absolute differences between consecutive recorded guesses.
    pub fn gaps(&self) -> impl '_ + Iterator<Item = T>
    where
        T: Float,
    {
        self.records.windows(2).map(|w| (w[1].x - w[0].x).abs())
    }

    /// Describe-style statistics over the `x`, `f(x)` and `f'(x)` columns.
    pub fn summary(&self) -> TraceSummary<T>
    where
        T: Float + CastFrom<usize>,
    {
        TraceSummary {
            count: self.len(),
            x: ColumnSummary::from_values(self.iter().map(|r| r.x)),
            fx: ColumnSummary::from_values(self.iter().map(|r| r.fx)),
            dfx: ColumnSummary::from_values(self.iter().map(|r| r.dfx)),
        }
    }
}

impl<T> Index<usize> for IterationTrace<T> {
    type Output = IterationRecord<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<T> IntoIterator for IterationTrace<T> {
    type Item = IterationRecord<T>;
    type IntoIter = std::vec::IntoIter<IterationRecord<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a IterationTrace<T> {
    type Item = &'a IterationRecord<T>;
    type IntoIter = slice::Iter<'a, IterationRecord<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T: fmt::Display> fmt::Display for IterationTrace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {:>14} {:>14} {:>14}", "iter", "x", "f(x)", "f'(x)")?;
        for (i, record) in self.records.iter().enumerate() {
            write!(
                f,
                "\n{:>4} {:>14.6} {:>14.6} {:>14.6}",
                i, record.x, record.fx, record.dfx
            )?;
        }
        Ok(())
    }
}

/// Statistics of a single trace column.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSummary<T = f64> {
    pub mean: T,
    /// Sample standard deviation (n - 1 denominator), NaN for a single value
    pub std: T,
    pub min: T,
    pub max: T,
}

impl<T: Float + CastFrom<usize>> ColumnSummary<T> {
    fn from_values(values: impl Clone + Iterator<Item = T>) -> Self {
        let count = values.clone().count();
        let mean = values.clone().fold(T::zero(), |acc, v| acc + v) / T::cast_from(count);
        let std = if count > 1 {
            let sq = values.clone().fold(T::zero(), |acc, v| acc + (v - mean).powi(2));
            (sq / T::cast_from(count - 1)).sqrt()
        } else {
            T::nan()
        };
        Self {
            mean,
            std,
            min: values.clone().fold(T::infinity(), T::min),
            max: values.fold(T::neg_infinity(), T::max),
        }
    }
}

/// Summary statistics of a whole [`IterationTrace`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSummary<T = f64> {
    pub count: usize,
    pub x: ColumnSummary<T>,
    pub fx: ColumnSummary<T>,
    pub dfx: ColumnSummary<T>,
}

impl<T: fmt::Display> fmt::Display for TraceSummary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<5} {:>14} {:>14} {:>14}", "", "x", "f(x)", "f'(x)")?;
        write!(
            f,
            "\n{:<5} {:>14} {:>14} {:>14}",
            "count", self.count, self.count, self.count
        )?;
        for (name, [x, fx, dfx]) in [
            ("mean", [&self.x.mean, &self.fx.mean, &self.dfx.mean]),
            ("std", [&self.x.std, &self.fx.std, &self.dfx.std]),
            ("min", [&self.x.min, &self.fx.min, &self.dfx.min]),
            ("max", [&self.x.max, &self.fx.max, &self.dfx.max]),
        ] {
            write!(f, "\n{:<5} {:>14.6} {:>14.6} {:>14.6}", name, x, fx, dfx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root_eq::find_root;
    use approx::assert_relative_eq;

    fn demo_trace() -> IterationTrace {
        find_root(
            |x: f64| x * x * x - 7.0 * x * x + 8.0 * x - 3.0,
            |x: f64| 3.0 * x * x - 14.0 * x + 8.0,
            5.0,
            1e-5,
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let trace = demo_trace();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.first().x(), 5.0);
        assert_eq!(trace.first().fx(), -13.0);
        assert_eq!(trace.first().dfx(), 13.0);
        assert_eq!(trace[1].x(), 6.0);
        assert_eq!(trace.last(), &trace.records()[4]);
        assert_eq!(trace.root(), trace.last().x());
        assert_eq!(trace.iter().count(), trace.len());
        assert_eq!((&trace).into_iter().count(), trace.len());
        assert_eq!(trace.clone().into_iter().last(), Some(*trace.last()));
    }

    #[test]
    fn test_gaps() {
        let trace = demo_trace();
        let gaps = trace.gaps().collect::<Vec<_>>();
        assert_eq!(gaps.len(), trace.len() - 1);
        assert_eq!(gaps[0], 1.0);
        assert_eq!(gaps[1], 0.28125);
        assert!(gaps.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_summary() {
        let summary = demo_trace().summary();
        assert_eq!(summary.count, 5);

        assert_relative_eq!(summary.x.mean, 5.618146312982966, epsilon = 1e-12);
        assert_relative_eq!(summary.x.std, 0.36987972290316173, epsilon = 1e-12);
        assert_eq!(summary.x.min, 5.0);
        assert_eq!(summary.x.max, 6.0);

        assert_relative_eq!(summary.fx.mean, -0.6282807084238528, epsilon = 1e-9);
        assert_relative_eq!(summary.fx.std, 7.8858308867846425, epsilon = 1e-9);
        assert_eq!(summary.fx.min, -13.0);
        assert_eq!(summary.fx.max, 9.0);

        assert_relative_eq!(summary.dfx.mean, 24.365002023086568, epsilon = 1e-9);
        assert_relative_eq!(summary.dfx.std, 6.935172772732864, epsilon = 1e-9);
        assert_eq!(summary.dfx.min, 13.0);
        assert_eq!(summary.dfx.max, 32.0);
    }

    #[test]
    fn test_summary_single_record() {
        let trace = IterationTrace::new(IterationRecord::new(1.0, 0.0, 2.0));
        let summary = trace.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.x.mean, 1.0);
        assert!(summary.x.std.is_nan());
        assert_eq!(summary.dfx.min, 2.0);
        assert_eq!(summary.dfx.max, 2.0);
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_serialize_round_trip() {
        let trace = demo_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let restored: IterationTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, trace);

        let summary = trace.summary();
        let json = serde_json::to_string(&summary).unwrap();
        let restored: TraceSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, summary);
    }

    #[test]
    fn test_table() {
        insta::assert_snapshot!("demo_polynomial_table", demo_trace().to_string());
    }
}

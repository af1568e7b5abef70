use nrtrace_math::find_root;
use std::process::ExitCode;

mod logger;

const INITIAL_GUESS: f64 = 5.0;
const TOLERANCE: f64 = 1e-5;

// f(x) = x³ - 7x² + 8x - 3
fn f(x: f64) -> f64 {
    x * x * x - 7.0 * x * x + 8.0 * x - 3.0
}

fn df(x: f64) -> f64 {
    3.0 * x * x - 14.0 * x + 8.0
}

fn main() -> ExitCode {
    if let Err(err) = logger::init() {
        eprintln!("Cannot install logger: {err}");
    }

    log::info!("Solving x^3 - 7x^2 + 8x - 3 = 0 from x0 = {INITIAL_GUESS}, tolerance = {TOLERANCE}");
    let trace = match find_root(f, df, INITIAL_GUESS, TOLERANCE) {
        Ok(trace) => trace,
        Err(err) => {
            log::error!("Newton-Raphson failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{trace}");
    println!();
    println!("Approximate root: {}", trace.root());
    println!("Iterations: {}", trace.len());
    println!();
    println!("{}", trace.summary());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_reference_root() {
        let trace = find_root(f, df, INITIAL_GUESS, TOLERANCE).unwrap();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.root(), 5.685779596779872);
    }
}

use thiserror::Error;

use super::config::SolverConfig;
use super::trace::SolveResult;
use crate::expr::ParseError;

/// Error returned from the solver boundary.
///
/// Every failure is a typed value, never a panic, so that a caller can
/// display a specific, actionable message per case. Note that running out of
/// iterations is *not* an error: it is reported as
/// [`Root::NotConverged`](super::trace::Root) inside a [`SolveResult`]
/// together with the full partial iteration trace.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The formula text did not match the expression grammar.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Input outside the mathematically valid domain of a built-in problem,
    /// e.g. the square root of a negative number.
    #[error("cannot compute the square root of a negative number ({0})")]
    Domain(f64),
    /// A denominator vanished: zero derivative, zero secant denominator, or
    /// zero step during a Jacobian update.
    #[error("division by zero at x = {x}")]
    DivisionByZero {
        /// The iterate at which the denominator vanished.
        x: f64,
    },
    /// The Newton-Raphson method was requested without a derivative
    /// expression.
    #[error("the Newton-Raphson method requires a derivative expression")]
    MissingDerivative,
    /// The secant method was requested with only one initial guess.
    #[error("the secant method requires two initial guesses")]
    MissingSecondGuess,
}

/// Interface of a solver strategy.
///
/// A strategy owns its problem inputs (compiled expressions and initial
/// guesses) and runs the whole iterative process against a convergence
/// policy, producing a [`SolveResult`] with the per-step trace and timing. A
/// future multi-variable strategy would implement this same contract rather
/// than special-casing the scalar path.
pub trait Solver {
    /// Name of the strategy.
    const NAME: &'static str;

    /// Runs the iteration until convergence, failure, or the iteration cap.
    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolveError>;
}

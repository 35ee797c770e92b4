use std::ops::Deref;
use std::time::Duration;

/// One record per solver loop pass.
///
/// Steps are created by the running strategy, appended to the [`Trace`] and
/// never mutated afterwards. Iteration indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationStep {
    /// A step driven by a slope estimate at a single point: Newton-Raphson
    /// (analytic derivative) or Broyden (running Jacobian approximation).
    Tangent {
        /// 1-based iteration index.
        iter: usize,
        /// Current iterate.
        x: f64,
        /// Function value at `x`.
        fx: f64,
        /// Derivative or Jacobian approximation used for this step.
        slope: f64,
        /// Computed next iterate.
        x_next: f64,
    },
    /// A step driven by two moving iterates (the secant method).
    Secant {
        /// 1-based iteration index.
        iter: usize,
        /// Older iterate.
        x0: f64,
        /// Newer iterate.
        x1: f64,
        /// Function value at `x0`.
        fx0: f64,
        /// Function value at `x1`.
        fx1: f64,
        /// Computed next iterate.
        x_next: f64,
    },
}

impl IterationStep {
    /// The 1-based iteration index of this step.
    pub fn iter(&self) -> usize {
        match self {
            IterationStep::Tangent { iter, .. } | IterationStep::Secant { iter, .. } => *iter,
        }
    }

    /// The next iterate computed by this step.
    pub fn x_next(&self) -> f64 {
        match self {
            IterationStep::Tangent { x_next, .. } | IterationStep::Secant { x_next, .. } => *x_next,
        }
    }
}

/// Append-only record of all per-step diagnostics produced during one solve.
///
/// A trace is owned by exactly one solve call; it is never shared across
/// concurrent solves. Its length always equals the number of completed loop
/// passes, including the terminal converging or cap-exhausting pass.
#[derive(Debug, Clone, Default)]
pub struct Trace(Vec<IterationStep>);

impl Trace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, step: IterationStep) {
        self.0.push(step);
    }

    /// The recorded steps, in iteration order.
    pub fn steps(&self) -> &[IterationStep] {
        &self.0
    }
}

impl Deref for Trace {
    type Target = [IterationStep];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The outcome of the iteration, distinguishing an approximate root from the
/// did-not-converge case so that callers can render a specific message
/// without inspecting the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    /// The step size fell below the tolerance; the value is the last
    /// computed iterate.
    Converged(f64),
    /// The iteration cap was exhausted without satisfying the tolerance.
    NotConverged,
}

/// The packaged result of one solve call: outcome, full iteration trace and
/// elapsed wall-clock time. Immutable once returned.
#[derive(Debug, Clone)]
pub struct SolveResult {
    root: Root,
    trace: Trace,
    elapsed: Duration,
}

impl SolveResult {
    pub(crate) fn converged_at(x: f64, trace: Trace, elapsed: Duration) -> Self {
        Self {
            root: Root::Converged(x),
            trace,
            elapsed,
        }
    }

    pub(crate) fn exhausted(trace: Trace, elapsed: Duration) -> Self {
        Self {
            root: Root::NotConverged,
            trace,
            elapsed,
        }
    }

    /// The outcome of the iteration.
    pub fn root(&self) -> Root {
        self.root
    }

    /// The approximate root, or `None` when the solve did not converge.
    pub fn converged(&self) -> Option<f64> {
        match self.root {
            Root::Converged(x) => Some(x),
            Root::NotConverged => None,
        }
    }

    /// Whether the solve converged.
    pub fn is_converged(&self) -> bool {
        matches!(self.root, Root::Converged(_))
    }

    /// Number of completed loop passes, including the terminal one. Always
    /// equal to `trace().len()`.
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    /// The per-step iteration trace. For a non-converged solve this is the
    /// full partial trace, useful for diagnosing why convergence failed.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Wall-clock time spent in the iteration loop.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed solve time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }
}

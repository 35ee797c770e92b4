use getset::{CopyGetters, Setters};

/// Identifies one of the implemented solver strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Newton-Raphson iteration using an analytic derivative.
    NewtonRaphson,
    /// Secant iteration over two moving iterates.
    Secant,
    /// Quasi-Newton iteration with a scalar Broyden update.
    Broyden,
}

/// Convergence policy shared by all strategies, plus the method selector.
///
/// The configuration is immutable for the duration of one solve call.
///
/// The convergence test is strictly absolute: a step is converged when
/// `|x_next - x| < tolerance`. The residual `|f(x)|` is never consulted,
/// which is a known limitation for functions with a very flat slope near the
/// root (see the crate documentation).
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SolverConfig {
    /// Strategy to run. Default: [`Method::NewtonRaphson`].
    method: Method,
    /// Maximum allowed step size to declare success. Default: `1e-7`.
    tolerance: f64,
    /// Iteration cap before giving up. Default: `1000`.
    max_iterations: usize,
}

impl SolverConfig {
    /// Initializes the configuration for the given method with default
    /// tolerance and iteration cap.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            tolerance: 1e-7,
            max_iterations: 1000,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(Method::NewtonRaphson)
    }
}

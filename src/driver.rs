//! High-level API for solving equations supplied as text.
//!
//! [`SolveRequest`] is the explicit, immutable request that crosses the
//! boundary from a presentation layer: the method selector, the formula
//! text, an optional derivative, one or two initial guesses and optional
//! convergence overrides. [`SolveRequest::solve`] compiles the expressions,
//! validates the request and dispatches to the chosen strategy, returning
//! the immutable [`SolveResult`]. There is no shared mutable state: each
//! call owns its configuration and its iteration trace, so independent
//! requests can be solved concurrently.
//!
//! ```rust
//! use rootsolve::{Method, SolveRequest};
//!
//! let result = SolveRequest::new(Method::NewtonRaphson, "cos(x) - x")
//!     .with_derivative("-sin(x) - 1")
//!     .with_initial(1.0)
//!     .solve()?;
//!
//! let root = result.converged().expect("converges");
//! assert!((root - 0.7390851332151607).abs() < 1e-6);
//! # Ok::<(), rootsolve::SolveError>(())
//! ```

use log::debug;

use crate::algo::{Broyden, BroydenOptions, JacobianSeed, Newton, Secant};
use crate::core::{Method, SolveError, SolveResult, Solver, SolverConfig};
use crate::expr::{Ast, Expression};

/// An immutable request to locate a root of a function given as text.
///
/// The initial guess defaults to `0.0` and the convergence policy to the
/// [`SolverConfig`] defaults; everything else is supplied through the
/// builder methods.
#[derive(Debug, Clone)]
pub struct SolveRequest<'a> {
    function: &'a str,
    derivative: Option<&'a str>,
    x0: f64,
    x1: Option<f64>,
    config: SolverConfig,
}

impl<'a> SolveRequest<'a> {
    /// Creates a request for the given method and formula text.
    pub fn new(method: Method, function: &'a str) -> Self {
        Self {
            function,
            derivative: None,
            x0: 0.0,
            x1: None,
            config: SolverConfig::new(method),
        }
    }

    /// Sets the derivative formula. Required for Newton-Raphson; for Broyden
    /// it seeds the Jacobian approximation analytically at the initial guess
    /// instead of the default finite difference.
    pub fn with_derivative(mut self, derivative: &'a str) -> Self {
        self.derivative = Some(derivative);
        self
    }

    /// Sets the initial guess.
    pub fn with_initial(mut self, x0: f64) -> Self {
        self.x0 = x0;
        self
    }

    /// Sets the two initial guesses required by the secant method.
    pub fn with_initials(mut self, x0: f64, x1: f64) -> Self {
        self.x0 = x0;
        self.x1 = Some(x1);
        self
    }

    /// Overrides the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.set_tolerance(tolerance);
        self
    }

    /// Overrides the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.set_max_iterations(max_iterations);
        self
    }

    /// Compiles the expressions and runs the requested strategy.
    ///
    /// Compilation failures are reported before any iteration begins.
    pub fn solve(&self) -> Result<SolveResult, SolveError> {
        let f = Expression::compile(self.function)?;
        debug!("solving `{}` with {:?}", f, self.config.method());

        match self.config.method() {
            Method::NewtonRaphson => {
                let derivative = self.derivative.ok_or(SolveError::MissingDerivative)?;
                let df = Expression::compile(derivative)?;
                Newton::new(&f, &df, self.x0).solve(&self.config)
            }
            Method::Secant => {
                let x1 = self.x1.ok_or(SolveError::MissingSecondGuess)?;
                Secant::new(&f, self.x0, x1).solve(&self.config)
            }
            Method::Broyden => {
                let mut options = BroydenOptions::default();
                if let Some(derivative) = self.derivative {
                    let df = Expression::compile(derivative)?;
                    options.set_jacobian_seed(JacobianSeed::Analytic(df.eval(self.x0)));
                }
                Broyden::with_options(&f, self.x0, options).solve(&self.config)
            }
        }
    }
}

fn square_residual(n: f64) -> Expression {
    let ast = Ast::Sub(
        Box::new(Ast::Pow(Box::new(Ast::Var), Box::new(Ast::Num(2.0)))),
        Box::new(Ast::Num(n)),
    );
    Expression::from_ast(ast, format!("x^2 - {}", n))
}

fn square_slope() -> Expression {
    let ast = Ast::Mul(Box::new(Ast::Num(2.0)), Box::new(Ast::Var));
    Expression::from_ast(ast, "2*x".to_string())
}

/// Approximates `√n` with Newton-Raphson on `f(x) = x² - n`.
///
/// This is not a distinct solver: it runs the ordinary strategy on the
/// built-in expression, seeded with `x0 = n` and the analytic derivative
/// `2x`. Fails with [`SolveError::Domain`] when `n` is negative, since the
/// square root of a negative number is undefined over the reals.
pub fn sqrt_newton(n: f64) -> Result<SolveResult, SolveError> {
    if n < 0.0 {
        return Err(SolveError::Domain(n));
    }

    let f = square_residual(n);
    let df = square_slope();
    Newton::new(&f, &df, n).solve(&SolverConfig::new(Method::NewtonRaphson))
}

/// Approximates `√n` with Broyden's method on `f(x) = x² - n`.
///
/// The Jacobian approximation is seeded analytically as `2n`, the slope of
/// the residual at the initial guess `x0 = n`. Fails with
/// [`SolveError::Domain`] when `n` is negative.
pub fn sqrt_broyden(n: f64) -> Result<SolveResult, SolveError> {
    if n < 0.0 {
        return Err(SolveError::Domain(n));
    }

    let f = square_residual(n);

    let mut options = BroydenOptions::default();
    options.set_jacobian_seed(JacobianSeed::Analytic(2.0 * n));

    Broyden::with_options(&f, n, options).solve(&SolverConfig::new(Method::Broyden))
}

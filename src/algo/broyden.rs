//! Broyden's method, specialized to one dimension.
//!
//! A quasi-Newton technique: instead of recomputing the derivative at every
//! step, a running scalar Jacobian approximation is corrected with the
//! secant (Broyden) update `J += (Δf - J·Δx) / Δx` after each accepted step.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Broyden%27s_method)

use std::time::Instant;

use getset::{CopyGetters, Setters};
use log::{debug, trace};

use crate::core::{IterationStep, SolveError, SolveResult, Solver, SolverConfig, Trace};
use crate::derivatives::forward_diff;
use crate::expr::Expression;

/// How the initial Jacobian approximation is obtained.
#[derive(Debug, Clone, Copy)]
pub enum JacobianSeed {
    /// One-step forward difference at the initial guess (see
    /// [`forward_diff`]).
    FiniteDifference,
    /// A supplied derivative estimate, e.g. an analytically known slope at
    /// the initial guess.
    Analytic(f64),
}

/// Options for the [`Broyden`] solver.
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BroydenOptions {
    /// Seed for the Jacobian approximation. Default: finite difference.
    jacobian_seed: JacobianSeed,
}

impl Default for BroydenOptions {
    fn default() -> Self {
        Self {
            jacobian_seed: JacobianSeed::FiniteDifference,
        }
    }
}

/// Broyden solver. See [module](self) documentation for more details.
pub struct Broyden<'a> {
    f: &'a Expression,
    x0: f64,
    options: BroydenOptions,
}

impl<'a> Broyden<'a> {
    /// Initializes the solver with default options.
    pub fn new(f: &'a Expression, x0: f64) -> Self {
        Self::with_options(f, x0, BroydenOptions::default())
    }

    /// Initializes the solver with given options.
    pub fn with_options(f: &'a Expression, x0: f64, options: BroydenOptions) -> Self {
        Self { f, x0, options }
    }
}

impl Solver for Broyden<'_> {
    const NAME: &'static str = "Broyden";

    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolveError> {
        let started = Instant::now();
        let mut recorder = Trace::new();

        let mut x = self.x0;
        let mut fx = self.f.eval(x);

        let mut j = match self.options.jacobian_seed() {
            JacobianSeed::FiniteDifference => forward_diff(self.f, x, fx),
            JacobianSeed::Analytic(slope) => slope,
        };

        for iter in 1..=config.max_iterations() {
            if j == 0.0 {
                return Err(SolveError::DivisionByZero { x });
            }

            let x_next = x - fx / j;
            trace!("iter {}: x = {}, f(x) = {}, J = {}", iter, x, fx, j);

            recorder.record(IterationStep::Tangent {
                iter,
                x,
                fx,
                slope: j,
                x_next,
            });

            if (x_next - x).abs() < config.tolerance() {
                debug!("converged to {} after {} iterations", x_next, iter);
                return Ok(SolveResult::converged_at(x_next, recorder, started.elapsed()));
            }

            let fx_next = self.f.eval(x_next);
            let dx = x_next - x;
            let dfx = fx_next - fx;

            if dx == 0.0 {
                return Err(SolveError::DivisionByZero { x: x_next });
            }

            j += (dfx - j * dx) / dx;

            x = x_next;
            fx = fx_next;
        }

        debug!("iteration cap {} reached", config.max_iterations());
        Ok(SolveResult::exhausted(recorder, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::Root;
    use crate::testing::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn sqrt_two_with_finite_difference_seed() {
        let f = Expression::compile("x^2 - 2").unwrap();

        let result = Broyden::new(&f, 1.0)
            .solve(&SolverConfig::default())
            .unwrap();

        let root = result.converged().unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-6);
        assert!(result.iterations() < 10);
        assert_eq!(result.iterations(), result.trace().len());
    }

    #[test]
    fn sqrt_two_with_analytic_seed() {
        let f = Expression::compile("x^2 - 2").unwrap();

        let mut options = BroydenOptions::default();
        options.set_jacobian_seed(JacobianSeed::Analytic(2.0));

        let result = Broyden::with_options(&f, 1.0, options)
            .solve(&SolverConfig::default())
            .unwrap();

        let root = result.converged().unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn zero_jacobian_seed_fails() {
        // flat function: the finite-difference seed is exactly zero
        let f = Expression::compile("3").unwrap();

        let err = Broyden::new(&f, 1.0)
            .solve(&SolverConfig::default())
            .unwrap_err();

        assert!(matches!(err, SolveError::DivisionByZero { x } if x == 1.0));
    }

    #[test]
    fn zero_step_during_update_fails() {
        // x0 is already a root; with a zero tolerance the convergence test
        // cannot pass, so the Jacobian update sees dx == 0
        let f = Expression::compile("x^2 - 1").unwrap();

        let mut config = SolverConfig::default();
        config.set_tolerance(0.0);

        let err = Broyden::new(&f, 1.0).solve(&config).unwrap_err();

        assert!(matches!(err, SolveError::DivisionByZero { x } if x == 1.0));
    }

    #[test]
    fn no_real_root_exhausts_the_cap() {
        let f = Expression::compile("x^2 + 1").unwrap();

        let config = SolverConfig::default();
        let result = Broyden::new(&f, 0.5).solve(&config).unwrap();

        assert_eq!(result.root(), Root::NotConverged);
        assert_eq!(result.trace().len(), config.max_iterations());
    }

    #[test]
    fn canned_equations() {
        for eq in equations() {
            let f = eq.f();

            let result = Broyden::new(&f, eq.newton_initial())
                .solve(&SolverConfig::default())
                .unwrap();

            let root = result.converged().unwrap();
            assert!(eq.is_root(root, 1e-6), "{} at {}", eq.function(), root);
        }
    }
}

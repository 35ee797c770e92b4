//! Secant method.
//!
//! Replaces the derivative of Newton's method with the slope of the secant
//! line through the two most recent iterates. Convergence is superlinear
//! (order ~1.618) and no derivative is required.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Secant_method)

use std::time::Instant;

use log::{debug, trace};

use crate::core::{IterationStep, SolveError, SolveResult, Solver, SolverConfig, Trace};
use crate::expr::Expression;

/// Secant solver. See [module](self) documentation for more details.
pub struct Secant<'a> {
    f: &'a Expression,
    x0: f64,
    x1: f64,
}

impl<'a> Secant<'a> {
    /// Initializes the solver with the function and two initial guesses.
    pub fn new(f: &'a Expression, x0: f64, x1: f64) -> Self {
        Self { f, x0, x1 }
    }
}

impl Solver for Secant<'_> {
    const NAME: &'static str = "Secant";

    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolveError> {
        let started = Instant::now();
        let mut recorder = Trace::new();

        let mut x0 = self.x0;
        let mut x1 = self.x1;

        for iter in 1..=config.max_iterations() {
            let fx0 = self.f.eval(x0);
            let fx1 = self.f.eval(x1);

            if fx1 == fx0 {
                return Err(SolveError::DivisionByZero { x: x1 });
            }

            let x_next = x1 - fx1 * (x1 - x0) / (fx1 - fx0);
            trace!(
                "iter {}: x0 = {}, x1 = {}, f(x0) = {}, f(x1) = {}",
                iter,
                x0,
                x1,
                fx0,
                fx1
            );

            recorder.record(IterationStep::Secant {
                iter,
                x0,
                x1,
                fx0,
                fx1,
                x_next,
            });

            if (x_next - x1).abs() < config.tolerance() {
                debug!("converged to {} after {} iterations", x_next, iter);
                return Ok(SolveResult::converged_at(x_next, recorder, started.elapsed()));
            }

            x0 = x1;
            x1 = x_next;
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
    fn sqrt_two() {
        let f = Expression::compile("x^2 - 2").unwrap();

        let result = Secant::new(&f, 0.0, 2.0)
            .solve(&SolverConfig::default())
            .unwrap();

        let root = result.converged().unwrap();
        assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-6);
        assert!(result.iterations() < 10);
        assert_eq!(result.iterations(), result.trace().len());
    }

    #[test]
    fn equal_function_values_fail() {
        let f = Expression::compile("x^2 - 2").unwrap();

        let err = Secant::new(&f, 1.0, 1.0)
            .solve(&SolverConfig::default())
            .unwrap_err();

        assert!(matches!(err, SolveError::DivisionByZero { x } if x == 1.0));
    }

    #[test]
    fn cap_exhaustion_keeps_the_partial_trace() {
        let f = Expression::compile("cos(x) - x").unwrap();

        let mut config = SolverConfig::default();
        config.set_tolerance(1e-15).set_max_iterations(5);

        let result = Secant::new(&f, 0.0, 1.0).solve(&config).unwrap();

        assert_eq!(result.root(), Root::NotConverged);
        assert_eq!(result.trace().len(), 5);
    }

    #[test]
    fn steps_shift_the_window() {
        let f = Expression::compile("x^2 - 2").unwrap();

        let result = Secant::new(&f, 0.0, 2.0)
            .solve(&SolverConfig::default())
            .unwrap();

        // each step's x1 becomes the next step's x0
        for pair in result.trace().windows(2) {
            match (pair[0], pair[1]) {
                (
                    IterationStep::Secant { x1, x_next, .. },
                    IterationStep::Secant {
                        x0: next_x0,
                        x1: next_x1,
                        ..
                    },
                ) => {
                    assert_eq!(next_x0, x1);
                    assert_eq!(next_x1, x_next);
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn canned_equations() {
        for eq in equations() {
            let f = eq.f();
            let (x0, x1) = eq.secant_initials();

            let result = Secant::new(&f, x0, x1)
                .solve(&SolverConfig::default())
                .unwrap();

            let root = result.converged().unwrap();
            assert!(eq.is_root(root, 1e-6), "{} at {}", eq.function(), root);
        }
    }
}

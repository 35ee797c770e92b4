//! Newton-Raphson method.
//!
//! The classical tangent method: each step moves to the zero of the tangent
//! line at the current iterate, using an analytically supplied derivative.
//! Convergence is quadratic near a simple root, but the method may diverge
//! when the initial guess is far from the root.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Newton%27s_method)

use std::time::Instant;

use log::{debug, trace};

use crate::core::{IterationStep, SolveError, SolveResult, Solver, SolverConfig, Trace};
use crate::expr::Expression;

/// Newton-Raphson solver. See [module](self) documentation for more details.
pub struct Newton<'a> {
    f: &'a Expression,
    df: &'a Expression,
    x0: f64,
}

impl<'a> Newton<'a> {
    /// Initializes the solver with the function, its derivative and an
    /// initial guess.
    pub fn new(f: &'a Expression, df: &'a Expression, x0: f64) -> Self {
        Self { f, df, x0 }
    }
}

impl Solver for Newton<'_> {
    const NAME: &'static str = "Newton-Raphson";

    fn solve(&self, config: &SolverConfig) -> Result<SolveResult, SolveError> {
        let started = Instant::now();
        let mut recorder = Trace::new();

        let mut x = self.x0;

        for iter in 1..=config.max_iterations() {
            let fx = self.f.eval(x);
            let dfx = self.df.eval(x);

            if dfx == 0.0 {
                return Err(SolveError::DivisionByZero { x });
            }

            let x_next = x - fx / dfx;
            trace!("iter {}: x = {}, f(x) = {}, f'(x) = {}", iter, x, fx, dfx);

            recorder.record(IterationStep::Tangent {
                iter,
                x,
                fx,
                slope: dfx,
                x_next,
            });

            if (x_next - x).abs() < config.tolerance() {
                debug!("converged to {} after {} iterations", x_next, iter);
                return Ok(SolveResult::converged_at(x_next, recorder, started.elapsed()));
            }

            x = x_next;
        }

        debug!("iteration cap {} reached", config.max_iterations());
        Ok(SolveResult::exhausted(recorder, started.elapsed()))
    }
}

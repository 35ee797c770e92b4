#![warn(missing_docs)]

//! # Rootsolve
//!
//! Classical iterative methods for locating roots of a user-supplied
//! single-variable nonlinear equation, written entirely in Rust.
//!
//! The function (and, for Newton-Raphson, its derivative) is given as text
//! in a small, audited expression grammar and compiled into a pure
//! [`Expression`]. The chosen strategy then iterates until the step size
//! falls below the configured tolerance, recording one [diagnostic
//! step](IterationStep) per loop pass and measuring the elapsed wall-clock
//! time. The outcome, the full iteration trace and the timing are packaged
//! into an immutable [`SolveResult`].
//!
//! ## Algorithms
//!
//! * [Newton-Raphson](algo::newton) -- quadratic convergence near a simple
//!   root; requires an analytic derivative.
//! * [Secant](algo::secant) -- superlinear convergence from two initial
//!   guesses; no derivative needed.
//! * [Broyden](algo::broyden) -- quasi-Newton iteration with a scalar
//!   secant update of a running Jacobian approximation.
//!
//! ## Expressions
//!
//! The grammar accepts the four basic operators, `^` (right associative),
//! unary minus, parentheses, the functions `sin`, `cos`, `exp`, `sqrt`,
//! `log` (natural, `ln` is an alias), `abs`, the constants `pi` and `e`,
//! and the free variable `x`. Anything else fails to compile with a
//! [`ParseError`] before any iteration begins. Evaluation never panics:
//! numerically undefined operations such as `1/0` follow IEEE 754 and
//! produce infinity or NaN, which the solvers treat as ordinary (bad)
//! intermediate values.
//!
//! ## Solving
//!
//! The high-level entry point is a [`SolveRequest`]:
//!
//! ```rust
//! use rootsolve::{Method, SolveRequest};
//!
//! let result = SolveRequest::new(Method::Secant, "x^2 - 2")
//!     .with_initials(0.0, 2.0)
//!     .solve()?;
//!
//! let root = result.converged().expect("converges");
//! assert!((root - 1.4142135).abs() < 1e-6);
//! assert_eq!(result.iterations(), result.trace().len());
//! # Ok::<(), rootsolve::SolveError>(())
//! ```
//!
//! Strategies can also be driven directly against compiled expressions:
//!
//! ```rust
//! use rootsolve::algo::Newton;
//! use rootsolve::{Expression, Solver, SolverConfig};
//!
//! let f = Expression::compile("cos(x) - x")?;
//! let df = Expression::compile("-sin(x) - 1")?;
//!
//! let result = Newton::new(&f, &df, 1.0).solve(&SolverConfig::default())?;
//!
//! for step in result.trace().iter() {
//!     println!("iter {}: next = {}", step.iter(), step.x_next());
//! }
//! # Ok::<(), rootsolve::SolveError>(())
//! ```
//!
//! Exhausting the iteration cap is not an error: the result carries
//! [`Root::NotConverged`] together with the full partial trace, so a caller
//! can render a message and inspect why convergence failed. Malformed
//! formulas, inputs outside the valid domain and vanishing denominators are
//! reported as typed [`SolveError`] values, never as panics.
//!
//! ## Known limitation
//!
//! The convergence test is strictly the absolute step size
//! `|x_next - x| < tolerance`; the residual `|f(x)|` is never checked. For
//! functions with a very flat slope near the root the iteration can
//! therefore stop at a point that is still far from an actual zero. This
//! behavior is deliberate: switching to a residual test would change
//! observable results for existing inputs. Likewise, the iteration cap is
//! the only bound on a solve: there is no cooperative cancellation or
//! timeout inside the loop.

pub mod algo;
mod core;
pub mod derivatives;
pub mod driver;
pub mod expr;

pub use core::*;
pub use driver::{sqrt_broyden, sqrt_newton, SolveRequest};
pub use expr::{Expression, ParseError};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

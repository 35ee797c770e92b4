//! Canned nonlinear equations useful for smoke testing and benchmarking the
//! strategies.
//!
//! Each equation carries the standard initial guesses used throughout the
//! tests; using the same guesses is essential for fair comparison of
//! methods.

#![allow(unused)]

use crate::expr::Expression;

/// A single-variable equation with its derivative and standard initial
/// guesses.
#[derive(Debug, Clone, Copy)]
pub struct TestEquation {
    function: &'static str,
    derivative: &'static str,
    newton_initial: f64,
    secant_initials: (f64, f64),
}

impl TestEquation {
    /// Formula text of `f(x)`.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Formula text of `f'(x)`.
    pub fn derivative(&self) -> &'static str {
        self.derivative
    }

    /// Standard initial guess for the single-point methods.
    pub fn newton_initial(&self) -> f64 {
        self.newton_initial
    }

    /// Standard pair of initial guesses for the secant method.
    pub fn secant_initials(&self) -> (f64, f64) {
        self.secant_initials
    }

    /// Compiles `f(x)`.
    pub fn f(&self) -> Expression {
        Expression::compile(self.function).expect("test equation must compile")
    }

    /// Compiles `f'(x)`.
    pub fn df(&self) -> Expression {
        Expression::compile(self.derivative).expect("test equation must compile")
    }

    /// Tests whether `x` is a root of the equation, given the tolerance
    /// `eps` on the residual.
    pub fn is_root(&self, x: f64, eps: f64) -> bool {
        self.f().eval(x).abs() <= eps
    }
}

/// The standard suite of test equations.
pub fn equations() -> Vec<TestEquation> {
    vec![
        TestEquation {
            function: "3*x + sin(x) - exp(x)",
            derivative: "3 + cos(x) - exp(x)",
            newton_initial: 1.0,
            secant_initials: (0.0, 1.0),
        },
        TestEquation {
            function: "x^3 - 2*x^2 - 4*x + 8",
            derivative: "3*x^2 - 4*x - 4",
            newton_initial: 1.0,
            secant_initials: (0.0, 2.0),
        },
        TestEquation {
            function: "cos(x) - x",
            derivative: "-sin(x) - 1",
            newton_initial: 1.0,
            secant_initials: (0.0, 1.0),
        },
        TestEquation {
            function: "exp(x) - 3*x^2",
            derivative: "exp(x) - 6*x",
            newton_initial: 1.0,
            secant_initials: (0.0, 1.0),
        },
        TestEquation {
            function: "x^2 - 2",
            derivative: "2*x",
            newton_initial: 1.0,
            secant_initials: (0.0, 2.0),
        },
    ]
}

//! Compiled expressions over a single real variable.
//!
//! User-supplied formula text is compiled into an immutable [`Expression`]
//! which can then be evaluated at any point. Evaluation is pure and total:
//! it depends on nothing but the input `x`, has no observable side effects,
//! and never panics. Numerically undefined operations (division by zero, the
//! logarithm of a negative number, ...) follow IEEE 754 and produce infinity
//! or NaN, leaving the failure classification to the calling solver, which
//! can tell a bad intermediate value apart from a malformed formula.
//!
//! The accepted grammar is restricted on purpose. Evaluating user text as
//! host-language code would permit arbitrary code execution; a fixed,
//! audited grammar gives the same numeric behavior for well-formed
//! scientific formulas without that risk.
//!
//! # Examples
//!
//! ```rust
//! use rootsolve::Expression;
//!
//! let f = Expression::compile("x^2 - 2")?;
//! assert_eq!(f.eval(2.0), 2.0);
//!
//! // Non-finite values are returned, not raised.
//! let g = Expression::compile("1 / x")?;
//! assert!(g.eval(0.0).is_infinite());
//! # Ok::<(), rootsolve::ParseError>(())
//! ```

use std::fmt;

mod error;
mod parser;

pub use error::ParseError;

/// A named constant of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant {
    /// Archimedes' constant.
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// An allow-listed transcendental function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Func {
    Sin,
    Cos,
    Exp,
    Sqrt,
    Log,
    Abs,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "exp" => Some(Func::Exp),
            "sqrt" => Some(Func::Sqrt),
            // natural logarithm, with ln accepted as an alias
            "log" | "ln" => Some(Func::Log),
            "abs" => Some(Func::Abs),
            _ => None,
        }
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Func::Sin => v.sin(),
            Func::Cos => v.cos(),
            Func::Exp => v.exp(),
            Func::Sqrt => v.sqrt(),
            Func::Log => v.ln(),
            Func::Abs => v.abs(),
        }
    }
}

/// Abstract syntax tree of a compiled formula.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Ast {
    Num(f64),
    Var,
    Const(Constant),
    Add(Box<Ast>, Box<Ast>),
    Sub(Box<Ast>, Box<Ast>),
    Mul(Box<Ast>, Box<Ast>),
    Div(Box<Ast>, Box<Ast>),
    Pow(Box<Ast>, Box<Ast>),
    Neg(Box<Ast>),
    Call(Func, Box<Ast>),
}

impl Ast {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Ast::Num(v) => *v,
            Ast::Var => x,
            Ast::Const(c) => c.value(),
            Ast::Add(l, r) => l.eval(x) + r.eval(x),
            Ast::Sub(l, r) => l.eval(x) - r.eval(x),
            Ast::Mul(l, r) => l.eval(x) * r.eval(x),
            // IEEE semantics: 1/0 is infinity, 0/0 is NaN
            Ast::Div(l, r) => l.eval(x) / r.eval(x),
            Ast::Pow(b, e) => b.eval(x).powf(e.eval(x)),
            Ast::Neg(e) => -e.eval(x),
            Ast::Call(f, a) => f.apply(a.eval(x)),
        }
    }
}

/// An immutable, compiled representation of `f(x)` over the reals.
///
/// Compile once with [`Expression::compile`], evaluate as often as needed
/// with [`Expression::eval`]. Evaluation is deterministic, so compiling the
/// same text twice yields expressions that agree at every point. Expressions
/// are read-only after compilation and can be shared freely between
/// concurrent solves.
#[derive(Debug, Clone)]
pub struct Expression {
    ast: Ast,
    source: String,
}

impl Expression {
    /// Compiles formula text into an evaluable expression.
    ///
    /// Fails with [`ParseError`] when the text does not match the grammar:
    /// the four basic operators, `^`, parentheses, the functions `sin`,
    /// `cos`, `exp`, `sqrt`, `log` (natural, `ln` is accepted), `abs`, the
    /// constants `pi` and `e`, and the free variable `x`.
    pub fn compile(text: &str) -> Result<Self, ParseError> {
        let ast = parser::parse(text)?;
        Ok(Self {
            ast,
            source: text.trim().to_string(),
        })
    }

    /// Evaluates the expression at `x`.
    ///
    /// Never panics; mathematically undefined operations yield IEEE
    /// infinity or NaN.
    pub fn eval(&self, x: f64) -> f64 {
        self.ast.eval(x)
    }

    /// The formula text this expression was compiled from, trimmed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn from_ast(ast: Ast, source: String) -> Self {
        Self { ast, source }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn arithmetic() {
        let f = Expression::compile("2 + 3 * 4 - 6 / 2").unwrap();
        assert_eq!(f.eval(0.0), 11.0);

        let g = Expression::compile("(2 + 3) * 4").unwrap();
        assert_eq!(g.eval(0.0), 20.0);
    }

    #[test]
    fn variable() {
        let f = Expression::compile("x^2 - 2").unwrap();
        assert_eq!(f.eval(1.0), -1.0);
        assert_eq!(f.eval(2.0), 2.0);
        assert_eq!(f.eval(-3.0), 7.0);
    }

    #[test]
    fn transcendentals() {
        let f = Expression::compile("sin(x)").unwrap();
        assert_abs_diff_eq!(f.eval(std::f64::consts::FRAC_PI_2), 1.0, epsilon = 1e-15);

        let g = Expression::compile("exp(x) - 1").unwrap();
        assert_abs_diff_eq!(g.eval(0.0), 0.0);

        let h = Expression::compile("log(e)").unwrap();
        assert_abs_diff_eq!(h.eval(0.0), 1.0, epsilon = 1e-15);

        let k = Expression::compile("abs(x)").unwrap();
        assert_eq!(k.eval(-2.5), 2.5);
    }

    #[test]
    fn constants() {
        let f = Expression::compile("cos(pi)").unwrap();
        assert_abs_diff_eq!(f.eval(0.0), -1.0, epsilon = 1e-15);
    }

    #[test]
    fn powers() {
        let f = Expression::compile("2^3^2").unwrap();
        assert_eq!(f.eval(0.0), 512.0);

        let g = Expression::compile("x^-2").unwrap();
        assert_abs_diff_eq!(g.eval(2.0), 0.25);
    }

    #[test]
    fn unary_minus() {
        let f = Expression::compile("-x^2").unwrap();
        assert_eq!(f.eval(3.0), -9.0);

        let g = Expression::compile("--x").unwrap();
        assert_eq!(g.eval(4.0), 4.0);
    }

    #[test]
    fn non_finite_results_instead_of_panics() {
        let f = Expression::compile("1 / x").unwrap();
        assert!(f.eval(0.0).is_infinite());

        let g = Expression::compile("sqrt(x)").unwrap();
        assert!(g.eval(-1.0).is_nan());

        let h = Expression::compile("log(x)").unwrap();
        assert!(h.eval(0.0).is_infinite());
        assert!(h.eval(-1.0).is_nan());
    }

    #[test]
    fn compilation_is_deterministic() {
        let a = Expression::compile("3*x + sin(x) - exp(x)").unwrap();
        let b = Expression::compile("3*x + sin(x) - exp(x)").unwrap();

        for i in -50..=50 {
            let x = f64::from(i) * 0.25;
            assert_eq!(a.eval(x).to_bits(), b.eval(x).to_bits());
        }
    }

    #[test]
    fn display_echoes_source() {
        let f = Expression::compile("  cos(x) - x ").unwrap();
        assert_eq!(f.to_string(), "cos(x) - x");
    }
}

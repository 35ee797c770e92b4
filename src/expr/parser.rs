//! Parser for the restricted formula grammar.
//!
//! The grammar is deliberately small: the four basic operators, `^` with
//! right associativity, unary minus, parentheses, an allow-list of functions
//! and constants, and the single free variable `x`. Anything else is a
//! [`ParseError`], reported before any solver iteration runs.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{map, opt, recognize},
    error::ErrorKind,
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::error::ParseError;
use super::{Ast, Constant, Func};

type PResult<'a, O> = IResult<&'a str, O, RawError<'a>>;

/// Internal nom error. Keeps the offending input slice so that an unknown
/// identifier survives to the public [`ParseError`] instead of collapsing
/// into a generic syntax error.
#[derive(Debug)]
pub(super) enum RawError<'a> {
    Nom(&'a str),
    UnknownIdentifier(&'a str),
}

impl<'a> nom::error::ParseError<&'a str> for RawError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        RawError::Nom(input)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl RawError<'_> {
    fn into_parse_error(self) -> ParseError {
        match self {
            RawError::Nom(input) => ParseError::Syntax(snippet(input)),
            RawError::UnknownIdentifier(name) => ParseError::UnknownIdentifier(name.to_string()),
        }
    }
}

fn snippet(input: &str) -> String {
    input.trim().chars().take(24).collect()
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    preceded(multispace0, inner)
}

// Numeric literals: 123, 8.2, 8., .5
fn number(input: &str) -> PResult<'_, Ast> {
    let (rest, literal) = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(input)?;

    let value = literal
        .parse::<f64>()
        .map_err(|_| nom::Err::Failure(RawError::Nom(input)))?;

    Ok((rest, Ast::Num(value)))
}

// Identifiers start with a letter or underscore, then letters, digits and
// underscores.
fn identifier(input: &str) -> PResult<'_, &str> {
    let end = input
        .char_indices()
        .take_while(|&(i, c)| {
            if i == 0 {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            }
        })
        .map(|(i, c)| i + c.len_utf8())
        .last();

    match end {
        Some(len) => Ok((&input[len..], &input[..len])),
        None => Err(nom::Err::Error(RawError::Nom(input))),
    }
}

// The variable, a constant, or an allow-listed function call. Any other
// identifier is rejected with a failure so that `alt` does not mask it.
fn ident_atom(input: &str) -> PResult<'_, Ast> {
    let (rest, name) = identifier(input)?;

    if let Some(func) = Func::from_name(name) {
        let (rest, arg) = delimited(ws(char('(')), expr, ws(char(')')))(rest)?;
        return Ok((rest, Ast::Call(func, Box::new(arg))));
    }

    match name {
        "x" => Ok((rest, Ast::Var)),
        "pi" => Ok((rest, Ast::Const(Constant::Pi))),
        "e" => Ok((rest, Ast::Const(Constant::E))),
        _ => Err(nom::Err::Failure(RawError::UnknownIdentifier(name))),
    }
}

fn parens(input: &str) -> PResult<'_, Ast> {
    delimited(char('('), expr, ws(char(')')))(input)
}

fn atom(input: &str) -> PResult<'_, Ast> {
    preceded(multispace0, alt((number, ident_atom, parens)))(input)
}

// Power is right associative: 2^3^2 = 2^(3^2). The exponent may carry its
// own sign: x^-2.
fn power(input: &str) -> PResult<'_, Ast> {
    let (input, base) = atom(input)?;

    match ws(char('^'))(input) {
        Ok((input, _)) => {
            let (input, exp) = exponent(input)?;
            Ok((input, Ast::Pow(Box::new(base), Box::new(exp))))
        }
        Err(_) => Ok((input, base)),
    }
}

fn exponent(input: &str) -> PResult<'_, Ast> {
    alt((
        map(preceded(ws(char('-')), exponent), |e| Ast::Neg(Box::new(e))),
        preceded(ws(char('+')), exponent),
        power,
    ))(input)
}

fn unary(input: &str) -> PResult<'_, Ast> {
    alt((
        map(preceded(ws(char('-')), unary), |e| Ast::Neg(Box::new(e))),
        power,
    ))(input)
}

fn term(input: &str) -> PResult<'_, Ast> {
    let (input, init) = unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), unary),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Ast::Mul(Box::new(acc), Box::new(rhs)),
            _ => Ast::Div(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

fn expr(input: &str) -> PResult<'_, Ast> {
    let (input, init) = term(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), term),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Ast::Add(Box::new(acc), Box::new(rhs)),
            _ => Ast::Sub(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

pub(super) fn parse(text: &str) -> Result<Ast, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    match expr(text) {
        Ok((rest, ast)) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                Ok(ast)
            } else {
                Err(ParseError::TrailingInput(snippet(rest)))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_parse_error()),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax(snippet(text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(parse("42").unwrap(), Ast::Num(42.0));
        assert_eq!(parse("8.25").unwrap(), Ast::Num(8.25));
        assert_eq!(parse(".5").unwrap(), Ast::Num(0.5));
        assert_eq!(parse("8.").unwrap(), Ast::Num(8.0));
    }

    #[test]
    fn variable_and_constants() {
        assert_eq!(parse("x").unwrap(), Ast::Var);
        assert_eq!(parse("pi").unwrap(), Ast::Const(Constant::Pi));
        assert_eq!(parse("e").unwrap(), Ast::Const(Constant::E));
    }

    #[test]
    fn precedence() {
        // 2 + 3 * 4, not (2 + 3) * 4
        assert_eq!(
            parse("2 + 3 * 4").unwrap(),
            Ast::Add(
                Box::new(Ast::Num(2.0)),
                Box::new(Ast::Mul(Box::new(Ast::Num(3.0)), Box::new(Ast::Num(4.0)))),
            )
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            parse("2^3^2").unwrap(),
            Ast::Pow(
                Box::new(Ast::Num(2.0)),
                Box::new(Ast::Pow(Box::new(Ast::Num(3.0)), Box::new(Ast::Num(2.0)))),
            )
        );
    }

    #[test]
    fn signed_exponent() {
        assert_eq!(
            parse("x^-2").unwrap(),
            Ast::Pow(
                Box::new(Ast::Var),
                Box::new(Ast::Neg(Box::new(Ast::Num(2.0)))),
            )
        );
    }

    #[test]
    fn function_calls() {
        assert_eq!(
            parse("sin(x)").unwrap(),
            Ast::Call(Func::Sin, Box::new(Ast::Var))
        );
        // ln is an alias for the natural log
        assert_eq!(
            parse("ln(x)").unwrap(),
            Ast::Call(Func::Log, Box::new(Ast::Var))
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(parse("  3*x + 1 ").unwrap(), parse("3 * x+1").unwrap());
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn unknown_identifiers() {
        assert_eq!(
            parse("3*y + 1"),
            Err(ParseError::UnknownIdentifier("y".to_string()))
        );
        assert_eq!(
            parse("foo(x)"),
            Err(ParseError::UnknownIdentifier("foo".to_string()))
        );
        // unknown identifiers inside arguments are reported too
        assert_eq!(
            parse("sin(theta)"),
            Err(ParseError::UnknownIdentifier("theta".to_string()))
        );
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(matches!(parse("(x + 1"), Err(ParseError::Syntax(_))));
        assert!(matches!(parse("x + 1)"), Err(ParseError::TrailingInput(_))));
    }

    #[test]
    fn dangling_operator() {
        assert!(parse("2 *").is_err());
        assert!(parse("+").is_err());
    }
}

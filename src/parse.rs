// SPDX: CC0-1.0

// equations are either `y=` followed by signed polynomial terms, or
// `x=...;y=...;a<t<b` with one trig function per coordinate

use crate::{
    eval::{Exclusion, FunctionModel, Parametric, Polynomial, TrigTerm},
    lex::{self, SubStr, Terms},
    stdlib::{self, Trig},
    Number,
};
use core::{
    fmt,
    num::{ParseFloatError, ParseIntError},
};
use std::sync::Arc;

pub const DOMAIN_START: Number = -10.0;
pub const DOMAIN_STEP: Number = 0.1;
pub const DOMAIN_EXTENT: Number = 20.0;
pub const T_STEP: Number = 0.1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExponentErr {
    /// The text after `^` is not a non-negative integer.
    Parse(ParseIntError),
    /// Something other than `^` follows `x`.
    MissingCaret,
    /// No coefficient vector could hold a term of this degree.
    TooLarge,
}

impl fmt::Display for ExponentErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::MissingCaret => write!(f, "expected '^' after 'x'"),
            Self::TooLarge => write!(f, "too large"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrTyp {
    BadForm(&'static str),
    BadCoefficient(ParseFloatError),
    BadExponent(ExponentErr),
    BadConstant(ParseFloatError),
    BadRange(&'static str),
    UnsupportedFunction,
    NumericParseFailure(ParseFloatError),
}

impl fmt::Display for ParseErrTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadForm(why) => write!(f, "malformed equation: {why}"),
            Self::BadCoefficient(err) => write!(f, "invalid coefficient: {err}"),
            Self::BadExponent(err) => write!(f, "invalid exponent: {err}"),
            Self::BadConstant(err) => write!(f, "invalid constant: {err}"),
            Self::BadRange(why) => write!(f, "invalid range: {why}"),
            Self::UnsupportedFunction => write!(f, "unsupported function"),
            Self::NumericParseFailure(err) => write!(f, "invalid number: {err}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseErr {
    pub typ: ParseErrTyp,
    pub loc: SubStr,
}

impl ParseErr {
    const fn new(typ: ParseErrTyp, loc: SubStr) -> Self {
        Self { typ, loc }
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.typ)
    }
}

impl std::error::Error for ParseErr {}

/// Parse an equation. Whitespace is insignificant; text containing both `;`
/// and `<` is treated as parametric.
pub fn parse(text: &str) -> Result<FunctionModel, ParseErr> {
    let src = SubStr::all(lex::clean(text));
    let model = if src.contains(';') && src.contains('<') {
        parse_parametric(&src).map(FunctionModel::Parametric)
    } else {
        parse_polynomial(&src).map(FunctionModel::Polynomial)
    }?;
    log::debug!("parsed {} equation '{}'", model.kind(), src);
    Ok(model)
}

fn parse_polynomial(src: &SubStr) -> Result<Polynomial, ParseErr> {
    let body = src
        .strip_prefix(stdlib::Y)
        .and_then(|rest| rest.strip_prefix("="))
        .ok_or_else(|| ParseErr::new(ParseErrTyp::BadForm("expected 'y=' at the start"), src.clone()))?;
    if body.is_empty() {
        return Err(ParseErr::new(
            ParseErrTyp::BadForm("nothing after 'y='"),
            src.clone(),
        ));
    }

    // exponent -> accumulated coefficient, in order of first appearance
    let mut by_exp: Vec<(usize, Number)> = Vec::new();
    for term in Terms::new(&body) {
        let (exp, coefficient) = parse_term(&term)?;
        match by_exp.iter_mut().find(|(it, _)| *it == exp) {
            Some((_, acc)) => *acc += coefficient,
            None => by_exp.push((exp, coefficient)),
        }
    }

    // parse_term keeps every exponent below usize::MAX
    let len = by_exp.iter().map(|(exp, _)| exp + 1).max().unwrap_or(1);
    let mut coefficients: Vec<Number> = Vec::new();
    coefficients
        .try_reserve_exact(len)
        .map_err(|_| ParseErr::new(ParseErrTyp::BadExponent(ExponentErr::TooLarge), body.clone()))?;
    coefficients.resize(len, 0.0);
    for (exp, coefficient) in by_exp {
        coefficients[exp] = coefficient;
    }

    Ok(Polynomial {
        coefficients,
        start: DOMAIN_START,
        step: DOMAIN_STEP,
        extent: DOMAIN_EXTENT,
        exclusion: Exclusion::Never,
    })
}

/// `[coef]x[^exp]` or a bare constant.
fn parse_term(term: &SubStr) -> Result<(usize, Number), ParseErr> {
    let Some((coef, power)) = term.split_once('x') else {
        let constant: Number = term
            .get()
            .parse()
            .map_err(|err| ParseErr::new(ParseErrTyp::BadConstant(err), term.clone()))?;
        return Ok((0, constant));
    };

    let coefficient: Number = match coef.get() {
        "" | "+" => 1.0,
        "-" => -1.0,
        text => text
            .parse()
            .map_err(|err| ParseErr::new(ParseErrTyp::BadCoefficient(err), coef.clone()))?,
    };

    let exp: usize = if power.is_empty() {
        1
    } else if let Some(digits) = power.strip_prefix("^") {
        digits.get().parse().map_err(|err| {
            ParseErr::new(ParseErrTyp::BadExponent(ExponentErr::Parse(err)), digits.clone())
        })?
    } else {
        return Err(ParseErr::new(
            ParseErrTyp::BadExponent(ExponentErr::MissingCaret),
            power,
        ));
    };
    if exp == usize::MAX {
        return Err(ParseErr::new(
            ParseErrTyp::BadExponent(ExponentErr::TooLarge),
            power,
        ));
    }

    Ok((exp, coefficient))
}

fn parse_parametric(src: &SubStr) -> Result<Parametric, ParseErr> {
    let parts = src.split(';');
    let [x_part, y_part, range] = parts.as_slice() else {
        return Err(ParseErr::new(
            ParseErrTyp::BadForm("expected 'x=...;y=...;a<t<b'"),
            src.clone(),
        ));
    };

    let x_expr = x_part
        .strip_prefix("x=")
        .ok_or_else(|| ParseErr::new(ParseErrTyp::BadForm("expected 'x='"), x_part.clone()))?;
    let y_expr = y_part
        .strip_prefix("y=")
        .ok_or_else(|| ParseErr::new(ParseErrTyp::BadForm("expected 'y='"), y_part.clone()))?;

    let x = parse_trig(&x_expr)?;
    let y = parse_trig(&y_expr)?;
    let (t_start, t_end) = parse_range(range)?;

    Ok(Parametric {
        x,
        y,
        t_start,
        t_end,
        t_step: T_STEP,
    })
}

/// `[outer]fun([inner]t)`
fn parse_trig(expr: &SubStr) -> Result<TrigTerm, ParseErr> {
    let unsupported = || ParseErr::new(ParseErrTyp::UnsupportedFunction, expr.clone());

    let mut found = None;
    let mut count = 0;
    for trig in Trig::exhaustive() {
        let pat = format!("{}(", trig.name());
        let matches = expr.get().matches(pat.as_str()).count();
        if matches > 0 {
            count += matches;
            if let Some(idx) = expr.find(&pat) {
                found = Some((*trig, idx, pat.len()));
            }
        }
    }
    let (fun, idx, pat_len) = match found {
        Some(it) if count == 1 => it,
        _ => return Err(unsupported()),
    };

    let (outer, call) = expr.clone().split_at(idx);
    let arg = call.sub(pat_len, call.len() - pat_len);
    let inner = arg.strip_suffix("t)").ok_or_else(|| {
        ParseErr::new(
            ParseErrTyp::BadForm("expected the argument to end in 't)'"),
            arg.clone(),
        )
    })?;

    let outer = parse_factor(&outer)?;
    let inner = if inner.get().starts_with(stdlib::T) {
        1.0
    } else {
        parse_factor(&inner)?
    };

    Ok(TrigTerm { fun, outer, inner })
}

fn parse_factor(text: &SubStr) -> Result<Number, ParseErr> {
    match text.get() {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        num => num
            .parse()
            .map_err(|err| ParseErr::new(ParseErrTyp::NumericParseFailure(err), text.clone())),
    }
}

/// `a<t<b`, returning `(a, b)`.
fn parse_range(range: &SubStr) -> Result<(Number, Number), ParseErr> {
    let pieces = range.split('<');
    let [lower, var, upper] = pieces.as_slice() else {
        return Err(ParseErr::new(
            ParseErrTyp::BadRange("expected the form 'a<t<b'"),
            range.clone(),
        ));
    };
    if var.get() != stdlib::T {
        return Err(ParseErr::new(
            ParseErrTyp::BadRange("the parameter must be 't'"),
            var.clone(),
        ));
    }

    let t_start = eval_bound(lower)?;
    let t_end = eval_bound(upper)?;
    if t_end <= t_start {
        return Err(ParseErr::new(
            ParseErrTyp::BadRange("the upper bound must exceed the lower bound"),
            range.clone(),
        ));
    }
    Ok((t_start, t_end))
}

/// One bound of a range, with `pi` substituted.
fn eval_bound(bound: &SubStr) -> Result<Number, ParseErr> {
    let expanded = lex::expand_pi(bound.get());
    if expanded == bound.get() {
        return eval_product(bound);
    }
    // positions inside the substituted text do not line up with the input,
    // so blame the whole bound
    eval_product(&SubStr::all(Arc::new(expanded))).map_err(|err| ParseErr::new(err.typ, bound.clone()))
}

/// A literal, or the product of exactly two literals.
fn eval_product(bound: &SubStr) -> Result<Number, ParseErr> {
    let literal = |text: &SubStr| -> Result<Number, ParseErr> {
        text.get()
            .parse()
            .map_err(|err| ParseErr::new(ParseErrTyp::NumericParseFailure(err), text.clone()))
    };
    match bound.split('*').as_slice() {
        [value] => literal(value),
        [lhs, rhs] => Ok(literal(lhs)? * literal(rhs)?),
        _ => Err(ParseErr::new(
            ParseErrTyp::BadRange("a bound may contain at most one '*'"),
            bound.clone(),
        )),
    }
}

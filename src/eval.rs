// SPDX: CC0-1.0

use crate::{stdlib::Trig, Number};
use core::fmt;

/// A domain value is excluded when it lies within half a step of one of
/// these.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Exclusion {
    #[default]
    Never,
    At(Vec<Number>),
}

impl Exclusion {
    pub fn excludes(&self, x: Number, step: Number) -> bool {
        match self {
            Self::Never => false,
            Self::At(points) => points.iter().any(|p| (x - p).abs() < step.abs() / 2.0),
        }
    }
}

/// `y = Σ coefficients[i] * x^i`, sampled from `start` in increments of
/// `step` up to `start + extent`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<Number>,
    pub start: Number,
    pub step: Number,
    pub extent: Number,
    pub exclusion: Exclusion,
}

impl Polynomial {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn y_value(&self, x: Number) -> Number {
        let mut sum = 0.0;
        for (i, coefficient) in self.coefficients.iter().enumerate() {
            sum += coefficient * x.powf(i as Number);
        }
        sum
    }

    pub fn with_exclusions(mut self, at: Vec<Number>) -> Self {
        self.exclusion = Exclusion::At(at);
        self
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y =")?;
        let mut any = false;
        for (exp, coefficient) in self.coefficients.iter().enumerate().rev() {
            if *coefficient == 0.0 {
                continue;
            }
            let sign = if coefficient.is_sign_negative() { "-" } else { "+" };
            if any {
                write!(f, " {sign} ")?;
            } else if sign == "-" {
                write!(f, " -")?;
            } else {
                write!(f, " ")?;
            }
            let magnitude = coefficient.abs();
            match exp {
                0 => write!(f, "{magnitude}")?,
                _ if magnitude == 1.0 => write!(f, "x")?,
                _ => write!(f, "{magnitude}x")?,
            }
            if exp > 1 {
                write!(f, "^{exp}")?;
            }
            any = true;
        }
        if !any {
            write!(f, " 0")?;
        }
        Ok(())
    }
}

/// `outer * fun(inner * t)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrigTerm {
    pub fun: Trig,
    pub outer: Number,
    pub inner: Number,
}

impl TrigTerm {
    #[inline]
    pub fn eval(&self, t: Number) -> Number {
        self.outer * self.fun.apply(self.inner * t)
    }
}

impl fmt::Display for TrigTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{outer}{name}({inner}t)",
            outer = self.outer,
            name = self.fun.name(),
            inner = self.inner
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parametric {
    pub x: TrigTerm,
    pub y: TrigTerm,
    pub t_start: Number,
    pub t_end: Number,
    pub t_step: Number,
}

impl Parametric {
    pub fn x_value(&self, t: Number) -> Number {
        self.x.eval(t)
    }

    pub fn y_value(&self, t: Number) -> Number {
        self.y.eval(t)
    }
}

impl fmt::Display for Parametric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x = {x}; y = {y}; {start} < t < {end}",
            x = self.x,
            y = self.y,
            start = self.t_start,
            end = self.t_end
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Polynomial,
    Parametric,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial => write!(f, "polynomial"),
            Self::Parametric => write!(f, "parametric"),
        }
    }
}

/// An evaluable curve, as produced by [`crate::parse::parse`].
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionModel {
    Polynomial(Polynomial),
    Parametric(Parametric),
}

impl FunctionModel {
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Polynomial(_) => Kind::Polynomial,
            Self::Parametric(_) => Kind::Parametric,
        }
    }

    /// Whether the domain value `x` must be left undrawn. Parametric curves
    /// never exclude.
    pub fn exclude(&self, x: Number) -> bool {
        match self {
            Self::Polynomial(poly) => poly.exclusion.excludes(x, poly.step),
            Self::Parametric(_) => false,
        }
    }
}

impl fmt::Display for FunctionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial(poly) => write!(f, "{poly}"),
            Self::Parametric(para) => write!(f, "{para}"),
        }
    }
}

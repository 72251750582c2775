// SPDX: CC0-1.0

use crate::Number;
use core::f64::consts; // assumes Number = f64

pub const Y: &str = "y";
pub const T: &str = "t";

pub const PI: Number = consts::PI;
pub const PI_WORD: &str = "pi";
pub const PI_SYMBOL: char = 'π';

/// The functions a parametric coordinate may be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trig {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
}

impl Trig {
    pub const fn exhaustive() -> &'static [Trig] {
        &[
            Self::Sin,
            Self::Cos,
            Self::Tan,
            Self::Sec,
            Self::Csc,
            Self::Cot,
        ]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Cot => "cot",
        }
    }

    pub const fn fun(&self) -> fn(Number) -> Number {
        match self {
            Self::Sin => sin,
            Self::Cos => cos,
            Self::Tan => tan,
            Self::Sec => sec,
            Self::Csc => csc,
            Self::Cot => cot,
        }
    }

    #[inline]
    pub fn apply(&self, x: Number) -> Number {
        (self.fun())(x)
    }
}

pub fn sin(x: Number) -> Number {
    x.sin()
}

pub fn cos(x: Number) -> Number {
    x.cos()
}

pub fn tan(x: Number) -> Number {
    x.tan()
}

// the reciprocals divide rather than special-casing zero, so singular points
// come out as infinities
pub fn sec(x: Number) -> Number {
    1.0 / x.cos()
}

pub fn csc(x: Number) -> Number {
    1.0 / x.sin()
}

pub fn cot(x: Number) -> Number {
    1.0 / x.tan()
}

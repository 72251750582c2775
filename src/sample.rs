// SPDX: CC0-1.0

use crate::{eval::FunctionModel, LogicalPoint, Number};
use core::iter::FusedIterator;

/// Walk `model` across its domain. Every call starts over from the first
/// point and yields the same sequence.
pub fn sample(model: &FunctionModel) -> Samples<'_> {
    Samples {
        model,
        n: 0,
        done: false,
    }
}

#[derive(Clone, Debug)]
pub struct Samples<'m> {
    model: &'m FunctionModel,
    n: usize,
    done: bool,
}

impl Samples<'_> {
    /// The `n`th point, or `None` once the domain is exhausted.
    fn point(&self, n: usize) -> Option<LogicalPoint> {
        let n = n as Number;
        match self.model {
            FunctionModel::Polynomial(poly) => {
                let x = poly.start + n * poly.step;
                if x > poly.start + poly.extent {
                    None
                } else if self.model.exclude(x) {
                    Some(LogicalPoint::gap(x))
                } else {
                    Some(LogicalPoint::new(x, poly.y_value(x)))
                }
            }

            // non-finite values from singular trig functions are passed
            // through as ordinary points
            FunctionModel::Parametric(para) => {
                let t = para.t_start + n * para.t_step;
                if t > para.t_end {
                    None
                } else {
                    Some(LogicalPoint::new(para.x_value(t), para.y_value(t)))
                }
            }
        }
    }
}

impl Iterator for Samples<'_> {
    type Item = LogicalPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let ret = self.point(self.n);
        match ret {
            Some(_) => self.n += 1,
            None => self.done = true,
        }
        ret
    }
}

impl FusedIterator for Samples<'_> {}

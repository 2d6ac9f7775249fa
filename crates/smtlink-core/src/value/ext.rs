//! ExtCW - extended values for optimization bounds

use std::cmp::Ordering;
use std::fmt;

use super::CW;
use crate::kind::Kind;

/// A numeric value from a domain richer than plain numbers.
///
/// Optimizing solvers report bounds such as `oo`, `(+ 5 epsilon)` or
/// `(interval 3 oo)`. All nodes of one tree share the same numeric kind.
///
/// # Examples
///
/// ```
/// use smtlink_core::{ExtCW, Kind, CW};
///
/// let unbounded = ExtCW::product(
///     ExtCW::Bounded(CW::unbounded(-2)),
///     ExtCW::PosInfinity(Kind::Unbounded),
/// );
/// assert_eq!(unbounded.simplify(), ExtCW::NegInfinity(Kind::Unbounded));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExtCW {
    /// An ordinary value.
    Bounded(CW),
    /// Positive infinity (`oo`).
    PosInfinity(Kind),
    /// Negative infinity.
    NegInfinity(Kind),
    /// A positive infinitesimal (`epsilon`).
    Epsilon(Kind),
    /// A closed interval of possible values.
    Interval(Box<ExtCW>, Box<ExtCW>),
    /// `a + b`
    Sum(Box<ExtCW>, Box<ExtCW>),
    /// `a * b`
    Product(Box<ExtCW>, Box<ExtCW>),
}

impl ExtCW {
    pub fn interval(lo: ExtCW, hi: ExtCW) -> Self {
        debug_assert_eq!(lo.kind(), hi.kind(), "interval bounds must share a kind");
        ExtCW::Interval(Box::new(lo), Box::new(hi))
    }

    pub fn sum(a: ExtCW, b: ExtCW) -> Self {
        debug_assert_eq!(a.kind(), b.kind(), "summands must share a kind");
        ExtCW::Sum(Box::new(a), Box::new(b))
    }

    pub fn product(a: ExtCW, b: ExtCW) -> Self {
        debug_assert_eq!(a.kind(), b.kind(), "factors must share a kind");
        ExtCW::Product(Box::new(a), Box::new(b))
    }

    /// The kind shared by every node of this tree.
    pub fn kind(&self) -> &Kind {
        match self {
            ExtCW::Bounded(cw) => cw.kind(),
            ExtCW::PosInfinity(k) | ExtCW::NegInfinity(k) | ExtCW::Epsilon(k) => k,
            ExtCW::Interval(a, _) | ExtCW::Sum(a, _) | ExtCW::Product(a, _) => a.kind(),
        }
    }

    /// Returns true if this is a plain value.
    pub fn is_bounded(&self) -> bool {
        matches!(self, ExtCW::Bounded(_))
    }

    pub fn as_bounded(&self) -> Option<&CW> {
        match self {
            ExtCW::Bounded(cw) => Some(cw),
            _ => None,
        }
    }

    /// Arithmetic negation. Used by callers that receive a sign as a textual
    /// prefix outside the value grammar.
    pub fn negate(self) -> Self {
        match self {
            ExtCW::PosInfinity(k) => ExtCW::NegInfinity(k),
            ExtCW::NegInfinity(k) => ExtCW::PosInfinity(k),
            ExtCW::Bounded(cw) => match cw.checked_neg() {
                Some(neg) => ExtCW::Bounded(neg),
                None => scale_by_minus_one(ExtCW::Bounded(cw)),
            },
            ExtCW::Epsilon(_) => scale_by_minus_one(self),
            ExtCW::Interval(lo, hi) => ExtCW::Interval(Box::new(hi.negate()), Box::new(lo.negate())),
            ExtCW::Sum(a, b) => ExtCW::Sum(Box::new(a.negate()), Box::new(b.negate())),
            ExtCW::Product(a, b) => ExtCW::Product(Box::new(a.negate()), b),
        }
    }

    /// Folds the tree into a canonical, smaller form.
    ///
    /// Numeric sums and products are computed, `+ 0` and `* 1` disappear,
    /// a constant times an infinity becomes a signed infinity, an infinity
    /// absorbs bounded summands and infinitesimals, and an interval with
    /// equal bounds collapses to its bound.
    pub fn simplify(self) -> Self {
        match self {
            ExtCW::Interval(lo, hi) => {
                let (lo, hi) = (lo.simplify(), hi.simplify());
                if lo == hi {
                    lo
                } else {
                    ExtCW::Interval(Box::new(lo), Box::new(hi))
                }
            }
            ExtCW::Sum(a, b) => simplify_sum(a.simplify(), b.simplify()),
            ExtCW::Product(a, b) => simplify_product(a.simplify(), b.simplify()),
            leaf => leaf,
        }
    }
}

fn scale_by_minus_one(e: ExtCW) -> ExtCW {
    match CW::numeric_constant(e.kind(), -1) {
        Some(minus_one) => ExtCW::product(ExtCW::Bounded(minus_one), e),
        None => e,
    }
}

fn is_infinite(e: &ExtCW) -> bool {
    matches!(e, ExtCW::PosInfinity(_) | ExtCW::NegInfinity(_))
}

fn simplify_sum(a: ExtCW, b: ExtCW) -> ExtCW {
    match (a, b) {
        (ExtCW::Bounded(x), ExtCW::Bounded(y)) => match x.checked_add(&y) {
            Some(z) => ExtCW::Bounded(z),
            None => ExtCW::sum(ExtCW::Bounded(x), ExtCW::Bounded(y)),
        },
        (ExtCW::Bounded(z), other) | (other, ExtCW::Bounded(z)) if z.is_zero() => other,
        (inf, ExtCW::Bounded(_) | ExtCW::Epsilon(_)) | (ExtCW::Bounded(_) | ExtCW::Epsilon(_), inf)
            if is_infinite(&inf) =>
        {
            inf
        }
        (a, b) => ExtCW::sum(a, b),
    }
}

fn simplify_product(a: ExtCW, b: ExtCW) -> ExtCW {
    match (a, b) {
        (ExtCW::Bounded(x), ExtCW::Bounded(y)) => match x.checked_mul(&y) {
            Some(z) => ExtCW::Bounded(z),
            None => ExtCW::product(ExtCW::Bounded(x), ExtCW::Bounded(y)),
        },
        (ExtCW::Bounded(one), other) | (other, ExtCW::Bounded(one)) if one.is_one() => other,
        (ExtCW::Bounded(c), inf) | (inf, ExtCW::Bounded(c)) if is_infinite(&inf) => {
            match c.signum() {
                Some(Ordering::Greater) => inf,
                Some(Ordering::Less) => inf.negate(),
                _ => ExtCW::product(ExtCW::Bounded(c), inf),
            }
        }
        (a, b) => ExtCW::product(a, b),
    }
}

impl fmt::Display for ExtCW {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtCW::Bounded(cw) => write!(f, "{cw}"),
            ExtCW::PosInfinity(_) => write!(f, "oo"),
            ExtCW::NegInfinity(_) => write!(f, "-oo"),
            ExtCW::Epsilon(_) => write!(f, "epsilon"),
            ExtCW::Interval(lo, hi) => write!(f, "[{lo} .. {hi}]"),
            ExtCW::Sum(a, b) => write!(f, "({a} + {b})"),
            ExtCW::Product(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

//! CW - a concrete word: a fully evaluated value paired with its kind

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::AlgReal;
use crate::error::{Result, SmtError};
use crate::kind::Kind;

/// The payload of a [`CW`].
///
/// Floating-point payloads compare bitwise, so `NaN == NaN` and
/// `0.0 != -0.0`; this is what makes decoded models comparable with the
/// values that were encoded.
#[derive(Debug, Clone)]
pub enum CwValue {
    Bool(bool),
    Integer(BigInt),
    AlgReal(AlgReal),
    Float(f32),
    Double(f64),
    String(String),
    Char(char),
    /// An uninterpreted-sort value. `index` is resolved when the sort
    /// enumerates its literals.
    Uninterpreted {
        index: Option<usize>,
        label: String,
    },
}

impl PartialEq for CwValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CwValue::Bool(a), CwValue::Bool(b)) => a == b,
            (CwValue::Integer(a), CwValue::Integer(b)) => a == b,
            (CwValue::AlgReal(a), CwValue::AlgReal(b)) => a == b,
            (CwValue::Float(a), CwValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CwValue::Double(a), CwValue::Double(b)) => a.to_bits() == b.to_bits(),
            (CwValue::String(a), CwValue::String(b)) => a == b,
            (CwValue::Char(a), CwValue::Char(b)) => a == b,
            (
                CwValue::Uninterpreted {
                    index: ia,
                    label: la,
                },
                CwValue::Uninterpreted {
                    index: ib,
                    label: lb,
                },
            ) => ia == ib && la == lb,
            _ => false,
        }
    }
}

impl Eq for CwValue {}

/// A concrete value together with its [`Kind`].
///
/// The payload always matches the kind; constructing a mismatched pair is a
/// programming error. Bounded integers are kept in the canonical range of
/// their kind, wrapping modulo `2^width`.
///
/// # Examples
///
/// ```
/// use smtlink_core::{CW, Kind};
///
/// let x = CW::integer(Kind::int(8), 255);
/// assert_eq!(x.as_integer().unwrap(), &(-1).into());
///
/// let b = CW::bool(true);
/// assert_eq!(b.kind(), &Kind::Bool);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CW {
    kind: Kind,
    value: CwValue,
}

impl CW {
    /// Pairs a kind with a value, normalizing bounded integers.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot inhabit the kind. Use [`CW::try_new`] when
    /// the pairing comes from untrusted input.
    pub fn new(kind: Kind, value: CwValue) -> Self {
        match Self::try_new(kind, value) {
            Ok(cw) => cw,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checked version of [`CW::new`].
    pub fn try_new(kind: Kind, value: CwValue) -> Result<Self> {
        let value = match (&kind, value) {
            (Kind::Bool, v @ CwValue::Bool(_)) => v,
            (Kind::Bounded { signed, width }, CwValue::Integer(i)) => {
                CwValue::Integer(wrap_bounded(i, *signed, *width))
            }
            (Kind::Unbounded, v @ CwValue::Integer(_)) => v,
            (Kind::Real, v @ CwValue::AlgReal(_)) => v,
            (Kind::Float, v @ CwValue::Float(_)) => v,
            (Kind::Double, v @ CwValue::Double(_)) => v,
            (Kind::String, v @ CwValue::String(_)) => v,
            (Kind::Char, v @ CwValue::Char(_)) => v,
            (
                Kind::UninterpretedSort {
                    literals: Some(literals),
                    ..
                },
                CwValue::Uninterpreted {
                    index: Some(index),
                    label,
                },
            ) if literals.get(index).is_some_and(|l| *l == label) => CwValue::Uninterpreted {
                index: Some(index),
                label,
            },
            (
                Kind::UninterpretedSort { literals: None, .. },
                v @ CwValue::Uninterpreted { index: None, .. },
            ) => v,
            (kind, value) => {
                return Err(SmtError::KindMismatch {
                    kind: kind.to_string(),
                    value: format!("{value:?}"),
                })
            }
        };
        Ok(CW { kind, value })
    }

    pub fn bool(b: bool) -> Self {
        CW {
            kind: Kind::Bool,
            value: CwValue::Bool(b),
        }
    }

    /// An integer of a bounded or unbounded kind.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not integral.
    pub fn integer(kind: Kind, value: impl Into<BigInt>) -> Self {
        CW::new(kind, CwValue::Integer(value.into()))
    }

    pub fn unbounded(value: impl Into<BigInt>) -> Self {
        CW::integer(Kind::Unbounded, value)
    }

    pub fn real(value: AlgReal) -> Self {
        CW {
            kind: Kind::Real,
            value: CwValue::AlgReal(value),
        }
    }

    pub fn float(value: f32) -> Self {
        CW {
            kind: Kind::Float,
            value: CwValue::Float(value),
        }
    }

    pub fn double(value: f64) -> Self {
        CW {
            kind: Kind::Double,
            value: CwValue::Double(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        CW {
            kind: Kind::String,
            value: CwValue::String(value.into()),
        }
    }

    pub fn char(value: char) -> Self {
        CW {
            kind: Kind::Char,
            value: CwValue::Char(value),
        }
    }

    /// A value of an uninterpreted sort, resolving its index when the sort
    /// enumerates literals.
    pub fn uninterpreted(kind: Kind, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let index = kind.literal_index(&label);
        CW::try_new(kind, CwValue::Uninterpreted { index, label })
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn value(&self) -> &CwValue {
        &self.value
    }

    pub fn into_parts(self) -> (Kind, CwValue) {
        (self.kind, self.value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            CwValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match &self.value {
            CwValue::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<&AlgReal> {
        match &self.value {
            CwValue::AlgReal(r) => Some(r),
            _ => None,
        }
    }

    /// The constant `n` of a numeric kind, used when folding extended values.
    pub fn numeric_constant(kind: &Kind, n: i64) -> Option<Self> {
        let value = match kind {
            Kind::Bounded { .. } | Kind::Unbounded => CwValue::Integer(BigInt::from(n)),
            Kind::Real => CwValue::AlgReal(AlgReal::from_integer(n)),
            Kind::Float => CwValue::Float(n as f32),
            Kind::Double => CwValue::Double(n as f64),
            _ => return None,
        };
        CW::try_new(kind.clone(), value).ok()
    }

    /// Sign of a numeric value; `None` for non-numeric kinds, NaN, and
    /// polynomial roots.
    pub fn signum(&self) -> Option<Ordering> {
        match &self.value {
            CwValue::Integer(i) => Some(i.cmp(&BigInt::zero())),
            CwValue::AlgReal(r) => r.signum().map(|s| s.cmp(&0)),
            CwValue::Float(f) => f.partial_cmp(&0.0),
            CwValue::Double(d) => d.partial_cmp(&0.0),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.signum() == Some(Ordering::Equal)
    }

    pub fn is_one(&self) -> bool {
        match &self.value {
            CwValue::Integer(i) => i.is_one(),
            CwValue::AlgReal(AlgReal::Exact(r)) => r.is_one(),
            CwValue::Float(f) => *f == 1.0,
            CwValue::Double(d) => *d == 1.0,
            _ => false,
        }
    }

    /// Sum of two values of the same kind, when it can be computed exactly.
    pub fn checked_add(&self, other: &CW) -> Option<CW> {
        if self.kind != other.kind {
            return None;
        }
        let value = match (&self.value, &other.value) {
            (CwValue::Integer(a), CwValue::Integer(b)) => CwValue::Integer(a + b),
            (CwValue::AlgReal(a), CwValue::AlgReal(b)) => CwValue::AlgReal(a.checked_add(b)?),
            (CwValue::Float(a), CwValue::Float(b)) => CwValue::Float(a + b),
            (CwValue::Double(a), CwValue::Double(b)) => CwValue::Double(a + b),
            _ => return None,
        };
        CW::try_new(self.kind.clone(), value).ok()
    }

    /// Product of two values of the same kind, when it can be computed exactly.
    pub fn checked_mul(&self, other: &CW) -> Option<CW> {
        if self.kind != other.kind {
            return None;
        }
        let value = match (&self.value, &other.value) {
            (CwValue::Integer(a), CwValue::Integer(b)) => CwValue::Integer(a * b),
            (CwValue::AlgReal(a), CwValue::AlgReal(b)) => CwValue::AlgReal(a.checked_mul(b)?),
            (CwValue::Float(a), CwValue::Float(b)) => CwValue::Float(a * b),
            (CwValue::Double(a), CwValue::Double(b)) => CwValue::Double(a * b),
            _ => return None,
        };
        CW::try_new(self.kind.clone(), value).ok()
    }

    pub fn checked_neg(&self) -> Option<CW> {
        let value = match &self.value {
            CwValue::Integer(i) => CwValue::Integer(-i),
            CwValue::AlgReal(r) => CwValue::AlgReal(r.checked_neg()?),
            CwValue::Float(f) => CwValue::Float(-f),
            CwValue::Double(d) => CwValue::Double(-d),
            _ => return None,
        };
        CW::try_new(self.kind.clone(), value).ok()
    }
}

fn wrap_bounded(value: BigInt, signed: bool, width: u32) -> BigInt {
    let modulus = BigInt::one() << width;
    let mut v = value % &modulus;
    if v.is_negative() {
        v += &modulus;
    }
    if signed && v >= (BigInt::one() << (width - 1)) {
        v -= &modulus;
    }
    v
}

impl fmt::Display for CW {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            CwValue::Bool(b) => write!(f, "{b}"),
            CwValue::Integer(i) => write!(f, "{i}"),
            CwValue::AlgReal(r) => write!(f, "{r}"),
            CwValue::Float(x) => write!(f, "{x:?}"),
            CwValue::Double(x) => write!(f, "{x:?}"),
            CwValue::String(s) => write!(f, "{s:?}"),
            CwValue::Char(c) => write!(f, "{c:?}"),
            CwValue::Uninterpreted { label, .. } => write!(f, "{label}"),
        }
    }
}

//! Decoding of literal atoms at a known kind.

use num_bigint::BigInt;
use smtlink_core::{AlgReal, CwValue, Kind, Literal, ParseFailure, SExpr, CW};

fn mismatch(kind: &Kind, expr: &SExpr) -> ParseFailure {
    ParseFailure::KindMismatch {
        kind: kind.to_string(),
        item: expr.to_string(),
    }
}

/// An integer carried by a real literal, as some solvers print for values
/// they cast internally.
fn integral(real: &AlgReal, expr: &SExpr) -> Result<BigInt, ParseFailure> {
    match real.as_rational() {
        Some(r) if r.is_integer() => Ok(r.to_integer()),
        _ => Err(ParseFailure::NotIntegral {
            item: expr.to_string(),
        }),
    }
}

/// Decodes `expr` as a value of `kind`.
///
/// Floating-point literals are only accepted at their own precision. Real
/// literals are accepted for integer kinds when they are whole numbers.
///
/// ```
/// use smtlink_core::{parse_sexpr, Kind, CW};
/// use smtlink_interpret::decode_value;
///
/// let five = parse_sexpr("5.0").unwrap();
/// assert_eq!(decode_value(&Kind::Unbounded, &five).unwrap(), CW::unbounded(5));
/// assert!(decode_value(&Kind::Bool, &five).is_err());
/// ```
pub fn decode_value(kind: &Kind, expr: &SExpr) -> Result<CW, ParseFailure> {
    let SExpr::Atom(literal) = expr else {
        return Err(mismatch(kind, expr));
    };
    let value = match (kind, literal) {
        (Kind::Bool, Literal::Symbol(s)) => match s.as_str() {
            "true" => CwValue::Bool(true),
            "false" => CwValue::Bool(false),
            _ => return Err(mismatch(kind, expr)),
        },
        (Kind::Bounded { width, .. }, Literal::Int { value, width: w }) => {
            if w.is_some_and(|w| w != *width) {
                return Err(mismatch(kind, expr));
            }
            CwValue::Integer(value.clone())
        }
        (Kind::Unbounded, Literal::Int { value, width: None }) => CwValue::Integer(value.clone()),
        (Kind::Bounded { .. } | Kind::Unbounded, Literal::Real(r)) => {
            CwValue::Integer(integral(r, expr)?)
        }
        (Kind::Real, Literal::Int { value, width: None }) => {
            CwValue::AlgReal(AlgReal::from_integer(value.clone()))
        }
        (Kind::Real, Literal::Real(r)) => CwValue::AlgReal(r.clone()),
        (Kind::Float, Literal::Float(f)) => CwValue::Float(*f),
        (Kind::Double, Literal::Double(d)) => CwValue::Double(*d),
        (Kind::String, Literal::Str(s)) => CwValue::String(s.clone()),
        (Kind::Char, Literal::Str(s)) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => CwValue::Char(c),
                _ => return Err(mismatch(kind, expr)),
            }
        }
        (Kind::UninterpretedSort { name, literals }, Literal::Symbol(label)) => {
            let index = match literals {
                Some(_) => Some(kind.literal_index(label).ok_or_else(|| {
                    ParseFailure::UnknownSortLiteral {
                        sort: name.clone(),
                        literal: label.clone(),
                    }
                })?),
                None => None,
            };
            CwValue::Uninterpreted {
                index,
                label: label.clone(),
            }
        }
        _ => return Err(mismatch(kind, expr)),
    };
    CW::try_new(kind.clone(), value).map_err(|_| mismatch(kind, expr))
}

//! AlgReal - algebraic real numbers as solvers report them

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// An algebraic real.
///
/// Solvers print reals either as exact rationals, as decimal approximations
/// marked with a trailing `?`, or as the `index`-th real root of a
/// univariate polynomial (`root-obj`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlgReal {
    /// An exact rational value.
    Exact(BigRational),
    /// A decimal approximation of an irrational value.
    Approximate(BigRational),
    /// The `index`-th real root (1-based, ascending) of the polynomial
    /// `coefficients[0] + coefficients[1]*x + ...`.
    Root {
        coefficients: Vec<BigInt>,
        index: u32,
    },
}

impl AlgReal {
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        AlgReal::Exact(BigRational::from_integer(value.into()))
    }

    /// Exact `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn from_ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        AlgReal::Exact(BigRational::new(numer.into(), denom.into()))
    }

    /// Parses an SMT-LIB numeral or decimal, optionally signed and
    /// optionally suffixed with `?` to mark an approximation.
    ///
    /// ```
    /// use smtlink_core::AlgReal;
    ///
    /// assert_eq!(AlgReal::parse_decimal("1.25"), Some(AlgReal::from_ratio(5, 4)));
    /// assert!(!AlgReal::parse_decimal("1.4142?").unwrap().is_exact());
    /// assert_eq!(AlgReal::parse_decimal("1.x"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let (body, approximate) = match text.strip_suffix('?') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits: BigInt = format!("{whole}{frac}").parse().ok()?;
        let scale = num_traits::pow(BigInt::from(10), frac.len());
        let mut value = BigRational::new(digits, scale);
        if negative {
            value = -value;
        }
        Some(if approximate {
            AlgReal::Approximate(value)
        } else {
            AlgReal::Exact(value)
        })
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, AlgReal::Exact(_))
    }

    /// The exact rational value, if this real has one.
    pub fn as_rational(&self) -> Option<&BigRational> {
        match self {
            AlgReal::Exact(r) => Some(r),
            _ => None,
        }
    }

    /// The rational value, exact or approximated.
    pub fn approximation(&self) -> Option<&BigRational> {
        match self {
            AlgReal::Exact(r) | AlgReal::Approximate(r) => Some(r),
            AlgReal::Root { .. } => None,
        }
    }

    /// Negation. Polynomial roots are not closed under index-preserving
    /// negation, so they yield `None`.
    pub fn checked_neg(&self) -> Option<Self> {
        match self {
            AlgReal::Exact(r) => Some(AlgReal::Exact(-r.clone())),
            AlgReal::Approximate(r) => Some(AlgReal::Approximate(-r.clone())),
            AlgReal::Root { .. } => None,
        }
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (AlgReal::Exact(a), AlgReal::Exact(b)) => Some(AlgReal::Exact(a + b)),
            _ => None,
        }
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (AlgReal::Exact(a), AlgReal::Exact(b)) => Some(AlgReal::Exact(a * b)),
            _ => None,
        }
    }

    /// Sign of the value, when known without root isolation.
    pub fn signum(&self) -> Option<i8> {
        self.approximation().map(|r| {
            if r.is_zero() {
                0
            } else if r.is_positive() {
                1
            } else {
                -1
            }
        })
    }

    /// SMT-LIB text for this value.
    ///
    /// Approximations are emitted as the rational they approximate.
    pub fn to_smtlib(&self) -> String {
        match self {
            AlgReal::Exact(r) | AlgReal::Approximate(r) => rational_to_smtlib(r),
            AlgReal::Root {
                coefficients,
                index,
            } => format!("(root-obj {} {index})", polynomial_to_smtlib(coefficients)),
        }
    }
}

fn rational_to_smtlib(r: &BigRational) -> String {
    let magnitude = if r.denom().is_one() {
        format!("{}.0", r.numer().abs())
    } else {
        format!("(/ {}.0 {}.0)", r.numer().abs(), r.denom())
    };
    if r.is_negative() {
        format!("(- {magnitude})")
    } else {
        magnitude
    }
}

fn integer_to_smtlib(i: &BigInt) -> String {
    if i.is_negative() {
        format!("(- {})", i.abs())
    } else {
        i.to_string()
    }
}

/// Renders `c0 + c1*x + ...` highest degree first, the way z3 prints
/// `root-obj` polynomials.
fn polynomial_to_smtlib(coefficients: &[BigInt]) -> String {
    let terms: Vec<String> = coefficients
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, c)| !c.is_zero())
        .map(|(degree, c)| {
            let power = match degree {
                0 => return integer_to_smtlib(c),
                1 => "x".to_string(),
                k => format!("(^ x {k})"),
            };
            if c.is_one() {
                power
            } else {
                format!("(* {} {power})", integer_to_smtlib(c))
            }
        })
        .collect();

    match terms.len() {
        0 => "0".to_string(),
        1 => terms.into_iter().next().unwrap_or_default(),
        _ => format!("(+ {})", terms.join(" ")),
    }
}

fn polynomial_display(coefficients: &[BigInt]) -> String {
    let mut out = String::new();
    for (degree, c) in coefficients.iter().enumerate().rev() {
        if c.is_zero() {
            continue;
        }
        let negative = c.is_negative();
        if out.is_empty() {
            if negative {
                out.push('-');
            }
        } else {
            out.push_str(if negative { " - " } else { " + " });
        }
        let magnitude = c.abs();
        let show_coeff = degree == 0 || !magnitude.is_one();
        if show_coeff {
            out.push_str(&magnitude.to_string());
        }
        match degree {
            0 => {}
            1 => out.push('x'),
            k => out.push_str(&format!("x^{k}")),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

impl fmt::Display for AlgReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgReal::Exact(r) => write!(f, "{r}"),
            AlgReal::Approximate(r) => write!(f, "~{r}"),
            AlgReal::Root {
                coefficients,
                index,
            } => write!(f, "root({index}, {})", polynomial_display(coefficients)),
        }
    }
}

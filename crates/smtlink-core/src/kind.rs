//! Kind - the semantic type tag of a symbolic value

use std::fmt;

use num_bigint::BigInt;
use num_traits::One;

/// The semantic type of a value in the symbolic system.
///
/// Fixed-width integers of every width and signedness share the single
/// [`Kind::Bounded`] variant.
///
/// # Examples
///
/// ```
/// use smtlink_core::Kind;
///
/// let word8 = Kind::word(8);
/// assert_eq!(word8.smt_sort(), "(_ BitVec 8)");
/// assert_eq!(word8.to_string(), "Word8");
///
/// let color = Kind::enumerated("Color", ["Red", "Green", "Blue"]);
/// assert_eq!(color.literal_index("Green"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Booleans.
    Bool,
    /// Fixed-width two's complement integers.
    Bounded { signed: bool, width: u32 },
    /// Mathematical integers.
    Unbounded,
    /// Algebraic reals.
    Real,
    /// IEEE-754 single precision.
    Float,
    /// IEEE-754 double precision.
    Double,
    /// Unicode strings.
    String,
    /// Single characters, carried as length-one strings on the wire.
    Char,
    /// A user declared sort, optionally with an ordered list of literals.
    UninterpretedSort {
        name: String,
        literals: Option<Vec<String>>,
    },
}

impl Kind {
    /// Unsigned fixed-width integer kind.
    pub const fn word(width: u32) -> Self {
        Kind::Bounded {
            signed: false,
            width,
        }
    }

    /// Signed fixed-width integer kind.
    pub const fn int(width: u32) -> Self {
        Kind::Bounded {
            signed: true,
            width,
        }
    }

    /// Uninterpreted sort without literals.
    pub fn sort(name: impl Into<String>) -> Self {
        Kind::UninterpretedSort {
            name: name.into(),
            literals: None,
        }
    }

    /// Enumerated sort with the given ordered literals.
    pub fn enumerated<I, S>(name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Kind::UninterpretedSort {
            name: name.into(),
            literals: Some(literals.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, Kind::Bounded { .. })
    }

    /// Returns true for bounded and unbounded integers.
    pub fn is_integral(&self) -> bool {
        matches!(self, Kind::Bounded { .. } | Kind::Unbounded)
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Kind::Float | Kind::Double)
    }

    /// Returns true for kinds that can carry an extended (optimization) value.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Kind::Bounded { .. } | Kind::Unbounded | Kind::Real | Kind::Float | Kind::Double
        )
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Kind::Bounded { signed: true, .. })
    }

    pub fn is_uninterpreted(&self) -> bool {
        matches!(self, Kind::UninterpretedSort { .. })
    }

    /// Bit width of a bounded kind.
    pub fn width(&self) -> Option<u32> {
        match self {
            Kind::Bounded { width, .. } => Some(*width),
            _ => None,
        }
    }

    /// Inclusive value range of a bounded kind.
    pub fn bounds(&self) -> Option<(BigInt, BigInt)> {
        match *self {
            Kind::Bounded { signed: false, width } => {
                Some((BigInt::from(0), (BigInt::one() << width) - 1))
            }
            Kind::Bounded { signed: true, width } => {
                let half = BigInt::one() << (width - 1);
                Some((-half.clone(), half - 1))
            }
            _ => None,
        }
    }

    /// Position of `literal` in an enumerated sort.
    pub fn literal_index(&self, literal: &str) -> Option<usize> {
        match self {
            Kind::UninterpretedSort {
                literals: Some(literals),
                ..
            } => literals.iter().position(|l| l == literal),
            _ => None,
        }
    }

    /// The SMT-LIB sort this kind is declared with.
    pub fn smt_sort(&self) -> String {
        match self {
            Kind::Bool => "Bool".to_string(),
            Kind::Bounded { width, .. } => format!("(_ BitVec {width})"),
            Kind::Unbounded => "Int".to_string(),
            Kind::Real => "Real".to_string(),
            Kind::Float => "(_ FloatingPoint 8 24)".to_string(),
            Kind::Double => "(_ FloatingPoint 11 53)".to_string(),
            Kind::String | Kind::Char => "String".to_string(),
            Kind::UninterpretedSort { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "Bool"),
            Kind::Bounded { signed: true, width } => write!(f, "Int{width}"),
            Kind::Bounded {
                signed: false,
                width,
            } => write!(f, "Word{width}"),
            Kind::Unbounded => write!(f, "Integer"),
            Kind::Real => write!(f, "Real"),
            Kind::Float => write!(f, "Float"),
            Kind::Double => write!(f, "Double"),
            Kind::String => write!(f, "String"),
            Kind::Char => write!(f, "Char"),
            Kind::UninterpretedSort { name, .. } => write!(f, "{name}"),
        }
    }
}

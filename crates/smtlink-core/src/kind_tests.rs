use crate::Kind;
use num_bigint::BigInt;

#[test]
fn test_bounded_constructors() {
    assert_eq!(
        Kind::word(8),
        Kind::Bounded {
            signed: false,
            width: 8
        }
    );
    assert!(Kind::int(16).is_signed());
    assert!(!Kind::word(16).is_signed());
    assert_eq!(Kind::int(32).width(), Some(32));
    assert_eq!(Kind::Unbounded.width(), None);
}

#[test]
fn test_bounds() {
    assert_eq!(
        Kind::word(8).bounds(),
        Some((BigInt::from(0), BigInt::from(255)))
    );
    assert_eq!(
        Kind::int(8).bounds(),
        Some((BigInt::from(-128), BigInt::from(127)))
    );
    assert_eq!(Kind::Real.bounds(), None);
}

#[test]
fn test_classification() {
    assert!(Kind::Unbounded.is_integral());
    assert!(Kind::word(1).is_integral());
    assert!(!Kind::Real.is_integral());
    assert!(Kind::Double.is_floating());
    assert!(Kind::Real.is_numeric());
    assert!(!Kind::String.is_numeric());
    assert!(Kind::sort("U").is_uninterpreted());
}

#[test]
fn test_smt_sorts() {
    assert_eq!(Kind::Bool.smt_sort(), "Bool");
    assert_eq!(Kind::int(64).smt_sort(), "(_ BitVec 64)");
    assert_eq!(Kind::Unbounded.smt_sort(), "Int");
    assert_eq!(Kind::Float.smt_sort(), "(_ FloatingPoint 8 24)");
    assert_eq!(Kind::Double.smt_sort(), "(_ FloatingPoint 11 53)");
    assert_eq!(Kind::Char.smt_sort(), "String");
    assert_eq!(Kind::sort("Q").smt_sort(), "Q");
}

#[test]
fn test_literal_index() {
    let color = Kind::enumerated("Color", ["Red", "Green", "Blue"]);
    assert_eq!(color.literal_index("Red"), Some(0));
    assert_eq!(color.literal_index("Blue"), Some(2));
    assert_eq!(color.literal_index("Mauve"), None);
    assert_eq!(Kind::sort("U").literal_index("U!val!0"), None);
}

#[test]
fn test_display() {
    assert_eq!(Kind::word(8).to_string(), "Word8");
    assert_eq!(Kind::int(16).to_string(), "Int16");
    assert_eq!(Kind::Unbounded.to_string(), "Integer");
    assert_eq!(Kind::sort("Q").to_string(), "Q");
}

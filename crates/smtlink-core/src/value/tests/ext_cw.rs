use crate::value::{AlgReal, ExtCW, CW};
use crate::Kind;

fn int(n: i64) -> ExtCW {
    ExtCW::Bounded(CW::unbounded(n))
}

const K: Kind = Kind::Unbounded;

#[test]
fn test_kind_is_shared() {
    let e = ExtCW::interval(ExtCW::NegInfinity(K), int(3));
    assert_eq!(e.kind(), &Kind::Unbounded);
    assert!(!e.is_bounded());
    assert!(int(3).is_bounded());
}

#[test]
fn test_simplify_folds_constants() {
    assert_eq!(ExtCW::sum(int(2), int(3)).simplify(), int(5));
    assert_eq!(ExtCW::product(int(2), int(3)).simplify(), int(6));
    assert_eq!(
        ExtCW::sum(int(0), ExtCW::Epsilon(K)).simplify(),
        ExtCW::Epsilon(K)
    );
    assert_eq!(
        ExtCW::product(ExtCW::Epsilon(K), int(1)).simplify(),
        ExtCW::Epsilon(K)
    );
}

#[test]
fn test_simplify_signed_infinities() {
    assert_eq!(
        ExtCW::product(int(-1), ExtCW::PosInfinity(K)).simplify(),
        ExtCW::NegInfinity(K)
    );
    assert_eq!(
        ExtCW::product(ExtCW::NegInfinity(K), int(-4)).simplify(),
        ExtCW::PosInfinity(K)
    );
    assert_eq!(
        ExtCW::sum(ExtCW::PosInfinity(K), int(7)).simplify(),
        ExtCW::PosInfinity(K)
    );
    // 0 * oo stays as written.
    assert!(matches!(
        ExtCW::product(int(0), ExtCW::PosInfinity(K)).simplify(),
        ExtCW::Product(_, _)
    ));
}

#[test]
fn test_simplify_keeps_infinitesimal_offsets() {
    let e = ExtCW::sum(int(5), ExtCW::Epsilon(K));
    assert_eq!(e.clone().simplify(), e);
}

#[test]
fn test_simplify_collapses_degenerate_intervals() {
    assert_eq!(
        ExtCW::interval(ExtCW::sum(int(1), int(1)), int(2)).simplify(),
        int(2)
    );
}

#[test]
fn test_negate() {
    assert_eq!(ExtCW::PosInfinity(K).negate(), ExtCW::NegInfinity(K));
    assert_eq!(int(4).negate(), int(-4));
    assert_eq!(
        ExtCW::interval(int(1), ExtCW::PosInfinity(K)).negate(),
        ExtCW::interval(ExtCW::NegInfinity(K), int(-1))
    );
    assert_eq!(
        ExtCW::Epsilon(K).negate(),
        ExtCW::product(int(-1), ExtCW::Epsilon(K))
    );
}

#[test]
fn test_real_kind() {
    let half = ExtCW::Bounded(CW::real(AlgReal::from_ratio(1, 2)));
    let e = ExtCW::sum(half.clone(), half);
    assert_eq!(
        e.simplify(),
        ExtCW::Bounded(CW::real(AlgReal::from_integer(1)))
    );
}

#[test]
fn test_display() {
    assert_eq!(ExtCW::PosInfinity(K).to_string(), "oo");
    assert_eq!(
        ExtCW::interval(ExtCW::NegInfinity(K), int(5)).to_string(),
        "[-oo .. 5]"
    );
    assert_eq!(
        ExtCW::sum(int(5), ExtCW::Epsilon(K)).to_string(),
        "(5 + epsilon)"
    );
}

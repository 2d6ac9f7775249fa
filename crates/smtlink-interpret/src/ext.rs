//! Extended values: the grammar of optimization bounds.
//!
//! ```text
//! ext := oo | epsilon | <numeral>
//!      | (interval ext ext) | (+ ext ext ...) | (* ext ext ...)
//!      | (- ext) | (- ext ext)
//! ```

use smtlink_core::{ExtCW, Kind, ParseFailure, SExpr};

use crate::decode::decode_value;

fn unrecognized(expr: &SExpr) -> ParseFailure {
    ParseFailure::UnrecognizedExtended {
        item: expr.to_string(),
    }
}

fn fold(
    kind: &Kind,
    args: &[SExpr],
    whole: &SExpr,
    combine: fn(ExtCW, ExtCW) -> ExtCW,
) -> Result<ExtCW, ParseFailure> {
    let (first, rest) = args.split_first().ok_or_else(|| unrecognized(whole))?;
    if rest.is_empty() {
        return Err(unrecognized(whole));
    }
    rest.iter().try_fold(extended_value(kind, first)?, |acc, e| {
        Ok(combine(acc, extended_value(kind, e)?))
    })
}

/// Converts an (already normalized) token tree to an extended value of
/// `kind`.
///
/// The error names the innermost sub-expression that fits no rule. The
/// result is not simplified.
///
/// ```
/// use smtlink_core::{parse_sexpr, ExtCW, Kind, CW};
/// use smtlink_interpret::extended_value;
///
/// let tree = parse_sexpr("(interval oo 5)").unwrap();
/// assert_eq!(
///     extended_value(&Kind::Unbounded, &tree).unwrap(),
///     ExtCW::interval(
///         ExtCW::PosInfinity(Kind::Unbounded),
///         ExtCW::Bounded(CW::unbounded(5)),
///     )
/// );
/// ```
pub fn extended_value(kind: &Kind, expr: &SExpr) -> Result<ExtCW, ParseFailure> {
    match expr {
        SExpr::Atom(_) => match expr.as_symbol() {
            Some("oo") => Ok(ExtCW::PosInfinity(kind.clone())),
            Some("-oo") => Ok(ExtCW::NegInfinity(kind.clone())),
            Some("epsilon") => Ok(ExtCW::Epsilon(kind.clone())),
            Some(_) => Err(unrecognized(expr)),
            None => decode_value(kind, expr)
                .map(ExtCW::Bounded)
                .map_err(|_| unrecognized(expr)),
        },
        SExpr::App(items) => match items.as_slice() {
            [head, lo, hi] if head.is_symbol("interval") => Ok(ExtCW::interval(
                extended_value(kind, lo)?,
                extended_value(kind, hi)?,
            )),
            [head, args @ ..] if head.is_symbol("+") => fold(kind, args, expr, ExtCW::sum),
            [head, args @ ..] if head.is_symbol("*") => fold(kind, args, expr, ExtCW::product),
            [head, only] if head.is_symbol("-") => Ok(extended_value(kind, only)?.negate()),
            [head, a, b] if head.is_symbol("-") => Ok(ExtCW::sum(
                extended_value(kind, a)?,
                extended_value(kind, b)?.negate(),
            )),
            _ => Err(unrecognized(expr)),
        },
    }
}

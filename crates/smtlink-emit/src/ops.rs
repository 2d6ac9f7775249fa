//! Operator selection by operand kind.

use num_bigint::BigInt;
use smtlink_core::{Kind, Result, SmtError};

use crate::literal::bitvector_literal;
use crate::program::SymOp;

const RNE: &str = "RNE";

fn unsupported(op: &SymOp, kind: &Kind) -> SmtError {
    SmtError::UnsupportedOp {
        op: op.to_string(),
        kind: kind.to_string(),
    }
}

fn app(head: &str, args: &[String]) -> String {
    format!("({head} {})", args.join(" "))
}

/// Renders `op` applied to `args`.
///
/// `operands` are the kinds of the arguments, `result` the kind of the
/// assigned word.
pub fn render(op: &SymOp, result: &Kind, operands: &[Kind], args: &[String]) -> Result<String> {
    if let Some(arity) = op.arity() {
        if args.len() != arity || operands.len() != arity {
            return Err(SmtError::UnsupportedOp {
                op: format!("{op} with {} arguments", args.len()),
                kind: result.to_string(),
            });
        }
    }

    // The kind that picks the operator family.
    let kind = match op {
        SymOp::Ite => &operands[1],
        _ => operands.first().unwrap_or(result),
    };
    let err = || unsupported(op, kind);

    let text = match op {
        SymOp::Plus | SymOp::Times | SymOp::Minus => {
            let (bv, arith, fp) = match op {
                SymOp::Plus => ("bvadd", "+", "fp.add"),
                SymOp::Times => ("bvmul", "*", "fp.mul"),
                _ => ("bvsub", "-", "fp.sub"),
            };
            match kind {
                Kind::Bounded { .. } => app(bv, args),
                Kind::Unbounded | Kind::Real => app(arith, args),
                Kind::Float | Kind::Double => format!("({fp} {RNE} {})", args.join(" ")),
                Kind::String if *op == SymOp::Plus => app("str.++", args),
                _ => return Err(err()),
            }
        }
        SymOp::Negate => match kind {
            Kind::Bounded { .. } => app("bvneg", args),
            Kind::Unbounded | Kind::Real => app("-", args),
            Kind::Float | Kind::Double => app("fp.neg", args),
            _ => return Err(err()),
        },
        SymOp::Abs => {
            let a = &args[0];
            match kind {
                Kind::Bounded {
                    signed: true,
                    width,
                } => {
                    let zero = bitvector_literal(&BigInt::from(0), *width);
                    format!("(ite (bvslt {a} {zero}) (bvneg {a}) {a})")
                }
                Kind::Bounded { signed: false, .. } => a.clone(),
                Kind::Unbounded => format!("(abs {a})"),
                Kind::Real => format!("(ite (< {a} 0.0) (- {a}) {a})"),
                Kind::Float | Kind::Double => format!("(fp.abs {a})"),
                _ => return Err(err()),
            }
        }
        SymOp::Quot => match kind {
            Kind::Bounded { signed: false, .. } => app("bvudiv", args),
            Kind::Bounded { signed: true, .. } => app("bvsdiv", args),
            Kind::Unbounded => app("div", args),
            Kind::Real => app("/", args),
            Kind::Float | Kind::Double => format!("(fp.div {RNE} {})", args.join(" ")),
            _ => return Err(err()),
        },
        SymOp::Rem => match kind {
            Kind::Bounded { signed: false, .. } => app("bvurem", args),
            Kind::Bounded { signed: true, .. } => app("bvsrem", args),
            Kind::Unbounded => app("mod", args),
            Kind::Float | Kind::Double => app("fp.rem", args),
            _ => return Err(err()),
        },
        SymOp::Equal => match kind {
            Kind::Float | Kind::Double => app("fp.eq", args),
            _ => app("=", args),
        },
        SymOp::NotEqual => match kind {
            Kind::Float | Kind::Double => format!("(not {})", app("fp.eq", args)),
            _ => app("distinct", args),
        },
        SymOp::LessThan | SymOp::GreaterThan | SymOp::LessEq | SymOp::GreaterEq => {
            comparison(op, kind, args).ok_or_else(err)?
        }
        SymOp::Ite => app("ite", args),
        SymOp::And | SymOp::Or | SymOp::XOr | SymOp::Not => {
            let (logical, bitwise) = match op {
                SymOp::And => ("and", "bvand"),
                SymOp::Or => ("or", "bvor"),
                SymOp::XOr => ("xor", "bvxor"),
                _ => ("not", "bvnot"),
            };
            match kind {
                Kind::Bool => app(logical, args),
                Kind::Bounded { .. } => app(bitwise, args),
                _ => return Err(err()),
            }
        }
        SymOp::Shl(n) | SymOp::Shr(n) => {
            let Kind::Bounded { signed, width } = kind else {
                return Err(err());
            };
            // Shifting by the full width already clears (or sign-fills) every bit.
            let amount = bitvector_literal(&BigInt::from((*n).min(*width)), *width);
            let head = match (op, signed) {
                (SymOp::Shl(_), _) => "bvshl",
                (_, true) => "bvashr",
                (_, false) => "bvlshr",
            };
            format!("({head} {} {amount})", args[0])
        }
        SymOp::Extract { hi, lo } => match kind {
            Kind::Bounded { width, .. } if hi >= lo && hi < width => {
                format!("((_ extract {hi} {lo}) {})", args[0])
            }
            _ => return Err(err()),
        },
        SymOp::Join => match kind {
            Kind::Bounded { .. } => app("concat", args),
            Kind::String => app("str.++", args),
            _ => return Err(err()),
        },
        SymOp::TableLookup(t) => format!("(select table{t} {})", args[0]),
        SymOp::ArrayRead(a) => format!("(select array_{a} {})", args[0]),
        SymOp::Uninterpreted(name) if args.is_empty() => name.clone(),
        SymOp::Uninterpreted(name) => app(name, args),
    };
    Ok(text)
}

fn comparison(op: &SymOp, kind: &Kind, args: &[String]) -> Option<String> {
    let pick = |lt: &'static str, gt: &'static str, le: &'static str, ge: &'static str| match op {
        SymOp::LessThan => lt,
        SymOp::GreaterThan => gt,
        SymOp::LessEq => le,
        _ => ge,
    };
    let text = match kind {
        Kind::Bounded { signed: true, .. } => app(pick("bvslt", "bvsgt", "bvsle", "bvsge"), args),
        Kind::Bounded { signed: false, .. } => {
            app(pick("bvult", "bvugt", "bvule", "bvuge"), args)
        }
        Kind::Unbounded | Kind::Real => app(pick("<", ">", "<=", ">="), args),
        Kind::Float | Kind::Double => app(pick("fp.lt", "fp.gt", "fp.leq", "fp.geq"), args),
        Kind::String | Kind::Char => {
            let (a, b) = (&args[0], &args[1]);
            match op {
                SymOp::LessThan => format!("(str.< {a} {b})"),
                SymOp::LessEq => format!("(str.<= {a} {b})"),
                SymOp::GreaterThan => format!("(str.< {b} {a})"),
                _ => format!("(str.<= {b} {a})"),
            }
        }
        _ => return None,
    };
    Some(text)
}

//! Objective extractor for `(objectives (name value) ...)` responses.

use smtlink_core::{ExtCW, Kind, Literal, ParseContext, ParseFailure, Result, SExpr, SymbolTable};
use tracing::trace;

use crate::decode::decode_value;
use crate::ext::extended_value;

/// Kind of an objective the table does not know, guessed from the first
/// numeric literal in its value.
fn inferred_kind(value: &SExpr) -> Option<Kind> {
    match value {
        SExpr::Atom(Literal::Int { width: Some(w), .. }) => Some(Kind::word(*w)),
        SExpr::Atom(Literal::Int { width: None, .. }) => Some(Kind::Unbounded),
        SExpr::Atom(Literal::Real(_)) => Some(Kind::Real),
        SExpr::Atom(Literal::Float(_)) => Some(Kind::Float),
        SExpr::Atom(Literal::Double(_)) => Some(Kind::Double),
        SExpr::Atom(_) => None,
        SExpr::App(items) => items.iter().find_map(inferred_kind),
    }
}

/// Extracts objective values, in solver order, simplified.
///
/// Each item is first read as a plain value; anything else goes through
/// the extended value grammar. The first item that fits neither aborts the
/// whole batch.
pub fn extract_objectives(
    table: &SymbolTable,
    ctx: ParseContext<'_>,
) -> Result<Vec<(String, ExtCW)>> {
    let items = match ctx.tree.as_app() {
        Some([head, items @ ..]) if head.is_symbol("objectives") => items,
        _ => {
            return Err(ctx.fail(ParseFailure::UnexpectedRoot {
                expected: "objectives",
            }))
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Some([name, value]) = item.as_app() else {
            return Err(ctx.fail(ParseFailure::UnrecognizedShape {
                item: item.to_string(),
            }));
        };
        let resolved = match name.as_symbol() {
            Some(symbol) => table.resolve(symbol)?,
            None => None,
        };
        let (name, kind) = match resolved {
            Some(var) => (var.name.clone(), var.kind.clone()),
            None => (
                name.as_symbol()
                    .map_or_else(|| name.to_string(), str::to_string),
                inferred_kind(value).unwrap_or(Kind::Unbounded),
            ),
        };
        let ext = match decode_value(&kind, value) {
            Ok(cw) => ExtCW::Bounded(cw),
            Err(_) => extended_value(&kind, value)
                .map_err(|reason| ctx.fail(reason))?
                .simplify(),
        };
        trace!(event = "objective", %name, value = %ext);
        out.push((name, ext));
    }
    Ok(out)
}

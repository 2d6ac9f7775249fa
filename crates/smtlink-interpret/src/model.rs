//! Model extractor
//!
//! Recognizes the binding shapes solvers print for models:
//!
//! ```text
//! (model (define-fun s0 () Int 3) ...)     get-model, older format
//! ((define-fun s0 () Int 3) ...)           get-model
//! ((s0 3) (s1 true))                       get-value
//! ```
//!
//! Symbols are tied to variables through the [`SymbolTable`]; symbols the
//! table does not know (solver internals such as `k!0`) are ignored.

use smtlink_core::{ParseContext, ParseFailure, Result, SExpr, SymbolTable};
use tracing::{debug, trace};

use crate::decode::decode_value;
use crate::result::Binding;

/// What happens to a binding the grammar does not accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Fail the extraction with a parse error.
    Strict,
    /// Drop the binding and carry on.
    Lenient,
}

/// The `(symbol, value)` a binding item names, if it has a usable shape.
fn binding_parts(item: &SExpr) -> Option<(&str, &SExpr)> {
    match item.as_app()? {
        [define, name, params, _sort, value]
            if define.is_symbol("define-fun") && params.as_app().is_some_and(|p| p.is_empty()) =>
        {
            Some((name.as_symbol()?, value))
        }
        [name, value] => Some((name.as_symbol()?, value)),
        _ => None,
    }
}

/// The symbol an item is about, even when its shape is not usable.
fn binding_symbol(item: &SExpr) -> Option<&str> {
    match item.as_app()? {
        [define, name, ..] if define.is_symbol("define-fun") => name.as_symbol(),
        [name, ..] => name.as_symbol(),
        _ => None,
    }
}

fn binding_items(tree: &SExpr) -> Option<&[SExpr]> {
    let items = tree.as_app()?;
    match items.first() {
        Some(head) if head.is_symbol("model") => Some(&items[1..]),
        _ if items.iter().all(|i| i.as_app().is_some()) => Some(items),
        _ => None,
    }
}

/// Extracts the variable bindings of one model tree.
///
/// Resolution failures are always fatal: a symbol matching several table
/// entries is an ambiguity error in either mode.
pub fn extract_bindings(
    table: &SymbolTable,
    ctx: ParseContext<'_>,
    strictness: Strictness,
) -> Result<Vec<Binding>> {
    let Some(items) = binding_items(ctx.tree) else {
        return match strictness {
            Strictness::Strict => Err(ctx.fail(ParseFailure::UnexpectedRoot {
                expected: "model",
            })),
            Strictness::Lenient => {
                debug!(event = "model_dropped", line = ctx.line);
                Ok(Vec::new())
            }
        };
    };

    let mut bindings = Vec::with_capacity(items.len());
    for item in items {
        let Some(symbol) = binding_symbol(item) else {
            reject(
                ctx,
                strictness,
                ParseFailure::UnrecognizedShape {
                    item: item.to_string(),
                },
            )?;
            continue;
        };
        let Some(var) = table.resolve(symbol)? else {
            trace!(event = "binding_ignored", symbol);
            continue;
        };
        let decoded = match binding_parts(item) {
            Some((_, value)) => decode_value(&var.kind, value),
            None => Err(ParseFailure::UnrecognizedShape {
                item: item.to_string(),
            }),
        };
        match decoded {
            Ok(value) => {
                trace!(event = "binding", name = %var.name, %value);
                bindings.push(Binding {
                    id: var.id,
                    name: var.name.clone(),
                    value,
                });
            }
            Err(reason) => reject(ctx, strictness, reason)?,
        }
    }
    Ok(bindings)
}

fn reject(ctx: ParseContext<'_>, strictness: Strictness, reason: ParseFailure) -> Result<()> {
    match strictness {
        Strictness::Strict => Err(ctx.fail(reason)),
        Strictness::Lenient => {
            debug!(event = "binding_dropped", line = ctx.line, %reason);
            Ok(())
        }
    }
}

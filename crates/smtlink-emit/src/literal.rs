//! SMT-LIB literal text for concrete words.

use num_bigint::BigInt;
use num_traits::{One, Signed};
use smtlink_core::{CwValue, CW};

/// Renders a concrete word as an SMT-LIB literal of its kind.
///
/// ```
/// use smtlink_core::{Kind, CW};
/// use smtlink_emit::cw_literal;
///
/// assert_eq!(cw_literal(&CW::integer(Kind::int(8), -1)), "#xff");
/// assert_eq!(cw_literal(&CW::integer(Kind::word(3), 5)), "#b101");
/// assert_eq!(cw_literal(&CW::unbounded(-4)), "(- 4)");
/// ```
pub fn cw_literal(cw: &CW) -> String {
    match cw.value() {
        CwValue::Bool(b) => b.to_string(),
        CwValue::Integer(i) => match cw.kind().width() {
            Some(width) => bitvector_literal(i, width),
            None => integer_literal(i),
        },
        CwValue::AlgReal(r) => r.to_smtlib(),
        CwValue::Float(f) => {
            let bits = f.to_bits();
            format!(
                "(fp #b{} #b{:08b} #b{:023b})",
                bits >> 31,
                (bits >> 23) & 0xff,
                bits & 0x7f_ffff
            )
        }
        CwValue::Double(d) => {
            let bits = d.to_bits();
            format!(
                "(fp #b{} #b{:011b} #b{:052b})",
                bits >> 63,
                (bits >> 52) & 0x7ff,
                bits & 0xf_ffff_ffff_ffff
            )
        }
        CwValue::String(s) => string_literal(s),
        CwValue::Char(c) => string_literal(&c.to_string()),
        CwValue::Uninterpreted { label, .. } => symbol(label),
    }
}

/// `n` or `(- n)`.
pub fn integer_literal(value: &BigInt) -> String {
    if value.is_negative() {
        format!("(- {})", value.abs())
    } else {
        value.to_string()
    }
}

/// Two's complement bit pattern, in hex when the width allows it.
pub fn bitvector_literal(value: &BigInt, width: u32) -> String {
    let modulus = BigInt::one() << width;
    let mut bits = value % &modulus;
    if bits.is_negative() {
        bits += &modulus;
    }
    if width % 4 == 0 {
        format!("#x{:0>w$}", bits.to_str_radix(16), w = (width / 4) as usize)
    } else {
        format!("#b{:0>w$}", bits.to_str_radix(2), w = width as usize)
    }
}

/// A string literal with `"` doubled and everything outside printable ASCII
/// written as a `\u{..}` escape.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '\\' => out.push_str("\\u{5c}"),
            ' '..='~' => out.push(c),
            _ => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// A symbol, `|quoted|` unless it is a simple symbol.
pub fn symbol(name: &str) -> String {
    let simple = !name.is_empty()
        && !name
            .trim_start_matches('-')
            .starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "~!@$%^&*_-+=<>.?/".contains(c));
    if simple {
        name.to_string()
    } else {
        format!("|{name}|")
    }
}

//! Reader: solver text to token trees

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::{Literal, SExpr};
use crate::error::{Result, SmtError};
use crate::value::AlgReal;

/// Reads exactly one S-expression from `text`.
///
/// ```
/// use smtlink_core::{parse_sexpr, Literal, SExpr};
///
/// let tree = parse_sexpr("((s0 #x0f))").unwrap();
/// let binding = &tree.as_app().unwrap()[0].as_app().unwrap()[1];
/// assert_eq!(
///     binding,
///     &SExpr::Atom(Literal::Int { value: 15.into(), width: Some(8) })
/// );
/// ```
pub fn parse_sexpr(text: &str) -> Result<SExpr> {
    let mut reader = Reader::new(text);
    let expr = reader.expr()?;
    reader.skip_trivia();
    if reader.pos < reader.bytes.len() {
        return Err(reader.error("trailing input after expression"));
    }
    Ok(expr)
}

/// Reads every S-expression in `text`.
pub fn parse_sexprs(text: &str) -> Result<Vec<SExpr>> {
    let mut reader = Reader::new(text);
    let mut exprs = Vec::new();
    loop {
        reader.skip_trivia();
        if reader.pos >= reader.bytes.len() {
            return Ok(exprs);
        }
        exprs.push(reader.expr()?);
    }
}

struct Reader<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> SmtError {
        SmtError::Reader {
            offset: self.pos,
            message: message.into(),
            text: self.text.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b';' {
                while self.peek().is_some_and(|c| c != b'\n') {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn expr(&mut self) -> Result<SExpr> {
        self.skip_trivia();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'(') => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    self.skip_trivia();
                    match self.peek() {
                        None => return Err(self.error("unbalanced parenthesis")),
                        Some(b')') => {
                            self.pos += 1;
                            return Ok(fold(items));
                        }
                        Some(_) => items.push(self.expr()?),
                    }
                }
            }
            Some(b')') => Err(self.error("unexpected closing parenthesis")),
            Some(b'"') => self.string(),
            Some(b'|') => self.quoted_symbol(),
            Some(b'#') => self.radix_literal(),
            Some(_) => self.simple_atom(),
        }
    }

    fn string(&mut self) -> Result<SExpr> {
        self.pos += 1;
        let mut raw = String::new();
        loop {
            let rest = &self.text[self.pos..];
            let Some(end) = rest.find('"') else {
                return Err(self.error("unterminated string literal"));
            };
            raw.push_str(&rest[..end]);
            self.pos += end + 1;
            if self.peek() == Some(b'"') {
                raw.push('"');
                self.pos += 1;
            } else {
                return Ok(SExpr::Atom(Literal::Str(unescape(&raw))));
            }
        }
    }

    fn quoted_symbol(&mut self) -> Result<SExpr> {
        self.pos += 1;
        let rest = &self.text[self.pos..];
        let Some(end) = rest.find('|') else {
            return Err(self.error("unterminated quoted symbol"));
        };
        let name = rest[..end].to_string();
        self.pos += end + 1;
        Ok(SExpr::symbol(name))
    }

    fn token(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b'"' | b';') {
                break;
            }
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn radix_literal(&mut self) -> Result<SExpr> {
        let start = self.pos;
        let token = self.token();
        let (radix, bits_per_digit, digits) = if let Some(d) = token.strip_prefix("#b") {
            (2, 1, d)
        } else if let Some(d) = token.strip_prefix("#x") {
            (16, 4, d)
        } else {
            self.pos = start;
            return Err(self.error(format!("unknown literal {token}")));
        };
        let value = BigInt::parse_bytes(digits.as_bytes(), radix)
            .filter(|_| !digits.is_empty())
            .ok_or_else(|| self.error(format!("bad digits in {token}")))?;
        Ok(SExpr::Atom(Literal::Int {
            value,
            width: Some(digits.len() as u32 * bits_per_digit),
        }))
    }

    fn simple_atom(&mut self) -> Result<SExpr> {
        let token = self.token();
        if token.is_empty() {
            return Err(self.error("empty token"));
        }
        Ok(SExpr::Atom(classify_token(token)))
    }
}

fn classify_token(token: &str) -> Literal {
    if token.starts_with(':') {
        return Literal::Keyword(token.to_string());
    }
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = token.parse::<BigInt>() {
            return Literal::Int { value, width: None };
        }
    }
    if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some(real) = AlgReal::parse_decimal(token) {
            return Literal::Real(real);
        }
    }
    Literal::Symbol(token.to_string())
}

/// Decodes `\u{h..}` and `\udddd` escapes.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find("\\u") {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 2..];
        let decoded = if let Some(braced) = tail.strip_prefix('{') {
            braced.find('}').and_then(|close| {
                let code = u32::from_str_radix(&braced[..close], 16).ok()?;
                Some((char::from_u32(code)?, close + 2))
            })
        } else {
            tail.get(..4).and_then(|hex| {
                let code = u32::from_str_radix(hex, 16).ok()?;
                Some((char::from_u32(code)?, 4))
            })
        };
        match decoded {
            Some((c, used)) => {
                out.push(c);
                rest = &tail[used..];
            }
            None => {
                out.push_str("\\u");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn int_atom(e: &SExpr) -> Option<(&BigInt, Option<u32>)> {
    match e {
        SExpr::Atom(Literal::Int { value, width }) => Some((value, *width)),
        _ => None,
    }
}

fn rational_atom(e: &SExpr) -> Option<BigRational> {
    match e {
        SExpr::Atom(Literal::Int { value, width: None }) => {
            Some(BigRational::from_integer(value.clone()))
        }
        SExpr::Atom(Literal::Real(AlgReal::Exact(r))) => Some(r.clone()),
        _ => None,
    }
}

/// Folds the literal-building applications solvers print into atoms.
pub(super) fn fold(items: Vec<SExpr>) -> SExpr {
    let folded = match items.as_slice() {
        [minus, arg] if minus.is_symbol("-") => match arg {
            SExpr::Atom(Literal::Int { value, width: None }) => Some(Literal::Int {
                value: -value,
                width: None,
            }),
            SExpr::Atom(Literal::Real(r)) => r.checked_neg().map(Literal::Real),
            _ => None,
        },
        [slash, n, d] if slash.is_symbol("/") => match (rational_atom(n), rational_atom(d)) {
            (Some(n), Some(d)) if !d.is_zero() => Some(Literal::Real(AlgReal::Exact(n / d))),
            _ => None,
        },
        [under, name, size] if under.is_symbol("_") => fold_indexed(name, size),
        [under, name, eb, sb] if under.is_symbol("_") => fold_special_float(name, eb, sb),
        [fp, sign, exp, sig] if fp.is_symbol("fp") => fold_fp(sign, exp, sig),
        [root, poly, index] if root.is_symbol("root-obj") => {
            let index = int_atom(index).and_then(|(i, _)| i.to_u32());
            match (polynomial(poly), index) {
                (Some(coefficients), Some(index)) => Some(Literal::Real(AlgReal::Root {
                    coefficients,
                    index,
                })),
                _ => None,
            }
        }
        _ => None,
    };
    match folded {
        Some(lit) => SExpr::Atom(lit),
        None => SExpr::App(items),
    }
}

/// `(_ bvN w)`
fn fold_indexed(name: &SExpr, size: &SExpr) -> Option<Literal> {
    let digits = name.as_symbol()?.strip_prefix("bv")?;
    let value = digits.parse::<BigInt>().ok()?;
    let width = int_atom(size)?.0.to_u32()?;
    Some(Literal::Int {
        value,
        width: Some(width),
    })
}

enum Precision {
    Single,
    Double,
}

fn precision(eb: &SExpr, sb: &SExpr) -> Option<Precision> {
    let eb = int_atom(eb)?.0.to_u32()?;
    let sb = int_atom(sb)?.0.to_u32()?;
    match (eb, sb) {
        (8, 24) => Some(Precision::Single),
        (11, 53) => Some(Precision::Double),
        _ => None,
    }
}

/// `(_ +oo 8 24)`, `(_ -zero 11 53)`, `(_ NaN 8 24)` ...
fn fold_special_float(name: &SExpr, eb: &SExpr, sb: &SExpr) -> Option<Literal> {
    let name = name.as_symbol()?;
    let value = match name {
        "+oo" => f64::INFINITY,
        "-oo" => f64::NEG_INFINITY,
        "+zero" => 0.0,
        "-zero" => -0.0,
        "NaN" => f64::NAN,
        _ => return None,
    };
    Some(match precision(eb, sb)? {
        Precision::Single => Literal::Float(value as f32),
        Precision::Double => Literal::Double(value),
    })
}

/// `(fp sign exponent significand)` with bit-vector fields.
fn fold_fp(sign: &SExpr, exp: &SExpr, sig: &SExpr) -> Option<Literal> {
    let (sign, Some(1)) = int_atom(sign)? else {
        return None;
    };
    let (exp, Some(eb)) = int_atom(exp)? else {
        return None;
    };
    let (sig, Some(mb)) = int_atom(sig)? else {
        return None;
    };
    let sign = sign.to_u64()?;
    let exp = exp.to_u64()?;
    let sig = sig.to_u64()?;
    match (eb, mb + 1) {
        (8, 24) => {
            let bits = (sign << 31) | (exp << 23) | sig;
            Some(Literal::Float(f32::from_bits(bits as u32)))
        }
        (11, 53) => {
            let bits = (sign << 63) | (exp << 52) | sig;
            Some(Literal::Double(f64::from_bits(bits)))
        }
        _ => None,
    }
}

fn poly_add(mut a: Vec<BigInt>, b: Vec<BigInt>) -> Vec<BigInt> {
    if a.len() < b.len() {
        a.resize(b.len(), BigInt::zero());
    }
    for (i, c) in b.into_iter().enumerate() {
        a[i] += c;
    }
    a
}

fn poly_scale(a: Vec<BigInt>, k: &BigInt) -> Vec<BigInt> {
    a.into_iter().map(|c| c * k).collect()
}

/// Dense coefficients (lowest degree first) of a `root-obj` polynomial in
/// one variable.
fn polynomial(e: &SExpr) -> Option<Vec<BigInt>> {
    match e {
        SExpr::Atom(Literal::Int { value, width: None }) => Some(vec![value.clone()]),
        SExpr::Atom(Literal::Symbol(_)) => Some(vec![BigInt::zero(), BigInt::from(1)]),
        SExpr::App(items) => match items.as_slice() {
            [caret, var, k] if caret.is_symbol("^") && var.as_symbol().is_some() => {
                let k = int_atom(k)?.0.to_usize()?;
                let mut coefficients = vec![BigInt::zero(); k + 1];
                coefficients[k] = BigInt::from(1);
                Some(coefficients)
            }
            [star, factors @ ..] if star.is_symbol("*") && !factors.is_empty() => {
                let mut acc = vec![BigInt::from(1)];
                for factor in factors {
                    let p = polynomial(factor)?;
                    acc = poly_mul(&acc, &p);
                }
                Some(acc)
            }
            [plus, terms @ ..] if plus.is_symbol("+") => terms
                .iter()
                .try_fold(Vec::new(), |acc, t| Some(poly_add(acc, polynomial(t)?))),
            [minus, only] if minus.is_symbol("-") => {
                Some(poly_scale(polynomial(only)?, &BigInt::from(-1)))
            }
            [minus, first, rest @ ..] if minus.is_symbol("-") => {
                rest.iter().try_fold(polynomial(first)?, |acc, t| {
                    Some(poly_add(acc, poly_scale(polynomial(t)?, &BigInt::from(-1))))
                })
            }
            _ => None,
        },
        _ => None,
    }
}

fn poly_mul(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

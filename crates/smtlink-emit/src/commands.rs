//! Individual solver commands for interactive use.

use smtlink_core::SymId;

use crate::literal::string_literal;

pub fn check_sat() -> String {
    "(check-sat)".to_string()
}

pub fn get_model() -> String {
    "(get-model)".to_string()
}

pub fn get_objectives() -> String {
    "(get-objectives)".to_string()
}

/// `(get-value (s0 s1 ...))`
pub fn get_value(ids: &[SymId]) -> String {
    let ids: Vec<String> = ids.iter().map(SymId::to_string).collect();
    format!("(get-value ({}))", ids.join(" "))
}

/// `(echo "text")`; solvers print `text` on a line of its own.
pub fn echo(text: &str) -> String {
    format!("(echo {})", string_literal(text))
}

pub fn push(levels: u32) -> String {
    format!("(push {levels})")
}

pub fn pop(levels: u32) -> String {
    format!("(pop {levels})")
}

/// `(set-option :name value)`; a leading colon on `name` is accepted.
pub fn set_option(name: &str, value: &str) -> String {
    format!("(set-option :{} {value})", name.trim_start_matches(':'))
}

//! LinkML naming conventions
//!
//! Schema element names may contain spaces (`named thing`, `has sample`).
//! Generated artifacts use `camelcase` for classes, enums and unions and
//! `underscore` for attributes, matching the reference LinkML toolchain.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("static pattern"));

/// `named thing` -> `NamedThing`; only whitespace separates words
#[must_use]
pub fn camelcase(text: &str) -> String {
    WHITESPACE
        .split(text.trim())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `has sample` -> `has_sample`
#[must_use]
pub fn underscore(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), "_").into_owned()
}

/// Python enum member name for a permissible value
#[must_use]
pub fn enum_label(text: &str) -> String {
    let label = NON_WORD.replace_all(text, "_").into_owned();
    match label.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("number_{label}"),
        Some(_) => label,
        None => "_".to_string(),
    }
}

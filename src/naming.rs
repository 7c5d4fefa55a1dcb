//! Identifier normalization shared by display, search and code generation.
//!
//! Icon names arrive in whatever convention the asset author picked
//! (`wiFi2`, `wi-fi`, `Wi Fi`). These functions turn them into a readable
//! title, a comparison key, or a valid component identifier. All of them
//! are total: empty input yields empty output.

use regex::Regex;
use std::sync::LazyLock;

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("static pattern"));
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)").expect("static pattern"));
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]").expect("static pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Human-readable title: `"wiFi2"` → `"Wi Fi 2"`.
pub fn title_case(identifier: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(identifier, "$1 $2");
    let spaced = DIGIT_RUN.replace_all(&spaced, " $1");
    let spaced = spaced.replace(',', ", ");
    let collapsed = WHITESPACE.replace_all(spaced.trim(), " ");
    capitalize_first(&collapsed)
}

/// Lower-cased, space-separated comparison form. Idempotent.
pub fn normalize(text: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(text, "$1 $2");
    let spaced = SEPARATOR.replace_all(&spaced, " ");
    let spaced = DIGIT_RUN.replace_all(&spaced, " $1");
    let lowered = spaced.to_lowercase();
    WHITESPACE.replace_all(lowered.trim(), " ").into_owned()
}

/// [`normalize`] without word boundaries, so `"Wi-Fi"`, `"wifi"` and
/// `"WI FI"` share one key.
pub fn compact_key(text: &str) -> String {
    normalize(text).replace(' ', "")
}

/// PascalCase identifier usable as a component name. Empty when the input
/// has no ASCII alphanumerics past its leading digits.
pub fn sanitize_identifier(input: &str) -> String {
    let joined: String = input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(capitalize_first)
        .collect();
    capitalize_first(joined.trim_start_matches(|c: char| c.is_ascii_digit()))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

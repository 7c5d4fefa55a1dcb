//! Markup → TSX component source.
//!
//! A fixed sequence of literal substitutions, tuned to the canonical 24×24
//! root element the icon set ships with. Markup of any other shape is
//! passed through best-effort; check [`is_canonical`] first when the result
//! has to be valid.

use serde::{Deserialize, Serialize};

pub const CANONICAL_OPEN_TAG: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">"#;

const INDENT: &str = "          ";
const ATTRIBUTE_SUFFIXES: [(&str, &str); 3] = [("-w", "W"), ("-l", "L"), ("-r", "R")];
const CLOSE_TAG_LINE: &str = "  </svg>";
const CLOSE_COMPONENT: &str = "</svg>\n    )\n}";

/// What gets copied for an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markup,
    Component,
}

pub fn is_canonical(markup: &str) -> bool {
    markup.contains(CANONICAL_OPEN_TAG)
}

pub fn to_component_source(markup: &str, sanitized_name: &str, variant_label: &str) -> String {
    let mut source = markup.split('\n').collect::<Vec<_>>().join(&format!("\n{INDENT}"));
    for (suffix, replacement) in ATTRIBUTE_SUFFIXES {
        source = source.replace(suffix, replacement);
    }
    source = source.replace(CLOSE_TAG_LINE, CLOSE_COMPONENT);
    source = source.replace(CANONICAL_OPEN_TAG, &component_header(sanitized_name, variant_label));
    source.trim().to_string()
}

fn component_header(name: &str, label: &str) -> String {
    format!(
        r#"export const {name}{label} = (props: SVGAttributes<SVGElement>) => {{
    return (
        <svg
            aria-hidden="true"
            fill="none"
            focusable="false"
            height="1em"
            role="presentation"
            viewBox="0 0 24 24"
            width="1em"
            {{...props}}
        >"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> String {
        format!("{CANONICAL_OPEN_TAG}\n  <path d=\"M0 0\"/>\n  </svg>")
    }

    #[test]
    fn minimal_icon_becomes_named_component() {
        let source = to_component_source(&minimal(), "Moon", "Outline");
        let expected = concat!(
            "export const MoonOutline = (props: SVGAttributes<SVGElement>) => {\n",
            "    return (\n",
            "        <svg\n",
            "            aria-hidden=\"true\"\n",
            "            fill=\"none\"\n",
            "            focusable=\"false\"\n",
            "            height=\"1em\"\n",
            "            role=\"presentation\"\n",
            "            viewBox=\"0 0 24 24\"\n",
            "            width=\"1em\"\n",
            "            {...props}\n",
            "        >\n",
            "            <path d=\"M0 0\"/>\n",
            "          </svg>\n",
            "    )\n",
            "}",
        );
        assert_eq!(source, expected);
        assert!(!source.contains(CANONICAL_OPEN_TAG));
    }

    #[test]
    fn output_is_deterministic() {
        let a = to_component_source(&minimal(), "Moon", "Outline");
        let b = to_component_source(&minimal(), "Moon", "Outline");
        assert_eq!(a, b);
    }

    #[test]
    fn hyphenated_attributes_become_camel_case() {
        let markup = format!(
            "{CANONICAL_OPEN_TAG}\n<path fill-rule=\"evenodd\" clip-rule=\"evenodd\" stroke-width=\"1.5\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n  </svg>"
        );
        let source = to_component_source(&markup, "Sun", "Bold");
        assert!(source.contains(
            r#"fillRule="evenodd" clipRule="evenodd" strokeWidth="1.5" strokeLinecap="round" strokeLinejoin="round""#
        ));
    }

    #[test]
    fn non_canonical_markup_is_passed_through() {
        let markup = "<svg viewBox=\"0 0 16 16\">\n  <path/>\n  </svg>";
        assert!(!is_canonical(markup));
        let source = to_component_source(markup, "Sun", "Bold");
        assert!(source.starts_with("<svg viewBox=\"0 0 16 16\">"));
        assert!(source.ends_with("</svg>\n    )\n}"));
        assert!(!source.contains("export const"));
    }
}

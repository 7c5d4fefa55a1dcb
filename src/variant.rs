use serde::Serialize;

/// A stylistic icon family: the top-level catalog partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// URL-safe key used by the browser surface.
    pub slug: &'static str,
    /// Asset directory name under the resolver root.
    pub directory: &'static str,
    /// Suffix appended to generated component names.
    pub label: &'static str,
}

pub const VARIANTS: &[Variant] = &[
    Variant { slug: "broken", directory: "Broken", label: "Broken" },
    Variant { slug: "line-duotone", directory: "Line Duotone", label: "LineDuotone" },
    Variant { slug: "linear", directory: "Linear", label: "Linear" },
    Variant { slug: "outline", directory: "Outline", label: "Outline" },
    Variant { slug: "bold", directory: "Bold", label: "Bold" },
    Variant { slug: "bold-duotone", directory: "Bold Duotone", label: "Duotone" },
];

pub const DEFAULT_SLUG: &str = "bold-duotone";
const FALLBACK_SLUG: &str = "linear";

impl Variant {
    /// Look up a variant by slug, falling back to `linear` for unknown slugs.
    pub fn from_slug(slug: &str) -> &'static Variant {
        Self::by_slug(slug)
            .or_else(|| Self::by_slug(FALLBACK_SLUG))
            .unwrap_or(&VARIANTS[0])
    }

    pub fn by_slug(slug: &str) -> Option<&'static Variant> {
        VARIANTS.iter().find(|v| v.slug == slug)
    }

    /// Tab title, e.g. `Line Duotone`.
    pub fn title(&self) -> &'static str {
        self.directory
    }
}

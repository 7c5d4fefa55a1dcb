use std::path::PathBuf;
use thiserror::Error;

/// Why a locator was dropped from the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityIssue {
    #[error("expected `variant/category/name.svg`, found {0} segment(s)")]
    SegmentCount(usize),
    #[error("empty path segment")]
    EmptySegment,
    #[error("file name is not an `.svg` asset with a non-empty stem")]
    NotAnAsset,
    #[error("name already indexed in this category")]
    DuplicateName,
}

/// Non-fatal: the locator is dropped and indexing carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("skipping `{locator}`: {issue}")]
pub struct IndexIntegrityWarning {
    pub locator: String,
    pub issue: IntegrityIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read `{locator}`: {message}")]
    Io { locator: String, message: String },
    #[error("malformed asset `{locator}`: {reason}")]
    Malformed { locator: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot discover assets under {root:?}: {source}")]
    Discover {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("no icon `{category}/{name}` in variant `{variant}`")]
    UnknownIcon {
        variant: String,
        category: String,
        name: String,
    },
    #[error("icon `{category}/{name}` is still loading")]
    Pending { category: String, name: String },
    #[error("no variant `{slug}`")]
    UnknownVariant { slug: String },
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

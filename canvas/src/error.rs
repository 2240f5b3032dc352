//! Error types for the few fallible edges of the editor core.
//!
//! The interaction engine itself never fails outward: canvases log and drop
//! a [`PayloadError`], and store mutations against unknown ids are no-ops.

/// Error returned when decoding a drag-and-drop item payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The data transfer carried nothing under the item key.
    #[error("drag payload is empty")]
    Empty,
    /// The payload was not a valid serialized item input.
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Error returned by [`crate::config::EditorConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config document could not be parsed.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range.
    #[error("invalid editor config: {0}")]
    Invalid(String),
}

/// Error returned when a string names no known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_owned() }
    }
}

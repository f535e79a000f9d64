//! Encoding options.

use serde::Deserialize;

use cript_graph_core::{Error, Result};

use crate::color::ColorTable;

/// Attributes probed for node labels when none are configured.
pub const DEFAULT_LABEL_FIELDS: [&str; 3] = ["node_type", "name", "key"];

/// Options for DOT encoding.
///
/// Deserializable from TOML; every key is optional:
///
/// ```toml
/// label_fields = ["node_type", "name"]
/// strict = true
///
/// [colors]
/// Material = "#275497"
/// ```
///
/// A `[colors]` table replaces the built-in palette entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeOptions {
    /// Attributes read off each vertex, in order, to build its label.
    pub label_fields: Vec<String>,
    /// Emit `strict digraph`; renderers then merge parallel edges.
    pub strict: bool,
    /// Fill color per node type.
    pub colors: ColorTable,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            label_fields: DEFAULT_LABEL_FIELDS.iter().map(|s| s.to_string()).collect(),
            strict: false,
            colors: ColorTable::cript(),
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    /// Parse options from TOML and validate the color table.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| {
            Error::deserialization_failed(e).with_operation("options::from_toml_str")
        })?;
        options.colors.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cript_graph_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.label_fields, vec!["node_type", "name", "key"]);
        assert!(!options.strict);
        assert_eq!(options.colors, ColorTable::cript());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EncodeOptions::from_toml_str("").unwrap(), EncodeOptions::default());
    }

    #[test]
    fn test_toml_overrides() {
        let options = EncodeOptions::from_toml_str(
            r##"
                label_fields = ["uid"]
                strict = true

                [colors]
                Material = "#000000"
            "##,
        )
        .unwrap();
        assert_eq!(options.label_fields, vec!["uid"]);
        assert!(options.strict);
        assert_eq!(options.colors.len(), 1);
        assert_eq!(options.colors.get("Project"), None);
    }

    #[test]
    fn test_toml_errors() {
        let err = EncodeOptions::from_toml_str("colour = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "options::from_toml_str");

        let err = EncodeOptions::from_toml_str("[colors]\nData = \"#GG0000\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_builders() {
        let options = EncodeOptions::new()
            .with_label_fields(["name"])
            .with_strict(true)
            .with_colors(ColorTable::empty());
        assert_eq!(options.label_fields, vec!["name"]);
        assert!(options.strict);
        assert!(options.colors.is_empty());
    }
}

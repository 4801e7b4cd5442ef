//! # Configuration
//!
//! Settings for turning stored features back into primitives and for stamping
//! submissions sent to the annotation service.
//!
//! ```rust
//! use organ_scene::config::AnnotationConfig;
//!
//! let config = AnnotationConfig::default()
//!     .with_resource("https://example.org/scaffold.json")
//!     .with_point_colour(0xff0000);
//! assert_eq!(config.line_colour, 0x00ee22);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Colour given to point-sets rebuilt from stored features
pub const DEFAULT_POINT_COLOUR: u32 = 0x0022ee;
/// Colour given to line-sets rebuilt from stored features
pub const DEFAULT_LINE_COLOUR: u32 = 0x00ee22;
/// ORCID placeholder used when the signed-in user has none
pub const DEFAULT_ORCID: &str = "0000-0000-0000-0000";

/// Annotation workflow configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationConfig {
    /// Scaffold URL features are stored against
    pub resource: String,
    /// RGB colour for rebuilt point-sets
    pub point_colour: u32,
    /// RGB colour for rebuilt line-sets
    pub line_colour: u32,
    /// ORCID written into the creator when the user has none
    pub default_orcid: String,
}

impl AnnotationConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_point_colour(mut self, colour: u32) -> Self {
        self.point_colour = colour;
        self
    }

    pub fn with_line_colour(mut self, colour: u32) -> Self {
        self.line_colour = colour;
        self
    }

    pub fn with_default_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.default_orcid = orcid.into();
        self
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            resource: String::new(),
            point_colour: DEFAULT_POINT_COLOUR,
            line_colour: DEFAULT_LINE_COLOUR,
            default_orcid: DEFAULT_ORCID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AnnotationConfig::from_json(r#"{"resource": "scaffold.json", "lineColour": 255}"#)
                .unwrap();
        assert_eq!(config.resource, "scaffold.json");
        assert_eq!(config.line_colour, 255);
        assert_eq!(config.point_colour, DEFAULT_POINT_COLOUR);
        assert_eq!(config.default_orcid, DEFAULT_ORCID);
    }

    #[test]
    fn test_invalid_json() {
        assert!(AnnotationConfig::from_json("{not json").is_err());
    }
}

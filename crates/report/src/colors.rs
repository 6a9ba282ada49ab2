use std::collections::HashMap;

use thiserror::Error;

/// Color handed to chart renderers for categories absent from the map.
pub const DEFAULT_COLOR: &str = "orange";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a mapping of category names to color strings")]
    ExpectedMapping,
    #[error("color for category {category} must be a string")]
    ExpectedString { category: String },
}

/// Category -> color spec mapping consumed by chart renderers. Validated at
/// load; lookups never fail.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(entries) = value else {
            return Err(ConfigError::ExpectedMapping);
        };

        let mut colors = HashMap::with_capacity(entries.len());
        for (category, color) in entries {
            let serde_json::Value::String(color) = color else {
                return Err(ConfigError::ExpectedString { category });
            };
            colors.insert(category, color);
        }
        Ok(ColorMap { colors })
    }

    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }
}

use thiserror::Error;

use crate::normalize::normalize;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("expected a mapping at {path}")]
    ExpectedMapping { path: String },
    #[error("expected a list of keyword strings at {path}")]
    ExpectedKeywords { path: String },
    #[error("empty keyword under {category}/{subcategory} would match every transaction")]
    EmptyKeyword {
        category: String,
        subcategory: String,
    },
}

/// One flattened rule. `keyword` is stored pre-normalized; matching never
/// normalizes keywords again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: String,
    pub subcategory: String,
    pub keyword: String,
}

/// Ordered rule list flattened from the nested config mapping
/// (broad category -> subcategory -> keywords). The flattening order is the
/// file order, and it is the traversal order of the classifier, so the
/// first keyword listed wins whenever several could match.
#[derive(Debug, Clone, Default)]
pub struct CategoryRuleSet {
    rules: Vec<CategoryRule>,
}

impl CategoryRuleSet {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(categories) = value else {
            return Err(ConfigError::ExpectedMapping {
                path: "top level".to_string(),
            });
        };

        let mut set = CategoryRuleSet::default();
        for (category, subcategories) in &categories {
            let serde_json::Value::Object(subcategories) = subcategories else {
                return Err(ConfigError::ExpectedMapping {
                    path: category.clone(),
                });
            };
            for (subcategory, keywords) in subcategories {
                let serde_json::Value::Array(keywords) = keywords else {
                    return Err(ConfigError::ExpectedKeywords {
                        path: format!("{category}.{subcategory}"),
                    });
                };
                for keyword in keywords {
                    let serde_json::Value::String(keyword) = keyword else {
                        return Err(ConfigError::ExpectedKeywords {
                            path: format!("{category}.{subcategory}"),
                        });
                    };
                    set.push(category, subcategory, keyword)?;
                }
            }
        }
        Ok(set)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = toml::from_str(raw)?;
        let toml::Value::Table(categories) = value else {
            return Err(ConfigError::ExpectedMapping {
                path: "top level".to_string(),
            });
        };

        let mut set = CategoryRuleSet::default();
        for (category, subcategories) in &categories {
            let toml::Value::Table(subcategories) = subcategories else {
                return Err(ConfigError::ExpectedMapping {
                    path: category.clone(),
                });
            };
            for (subcategory, keywords) in subcategories {
                let toml::Value::Array(keywords) = keywords else {
                    return Err(ConfigError::ExpectedKeywords {
                        path: format!("{category}.{subcategory}"),
                    });
                };
                for keyword in keywords {
                    let toml::Value::String(keyword) = keyword else {
                        return Err(ConfigError::ExpectedKeywords {
                            path: format!("{category}.{subcategory}"),
                        });
                    };
                    set.push(category, subcategory, keyword)?;
                }
            }
        }
        Ok(set)
    }

    fn push(&mut self, category: &str, subcategory: &str, keyword: &str) -> Result<(), ConfigError> {
        let keyword = normalize(keyword);
        if keyword.is_empty() {
            return Err(ConfigError::EmptyKeyword {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            });
        }
        self.rules.push(CategoryRule {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            keyword,
        });
        Ok(())
    }

    /// Rules in traversal order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

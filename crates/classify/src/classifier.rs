use grosz_core::Transaction;

use crate::normalize::normalize_opt;
use crate::rules::CategoryRuleSet;

/// Category reported for transactions no keyword matched.
pub const UNCLASSIFIED: &str = "NIEZAKWALIFIKOWANE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Matched {
        category: String,
        subcategory: String,
    },
    Unmatched,
}

impl Classification {
    pub fn category(&self) -> &str {
        match self {
            Classification::Matched { category, .. } => category,
            Classification::Unmatched => UNCLASSIFIED,
        }
    }

    pub fn subcategory(&self) -> Option<&str> {
        match self {
            Classification::Matched { subcategory, .. } => Some(subcategory),
            Classification::Unmatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Classification::Matched { .. })
    }
}

/// Classify one transaction against the rule set.
///
/// The three text fields are normalized independently; a rule matches when
/// its keyword is a substring of any of them. Rules are scanned in the rule
/// set's fixed order and the first match wins.
pub fn classify(tx: &Transaction, rules: &CategoryRuleSet) -> Classification {
    let description = normalize_opt(tx.description.as_deref());
    let location = normalize_opt(tx.location.as_deref());
    let operation = normalize_opt(tx.operation.as_deref());

    for rule in rules.rules() {
        if description.contains(&rule.keyword)
            || location.contains(&rule.keyword)
            || operation.contains(&rule.keyword)
        {
            return Classification::Matched {
                category: rule.category.clone(),
                subcategory: rule.subcategory.clone(),
            };
        }
    }

    Classification::Unmatched
}

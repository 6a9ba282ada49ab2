pub mod classifier;
pub mod normalize;
pub mod rules;

pub use classifier::{classify, Classification, UNCLASSIFIED};
pub use normalize::normalize;
pub use rules::{CategoryRule, CategoryRuleSet, ConfigError};

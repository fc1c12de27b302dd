//! The validated policy model
//!
//! A policy describes what to check in a result artifact, how many points each
//! requirement is worth, and how the final percentage maps to a rating.
//!
//! # Implementation Model
//!
//! Policy files (JSON, TOML, or YAML) are first parsed into a generic
//! [`serde_json::Value`], then deserialized into private raw shapes that reject
//! unknown properties, and finally turned into immutable definitions by
//! [`Configuration::from_json`]. Construction checks, in order:
//!
//! 1. Named selectors, with ids unique across selectors, rules, and groups
//! 2. Rules: at least one enabled check, non-negative points, resolvable selector references
//! 3. Groups: a non-empty list of distinct, existing rule ids
//! 4. Ratings: a value within `[0, 100]` and a unique name
//! 5. At least one enabled rule and at least one enabled group
//!
//! The first violation is returned as a [`ValidationError`] and nothing else is built.
//!
//! Collections keep their declaration order because it drives FIRST/LAST group
//! scoring and rating selection.

mod configuration;
mod format;
mod group_definition;
mod rating_definition;
mod raw;
mod rule_definition;
mod selector_definition;
mod validation_error;

pub use configuration::{Configuration, DEFAULT_POLICY_JSON};
pub use format::PolicyFormat;
pub use group_definition::{GroupDefinition, PointsSource};
pub use rating_definition::RatingDefinition;
pub use rule_definition::{CheckDefinition, RuleDefinition};
pub use selector_definition::SelectorDefinition;
pub use validation_error::{IdKind, ValidationError};

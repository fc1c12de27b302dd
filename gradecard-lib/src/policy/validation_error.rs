use strum::Display;

/// The kind of policy element owning an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IdKind {
    Selector,
    Rule,
    Group,
}

/// Reasons a policy configuration is rejected before any evaluation can run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("some other {kind} shares the same ID: '{id}'. IDs must be unique")]
    DuplicateId { kind: IdKind, id: String },

    #[error("property 'points' of rule '{rule}' must be a non-negative integer, got {points}")]
    NegativePoints { rule: String, points: i64 },

    #[error("property 'checks' of rule '{rule}' must contain at least one enabled check definition")]
    NoEnabledCheck { rule: String },

    #[error("check #{index} of rule '{rule}' is ambiguous: exactly one of 'selector' or 'selectorId' must be given")]
    AmbiguousSelector { rule: String, index: usize },

    #[error("rule '{rule}' references unknown selector '{selector}'")]
    UnknownSelector { rule: String, selector: String },

    #[error("property 'rules' of group '{group}' must contain at least one value")]
    EmptyGroup { group: String },

    #[error("property 'rules' of group '{group}' must contain distinct values, but '{rule}' is listed more than once")]
    DuplicateGroupRule { group: String, rule: String },

    #[error("group '{group}' references unknown rule '{rule}'")]
    UnknownRule { group: String, rule: String },

    #[error("group '{group}' has unknown points source '{value}', expected one of 'first', 'last' or 'all'")]
    InvalidPointsSource { group: String, value: String },

    #[error("property 'value' of rating '{rating}' must be within [0, 100], got {value}")]
    RatingOutOfRange { rating: String, value: f64 },

    #[error("some other rating shares the same name: '{0}'. Rating names must be unique")]
    DuplicateRating(String),

    #[error("configuration must contain at least one enabled rule")]
    NoEnabledRule,

    #[error("configuration must contain at least one enabled and non-empty group")]
    NoEnabledGroup,
}

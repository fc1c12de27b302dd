use super::ValidationError;
use super::raw::{RawGroup, non_blank};
use serde::Serialize;
use std::collections::HashSet;
use strum::{Display, EnumString};

/// How the points of a group's rules combine into the group's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PointsSource {
    /// Points of the first passed rule, out of the largest rule value.
    #[default]
    First,

    /// Points of the last passed rule, out of the largest rule value.
    Last,

    /// Sum of all passed rules, out of the sum of all rule values.
    All,
}

/// A named, ordered bundle of rule references sharing one scoring policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDefinition {
    id: String,
    name: Option<String>,
    description: Option<String>,
    rule_ids: Vec<String>,
    enabled: bool,
    points_source: PointsSource,
}

impl GroupDefinition {
    /// Creates a group over the given rule ids.
    ///
    /// # Errors
    ///
    /// Fails when the rule list is empty or names a rule twice.
    pub fn new(id: impl Into<String>, rule_ids: Vec<String>, points_source: PointsSource) -> Result<Self, ValidationError> {
        let id = id.into();
        if rule_ids.is_empty() {
            return Err(ValidationError::EmptyGroup { group: id });
        }

        let mut seen = HashSet::with_capacity(rule_ids.len());
        for rule in &rule_ids {
            if !seen.insert(rule.as_str()) {
                return Err(ValidationError::DuplicateGroupRule {
                    group: id,
                    rule: rule.clone(),
                });
            }
        }

        Ok(Self {
            id,
            name: None,
            description: None,
            rule_ids,
            enabled: true,
            points_source,
        })
    }

    pub(super) fn from_raw(raw: RawGroup) -> Result<Self, ValidationError> {
        let points_source = match raw.points_source {
            None => PointsSource::default(),
            Some(value) => match value.trim().parse() {
                Ok(source) => source,
                Err(_) => return Err(ValidationError::InvalidPointsSource { group: raw.id, value }),
            },
        };

        let mut group = Self::new(raw.id, raw.rules, points_source)?;
        group.name = non_blank(raw.name);
        group.description = non_blank(raw.description);
        group.enabled = raw.enabled;
        Ok(group)
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name when one was given, the id otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Ids of the referenced rules, in declaration order.
    #[must_use]
    pub fn rule_ids(&self) -> &[String] {
        &self.rule_ids
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn points_source(&self) -> PointsSource {
        self.points_source
    }
}

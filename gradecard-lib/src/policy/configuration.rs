use super::raw::RawConfiguration;
use super::{GroupDefinition, IdKind, PolicyFormat, RatingDefinition, RuleDefinition, SelectorDefinition, ValidationError};
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;

const LOG_TARGET: &str = "    policy";

/// A default, valid policy, embedded from `default_policy.json`
pub const DEFAULT_POLICY_JSON: &str = include_str!("../../default_policy.json");

/// The complete, validated policy.
///
/// Every collection keeps declaration order for iteration and an id index for lookup.
#[derive(Debug, Clone)]
pub struct Configuration {
    version: u32,
    selectors: Vec<SelectorDefinition>,
    rules: Vec<RuleDefinition>,
    rule_index: HashMap<String, usize>,
    groups: Vec<GroupDefinition>,
    group_index: HashMap<String, usize>,
    ratings: Vec<RatingDefinition>,
}

impl Configuration {
    /// Builds the policy model from a generic JSON value.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found. No partially built configuration is ever returned.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let raw = RawConfiguration::deserialize(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Builds the policy model from definitions constructed in code.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found among the cross-references.
    pub fn new(
        rules: impl IntoIterator<Item = RuleDefinition>,
        groups: impl IntoIterator<Item = GroupDefinition>,
        ratings: impl IntoIterator<Item = RatingDefinition>,
    ) -> Result<Self, ValidationError> {
        let mut builder = Builder::default();
        for rule in rules {
            builder.add_rule(rule)?;
        }
        for group in groups {
            builder.add_group(group)?;
        }
        for rating in ratings {
            builder.add_rating(rating)?;
        }
        builder.build(1)
    }

    /// Reads, parses, and validates a policy file.
    ///
    /// The text format is chosen from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading policy file '{path}'"))?;
        let value = PolicyFormat::from_path(path).parse(&text, path.as_str())?;
        let config = Self::from_json(&value).into_app_err_with(|| format!("validating policy file '{path}'"))?;

        log::debug!(
            target: LOG_TARGET,
            "Loaded policy '{path}' (version {}, {} rule(s), {} group(s), {} rating(s))",
            config.version,
            config.rules.len(),
            config.groups.len(),
            config.ratings.len()
        );

        Ok(config)
    }

    fn from_raw(raw: RawConfiguration) -> Result<Self, ValidationError> {
        let mut builder = Builder::default();

        for selector in raw.selectors {
            builder.add_selector(SelectorDefinition::new(selector.id, selector.expression))?;
        }

        let expressions: HashMap<String, String> = builder
            .selectors
            .iter()
            .map(|s| (s.id().to_string(), s.expression().to_string()))
            .collect();

        for rule in raw.rules {
            builder.add_rule(RuleDefinition::from_raw(rule, &expressions)?)?;
        }

        for group in raw.groups {
            builder.add_group(GroupDefinition::from_raw(group)?)?;
        }

        for rating in raw.ratings {
            builder.add_rating(RatingDefinition::from_raw(rating)?)?;
        }

        let version = raw.version.unwrap_or(1).max(1);
        builder.build(u32::try_from(version).unwrap_or(u32::MAX))
    }

    /// The policy version, never lower than 1.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn selectors(&self) -> &[SelectorDefinition] {
        &self.selectors
    }

    /// All rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, id: &str) -> Option<&RuleDefinition> {
        self.rule_index.get(id).map(|&index| &self.rules[index])
    }

    /// All groups, in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[GroupDefinition] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&GroupDefinition> {
        self.group_index.get(id).map(|&index| &self.groups[index])
    }

    /// All ratings, in declaration order.
    #[must_use]
    pub fn ratings(&self) -> &[RatingDefinition] {
        &self.ratings
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let value: Value = serde_json::from_str(DEFAULT_POLICY_JSON).expect("default_policy.json should be valid JSON");
        Self::from_json(&value).expect("default_policy.json should be a valid policy")
    }
}

/// Accumulates definitions while enforcing the id rules shared by every section.
#[derive(Debug, Default)]
struct Builder {
    ids: HashMap<String, IdKind>,
    selectors: Vec<SelectorDefinition>,
    rules: Vec<RuleDefinition>,
    rule_index: HashMap<String, usize>,
    groups: Vec<GroupDefinition>,
    group_index: HashMap<String, usize>,
    ratings: Vec<RatingDefinition>,
}

impl Builder {
    fn claim_id(&mut self, kind: IdKind, id: &str) -> Result<(), ValidationError> {
        match self.ids.entry(id.to_string()) {
            Entry::Occupied(_) => Err(ValidationError::DuplicateId { kind, id: id.to_string() }),
            Entry::Vacant(entry) => {
                let _ = entry.insert(kind);
                Ok(())
            }
        }
    }

    fn add_selector(&mut self, selector: SelectorDefinition) -> Result<(), ValidationError> {
        self.claim_id(IdKind::Selector, selector.id())?;
        self.selectors.push(selector);
        Ok(())
    }

    fn add_rule(&mut self, rule: RuleDefinition) -> Result<(), ValidationError> {
        self.claim_id(IdKind::Rule, rule.id())?;
        let _ = self.rule_index.insert(rule.id().to_string(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    fn add_group(&mut self, group: GroupDefinition) -> Result<(), ValidationError> {
        if let Some(unknown) = group.rule_ids().iter().find(|id| !self.rule_index.contains_key(id.as_str())) {
            return Err(ValidationError::UnknownRule {
                group: group.id().to_string(),
                rule: unknown.clone(),
            });
        }

        self.claim_id(IdKind::Group, group.id())?;
        let _ = self.group_index.insert(group.id().to_string(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    fn add_rating(&mut self, rating: RatingDefinition) -> Result<(), ValidationError> {
        if self.ratings.iter().any(|r| r.name() == rating.name()) {
            return Err(ValidationError::DuplicateRating(rating.name().to_string()));
        }

        self.ratings.push(rating);
        Ok(())
    }

    fn build(self, version: u32) -> Result<Configuration, ValidationError> {
        if !self.rules.iter().any(RuleDefinition::is_enabled) {
            return Err(ValidationError::NoEnabledRule);
        }

        if !self.groups.iter().any(|g| g.is_enabled() && !g.rule_ids().is_empty()) {
            return Err(ValidationError::NoEnabledGroup);
        }

        Ok(Configuration {
            version,
            selectors: self.selectors,
            rules: self.rules,
            rule_index: self.rule_index,
            groups: self.groups,
            group_index: self.group_index,
            ratings: self.ratings,
        })
    }
}

use super::ValidationError;
use super::raw::{RawCheck, RawRule, non_blank};
use std::collections::HashMap;

/// One selector and condition pair inside a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDefinition {
    index: usize,
    selector: String,
    selector_id: Option<String>,
    condition: String,
    enabled: bool,
    display_value: bool,
}

impl CheckDefinition {
    #[must_use]
    pub const fn new(index: usize, selector: String, condition: String, enabled: bool, display_value: bool) -> Self {
        Self {
            index,
            selector,
            selector_id: None,
            condition,
            enabled,
            display_value,
        }
    }

    fn from_raw(rule: &str, index: usize, raw: RawCheck, selectors: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let (selector, selector_id) = match (raw.selector, raw.selector_id) {
            (Some(selector), None) => (selector, None),
            (None, Some(id)) => {
                let Some(expression) = selectors.get(id.as_str()) else {
                    return Err(ValidationError::UnknownSelector {
                        rule: rule.to_string(),
                        selector: id,
                    });
                };
                (expression.clone(), Some(id))
            }
            _ => {
                return Err(ValidationError::AmbiguousSelector {
                    rule: rule.to_string(),
                    index,
                });
            }
        };

        Ok(Self {
            index,
            selector,
            selector_id,
            condition: raw.condition,
            enabled: raw.enabled,
            display_value: raw.display_value,
        })
    }

    /// Position of this check within its rule, in declaration order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The selector expression, with any named selector reference already resolved.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The id of the named selector this check referenced, if any.
    #[must_use]
    pub fn selector_id(&self) -> Option<&str> {
        self.selector_id.as_deref()
    }

    #[must_use]
    pub fn condition(&self) -> &str {
        &self.condition
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the selected value is kept in the check result.
    #[must_use]
    pub const fn display_value(&self) -> bool {
        self.display_value
    }
}

/// An atomic, independently scored requirement made of one or more checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    id: String,
    name: Option<String>,
    description: Option<String>,
    enabled: bool,
    fails_test: bool,
    negate_result: bool,
    points: u64,
    success_message: Option<String>,
    fail_message: Option<String>,
    checks: Vec<CheckDefinition>,
}

impl RuleDefinition {
    /// Creates a rule from already-built checks.
    ///
    /// # Errors
    ///
    /// Fails when no check is enabled.
    pub fn new(id: impl Into<String>, points: u64, checks: Vec<CheckDefinition>) -> Result<Self, ValidationError> {
        let id = id.into();
        if !checks.iter().any(CheckDefinition::is_enabled) {
            return Err(ValidationError::NoEnabledCheck { rule: id });
        }

        Ok(Self {
            id,
            name: None,
            description: None,
            enabled: true,
            fails_test: false,
            negate_result: false,
            points,
            success_message: None,
            fail_message: None,
            checks,
        })
    }

    pub(super) fn from_raw(raw: RawRule, selectors: &HashMap<String, String>) -> Result<Self, ValidationError> {
        let checks = raw
            .checks
            .into_iter()
            .enumerate()
            .map(|(index, check)| CheckDefinition::from_raw(&raw.id, index, check, selectors))
            .collect::<Result<Vec<_>, _>>()?;

        let Ok(points) = u64::try_from(raw.points) else {
            return Err(ValidationError::NegativePoints {
                rule: raw.id,
                points: raw.points,
            });
        };

        let mut rule = Self::new(raw.id, points, checks)?;
        rule.name = non_blank(raw.name);
        rule.description = non_blank(raw.description);
        rule.enabled = raw.enabled;
        rule.fails_test = raw.fails_test;
        rule.negate_result = raw.negate_result;
        rule.success_message = non_blank(raw.messages.success);
        rule.fail_message = non_blank(raw.messages.fail);
        Ok(rule)
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_fails_test(mut self, fails_test: bool) -> Self {
        self.fails_test = fails_test;
        self
    }

    #[must_use]
    pub fn with_negate_result(mut self, negate_result: bool) -> Self {
        self.negate_result = negate_result;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, success: Option<String>, fail: Option<String>) -> Self {
        self.success_message = non_blank(success);
        self.fail_message = non_blank(fail);
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

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a failure of this rule fails the whole test run.
    #[must_use]
    pub const fn fails_test(&self) -> bool {
        self.fails_test
    }

    /// Whether PASSED and FAILED swap after the rule is concluded.
    #[must_use]
    pub const fn negate_result(&self) -> bool {
        self.negate_result
    }

    /// The points granted when the rule passes.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    #[must_use]
    pub fn fail_message(&self) -> Option<&str> {
        self.fail_message.as_deref()
    }

    #[must_use]
    pub fn checks(&self) -> &[CheckDefinition] {
        &self.checks
    }
}

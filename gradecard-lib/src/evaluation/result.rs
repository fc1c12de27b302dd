//! The scored result tree.
//!
//! Results are assembled bottom-up by the evaluator and are immutable afterwards. Each
//! node borrows the policy definition it was produced from.

use super::{GroupScore, RuleConclusion, Status, aggregate_group, conclude_rule, points_percentage, select_rating};
use crate::policy::{CheckDefinition, GroupDefinition, RatingDefinition, RuleDefinition};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The outcome of evaluating one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult<'c> {
    definition: &'c CheckDefinition,
    status: Status,
    error_message: Option<String>,
    value: Option<String>,
}

impl<'c> CheckResult<'c> {
    #[must_use]
    pub const fn new(definition: &'c CheckDefinition, status: Status, error_message: Option<String>, value: Option<String>) -> Self {
        Self {
            definition,
            status,
            error_message,
            value,
        }
    }

    /// A check that was not evaluated.
    #[must_use]
    pub const fn skipped(definition: &'c CheckDefinition) -> Self {
        Self::new(definition, Status::Skipped, None, None)
    }

    #[must_use]
    pub const fn definition(&self) -> &'c CheckDefinition {
        self.definition
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.definition.index()
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The string value of the selected item, kept only when the check displays values.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// The outcome of one rule reference inside a group.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult<'c> {
    definition: &'c RuleDefinition,
    enabled: bool,
    status: Status,
    message: Option<String>,
    points: u64,
    checks: Vec<CheckResult<'c>>,
}

impl<'c> RuleResult<'c> {
    #[must_use]
    pub fn new(definition: &'c RuleDefinition, enabled: bool, conclusion: RuleConclusion, checks: Vec<CheckResult<'c>>) -> Self {
        Self {
            definition,
            enabled,
            status: conclusion.status,
            message: conclusion.message,
            points: conclusion.points,
            checks,
        }
    }

    /// Concludes a rule from its check results. A disabled rule stays skipped.
    #[must_use]
    pub fn conclude(definition: &'c RuleDefinition, enabled: bool, checks: Vec<CheckResult<'c>>) -> Self {
        let conclusion = if enabled {
            conclude_rule(definition, &checks)
        } else {
            RuleConclusion::default()
        };

        Self::new(definition, enabled, conclusion, checks)
    }

    #[must_use]
    pub const fn definition(&self) -> &'c RuleDefinition {
        self.definition
    }

    #[must_use]
    pub fn id(&self) -> &'c str {
        self.definition.id()
    }

    /// Whether both the rule and its group are enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Achieved points, non-zero only for passed rules.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub fn checks(&self) -> &[CheckResult<'c>] {
        &self.checks
    }
}

/// The scored outcome of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupResult<'c> {
    definition: &'c GroupDefinition,
    points: u64,
    total_points: u64,
    messages: Vec<String>,
    rules: Vec<RuleResult<'c>>,
}

impl<'c> GroupResult<'c> {
    /// Scores a group from its rule results.
    #[must_use]
    pub fn conclude(definition: &'c GroupDefinition, rules: Vec<RuleResult<'c>>) -> Self {
        let GroupScore {
            points,
            total_points,
            messages,
        } = aggregate_group(definition, &rules);

        Self {
            definition,
            points,
            total_points,
            messages,
            rules,
        }
    }

    #[must_use]
    pub const fn definition(&self) -> &'c GroupDefinition {
        self.definition
    }

    #[must_use]
    pub fn id(&self) -> &'c str {
        self.definition.id()
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub const fn total_points(&self) -> u64 {
        self.total_points
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleResult<'c>] {
        &self.rules
    }
}

/// The top-level scored outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult<'c> {
    points: u64,
    total_points: u64,
    points_percentage: f64,
    test_failed: bool,
    rating: Option<&'c RatingDefinition>,
    groups: Vec<GroupResult<'c>>,
}

impl<'c> EvaluationResult<'c> {
    /// Totals the group scores and picks a rating.
    ///
    /// `test_failed` carries failures of `failsTest` rules; the selected rating may add to it.
    #[must_use]
    pub fn conclude(groups: Vec<GroupResult<'c>>, ratings: &'c [RatingDefinition], test_failed: bool) -> Self {
        let points: u64 = groups.iter().map(GroupResult::points).sum();
        let total_points: u64 = groups.iter().map(GroupResult::total_points).sum();
        let points_percentage = points_percentage(points, total_points);
        let rating = select_rating(ratings, points_percentage);

        Self {
            points,
            total_points,
            points_percentage,
            test_failed: test_failed || rating.is_some_and(RatingDefinition::fails_test),
            rating,
            groups,
        }
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub const fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Achieved points in percent of the total, with one decimal place.
    #[must_use]
    pub const fn points_percentage(&self) -> f64 {
        self.points_percentage
    }

    #[must_use]
    pub const fn test_failed(&self) -> bool {
        self.test_failed
    }

    #[must_use]
    pub const fn rating(&self) -> Option<&'c RatingDefinition> {
        self.rating
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupResult<'c>] {
        &self.groups
    }
}

/// Either a scored result, or the reason no score could be computed.
///
/// An error is never reported as a zero score.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation<'c> {
    Completed(EvaluationResult<'c>),
    Error(String),
}

impl Evaluation<'_> {
    /// Creates an erroneous evaluation from an application error and its context chain.
    #[must_use]
    pub fn from_error(error: &ohno::AppError) -> Self {
        Self::Error(error_chain(&error.to_string()))
    }

    #[must_use]
    pub const fn result(&self) -> Option<&EvaluationResult<'_>> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Error(message) => Some(message),
        }
    }

    /// Whether the run counts as failed: a `failsTest` rule failed, the rating fails the
    /// test, or no score could be computed at all.
    #[must_use]
    pub const fn test_failed(&self) -> bool {
        match self {
            Self::Completed(result) => result.test_failed,
            Self::Error(_) => true,
        }
    }
}

/// Flattens a multi-line error report into `message -> context -> context`.
fn error_chain(report: &str) -> String {
    let report = report.split("\nBacktrace:").next().unwrap_or(report);
    report
        .lines()
        .map(|line| line.trim_start_matches('>').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Serialize for CheckResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Check", 6)?;
        state.serialize_field("index", &self.index())?;
        state.serialize_field("selector", self.definition.selector())?;
        state.serialize_field("condition", self.definition.condition())?;
        state.serialize_field("status", &self.status)?;
        if let Some(message) = &self.error_message {
            state.serialize_field("errorMessage", message)?;
        }
        if let Some(value) = &self.value {
            state.serialize_field("value", value)?;
        }
        state.end()
    }
}

impl Serialize for RuleResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Rule", 7)?;
        state.serialize_field("id", self.id())?;
        if let Some(name) = self.definition.name() {
            state.serialize_field("name", name)?;
        }
        state.serialize_field("enabled", &self.enabled)?;
        state.serialize_field("status", &self.status)?;
        if let Some(message) = &self.message {
            state.serialize_field("message", message)?;
        }
        state.serialize_field("points", &self.points)?;
        state.serialize_field("checks", &self.checks)?;
        state.end()
    }
}

impl Serialize for GroupResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Group", 8)?;
        state.serialize_field("id", self.id())?;
        if let Some(name) = self.definition.name() {
            state.serialize_field("name", name)?;
        }
        state.serialize_field("enabled", &self.definition.is_enabled())?;
        state.serialize_field("pointsSource", &self.definition.points_source())?;
        state.serialize_field("points", &self.points)?;
        state.serialize_field("totalPoints", &self.total_points)?;
        state.serialize_field("messages", &self.messages)?;
        state.serialize_field("rules", &self.rules)?;
        state.end()
    }
}

impl Serialize for EvaluationResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Result", 6)?;
        state.serialize_field("points", &self.points)?;
        state.serialize_field("totalPoints", &self.total_points)?;
        state.serialize_field("pointsPercentage", &self.points_percentage)?;
        state.serialize_field("testFailed", &self.test_failed)?;
        if let Some(rating) = self.rating {
            state.serialize_field("rating", rating.name())?;
        }
        state.serialize_field("groups", &self.groups)?;
        state.end()
    }
}

impl Serialize for Evaluation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Completed(result) => result.serialize(serializer),
            Self::Error(message) => {
                let mut state = serializer.serialize_struct("Evaluation", 1)?;
                state.serialize_field("error", message)?;
                state.end()
            }
        }
    }
}

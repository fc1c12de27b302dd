//! Walks a policy against a parsed artifact and scores the outcome.

use super::{CheckResult, EvaluationResult, GroupResult, RuleResult, SelectedItem, Selector, Status};
use crate::policy::{CheckDefinition, Configuration, GroupDefinition, RuleDefinition};
use std::borrow::Cow;

const LOG_TARGET: &str = "evaluation";

/// Evaluates every group, rule, and check of `config`, in declaration order.
///
/// Check-level problems are recorded as [`Status::Error`] in the result tree and never
/// abort the evaluation.
#[must_use]
pub fn evaluate<'c, S: Selector>(config: &'c Configuration, selector: &S) -> EvaluationResult<'c> {
    let mut test_failed = false;

    let groups: Vec<_> = config
        .groups()
        .iter()
        .map(|group| evaluate_group(config, group, selector, &mut test_failed))
        .collect();

    let result = EvaluationResult::conclude(groups, config.ratings(), test_failed);

    log::info!(
        target: LOG_TARGET,
        "Scored {} of {} point(s) ({:.1}%), rating {}, test {}",
        result.points(),
        result.total_points(),
        result.points_percentage(),
        result.rating().map_or("<none>", |r| r.name()),
        if result.test_failed() { "failed" } else { "passed" }
    );

    result
}

fn evaluate_group<'c, S: Selector>(
    config: &'c Configuration,
    group: &'c GroupDefinition,
    selector: &S,
    test_failed: &mut bool,
) -> GroupResult<'c> {
    let mut rules = Vec::with_capacity(group.rule_ids().len());

    for rule_id in group.rule_ids() {
        // group references are checked when the configuration is built
        let Some(definition) = config.rule(rule_id) else {
            continue;
        };

        let rule = evaluate_rule(definition, group.is_enabled(), selector);
        if rule.status().is_failed() && definition.fails_test() {
            log::debug!(target: LOG_TARGET, "Rule '{rule_id}' failed the test");
            *test_failed = true;
        }

        rules.push(rule);
    }

    let group_result = GroupResult::conclude(group, rules);
    log::debug!(
        target: LOG_TARGET,
        "Group '{}' scored {} of {} point(s)",
        group.id(),
        group_result.points(),
        group_result.total_points()
    );

    group_result
}

fn evaluate_rule<'c, S: Selector>(definition: &'c RuleDefinition, group_enabled: bool, selector: &S) -> RuleResult<'c> {
    let enabled = group_enabled && definition.is_enabled();
    let mut checks = Vec::with_capacity(definition.checks().len());
    let mut errored = false;

    for check in definition.checks() {
        if errored || !enabled || !check.is_enabled() {
            checks.push(CheckResult::skipped(check));
            continue;
        }

        let result = evaluate_check(check, selector);
        if let Some(message) = result.error_message() {
            log::debug!(
                target: LOG_TARGET,
                "Check #{} of rule '{}' could not be evaluated: {message}",
                check.index(),
                definition.id()
            );
            errored = true;
        }

        checks.push(result);
    }

    let rule = RuleResult::conclude(definition, enabled, checks);
    log::debug!(target: LOG_TARGET, "Rule '{}' concluded as {}", definition.id(), rule.status());
    rule
}

/// Resolves the check's selector to exactly one item and tests its condition against it.
pub fn evaluate_check<'c, S: Selector>(definition: &'c CheckDefinition, selector: &S) -> CheckResult<'c> {
    let expression = definition.selector();

    let items = match selector.select(expression) {
        Ok(items) => items,
        Err(e) => return CheckResult::new(definition, Status::Error, Some(e.to_string()), None),
    };

    let item = match items.as_slice() {
        [item] => item,
        [] => {
            return CheckResult::new(
                definition,
                Status::Error,
                Some(format!("No item found for selector '{expression}'")),
                None,
            );
        }
        many => {
            return CheckResult::new(
                definition,
                Status::Error,
                Some(format!("Selector must match a single item but found {} items instead", many.len())),
                None,
            );
        }
    };

    let Some(value) = item.string_value() else {
        return CheckResult::new(
            definition,
            Status::Error,
            Some("Selected item is neither a node nor an atomic value".to_string()),
            None,
        );
    };

    let status = if test_condition(definition.condition(), item, selector) {
        Status::Passed
    } else {
        Status::Failed
    };

    let value = definition.display_value().then(|| value.to_string());
    CheckResult::new(definition, status, None, value)
}

/// Evaluates a condition as a boolean, treating any failure as `false`.
fn test_condition<S: Selector>(condition: &str, item: &SelectedItem<S::Node>, selector: &S) -> bool {
    let condition = normalize_condition(condition);
    match selector.test(&condition, item) {
        Ok(matches) => matches,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Condition '{condition}' counts as false: {e}");
            false
        }
    }
}

/// Trims the condition and makes a leading comparison operator apply to the selected item.
#[must_use]
pub fn normalize_condition(condition: &str) -> Cow<'_, str> {
    let trimmed = condition.trim();
    if ["=", "<", ">", "!="].iter().any(|op| trimmed.starts_with(op)) {
        Cow::Owned(format!(". {trimmed}"))
    } else {
        Cow::Borrowed(trimmed)
    }
}

//! Pure reductions from child results to a parent's status and points.

use super::{CheckResult, RuleResult, Status};
use crate::policy::{GroupDefinition, PointsSource, RatingDefinition, RuleDefinition};

/// What a rule amounts to once all its checks are known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleConclusion {
    pub status: Status,
    pub message: Option<String>,
    pub points: u64,
}

/// Reduces the results of a rule's checks, in declaration order.
///
/// Skipped checks are ignored. The first evaluated status is kept until a check does
/// not pass, in which case that check's status wins. An erroring check ends the scan
/// and its error message becomes the rule's message. Negated rules swap PASSED and
/// FAILED before messages and points are assigned.
#[must_use]
pub fn conclude_rule(definition: &RuleDefinition, checks: &[CheckResult<'_>]) -> RuleConclusion {
    let mut last_status: Option<Status> = None;
    let mut message = None;

    for check in checks {
        let status = check.status();
        if status.is_skipped() {
            continue;
        }

        if last_status.is_none() || !status.is_passed() {
            last_status = Some(status);
            if status.is_error() {
                message = check.error_message().map(str::to_string);
                break;
            }
        }
    }

    let Some(mut status) = last_status else {
        return RuleConclusion::default();
    };

    if definition.negate_result() {
        status = status.negate();
    }

    match status {
        Status::Passed => RuleConclusion {
            status,
            message: definition.success_message().map(str::to_string),
            points: definition.points(),
        },
        Status::Failed => RuleConclusion {
            status,
            message: definition.fail_message().map(str::to_string),
            points: 0,
        },
        Status::Error | Status::Skipped => RuleConclusion { status, message, points: 0 },
    }
}

/// The score of one group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupScore {
    pub points: u64,
    pub total_points: u64,
    pub messages: Vec<String>,
}

/// Combines the points of a group's rules according to its points source.
///
/// Only enabled rules of an enabled group take part. A disabled group scores nothing.
#[must_use]
pub fn aggregate_group(definition: &GroupDefinition, rules: &[RuleResult<'_>]) -> GroupScore {
    if !definition.is_enabled() {
        return GroupScore::default();
    }

    let mut first_match = None;
    let mut last_match = None;
    let mut max_points: u64 = 0;
    let mut sum_points: u64 = 0;
    let mut sum_points_matching: u64 = 0;
    let mut messages = Vec::new();

    for rule in rules.iter().filter(|r| r.definition().is_enabled()) {
        let possible = rule.definition().points();
        max_points = max_points.max(possible);
        sum_points += possible;

        if rule.status().is_passed() {
            if first_match.is_none() {
                first_match = Some(rule.points());
            }
            last_match = Some(rule.points());
            sum_points_matching += rule.points();

            if let Some(message) = rule.message() {
                messages.push(message.to_string());
            }
        }
    }

    match definition.points_source() {
        PointsSource::First => GroupScore {
            points: first_match.unwrap_or(0),
            total_points: max_points,
            messages: messages.into_iter().take(1).collect(),
        },
        PointsSource::Last => GroupScore {
            points: last_match.unwrap_or(0),
            total_points: max_points,
            messages: messages.pop().into_iter().collect(),
        },
        PointsSource::All => GroupScore {
            points: sum_points_matching,
            total_points: sum_points,
            messages,
        },
    }
}

/// The share of achieved points in percent, rounded half up to one decimal place.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "point totals stay far below 2^52")]
pub fn points_percentage(points: u64, total_points: u64) -> f64 {
    if total_points == 0 {
        return 0.0;
    }

    (points as f64 * 1000.0 / total_points as f64).round() / 10.0
}

/// Picks the first enabled rating, in declaration order, whose value is at least `percentage`.
#[must_use]
pub fn select_rating(ratings: &[RatingDefinition], percentage: f64) -> Option<&RatingDefinition> {
    ratings.iter().find(|r| r.is_enabled() && percentage <= r.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CheckDefinition;

    fn checks(count: usize) -> Vec<CheckDefinition> {
        (0..count)
            .map(|i| CheckDefinition::new(i, format!("/c{i}"), "= 1".to_string(), true, true))
            .collect()
    }

    fn rule(id: &str, points: u64) -> RuleDefinition {
        RuleDefinition::new(id, points, checks(1))
            .unwrap()
            .with_messages(Some(format!("{id} passed")), Some(format!("{id} failed")))
    }

    fn results<'c>(definitions: &'c [CheckDefinition], statuses: &[Status]) -> Vec<CheckResult<'c>> {
        definitions
            .iter()
            .zip(statuses)
            .map(|(definition, &status)| {
                let error = status.is_error().then(|| format!("check {} broke", definition.index()));
                CheckResult::new(definition, status, error, None)
            })
            .collect()
    }

    fn rule_result<'c>(definition: &'c RuleDefinition, status: Status) -> RuleResult<'c> {
        let conclusion = match status {
            Status::Passed => RuleConclusion {
                status,
                message: definition.success_message().map(str::to_string),
                points: definition.points(),
            },
            _ => RuleConclusion {
                status,
                message: None,
                points: 0,
            },
        };
        RuleResult::new(definition, true, conclusion, Vec::new())
    }

    #[test]
    fn test_all_passed() {
        let definition = rule("r", 7);
        let defs = checks(3);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Passed; 3]));
        assert_eq!(conclusion.status, Status::Passed);
        assert_eq!(conclusion.points, 7);
        assert_eq!(conclusion.message.as_deref(), Some("r passed"));
    }

    #[test]
    fn test_last_failure_wins() {
        let definition = rule("r", 7);
        let defs = checks(3);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Failed, Status::Passed, Status::Passed]));
        assert_eq!(conclusion.status, Status::Failed);
        assert_eq!(conclusion.points, 0);
        assert_eq!(conclusion.message.as_deref(), Some("r failed"));
    }

    #[test]
    fn test_error_short_circuits() {
        let definition = rule("r", 7);
        let defs = checks(3);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Passed, Status::Error, Status::Failed]));
        assert_eq!(conclusion.status, Status::Error);
        assert_eq!(conclusion.message.as_deref(), Some("check 1 broke"));
        assert_eq!(conclusion.points, 0);
    }

    #[test]
    fn test_failure_after_error_is_not_seen() {
        let definition = rule("r", 7);
        let defs = checks(2);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Error, Status::Failed]));
        assert_eq!(conclusion.status, Status::Error);
    }

    #[test]
    fn test_skipped_checks_are_ignored() {
        let definition = rule("r", 4);
        let defs = checks(3);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Skipped, Status::Passed, Status::Skipped]));
        assert_eq!(conclusion.status, Status::Passed);
        assert_eq!(conclusion.points, 4);
    }

    #[test]
    fn test_all_skipped() {
        let definition = rule("r", 4);
        let defs = checks(2);
        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Skipped; 2]));
        assert_eq!(conclusion, RuleConclusion::default());
    }

    #[test]
    fn test_negated_rule() {
        let definition = rule("r", 4).with_negate_result(true);
        let defs = checks(1);

        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Failed]));
        assert_eq!(conclusion.status, Status::Passed);
        assert_eq!(conclusion.points, 4);
        assert_eq!(conclusion.message.as_deref(), Some("r passed"));

        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Passed]));
        assert_eq!(conclusion.status, Status::Failed);
        assert_eq!(conclusion.points, 0);

        let conclusion = conclude_rule(&definition, &results(&defs, &[Status::Error]));
        assert_eq!(conclusion.status, Status::Error);
    }

    fn group(points_source: PointsSource) -> GroupDefinition {
        GroupDefinition::new("g", vec!["r1".into(), "r2".into(), "r3".into()], points_source).unwrap()
    }

    #[test]
    fn test_first_and_last() {
        let r1 = rule("r1", 10);
        let r2 = rule("r2", 3);
        let r3 = rule("r3", 5);
        let rules = [
            rule_result(&r1, Status::Passed),
            rule_result(&r2, Status::Failed),
            rule_result(&r3, Status::Passed),
        ];

        let first = aggregate_group(&group(PointsSource::First), &rules);
        assert_eq!(first.points, 10);
        assert_eq!(first.total_points, 10);
        assert_eq!(first.messages, ["r1 passed"]);

        let last = aggregate_group(&group(PointsSource::Last), &rules);
        assert_eq!(last.points, 5);
        assert_eq!(last.total_points, 10);
        assert_eq!(last.messages, ["r3 passed"]);
    }

    #[test]
    fn test_all() {
        let r1 = rule("r1", 10);
        let r2 = rule("r2", 3);
        let r3 = rule("r3", 5);
        let rules = [
            rule_result(&r3, Status::Passed),
            rule_result(&r2, Status::Error),
            rule_result(&r1, Status::Passed),
        ];

        let all = aggregate_group(&group(PointsSource::All), &rules);
        assert_eq!(all.points, 15);
        assert_eq!(all.total_points, 18);
        assert_eq!(all.messages, ["r3 passed", "r1 passed"]);
    }

    #[test]
    fn test_nothing_passed() {
        let r1 = rule("r1", 10);
        let rules = [rule_result(&r1, Status::Failed)];

        for source in [PointsSource::First, PointsSource::Last, PointsSource::All] {
            let score = aggregate_group(&group(source), &rules);
            assert_eq!(score.points, 0);
            assert_eq!(score.total_points, 10);
            assert!(score.messages.is_empty());
        }
    }

    #[test]
    fn test_disabled_rules_do_not_count() {
        let r1 = rule("r1", 10).with_enabled(false);
        let r2 = rule("r2", 3);
        let rules = [RuleResult::new(&r1, false, RuleConclusion::default(), Vec::new()), rule_result(&r2, Status::Passed)];

        let first = aggregate_group(&group(PointsSource::First), &rules);
        assert_eq!(first.points, 3);
        assert_eq!(first.total_points, 3);

        let all = aggregate_group(&group(PointsSource::All), &rules);
        assert_eq!(all.total_points, 3);
    }

    #[test]
    fn test_disabled_group_scores_nothing() {
        let r1 = rule("r1", 10);
        let rules = [rule_result(&r1, Status::Passed)];
        let score = aggregate_group(&group(PointsSource::All).with_enabled(false), &rules);
        assert_eq!(score, GroupScore::default());
    }

    #[test]
    fn test_points_percentage() {
        assert!((points_percentage(1, 3) - 33.3).abs() < 1e-9);
        assert!((points_percentage(2, 3) - 66.7).abs() < 1e-9);
        assert!((points_percentage(10, 10) - 100.0).abs() < 1e-9);
        assert!((points_percentage(1, 8) - 12.5).abs() < 1e-9);
        assert!(points_percentage(0, 0).abs() < f64::EPSILON);
        assert!(points_percentage(0, 7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_rating() {
        let ratings = [
            RatingDefinition::new("bad", 50.0).unwrap(),
            RatingDefinition::new("skipped", 75.0).unwrap().with_enabled(false),
            RatingDefinition::new("ok", 80.0).unwrap(),
            RatingDefinition::new("great", 100.0).unwrap(),
        ];

        assert_eq!(select_rating(&ratings, 0.0).map(RatingDefinition::name), Some("bad"));
        assert_eq!(select_rating(&ratings, 50.0).map(RatingDefinition::name), Some("bad"));
        assert_eq!(select_rating(&ratings, 50.1).map(RatingDefinition::name), Some("ok"));
        assert_eq!(select_rating(&ratings, 99.9).map(RatingDefinition::name), Some("great"));
        assert_eq!(select_rating(&ratings[..3], 90.0), None);
    }

    #[test]
    fn test_select_rating_follows_declaration_order() {
        let ratings = [RatingDefinition::new("high", 100.0).unwrap(), RatingDefinition::new("low", 10.0).unwrap()];
        assert_eq!(select_rating(&ratings, 5.0).map(RatingDefinition::name), Some("high"));
    }
}

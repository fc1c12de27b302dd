//! Evaluation of a policy against a result artifact
//!
//! # Implementation Model
//!
//! [`evaluate`] walks the policy in declaration order: groups, then each group's
//! rules, then each rule's checks. The artifact is only reached through the
//! [`Selector`] trait, so the algorithm is independent of the document format.
//!
//! For every enabled check the selector must resolve to exactly one node or atomic
//! value; the check's condition is then tested against that item. Zero or several
//! items, or a selector that cannot be evaluated, make the check [`Status::Error`]
//! and skip the remaining checks of the rule. A condition that cannot be evaluated
//! as a boolean simply counts as `false`.
//!
//! Rules, groups, and the overall result are then reduced with pure functions
//! ([`conclude_rule`], [`aggregate_group`], [`points_percentage`], [`select_rating`]):
//!
//! - a rule passes only if every evaluated check passed, otherwise it takes the
//!   status of the last check that did not pass
//! - a group scores the first passed rule, the last passed rule, or all passed
//!   rules, depending on its [`PointsSource`](crate::policy::PointsSource)
//! - the overall percentage is rounded to one decimal place and mapped to the
//!   first enabled rating whose value is not below it
//!
//! The result tree borrows the policy definitions it was produced from.

mod conclusion;
mod evaluator;
mod result;
mod selector;
mod status;

pub use conclusion::{GroupScore, RuleConclusion, aggregate_group, conclude_rule, points_percentage, select_rating};
pub use evaluator::{evaluate, evaluate_check, normalize_condition};
pub use result::{CheckResult, Evaluation, EvaluationResult, GroupResult, RuleResult};
pub use selector::{AtomicValue, SelectedItem, Selector, SelectorError};
pub use status::Status;

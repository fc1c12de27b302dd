#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for gradecard
//!
//! This library consolidates all functionality for the gradecard tool, which grades
//! the result report of a previously executed test run against a declarative,
//! versioned rule set and produces a scored verdict.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`policy`]: The validated policy model (rules, groups, ratings)
//! - [`evaluation`]: The evaluator and the scored result tree
//! - [`document`]: XML artifact loading and `XPath` selector evaluation
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod document;
pub mod evaluation;
pub mod policy;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};

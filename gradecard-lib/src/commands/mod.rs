//! Command-line interface and orchestration for gradecard
//!
//! This module implements the CLI commands and wires the policy loader, the XML
//! backend, the evaluator, and the report generators together.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **evaluate**: Load a policy and a result report, evaluate, and print a console
//!   summary and/or write a JSON report. With `--error-if-test-failed` the command
//!   fails when the run is graded as failed or cannot be graded at all.
//! - **validate**: Build the policy model from a file and report the first problem found
//! - **init**: Write the embedded default policy
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! command handler. All output goes through the [`Host`] trait so commands can be
//! exercised against in-memory buffers.
//!
//! A policy or report that cannot be loaded does not abort `evaluate`; it yields an
//! erroneous evaluation which is reported like any other result.

mod common;
mod evaluate;
mod host;
mod init;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel};
pub use evaluate::{EvaluateArgs, evaluate_artifact};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};

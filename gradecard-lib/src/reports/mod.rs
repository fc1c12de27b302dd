//! Report generation for evaluation results
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: Human-readable summary with optional ANSI colors
//! - **JSON**: The full result tree as machine-readable data
//!
//! Both operate on an [`Evaluation`](crate::evaluation::Evaluation), so an evaluation that
//! could not be performed is reported with its error rather than as a zero score.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

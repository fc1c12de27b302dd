//! Command dispatch logic for gradecard

use super::{EvaluateArgs, InitArgs, ValidateArgs, evaluate_artifact, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gradecard", version, author, long_about = None)]
#[command(about = "Grade the result report of a test run against a declarative rule set")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: GradecardSubcommand,
}

#[derive(Subcommand, Debug)]
enum GradecardSubcommand {
    /// Evaluate a result report against a policy and report the score
    Evaluate(Box<EvaluateArgs>),
    /// Generate a default policy file
    Init(InitArgs),
    /// Validate a policy file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        GradecardSubcommand::Evaluate(evaluate_args) => evaluate_artifact(host, evaluate_args),
        GradecardSubcommand::Init(init_args) => init_config(host, init_args),
        GradecardSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

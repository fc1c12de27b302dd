use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use crate::Result;
use crate::document::XmlDocument;
use crate::evaluation::{Evaluation, evaluate};
use crate::policy::Configuration;
use crate::reports::{generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, app_err};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "  evaluate";

#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Path to the policy file (JSON, TOML, or YAML)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Utf8PathBuf,

    /// Path to the XML result report of the test run
    #[arg(value_name = "ARTIFACT")]
    pub artifact: Utf8PathBuf,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Write the scored result tree to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print the console summary even when a JSON report is written
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Exit with status 1 if the test run is graded as failed or could not be graded
    #[arg(long)]
    pub error_if_test_failed: bool,
}

fn load_inputs(config: &Utf8Path, artifact: &Utf8Path) -> Result<(Configuration, XmlDocument)> {
    let config = Configuration::load(config)?;
    let document = XmlDocument::load(artifact)?;
    Ok((config, document))
}

pub fn evaluate_artifact<H: Host>(host: &mut H, args: &EvaluateArgs) -> Result<()> {
    init_logging(args.log_level);

    let loaded = load_inputs(&args.config, &args.artifact);
    let evaluation = match &loaded {
        Ok((config, document)) => Evaluation::Completed(evaluate(config, &document.selector())),
        Err(e) => {
            log::error!(target: LOG_TARGET, "Could not evaluate '{}': {e}", args.artifact);
            Evaluation::from_error(e)
        }
    };

    if args.console || args.json.is_none() {
        let mut console_output = String::new();
        generate_console(&evaluation, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&evaluation, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        log::info!(target: LOG_TARGET, "Wrote JSON report to '{filename}'");
    }

    if args.error_if_test_failed {
        if let Some(error) = evaluation.error() {
            return Err(app_err!("the test run could not be graded: {error}"));
        }

        if evaluation.test_failed() {
            return Err(ohno::AppError::new("the test run was graded as failed"));
        }
    }

    Ok(())
}

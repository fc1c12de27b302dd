use super::Host;
use crate::Result;
use crate::policy::DEFAULT_POLICY_JSON;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const DEFAULT_OUTPUT: &str = "gradecard.json";

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output policy file path (default is `gradecard.json` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT));

    fs::write(&output, DEFAULT_POLICY_JSON).into_app_err_with(|| format!("writing default policy to '{output}'"))?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

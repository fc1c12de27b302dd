use super::Host;
use crate::Result;
use crate::policy::Configuration;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the policy file (JSON, TOML, or YAML)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Utf8PathBuf,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match Configuration::load(&args.config) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            let _ = writeln!(
                host.output(),
                "Config file: {} (version {}, {} rule(s), {} group(s), {} rating(s))",
                args.config,
                config.version(),
                config.rules().len(),
                config.groups().len(),
                config.ratings().len()
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

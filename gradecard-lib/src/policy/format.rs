use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde_json::Value;

/// Text formats a policy file can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Json,
    Toml,
    Yaml,
}

impl PolicyFormat {
    /// Picks the format from the file extension, falling back to JSON.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Self::Toml,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Parses policy text into a generic JSON value, naming `origin` in any error.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed in this format.
    pub fn parse(self, text: &str, origin: &str) -> Result<Value> {
        match self {
            Self::Json => serde_json::from_str(text).into_app_err_with(|| format!("parsing '{origin}' as JSON")),
            Self::Toml => toml::from_str(text).into_app_err_with(|| format!("parsing '{origin}' as TOML")),
            Self::Yaml => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing '{origin}' as YAML")),
        }
    }
}

//! Serde shapes of a policy document, before any cross-referential validation.

use serde::Deserialize;

const fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawConfiguration {
    #[serde(default)]
    pub version: Option<i64>,

    #[serde(default)]
    pub selectors: Vec<RawSelector>,

    pub rules: Vec<RawRule>,

    pub groups: Vec<RawGroup>,

    #[serde(default)]
    pub ratings: Vec<RawRating>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawSelector {
    pub id: String,
    pub expression: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawRule {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "yes")]
    pub enabled: bool,

    #[serde(default)]
    pub fails_test: bool,

    #[serde(default)]
    pub negate_result: bool,

    pub points: i64,

    #[serde(default)]
    pub messages: RawMessages,

    pub checks: Vec<RawCheck>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawMessages {
    #[serde(default)]
    pub success: Option<String>,

    #[serde(default)]
    pub fail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawCheck {
    #[serde(default)]
    pub selector: Option<String>,

    #[serde(default)]
    pub selector_id: Option<String>,

    pub condition: String,

    #[serde(default = "yes")]
    pub enabled: bool,

    #[serde(default = "yes")]
    pub display_value: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawGroup {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub rules: Vec<String>,

    #[serde(default = "yes")]
    pub enabled: bool,

    #[serde(default)]
    pub points_source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RawRating {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub value: f64,

    #[serde(default = "yes")]
    pub enabled: bool,

    #[serde(default)]
    pub fails_test: bool,
}

/// Trims the text, mapping blank values to `None`.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

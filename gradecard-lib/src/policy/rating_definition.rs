use super::ValidationError;
use super::raw::{RawRating, non_blank};

/// A percentage threshold mapped to a label.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDefinition {
    name: String,
    description: Option<String>,
    value: f64,
    enabled: bool,
    fails_test: bool,
}

impl RatingDefinition {
    /// Creates an enabled rating.
    ///
    /// # Errors
    ///
    /// Fails when `value` is not within `[0, 100]`.
    pub fn new(name: impl Into<String>, value: f64) -> Result<Self, ValidationError> {
        let name = name.into();
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::RatingOutOfRange { rating: name, value });
        }

        Ok(Self {
            name,
            description: None,
            value,
            enabled: true,
            fails_test: false,
        })
    }

    pub(super) fn from_raw(raw: RawRating) -> Result<Self, ValidationError> {
        let mut rating = Self::new(raw.name, raw.value)?;
        rating.description = non_blank(raw.description);
        rating.enabled = raw.enabled;
        rating.fails_test = raw.fails_test;
        Ok(rating)
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_fails_test(mut self, fails_test: bool) -> Self {
        self.fails_test = fails_test;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The highest percentage this rating applies to.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn fails_test(&self) -> bool {
        self.fails_test
    }
}

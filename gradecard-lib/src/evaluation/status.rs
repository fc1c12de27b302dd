use serde::Serialize;
use strum::Display;

/// Outcome classification shared by checks and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Not evaluated, because it or one of its parents is disabled.
    #[default]
    Skipped,

    Passed,

    Failed,

    /// The item could not be evaluated at all.
    Error,
}

impl Status {
    #[must_use]
    pub const fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped)
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Swaps PASSED and FAILED, leaving the other states alone.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Passed => Self::Failed,
            Self::Failed => Self::Passed,
            other => other,
        }
    }
}

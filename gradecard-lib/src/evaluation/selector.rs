use core::fmt;

/// A typed atomic value produced by a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for AtomicValue {
    /// Formats the value the way the `XPath` `string()` function does.
    #[expect(clippy::float_cmp, reason = "only exact zero and integral values get the short form")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Number(n) if n.is_nan() => f.write_str("NaN"),
            Self::Number(n) if n.is_infinite() => f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" }),
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One item produced by evaluating a selector expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectedItem<N> {
    /// A node of the artifact together with its string value.
    Node { node: N, value: String },

    /// An atomic value such as a number, string, or boolean, with its string value.
    Atomic { atomic: AtomicValue, value: String },

    /// Anything else the query language can produce, described for diagnostics.
    Unsupported(String),
}

impl<N> SelectedItem<N> {
    #[must_use]
    pub fn atomic(atomic: AtomicValue) -> Self {
        let value = atomic.to_string();
        Self::Atomic { atomic, value }
    }

    /// The string value of a node or atomic item, `None` for unsupported items.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Self::Node { value, .. } | Self::Atomic { value, .. } => Some(value),
            Self::Unsupported(_) => None,
        }
    }
}

/// Failures reported by a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("could not compile expression '{expression}': {reason}")]
    Compile { expression: String, reason: String },

    #[error("could not evaluate expression '{expression}': {reason}")]
    Execution { expression: String, reason: String },

    #[error("expression '{expression}' did not return a boolean, got {found} instead")]
    NotBoolean { expression: String, found: String },

    #[error("cannot evaluate a condition against {0}")]
    Unsupported(String),
}

/// Queries a parsed artifact.
///
/// This is the only capability the evaluator needs from the artifact: resolve a selector
/// against the document root, then test a boolean condition against one selected item.
pub trait Selector {
    type Node;

    /// Evaluates `expression` against the document root.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be compiled or evaluated.
    fn select(&self, expression: &str) -> Result<Vec<SelectedItem<Self::Node>>, SelectorError>;

    /// Evaluates a boolean `condition` with `item` as the context item.
    ///
    /// # Errors
    ///
    /// Returns an error if the condition cannot be compiled or evaluated, or is not boolean.
    fn test(&self, condition: &str, item: &SelectedItem<Self::Node>) -> Result<bool, SelectorError>;
}

/// A reusable, named selector expression that checks can refer to by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorDefinition {
    id: String,
    expression: String,
}

impl SelectorDefinition {
    #[must_use]
    pub const fn new(id: String, expression: String) -> Self {
        Self { id, expression }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

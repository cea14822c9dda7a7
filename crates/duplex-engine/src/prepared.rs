use model::Value;

/// A rendered statement plus the bind values for the slots it references,
/// in the order the slots appear in the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    statement: String,
    binds: Vec<(String, Value)>,
}

impl PreparedQuery {
    pub(crate) fn new(statement: String, binds: Vec<(String, Value)>) -> Self {
        PreparedQuery { statement, binds }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Slot name and value pairs in emission order.
    pub fn binds(&self) -> &[(String, Value)] {
        &self.binds
    }

    /// Just the values, for drivers that bind positionally.
    pub fn bind_values(&self) -> Vec<Value> {
        self.binds.iter().map(|(_, value)| value.clone()).collect()
    }
}

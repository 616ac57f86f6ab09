use crate::values::ValueType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScopeError {
    #[error("'{name}' is not a recognized variable")]
    Unbound { name: String },

    #[error("'{name}' is declared as {expected} and cannot hold a {found}")]
    TypeMismatch {
        name: String,
        expected: ValueType,
        found: String,
    },

    #[error("cannot bind '{name}' to null: its type would be unknown")]
    NullValue { name: String },
}

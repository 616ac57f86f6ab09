use crate::values::ItemKind;

/// Lexing or parsing failure, located by token index.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} (at token {token_index})")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub token_index: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, token_index: usize) -> Self {
        Self { kind, token_index }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token `{found}`")]
    UnexpectedToken { found: String },

    #[error("unrecognized input `{found}`")]
    UnrecognizedInput { found: String },

    #[error("mismatched parentheses")]
    MismatchedParenthesis,

    #[error("list literal is not closed")]
    UnclosedList,

    #[error("list literals cannot be empty")]
    EmptyList,

    #[error("list elements must be literals, found `{found}`")]
    InvalidListElement { found: String },

    #[error("list mixes {expected} and {found} elements")]
    MixedList { expected: ItemKind, found: ItemKind },

    #[error("`-` must be followed by a number")]
    ExpectedNumber,

    #[error("invalid number `{text}`")]
    InvalidNumber { text: String },

    #[error("members can only be accessed one level deep: `{path}`")]
    NestedMember { path: String },

    #[error("ternary `if` has no matching `else`")]
    MissingElse,

    #[error("maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },
}

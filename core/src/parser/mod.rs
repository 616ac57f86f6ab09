//! Parser and expression tree.
//!
//! ```
//! use verdict_core::{lexer, parser};
//!
//! let tokens = lexer::tokenize("price is greater than 10 and code in ['A', 'B']");
//! let expr = parser::parse(&tokens).unwrap();
//! assert_eq!(expr.to_string(), "price > 10 and code in [\"A\", \"B\"]");
//! ```

mod ast;
mod error;
#[allow(clippy::module_inception)]
mod parser;

pub use ast::{BinaryOp, Descendants, Expr, Literal};
pub(crate) use ast::needs_parens;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};

#[cfg(test)]
mod precedence_test;

//! Public interpreter API.
//!
//! [`Interpreter`] parses text into [`Expression`]s that share its global
//! scope, native functions and [`InterpreterOptions`]. Failures surface as
//! [`Error`], and [`Validation`] collects them without stopping early.

mod error;
mod expression;
mod interpreter;
mod options;
mod validation;


pub use error::Error;
pub use expression::Expression;
pub use interpreter::Interpreter;
pub use options::InterpreterOptions;
pub use validation::Validation;

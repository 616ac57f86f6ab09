//! Verdict - An embeddable condition and formula language
//!
//! # Overview
//!
//! Verdict lets a host application evaluate human-written rules such as
//! `order.Total is greater than 100 and country in ['PT', 'BR']` against
//! values it binds at runtime. Common use cases include:
//!
//! - Business rules and eligibility checks
//! - Feature flags and routing conditions
//! - Computed fields and simple formulas
//!
//! # Quick Start
//!
//! ```
//! use verdict::{HostObject, Interpreter, Value};
//!
//! #[derive(HostObject)]
//! #[host(crate = "verdict::verdict_core", methods = order_methods)]
//! pub struct Order {
//!     #[host(rename = "Total")]
//!     pub total: f64,
//!     #[host(rename = "Country")]
//!     pub country: String,
//! }
//!
//! fn order_methods(members: &mut verdict::members::MemberMapBuilder<Order>) {
//!     members.method1("Over", |o: &Order, limit: f64| o.total > limit);
//! }
//!
//! let interpreter = Interpreter::new();
//! let mut rule = interpreter
//!     .expression("order.Total is greater than 100 and order.Country in ['PT', 'BR']")?;
//!
//! rule.set_variable("order", Order { total: 250.0, country: "PT".into() })?;
//! assert_eq!(rule.evaluate()?, Value::Bool(true));
//! # Ok::<(), verdict::Error>(())
//! ```
//!
//! # Host Functions
//!
//! ```
//! use verdict::{Interpreter, Value};
//!
//! let interpreter = Interpreter::new();
//! interpreter.register_fn2("pow", |base: i64, exp: i64| base.pow(exp as u32));
//! assert_eq!(interpreter.evaluate("pow(2, 10)")?, Value::Int(1024));
//! # Ok::<(), verdict::Error>(())
//! ```
//!
//! # Validation
//!
//! [`Interpreter::validate_with_types`] checks every reference and
//! condition of an expression and reports all problems at once, which suits
//! rule editors that need feedback before values exist.

mod iter;
mod render;

// Re-export public API from verdict_core
pub use verdict_core::api::{Error, Expression, Interpreter, InterpreterOptions, Validation};

// Re-export commonly used types and values
pub use verdict_core::members::{self, HostError, MemberMap, MemberMapBuilder, Param};
pub use verdict_core::parser::{BinaryOp, Expr, Literal};
pub use verdict_core::values::{self, FromValue, HostObject, TypedList, Value, ValueType};

// Re-export errors
pub use verdict_core::evaluator::{self, EvaluationError, EvaluationErrorKind};
pub use verdict_core::parser::{SyntaxError, SyntaxErrorKind};
pub use verdict_core::scope::ScopeError;

pub use iter::{ExpressionIterExt, FilterBy, MapBy};
pub use render::{render_error, render_errors};

pub use verdict_core;
pub use verdict_macros::HostObject;

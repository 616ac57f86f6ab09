//! Runtime values and their types.

mod convert;
mod host;
mod list;
mod ty;
mod value;

pub use convert::FromValue;
pub use host::{HostObject, HostRef};
pub use list::{ItemKind, TypedList};
pub use ty::{TypeDescriptor, ValueType};
pub use value::{Value, format_double};

#[cfg(test)]
mod value_test;

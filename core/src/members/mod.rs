//! Member resolution: field, property and method tables per host type, with
//! overload resolution and cached generic instantiation.

mod builder;
mod builtin;
mod member_map;
mod method;
mod param;

pub use builder::MemberMapBuilder;
pub use member_map::MemberMap;
pub use method::{CallArgs, GenericMethod, HostError, Method, MethodFn, Overload};
pub use param::{Param, ParamKind};

#[cfg(test)]
mod member_map_test;

//! Runtime type descriptors.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::members::MemberMap;
use crate::values::{HostObject, ItemKind};

/// Runtime type of a [`Value`](crate::values::Value).
///
/// `Null` has no type; a variable's declared type is always one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    Double,
    Str,
    List(ItemKind),
    Object(TypeDescriptor),
}

impl ValueType {
    /// The type of a registered host object.
    pub fn of<T: HostObject>() -> Self {
        ValueType::Object(TypeDescriptor::of::<T>())
    }

    /// Short display name, used in diagnostics and generic cache keys.
    pub fn name(&self) -> String {
        match self {
            ValueType::Bool => "Bool".into(),
            ValueType::Int => "Int".into(),
            ValueType::Double => "Double".into(),
            ValueType::Str => "Str".into(),
            ValueType::List(kind) => format!("List<{kind}>"),
            ValueType::Object(descriptor) => descriptor.name().into(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Double)
    }

    /// Whether `Null` may stand in for a value of this type.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ValueType::Str | ValueType::List(_) | ValueType::Object(_)
        )
    }

    /// Builds the member map for this type.
    pub fn build_member_map(&self) -> MemberMap {
        match self {
            ValueType::Bool => MemberMap::build::<bool>(),
            ValueType::Int => MemberMap::build::<i64>(),
            ValueType::Double => MemberMap::build::<f64>(),
            ValueType::Str => MemberMap::build::<String>(),
            ValueType::List(_) => MemberMap::build::<crate::values::TypedList>(),
            ValueType::Object(descriptor) => descriptor.build_member_map(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<ItemKind> for ValueType {
    fn from(kind: ItemKind) -> Self {
        kind.value_type()
    }
}

/// Identity of a host type: its `TypeId`, display name and member map builder.
///
/// Equality and hashing only look at the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    build: fn() -> MemberMap,
}

impl TypeDescriptor {
    pub fn of<T: HostObject>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            build: MemberMap::build::<T>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn build_member_map(&self) -> MemberMap {
        (self.build)()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.name)
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

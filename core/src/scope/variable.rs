use std::sync::Arc;

use crate::members::MemberMap;
use crate::scope::ScopeError;
use crate::values::{Value, ValueType};

/// A named binding: declared type, current value and the member map used to
/// reach into it.
///
/// Once declared, only values of exactly the declared type may be assigned.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    ty: ValueType,
    value: Option<Value>,
    members: Arc<MemberMap>,
}

impl Variable {
    pub(crate) fn new(name: &str, ty: ValueType, members: Arc<MemberMap>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: None,
            members,
        }
    }

    /// A valueless variable with its own member map.
    pub fn declared(name: &str, ty: ValueType) -> Self {
        Self::new(name, ty, Arc::new(ty.build_member_map()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ValueType {
        self.ty
    }

    /// Current value, `None` for a declared-only variable.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn member_map(&self) -> &Arc<MemberMap> {
        &self.members
    }

    /// Assigns a value of the declared type. `Null` clears the value.
    pub fn assign(&mut self, value: Value) -> Result<(), ScopeError> {
        match value.value_type() {
            None => self.value = None,
            Some(ty) if ty == self.ty => self.value = Some(value),
            Some(_) => {
                return Err(ScopeError::TypeMismatch {
                    name: self.name.clone(),
                    expected: self.ty,
                    found: value.type_name(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.value = None;
    }
}

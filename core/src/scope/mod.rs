//! Variable scopes.
//!
//! A scope holds variable bindings and an optional parent; lookups walk
//! towards the root and the nearest binding wins. Member maps are built once
//! per type and kept in a single table at the root of the chain.

mod error;
mod variable;

pub use error::ScopeError;
pub use variable::Variable;

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::members::MemberMap;
use crate::values::{Value, ValueType};

/// Shared handle to a scope. Clones refer to the same bindings.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    parent: Option<Scope>,
    variables: RwLock<HashMap<String, Variable>>,
    /// Only populated at the root.
    member_maps: RwLock<HashMap<ValueType, Arc<MemberMap>>>,
}

impl Scope {
    /// A root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope whose lookups fall back to `self`.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                parent: Some(self.clone()),
                ..ScopeInner::default()
            }),
        }
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.inner.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    pub fn root(&self) -> &Scope {
        let mut scope = self;
        while let Some(parent) = scope.parent() {
            scope = parent;
        }
        scope
    }

    /// Registers a member map for `ty` at the root, replacing any previous one.
    pub fn register_type_members(&self, ty: ValueType, members: MemberMap) -> Arc<MemberMap> {
        let members = Arc::new(members);
        self.root()
            .inner
            .member_maps
            .write()
            .insert(ty, members.clone());
        members
    }

    pub fn try_get_member_map(&self, ty: &ValueType) -> Option<Arc<MemberMap>> {
        self.root().inner.member_maps.read().get(ty).cloned()
    }

    /// The member map of `ty`, built and registered at the root on first use.
    pub fn member_map_for(&self, ty: ValueType) -> Arc<MemberMap> {
        if let Some(members) = self.try_get_member_map(&ty) {
            return members;
        }
        self.root()
            .inner
            .member_maps
            .write()
            .entry(ty)
            .or_insert_with(|| {
                debug!(ty = %ty, "Registering member map");
                Arc::new(ty.build_member_map())
            })
            .clone()
    }

    /// Declares `name` as `ty` without a value. An existing binding in this
    /// scope keeps its declared type and loses its value.
    pub fn register_variable_type(&self, name: &str, ty: ValueType) {
        let mut variables = self.inner.variables.write();
        if let Some(variable) = variables.get_mut(name) {
            variable.clear();
            return;
        }
        trace!(name, ty = %ty, "Declared variable");
        variables.insert(name.into(), Variable::new(name, ty, self.member_map_for(ty)));
    }

    /// Binds `name` to `value` in this scope.
    ///
    /// A new binding takes the value's type; an existing one only accepts a
    /// value of its declared type. `Null` is rejected since its type is
    /// unknown.
    pub fn set_variable(&self, name: &str, value: Value) -> Result<(), ScopeError> {
        let Some(ty) = value.value_type() else {
            return Err(ScopeError::NullValue { name: name.into() });
        };
        let mut variables = self.inner.variables.write();
        match variables.get_mut(name) {
            Some(variable) => variable.assign(value),
            None => {
                trace!(name, ty = %ty, "Bound variable");
                let mut variable = Variable::new(name, ty, self.member_map_for(ty));
                variable.assign(value)?;
                variables.insert(name.into(), variable);
                Ok(())
            }
        }
    }

    pub fn set_variables<I, K, V>(&self, bindings: I) -> Result<(), ScopeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in bindings {
            self.set_variable(name.as_ref(), value.into())?;
        }
        Ok(())
    }

    /// Nearest binding of `name` along the chain.
    pub fn try_get_variable(&self, name: &str) -> Option<Variable> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(variable) = current.inner.variables.read().get(name) {
                return Some(variable.clone());
            }
            scope = current.parent();
        }
        None
    }

    /// Names bound directly in this scope.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.variables.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("variables", &self.variable_names())
            .field("parent", &self.inner.parent)
            .finish()
    }
}

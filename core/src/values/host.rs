//! Host objects: Rust values exposed to expressions through their members.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use crate::members::MemberMapBuilder;
use crate::values::TypeDescriptor;
use crate::values::ty::short_type_name;

/// A Rust type whose fields, properties and methods can be reached from an
/// expression (`obj.Field`, `obj.Method(1, 'a')`).
///
/// Usually derived with `#[derive(HostObject)]`; implement by hand to
/// register methods or computed properties.
///
/// ```
/// use verdict_core::members::MemberMapBuilder;
/// use verdict_core::values::HostObject;
///
/// #[derive(Debug)]
/// struct Order {
///     total: f64,
/// }
///
/// impl HostObject for Order {
///     fn describe(members: &mut MemberMapBuilder<Self>) {
///         members
///             .property("Total", |order: &Order| order.total)
///             .method0("IsLarge", |order: &Order| order.total > 100.0);
///     }
/// }
/// ```
pub trait HostObject: Any + Send + Sync {
    fn describe(members: &mut MemberMapBuilder<Self>)
    where
        Self: Sized;

    /// Name used in diagnostics and generic cache keys.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        short_type_name(core::any::type_name::<Self>())
    }
}

/// Shared reference to a host object together with its type descriptor.
#[derive(Clone)]
pub struct HostRef {
    value: Arc<dyn Any + Send + Sync>,
    descriptor: TypeDescriptor,
}

impl HostRef {
    pub fn new<T: HostObject>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    pub fn from_arc<T: HostObject>(value: Arc<T>) -> Self {
        Self {
            value,
            descriptor: TypeDescriptor::of::<T>(),
        }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor
    }

    pub fn as_any(&self) -> &dyn Any {
        &*self.value
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &HostRef) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostRef({})", self.descriptor.name())
    }
}

//! Native functions callable by name from expressions (`min(a, b)`).

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::members::{CallArgs, HostError};
use crate::values::{FromValue, Value};

pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, HostError> + Send + Sync>;

/// A named native function. `arity` of `None` accepts any number of
/// arguments.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    arity: Option<usize>,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Calls the function; the caller checks arity.
    pub fn call(&self, args: &[Value]) -> Result<Value, HostError> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(arity) => write!(f, "{}/{}", self.name, arity),
            None => write!(f, "{}/*", self.name),
        }
    }
}

macro_rules! typed_constructors {
    ($($fn_name:ident($arity:literal $(; $($arg:ident: $index:tt),*)?);)*) => {
        impl NativeFunction {
            $(
                /// Wraps a closure over typed arguments; arguments that do
                /// not convert fail the call.
                pub fn $fn_name<$($($arg,)*)? R, F>(name: impl Into<String>, func: F) -> Self
                where
                    $($($arg: FromValue,)*)?
                    R: Into<Value>,
                    F: Fn($($($arg),*)?) -> R + Send + Sync + 'static,
                {
                    Self::new(name, Some($arity), move |args: &[Value]| {
                        let _args = CallArgs::new(args);
                        Ok(func($($(_args.value::<$arg>($index)?),*)?).into())
                    })
                }
            )*
        }
    };
}

typed_constructors! {
    from_fn0(0);
    from_fn1(1; A: 0);
    from_fn2(2; A: 0, B: 1);
    from_fn3(3; A: 0, B: 1, C: 2);
    from_fn4(4; A: 0, B: 1, C: 2, D: 3);
}

/// Shared, thread-safe name → function table. Clones share the table.
#[derive(Clone, Default)]
pub struct FunctionTable(Arc<RwLock<HashMap<String, NativeFunction>>>);

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `function`, replacing one registered under the same name.
    pub fn register(&self, function: NativeFunction) {
        debug!(function = ?function, "Registered native function");
        self.0.write().insert(function.name.clone(), function);
    }

    pub fn get(&self, name: &str) -> Option<NativeFunction> {
        self.0.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FunctionTable").field(&self.names()).finish()
    }
}

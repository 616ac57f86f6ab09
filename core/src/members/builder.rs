use core::any::Any;
use core::marker::PhantomData;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::members::member_map::Getter;
use crate::members::{CallArgs, GenericMethod, HostError, MemberMap, Method, Overload, Param};
use crate::values::{FromValue, Value, ValueType};

/// Registers the members of a host type `T`.
///
/// Handed to [`HostObject::describe`](crate::values::HostObject::describe).
/// Registering a method name twice adds an overload.
pub struct MemberMapBuilder<T> {
    type_name: &'static str,
    fields: HashMap<String, Getter>,
    properties: HashMap<String, Getter>,
    methods: HashMap<String, Vec<Overload>>,
    _receiver: PhantomData<fn(&T)>,
}

impl<T: Any> MemberMapBuilder<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: HashMap::new(),
            properties: HashMap::new(),
            methods: HashMap::new(),
            _receiver: PhantomData,
        }
    }

    pub fn field<V, F>(&mut self, name: &str, get: F) -> &mut Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fields.insert(name.into(), getter(get));
        self
    }

    pub fn property<V, F>(&mut self, name: &str, get: F) -> &mut Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.properties.insert(name.into(), getter(get));
        self
    }

    /// Registers an overload with an explicit parameter list.
    pub fn method<F>(&mut self, name: &str, params: impl IntoIterator<Item = Param>, body: F) -> &mut Self
    where
        F: Fn(&T, CallArgs<'_>) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        let method = Method::new::<T, F>(name, params, body);
        self.overload(name, Overload::Concrete(Arc::new(method)))
    }

    pub fn method0<R, F>(&mut self, name: &str, body: F) -> &mut Self
    where
        R: Into<Value>,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.method(name, core::iter::empty(), move |this, _| Ok(body(this).into()))
    }

    pub fn method1<A, R, F>(&mut self, name: &str, body: F) -> &mut Self
    where
        A: FromValue,
        R: Into<Value>,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.method(name, [A::param()], move |this, args| {
            Ok(body(this, args.value(0)?).into())
        })
    }

    pub fn method2<A, B, R, F>(&mut self, name: &str, body: F) -> &mut Self
    where
        A: FromValue,
        B: FromValue,
        R: Into<Value>,
        F: Fn(&T, A, B) -> R + Send + Sync + 'static,
    {
        self.method(name, [A::param(), B::param()], move |this, args| {
            Ok(body(this, args.value(0)?, args.value(1)?).into())
        })
    }

    pub fn method3<A, B, C, R, F>(&mut self, name: &str, body: F) -> &mut Self
    where
        A: FromValue,
        B: FromValue,
        C: FromValue,
        R: Into<Value>,
        F: Fn(&T, A, B, C) -> R + Send + Sync + 'static,
    {
        self.method(name, [A::param(), B::param(), C::param()], move |this, args| {
            Ok(body(this, args.value(0)?, args.value(1)?, args.value(2)?).into())
        })
    }

    /// Registers a generic overload with `type_params` type parameters,
    /// one per argument. `instantiate` receives the argument types and
    /// builds the concrete method, or returns `None` to reject them.
    pub fn generic_method<F>(&mut self, name: &str, type_params: usize, instantiate: F) -> &mut Self
    where
        F: Fn(&[ValueType]) -> Option<Method> + Send + Sync + 'static,
    {
        let generic = GenericMethod::new(name, type_params, instantiate);
        self.overload(name, Overload::Generic(Arc::new(generic)))
    }

    fn overload(&mut self, name: &str, overload: Overload) -> &mut Self {
        self.methods.entry(name.into()).or_default().push(overload);
        self
    }

    pub fn finish(self) -> MemberMap {
        MemberMap::from_parts(self.type_name, self.fields, self.properties, self.methods)
    }
}

fn getter<T, V, F>(get: F) -> Getter
where
    T: Any,
    V: Into<Value>,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    Arc::new(move |receiver: &dyn Any| receiver.downcast_ref::<T>().map(|this| get(this).into()))
}

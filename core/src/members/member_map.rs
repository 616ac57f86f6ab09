use core::any::Any;
use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::members::{GenericMethod, MemberMapBuilder, Method, Overload};
use crate::values::{HostObject, Value, ValueType};

pub(crate) type Getter = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Field, property and method tables of one host type.
///
/// Built once per type. Concrete instantiations of generic methods are
/// cached under keys such as `GenericMethod[Int,Str]`.
pub struct MemberMap {
    type_name: &'static str,
    fields: HashMap<String, Getter>,
    properties: HashMap<String, Getter>,
    methods: HashMap<String, Vec<Overload>>,
    generic_cache: RwLock<HashMap<String, Arc<Method>>>,
}

impl MemberMap {
    pub(crate) fn from_parts(
        type_name: &'static str,
        fields: HashMap<String, Getter>,
        properties: HashMap<String, Getter>,
        methods: HashMap<String, Vec<Overload>>,
    ) -> Self {
        Self {
            type_name,
            fields,
            properties,
            methods,
            generic_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Builds the member map of `T` from its [`HostObject::describe`].
    pub fn build<T: HostObject>() -> Self {
        let mut builder = MemberMapBuilder::<T>::new(T::type_name());
        T::describe(&mut builder);
        let map = builder.finish();
        debug!(
            type_name = map.type_name,
            fields = map.fields.len(),
            properties = map.properties.len(),
            methods = map.methods.len(),
            "Built member map"
        );
        map
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Field or property named `name` exists.
    pub fn has_member(&self, name: &str) -> bool {
        self.has_field(name) || self.has_property(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn overloads(&self, name: &str) -> Option<&[Overload]> {
        self.methods.get(name).map(Vec::as_slice)
    }

    pub fn try_get_field_value(&self, receiver: &dyn Any, name: &str) -> Option<Value> {
        self.fields.get(name).and_then(|get| get(receiver))
    }

    pub fn try_get_property_value(&self, receiver: &dyn Any, name: &str) -> Option<Value> {
        self.properties.get(name).and_then(|get| get(receiver))
    }

    /// Reads a field, falling back to a property of the same name.
    pub fn try_get_member_value(&self, receiver: &dyn Any, name: &str) -> Option<Value> {
        self.try_get_field_value(receiver, name)
            .or_else(|| self.try_get_property_value(receiver, name))
    }

    /// Picks the overload of `name` that accepts `args`.
    pub fn resolve_method(&self, name: &str, args: &[Value]) -> Option<Arc<Method>> {
        let arg_types: SmallVec<[Option<ValueType>; 4]> = args.iter().map(Value::value_type).collect();
        self.resolve_method_for_types(name, &arg_types)
    }

    /// Picks the overload of `name` for arguments of the given types, `None`
    /// standing for `Null`.
    ///
    /// Generic definitions are instantiated from the argument types first.
    /// An overload whose parameter count equals the argument count wins over
    /// one that needs optional parameters filled.
    pub fn resolve_method_for_types(&self, name: &str, arg_types: &[Option<ValueType>]) -> Option<Arc<Method>> {
        let overloads = self.methods.get(name)?;
        let candidates: SmallVec<[Arc<Method>; 4]> = overloads
            .iter()
            .filter_map(|overload| match overload {
                Overload::Concrete(method) => Some(method.clone()),
                Overload::Generic(generic) => self.instantiate(generic, arg_types),
            })
            .collect();

        let resolved = candidates
            .iter()
            .find(|method| method.matches_exactly(arg_types))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|method| method.matches_with_optional(arg_types))
            })
            .cloned();
        trace!(
            type_name = self.type_name,
            method = name,
            candidates = candidates.len(),
            resolved = resolved.is_some(),
            "Resolved method"
        );
        resolved
    }

    /// Resolves and invokes `name`; `None` when no overload fits or the
    /// body fails.
    pub fn try_invoke_method(&self, receiver: &dyn Any, name: &str, args: &[Value]) -> Option<Value> {
        self.resolve_method(name, args)?.invoke(receiver, args).ok()
    }

    /// Keys of the cached generic instantiations.
    pub fn cached_instantiations(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.generic_cache.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn instantiate(&self, generic: &GenericMethod, arg_types: &[Option<ValueType>]) -> Option<Arc<Method>> {
        // Null carries no type to instantiate with.
        let type_args: SmallVec<[ValueType; 4]> = arg_types.iter().copied().collect::<Option<_>>()?;
        if type_args.len() != generic.type_params() {
            return None;
        }

        let key = cache_key(generic.name(), &type_args);
        if let Some(method) = self.generic_cache.read().get(&key) {
            trace!(key = %key, "Generic instantiation cache hit");
            return Some(method.clone());
        }

        let method = Arc::new(generic.instantiate(&type_args)?);
        debug!(key = %key, "Instantiated generic method");
        Some(
            self.generic_cache
                .write()
                .entry(key)
                .or_insert(method)
                .clone(),
        )
    }
}

fn cache_key(name: &str, type_args: &[ValueType]) -> String {
    let names: Vec<String> = type_args.iter().map(ValueType::name).collect();
    format!("{name}[{}]", names.join(","))
}

impl fmt::Debug for MemberMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.field_names().collect();
        let mut properties: Vec<_> = self.property_names().collect();
        let mut methods: Vec<_> = self.method_names().collect();
        fields.sort_unstable();
        properties.sort_unstable();
        methods.sort_unstable();
        f.debug_struct("MemberMap")
            .field("type_name", &self.type_name)
            .field("fields", &fields)
            .field("properties", &properties)
            .field("methods", &methods)
            .finish()
    }
}

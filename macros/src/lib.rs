//! Procedural macros for Verdict host objects
//!
//! This crate provides `#[derive(HostObject)]`, which registers a struct's
//! public fields with the member resolver so expressions can read them.

extern crate proc_macro;

use proc_macro::TokenStream;

mod host_object;

/// Derive `verdict_core::values::HostObject` for a struct with named fields.
///
/// Every `pub` field becomes a readable member. Field types must be `Clone`
/// and convert into `Value`.
///
/// # Example
///
/// ```ignore
/// #[derive(HostObject)]
/// #[host(name = "Customer", methods = customer_methods)]
/// struct Customer {
///     #[host(rename = "Name")]
///     pub name: String,
///     #[host(rename = "Orders", property)]
///     pub orders: i64,
///     #[host(skip)]
///     pub token: String,
/// }
///
/// fn customer_methods(members: &mut MemberMapBuilder<Customer>) {
///     members.method1("HasOrdered", |c: &Customer, n: i64| c.orders >= n);
/// }
/// ```
///
/// This generates:
/// - `HostObject::describe`, registering `Name` as a field and `Orders` as a
///   property, then calling `customer_methods`
/// - `HostObject::type_name` returning `"Customer"` when `name` is given
/// - `From<Customer> for Value`
///
/// # Struct Attributes
///
/// - `name = "..."`: type name shown in diagnostics
/// - `methods = path`: function receiving the `MemberMapBuilder` after the
///   fields are registered
/// - `crate = "path"`: where `verdict_core` lives (default `::verdict_core`)
///
/// # Field Attributes
///
/// - `rename = "..."`: member name used in expressions
/// - `property`: register as a property rather than a field
/// - `skip`: leave a public field out
#[proc_macro_derive(HostObject, attributes(host))]
pub fn derive_host_object(item: TokenStream) -> TokenStream {
    host_object::derive_host_object_impl(item)
}

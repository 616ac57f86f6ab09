//! Members of the primitive receivers.

use crate::members::{MemberMapBuilder, Param};
use crate::values::{HostObject, TypedList, Value};

impl HostObject for String {
    fn describe(members: &mut MemberMapBuilder<Self>) {
        members
            .property("Length", |s: &String| s.chars().count())
            .method0("ToUpper", |s: &String| s.to_uppercase())
            .method0("ToLower", |s: &String| s.to_lowercase())
            .method0("Trim", |s: &String| s.trim().to_string())
            .method1("StartsWith", |s: &String, prefix: String| s.starts_with(&prefix))
            .method1("EndsWith", |s: &String, suffix: String| s.ends_with(&suffix))
            .method1("Contains", |s: &String, needle: String| s.contains(&needle));
    }

    fn type_name() -> &'static str {
        "Str"
    }
}

impl HostObject for TypedList {
    fn describe(members: &mut MemberMapBuilder<Self>) {
        members
            .property("Count", |list: &TypedList| list.len())
            .method("Contains", [Param::any()], |list: &TypedList, args| {
                Ok(Value::Bool(args.get(0).is_some_and(|item| list.contains(item))))
            });
    }

    fn type_name() -> &'static str {
        "List"
    }
}

impl HostObject for i64 {
    fn describe(_: &mut MemberMapBuilder<Self>) {}

    fn type_name() -> &'static str {
        "Int"
    }
}

impl HostObject for f64 {
    fn describe(_: &mut MemberMapBuilder<Self>) {}

    fn type_name() -> &'static str {
        "Double"
    }
}

impl HostObject for bool {
    fn describe(_: &mut MemberMapBuilder<Self>) {}

    fn type_name() -> &'static str {
        "Bool"
    }
}

use pretty_assertions::assert_eq;

use super::*;
use crate::values::{HostObject, TypedList, Value, ValueType};

#[derive(Debug, Default)]
struct TestObject {
    public_property: String,
    public_field: String,
}

impl HostObject for TestObject {
    fn describe(members: &mut MemberMapBuilder<Self>) {
        members
            .field("PublicField", |o: &TestObject| o.public_field.clone())
            .property("PublicProperty", |o: &TestObject| o.public_property.clone())
            .method0("PublicMethod", |_: &TestObject| ())
            .method0("PublicMethodWithReturn", |_: &TestObject| 1)
            .method2("PublicMethodWithParams", |_: &TestObject, a: i64, b: String| {
                format!("{a}{b}")
            })
            .method(
                "PublicMethodWithOptionalParams",
                [Param::int(), Param::str().optional()],
                |_: &TestObject, args| {
                    let a: i64 = args.value(0)?;
                    let b: Option<String> = args.value(1)?;
                    Ok(format!("{a}{}", b.as_deref().unwrap_or("default")).into())
                },
            )
            .method2("Add", |_: &TestObject, a: i64, b: i64| a + b)
            .method2("Add", |_: &TestObject, a: f64, b: f64| a + b)
            .generic_method("GenericMethod", 1, |types| {
                Some(Method::new::<TestObject, _>(
                    "GenericMethod",
                    [Param::of(types[0])],
                    |_, args| Ok(args.get(0).cloned().unwrap_or(Value::Null)),
                ))
            })
            .generic_method("GenericMethodWithConstraint", 1, |types| {
                // Reference types only.
                types[0].is_reference().then(|| {
                    Method::new::<TestObject, _>(
                        "GenericMethodWithConstraint",
                        [Param::of(types[0])],
                        |_, args| Ok(args.get(0).cloned().unwrap_or(Value::Null)),
                    )
                })
            })
            .generic_method("Pair", 2, |types| {
                let label = format!("{}+{}", types[0], types[1]);
                Some(Method::new::<TestObject, _>(
                    "Pair",
                    [Param::of(types[0]), Param::of(types[1])],
                    move |_, _| Ok(Value::Str(label.clone())),
                ))
            });
    }
}

fn object() -> TestObject {
    TestObject {
        public_property: "property".into(),
        public_field: "field".into(),
    }
}

#[test]
fn test_build_collects_members() {
    let map = MemberMap::build::<TestObject>();
    assert_eq!(map.type_name(), "TestObject");
    assert_eq!(map.field_names().collect::<Vec<_>>(), vec!["PublicField"]);
    assert_eq!(map.property_names().collect::<Vec<_>>(), vec!["PublicProperty"]);
    assert!(map.has_method("PublicMethodWithParams"));
    assert_eq!(map.overloads("Add").map(<[Overload]>::len), Some(2));
    assert!(map.has_member("PublicField"));
    assert!(map.has_member("PublicProperty"));
    assert!(!map.has_member("PublicMethod"));
}

#[test]
fn test_field_and_property_values() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert_eq!(
        map.try_get_field_value(&obj, "PublicField"),
        Some(Value::from("field"))
    );
    assert_eq!(map.try_get_field_value(&obj, "PublicProperty"), None);
    assert_eq!(
        map.try_get_property_value(&obj, "PublicProperty"),
        Some(Value::from("property"))
    );
    assert_eq!(
        map.try_get_member_value(&obj, "PublicProperty"),
        Some(Value::from("property"))
    );
    assert_eq!(map.try_get_member_value(&obj, "Missing"), None);
}

#[test]
fn test_wrong_receiver_reads_nothing() {
    let map = MemberMap::build::<TestObject>();
    assert_eq!(map.try_get_field_value(&42i64, "PublicField"), None);
    assert_eq!(map.try_invoke_method(&42i64, "PublicMethodWithReturn", &[]), None);
}

#[test]
fn test_invoke_methods() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert_eq!(map.try_invoke_method(&obj, "PublicMethod", &[]), Some(Value::Null));
    assert_eq!(
        map.try_invoke_method(&obj, "PublicMethodWithReturn", &[]),
        Some(Value::Int(1))
    );
    assert_eq!(
        map.try_invoke_method(
            &obj,
            "PublicMethodWithParams",
            &[Value::Int(1), Value::from("x")]
        ),
        Some(Value::from("1x"))
    );
    assert_eq!(
        map.try_invoke_method(
            &obj,
            "PublicMethodWithParams",
            &[Value::from("x"), Value::Int(1)]
        ),
        None
    );
    assert_eq!(map.try_invoke_method(&obj, "NoSuchMethod", &[]), None);
}

#[test]
fn test_optional_parameters() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert_eq!(
        map.try_invoke_method(&obj, "PublicMethodWithOptionalParams", &[Value::Int(7)]),
        Some(Value::from("7default"))
    );
    assert_eq!(
        map.try_invoke_method(
            &obj,
            "PublicMethodWithOptionalParams",
            &[Value::Int(7), Value::from("given")]
        ),
        Some(Value::from("7given"))
    );
    assert_eq!(map.try_invoke_method(&obj, "PublicMethodWithOptionalParams", &[]), None);
}

#[test]
fn test_overloads_pick_by_argument_type() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert_eq!(
        map.try_invoke_method(&obj, "Add", &[Value::Int(1), Value::Int(2)]),
        Some(Value::Int(3))
    );
    assert_eq!(
        map.try_invoke_method(&obj, "Add", &[Value::Double(1.5), Value::Double(2.0)]),
        Some(Value::Double(3.5))
    );
    assert_eq!(
        map.try_invoke_method(&obj, "Add", &[Value::Int(1), Value::Double(2.0)]),
        None
    );
}

#[test]
fn test_null_arguments() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    // Str parameters accept Null, Int parameters do not.
    assert!(
        map.resolve_method("PublicMethodWithParams", &[Value::Int(1), Value::Null])
            .is_some()
    );
    assert!(
        map.resolve_method("PublicMethodWithParams", &[Value::Null, Value::from("a")])
            .is_none()
    );
    // Null carries no type, so generics cannot be instantiated from it.
    assert_eq!(map.try_invoke_method(&obj, "GenericMethod", &[Value::Null]), None);
}

#[test]
fn test_generic_methods_are_instantiated_and_cached() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert!(map.cached_instantiations().is_empty());

    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethod", &[Value::Int(5)]),
        Some(Value::Int(5))
    );
    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethod", &[Value::Int(6)]),
        Some(Value::Int(6))
    );
    assert_eq!(map.cached_instantiations(), vec!["GenericMethod[Int]"]);

    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethod", &[Value::from("a")]),
        Some(Value::from("a"))
    );
    assert_eq!(
        map.cached_instantiations(),
        vec!["GenericMethod[Int]", "GenericMethod[Str]"]
    );
}

#[test]
fn test_generic_constraints_and_arity() {
    let map = MemberMap::build::<TestObject>();
    let obj = object();
    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethodWithConstraint", &[Value::Int(1)]),
        None
    );
    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethodWithConstraint", &[Value::from("s")]),
        Some(Value::from("s"))
    );
    assert_eq!(
        map.try_invoke_method(&obj, "GenericMethod", &[Value::Int(1), Value::Int(2)]),
        None
    );
    assert_eq!(
        map.try_invoke_method(&obj, "Pair", &[Value::Int(1), Value::from("b")]),
        Some(Value::from("Int+Str"))
    );
    assert!(map.cached_instantiations().contains(&"Pair[Int,Str]".to_string()));
}

#[test]
fn test_string_members() {
    let map = ValueType::Str.build_member_map();
    let s = String::from("  Hello ");
    assert_eq!(map.try_get_member_value(&s, "Length"), Some(Value::Int(8)));
    assert_eq!(map.try_invoke_method(&s, "Trim", &[]), Some(Value::from("Hello")));
    assert_eq!(
        map.try_invoke_method(&s, "ToUpper", &[]),
        Some(Value::from("  HELLO "))
    );
    assert_eq!(
        map.try_invoke_method(&s, "Contains", &[Value::from("ell")]),
        Some(Value::Bool(true))
    );
}

#[test]
fn test_list_members() {
    let map = ValueType::List(crate::values::ItemKind::Int).build_member_map();
    let list = TypedList::Int(vec![1, 2, 3]);
    assert_eq!(map.try_get_member_value(&list, "Count"), Some(Value::Int(3)));
    assert_eq!(
        map.try_invoke_method(&list, "Contains", &[Value::Int(2)]),
        Some(Value::Bool(true))
    );
    assert_eq!(
        map.try_invoke_method(&list, "Contains", &[Value::from("2")]),
        Some(Value::Bool(false))
    );
}

#[test]
fn test_param_accepts() {
    assert!(Param::int().accepts(&Value::Int(1)));
    assert!(!Param::int().accepts(&Value::Double(1.0)));
    assert!(!Param::int().accepts(&Value::Null));
    assert!(Param::int().nullable().accepts(&Value::Null));
    assert!(Param::str().accepts(&Value::Null));
    assert!(Param::any().accepts(&Value::Null));
    assert!(Param::list().accepts(&Value::list(vec![1i64])));
    assert!(!Param::list().accepts(&Value::Int(1)));
}

use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::members::MemberMapBuilder;

#[derive(Debug, PartialEq)]
struct Parcel {
    weight: i64,
}

impl HostObject for Parcel {
    fn describe(members: &mut MemberMapBuilder<Self>) {
        members.field("Weight", |p: &Parcel| p.weight);
    }
}

#[test]
fn test_value_types() {
    assert_eq!(Value::Null.value_type(), None);
    assert_eq!(Value::from(true).value_type(), Some(ValueType::Bool));
    assert_eq!(Value::from(3).value_type(), Some(ValueType::Int));
    assert_eq!(Value::from(3.5).value_type(), Some(ValueType::Double));
    assert_eq!(Value::from("s").value_type(), Some(ValueType::Str));
    assert_eq!(
        Value::list(vec![1.5, 2.0]).value_type(),
        Some(ValueType::List(ItemKind::Double))
    );
    assert_eq!(
        Value::object(Parcel { weight: 1 }).value_type(),
        Some(ValueType::of::<Parcel>())
    );
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Null.type_name(), "Null");
    assert_eq!(Value::list(vec!["a"]).type_name(), "List<Str>");
    assert_eq!(Value::object(Parcel { weight: 1 }).type_name(), "Parcel");
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
    assert_eq!(Value::from(()), Value::Null);
}

#[test]
fn test_objects_compare_by_identity() {
    let shared = Arc::new(Parcel { weight: 2 });
    let a = Value::from(shared.clone());
    let b = Value::from(shared);
    let c = Value::object(Parcel { weight: 2 });
    assert_eq!(a, b);
    assert!(a != c);
    assert_eq!(a.as_object::<Parcel>(), Some(&Parcel { weight: 2 }));
    assert_eq!(a.as_object::<String>(), None);
}

#[test]
fn test_receivers() {
    let s = Value::from("abc");
    let receiver = s.receiver().unwrap();
    assert_eq!(receiver.downcast_ref::<String>().map(String::as_str), Some("abc"));

    let list = Value::list(vec![1i64, 2]);
    assert!(list.receiver().unwrap().downcast_ref::<TypedList>().is_some());

    let parcel = Value::object(Parcel { weight: 7 });
    assert_eq!(
        parcel.receiver().unwrap().downcast_ref::<Parcel>(),
        Some(&Parcel { weight: 7 })
    );
    assert!(Value::Null.receiver().is_none());
}

#[test]
fn test_numbers() {
    assert_eq!(Value::Int(2).as_number(), Some(2.0));
    assert_eq!(Value::Double(2.5).as_number(), Some(2.5));
    assert_eq!(Value::Str("2".into()).as_number(), None);
    assert_eq!(Value::from(usize::MAX), Value::Int(i64::MAX));
}

#[test]
fn test_format_double() {
    assert_eq!(format_double(4.0), "4.0");
    assert_eq!(format_double(0.25), "0.25");
    assert_eq!(format_double(1e20), "100000000000000000000.0");
    assert_eq!(format_double(f64::INFINITY), "inf");
}

#[test]
fn test_list_contains() {
    let ints = TypedList::from(vec![1i64, 2, 3]);
    assert!(ints.contains(&Value::Int(2)));
    assert!(!ints.contains(&Value::Str("2".into())));

    let names = TypedList::from(vec!["a", "b"]);
    assert!(names.contains(&Value::from("b")));
    assert_eq!(names.to_string(), r#"["a", "b"]"#);
}

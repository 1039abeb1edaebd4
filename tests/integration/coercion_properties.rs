//! Property-based checks of read-time coercion and document determinism.

use crate::common::MismatchRecorder;
use jsonapi_mapper::schema::{Coerced, coerce};
use jsonapi_mapper::{Context, PropertyType, ResourceSchema};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn property_type_strategy() -> impl Strategy<Value = PropertyType> {
    prop_oneof![
        Just(PropertyType::Dictionary),
        Just(PropertyType::String),
        Just(PropertyType::Number),
        Just(PropertyType::ArrayOfDictionaries),
        Just(PropertyType::ArrayOfStrings),
        Just(PropertyType::Bool),
    ]
}

fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6f64).prop_map(|f| json!(f)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

prop_compose! {
    fn attributes_strategy()
        (entries in prop::collection::vec(("[a-z]{1,6}", json_value_strategy()), 0..6))
        -> Vec<(String, Value)> {
        entries
    }
}

proptest! {
    #[test]
    fn test_coercion_agrees_with_matching(kind in property_type_strategy(), value in json_value_strategy()) {
        let outcome = coerce(Some(kind), Some(value.clone()));
        if value.is_null() {
            prop_assert_eq!(outcome, Coerced::Absent);
        } else if kind.matches(&value) {
            prop_assert_eq!(outcome, Coerced::Value(value));
        } else {
            prop_assert_eq!(outcome, Coerced::Mismatch { expected: kind, value });
        }
    }

    #[test]
    fn test_undeclared_keys_pass_through(value in json_value_strategy()) {
        let expected = if value.is_null() {
            Coerced::Absent
        } else {
            Coerced::Value(value.clone())
        };
        prop_assert_eq!(coerce(None, Some(value)), expected);
    }

    #[test]
    fn test_read_reports_at_most_one_mismatch(kind in property_type_strategy(), value in json_value_strategy()) {
        let recorder = MismatchRecorder::new();
        let context = Context::builder()
            .log_mismatches(false)
            .diagnostic_hook(recorder.hook())
            .build();
        let schema = ResourceSchema::builder("samples").property("field", kind).build();
        context.register_schema(schema);

        let resource = context.create("samples");
        resource.write("field", value.clone());
        let read = resource.read("field");

        if value.is_null() || kind.matches(&value) {
            prop_assert_eq!(read, if value.is_null() { None } else { Some(value) });
            prop_assert_eq!(recorder.count(), 0);
        } else {
            prop_assert_eq!(read, None);
            prop_assert_eq!(recorder.count(), 1);
            prop_assert_eq!(recorder.mismatches()[0].expected, kind);
        }
    }

    #[test]
    fn test_document_builds_are_deterministic(attributes in attributes_strategy(), id in "[0-9]{1,4}") {
        let context = Context::new();
        let resource = context.create("samples");
        resource.set_id(id.clone());
        for (key, value) in attributes {
            resource.write(&key, value);
        }

        let first = resource.to_document_data().unwrap();
        let second = resource.to_document_data().unwrap();
        prop_assert_eq!(&first, &second);

        let document: Value = serde_json::from_slice(&first).unwrap();
        prop_assert_eq!(&document["data"]["id"], &json!(id));
        prop_assert_eq!(&document["data"]["type"], &json!("samples"));
    }
}

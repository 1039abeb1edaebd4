//! Single, general and creation document construction.

use crate::common::kinds::{Article, Person};
use jsonapi_mapper::{
    Context, JsonApiError, Resource, ResourceCollection, ResourceIdentifier,
    ResourceKind, ResourceSchema,
};
use serde_json::json;

fn person(context: &Context, id: Option<&str>, name: &str) -> Person {
    let person = Person::new_in(context);
    if let Some(id) = id {
        person.resource().set_id(id);
    }
    person.resource().write("name", name);
    person
}

#[test]
fn test_single_document_without_id() {
    let article = Article::new();
    article.set_headline("Draft");

    assert_eq!(
        article.resource().to_document().unwrap(),
        json!({"data": {"type": "articles", "attributes": {"title": "Draft"}}})
    );
}

#[test]
fn test_single_document_with_id_and_relationships() {
    let article = Article::new();
    article.resource().set_id("1");
    article.set_headline("Published");
    article
        .resource()
        .set_relationship("author", ResourceIdentifier::new("people", "9"));

    assert_eq!(
        article.resource().to_document().unwrap(),
        json!({
            "data": {
                "type": "articles",
                "id": "1",
                "attributes": {"title": "Published"},
                "relationships": {"author": {"data": {"type": "people", "id": "9"}}}
            }
        })
    );
}

#[test]
fn test_single_document_of_bare_resource() {
    let resource = Resource::new(ResourceSchema::untyped("tags"));
    assert_eq!(
        resource.to_document().unwrap(),
        json!({"data": {"type": "tags"}})
    );

    resource.write("label", "rust");
    resource.remove("label");
    assert_eq!(
        resource.to_document().unwrap(),
        json!({"data": {"type": "tags"}})
    );
}

#[test]
fn test_general_document_keeps_input_order() {
    let context = Context::new();
    let people = vec![
        person(&context, Some("2"), "Grace"),
        person(&context, Some("1"), "Ada"),
    ];

    assert_eq!(
        people.to_document().unwrap(),
        json!({
            "data": [
                {"type": "people", "id": "2", "attributes": {"name": "Grace"}},
                {"type": "people", "id": "1", "attributes": {"name": "Ada"}}
            ]
        })
    );
}

#[test]
fn test_general_document_fails_on_missing_id() {
    let context = Context::new();
    let people = [
        person(&context, Some("1"), "Ada"),
        person(&context, None, "Anonymous"),
        person(&context, None, "Also anonymous"),
    ];

    crate::assert_missing_id!(people.to_document(), 1);

    let error = people.to_document_data().unwrap_err();
    assert!(error.is_serialization());
    assert!(error.to_string().contains("people"));
    assert!(matches!(error, JsonApiError::Serialization(_)));
}

#[test]
fn test_creation_document_omits_ids() {
    let context = Context::new();
    let draft = Resource::new(ResourceSchema::untyped("widgets"));
    draft.write("x", 1);
    let persisted = person(&context, Some("5"), "Ada");

    assert_eq!(
        [draft].to_creation_document().unwrap(),
        json!({"data": [{"type": "widgets", "attributes": {"x": 1}}]})
    );
    assert_eq!(
        [persisted].to_creation_document().unwrap(),
        json!({"data": [{"type": "people", "attributes": {"name": "Ada"}}]})
    );
}

#[test]
fn test_empty_collections() {
    let none: Vec<Resource> = Vec::new();
    assert_eq!(none.to_document().unwrap(), json!({"data": []}));
    assert_eq!(none.to_creation_document().unwrap(), json!({"data": []}));
}

#[test]
fn test_collections_of_references() {
    let context = Context::new();
    let ada = person(&context, Some("1"), "Ada");
    let grace = person(&context, Some("2"), "Grace");
    let refs = [&ada, &grace];

    assert_eq!(
        refs.to_document().unwrap()["data"][1]["id"],
        json!("2")
    );
}

#[test]
fn test_repeated_builds_are_byte_identical() {
    let context = Context::new();
    let people = [
        person(&context, Some("1"), "Ada"),
        person(&context, Some("2"), "Grace"),
    ];
    people[0].resource().write("age", 36);

    let first = people.to_document_data().unwrap();
    let second = people.to_document_data().unwrap();
    assert_eq!(first, second);

    let single = people[0].resource();
    assert_eq!(single.to_document_data().unwrap(), single.to_document_data().unwrap());
}

#[test]
fn test_document_bytes_track_content() {
    let article = Article::new();
    article.set_headline("One");
    let before = article.resource().to_document_data().unwrap();

    article.set_headline("Two");
    let after = article.resource().to_document_data().unwrap();
    assert_ne!(before, after);
}

#[test]
fn test_built_bytes_parse_back() {
    let context = Context::new();
    let people = [person(&context, Some("1"), "Ada")];
    let bytes = people.to_document_data().unwrap();

    let target = Context::builder().register::<Person>().build();
    let document = target.parse_slice(&bytes).unwrap();
    let parsed = document.resources()[0].clone().into_kind::<Person>().unwrap();
    assert_eq!(parsed.resource().string("name").as_deref(), Some("Ada"));
}

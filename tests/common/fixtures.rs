//! JSON:API documents used as test input.

use serde_json::{Value, json};

/// The compound document shown on the jsonapi.org front page.
pub fn compound_article_document() -> Value {
    json!({
        "links": {
            "self": "http://example.com/articles",
            "next": "http://example.com/articles?page[offset]=2"
        },
        "data": [{
            "type": "articles",
            "id": "1",
            "attributes": {
                "title": "JSON:API paints my bikeshed!",
                "word-count": 1200,
                "published": true,
                "tags": ["api", "json"]
            },
            "relationships": {
                "author": {
                    "links": {"related": "http://example.com/articles/1/author"},
                    "data": {"type": "people", "id": "9"}
                },
                "comments": {
                    "data": [
                        {"type": "comments", "id": "5"},
                        {"type": "comments", "id": "12"}
                    ]
                }
            },
            "links": {"self": "http://example.com/articles/1"}
        }],
        "included": [{
            "type": "people",
            "id": "9",
            "attributes": {"name": "Dan Gebhardt", "age": 35}
        }, {
            "type": "comments",
            "id": "5",
            "attributes": {"body": "First!"},
            "relationships": {"author": {"data": {"type": "people", "id": "2"}}}
        }, {
            "type": "comments",
            "id": "12",
            "attributes": {"body": "I like XML better"},
            "relationships": {"author": {"data": {"type": "people", "id": "9"}}}
        }],
        "meta": {"total": 1}
    })
}

/// An article whose attributes violate every declared kind.
pub fn malformed_article_document() -> Value {
    json!({
        "data": {
            "type": "articles",
            "id": "13",
            "attributes": {
                "title": 42,
                "word-count": "many",
                "published": "yes",
                "tags": ["ok", 7],
                "footnotes": [{"n": 1}, "loose"],
                "seo": ["not", "a", "map"]
            }
        }
    })
}

/// Error document mixing numeric and string statuses.
pub fn error_document() -> Value {
    json!({
        "errors": [
            {
                "status": 422,
                "source": {"pointer": "/data/attributes/title"},
                "title": "Invalid Attribute",
                "detail": "Title must contain at least three characters."
            },
            {
                "status": "403",
                "code": "forbidden",
                "source": {"parameter": "include"}
            },
            "not an error object"
        ],
        "meta": {"request-id": "abc"}
    })
}

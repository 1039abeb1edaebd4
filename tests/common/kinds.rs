//! Resource kinds used across the test suite.

use jsonapi_mapper::{Linkage, PropertyType, Resource, ResourceKind};
use serde_json::{Map, Number, Value};

/// Blog article with a renamed `headline` field and typed attributes.
#[derive(Debug, Clone)]
pub struct Article(Resource);

impl From<Resource> for Article {
    fn from(resource: Resource) -> Self {
        Self(resource)
    }
}

impl AsRef<Resource> for Article {
    fn as_ref(&self) -> &Resource {
        &self.0
    }
}

impl ResourceKind for Article {
    const RESOURCE_TYPE: &'static str = "articles";

    fn coding_keys() -> Vec<(&'static str, &'static str)> {
        vec![("headline", "title"), ("wordCount", "word-count")]
    }

    fn property_types() -> Vec<(&'static str, PropertyType)> {
        vec![
            ("title", PropertyType::String),
            ("word-count", PropertyType::Number),
            ("published", PropertyType::Bool),
            ("tags", PropertyType::ArrayOfStrings),
            ("footnotes", PropertyType::ArrayOfDictionaries),
            ("seo", PropertyType::Dictionary),
        ]
    }
}

impl Article {
    pub fn headline(&self) -> Option<String> {
        self.0.string("headline")
    }

    pub fn set_headline(&self, headline: &str) {
        self.0.write("headline", headline);
    }

    pub fn word_count(&self) -> Option<Number> {
        self.0.number("wordCount")
    }

    pub fn published(&self) -> Option<bool> {
        self.0.bool("published")
    }

    pub fn tags(&self) -> Option<Vec<String>> {
        self.0.strings("tags")
    }

    pub fn footnotes(&self) -> Option<Vec<Map<String, Value>>> {
        self.0.dictionaries("footnotes")
    }

    pub fn seo(&self) -> Option<Map<String, Value>> {
        self.0.dictionary("seo")
    }

    pub fn author(&self) -> Option<Linkage> {
        self.0.relationship("author")
    }
}

/// Person kind with no coding keys.
#[derive(Debug, Clone)]
pub struct Person(Resource);

impl From<Resource> for Person {
    fn from(resource: Resource) -> Self {
        Self(resource)
    }
}

impl AsRef<Resource> for Person {
    fn as_ref(&self) -> &Resource {
        &self.0
    }
}

impl ResourceKind for Person {
    const RESOURCE_TYPE: &'static str = "people";

    fn property_types() -> Vec<(&'static str, PropertyType)> {
        vec![("name", PropertyType::String), ("age", PropertyType::Number)]
    }
}

/// Kind relying on the default, empty tables.
#[derive(Debug, Clone)]
pub struct Comment(Resource);

impl From<Resource> for Comment {
    fn from(resource: Resource) -> Self {
        Self(resource)
    }
}

impl AsRef<Resource> for Comment {
    fn as_ref(&self) -> &Resource {
        &self.0
    }
}

impl ResourceKind for Comment {
    const RESOURCE_TYPE: &'static str = "comments";
}

//! Resource façades and document builders.
//!
//! * [`Resource`] - handle over one stored resource object
//! * [`ResourceCollection`] - general and creation documents for many resources
//! * [`linkage`] - relationship linkage values

pub mod collection;
pub mod linkage;
pub mod resource;

pub use collection::ResourceCollection;
pub use linkage::{Linkage, ResourceIdentifier};
pub use resource::Resource;

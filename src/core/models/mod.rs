//! Data models for `malla`

pub mod catalog;
pub mod course;
pub mod kind;

pub use catalog::{Catalog, CatalogError, DanglingPrerequisite};
pub use course::Course;
pub use kind::CourseKind;

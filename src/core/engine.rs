//! Prerequisite engine
//!
//! Pure queries over a [`Catalog`] and a set of completed codes. Only
//! direct prerequisites are considered; there is no transitive closure.

use crate::core::models::{Catalog, Course};
use std::collections::BTreeSet;

/// Derived state of a course for a given completion set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseState {
    /// The course code is in the completion set
    pub completed: bool,
    /// Not completed and every direct prerequisite is completed
    pub unlocked: bool,
}

/// Direct relations of a course, resolved against the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relations<'a> {
    /// Prerequisites of the course that exist in the catalog
    pub prerequisites: Vec<&'a Course>,
    /// Courses listing the course as a prerequisite
    pub dependents: Vec<&'a Course>,
}

/// True if `prereqs` is empty or every code is in `completed`.
#[must_use]
pub fn are_prerequisites_met<S: AsRef<str>>(prereqs: &[S], completed: &BTreeSet<String>) -> bool {
    prereqs.iter().all(|code| completed.contains(code.as_ref()))
}

/// Prerequisites of `course` that are not in `completed`, in declaration order.
#[must_use]
pub fn missing_prerequisites<'a>(course: &'a Course, completed: &BTreeSet<String>) -> Vec<&'a str> {
    course
        .prerequisites
        .iter()
        .map(String::as_str)
        .filter(|code| !completed.contains(*code))
        .collect()
}

/// Compute the completed/unlocked state of `course`.
#[must_use]
pub fn compute_state(course: &Course, completed: &BTreeSet<String>) -> CourseState {
    let is_completed = completed.contains(&course.code);
    CourseState {
        completed: is_completed,
        unlocked: !is_completed && are_prerequisites_met(&course.prerequisites, completed),
    }
}

/// All courses whose prerequisites contain `code` (linear scan).
#[must_use]
pub fn find_dependents<'a>(code: &str, catalog: &'a Catalog) -> Vec<&'a Course> {
    catalog.iter().filter(|course| course.requires(code)).collect()
}

/// Prerequisites and dependents of `code`.
///
/// Returns `None` for codes not in the catalog. Prerequisite codes with
/// no catalog entry are skipped.
#[must_use]
pub fn relations<'a>(code: &str, catalog: &'a Catalog) -> Option<Relations<'a>> {
    let course = catalog.get(code)?;
    Some(Relations {
        prerequisites: course
            .prerequisites
            .iter()
            .filter_map(|p| catalog.get(p))
            .collect(),
        dependents: find_dependents(code, catalog),
    })
}

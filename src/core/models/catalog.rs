//! Course catalog
//!
//! The catalog is loaded once per session and never mutated afterwards.

use super::Course;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The document is not a JSON array of courses
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Two courses share the same code
    #[error("duplicate course code '{0}'")]
    DuplicateCode(String),
    /// A course is scheduled in semester 0
    #[error("course '{0}' has semester 0; semesters start at 1")]
    InvalidSemester(String),
}

/// A prerequisite code that names no course in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingPrerequisite {
    /// Course declaring the prerequisite
    pub course: String,
    /// Code that could not be resolved
    pub missing: String,
}

/// Immutable list of courses with a code index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from a list of courses
    ///
    /// # Errors
    /// Returns an error on duplicate codes or a zero semester
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(courses.len());
        for (pos, course) in courses.iter().enumerate() {
            if course.semester == 0 {
                return Err(CatalogError::InvalidSemester(course.code.clone()));
            }
            if index.insert(course.code.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateCode(course.code.clone()));
            }
        }
        Ok(Self { courses, index })
    }

    /// Parse a catalog from a JSON array of course records
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the courses are invalid
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Self::new(courses)
    }

    /// Load a catalog from a JSON file
    ///
    /// Dangling prerequisite codes are logged as warnings but do not fail the load.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;

        for dangling in catalog.dangling_prerequisites() {
            crate::warn!(
                "Course '{}' lists unknown prerequisite '{}'; it can never be unlocked",
                dangling.course,
                dangling.missing
            );
        }
        crate::debug!(
            "Loaded {} courses ({} credits) from {}",
            catalog.len(),
            catalog.total_credits(),
            path.display()
        );
        Ok(catalog)
    }

    /// Look up a course by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&pos| &self.courses[pos])
    }

    /// Whether the catalog holds a course with this code
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Courses in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    /// All courses in source order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Sum of credits over all courses
    #[must_use]
    pub fn total_credits(&self) -> u64 {
        self.courses.iter().map(|c| u64::from(c.credits)).sum()
    }

    /// Prerequisite codes that name no course in the catalog
    #[must_use]
    pub fn dangling_prerequisites(&self) -> Vec<DanglingPrerequisite> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(move |p| !self.contains(p))
                    .map(move |p| DanglingPrerequisite {
                        course: course.code.clone(),
                        missing: p.clone(),
                    })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Course::new("A", "Intro", 4, 1),
            Course::new("B", "Follow-up", 5, 2).with_prerequisites(&["A"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_code() {
        let catalog = sample();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("B").map(|c| c.name.as_str()), Some("Follow-up"));
        assert!(catalog.get("Z").is_none());
        assert_eq!(catalog.total_credits(), 9);
    }

    #[test]
    fn test_total_credits_does_not_overflow() {
        let catalog = Catalog::new(vec![
            Course::new("A", "Big", 4_000_000_000, 1),
            Course::new("B", "Bigger", 4_000_000_000, 2),
        ])
        .unwrap();
        assert_eq!(catalog.total_credits(), 8_000_000_000);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = Catalog::new(vec![
            Course::new("A", "One", 1, 1),
            Course::new("A", "Two", 1, 1),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateCode(code)) if code == "A"));
    }

    #[test]
    fn test_zero_semester_rejected() {
        let result = Catalog::new(vec![Course::new("A", "One", 1, 0)]);
        assert!(matches!(result, Err(CatalogError::InvalidSemester(_))));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"codigo": "A", "nombre": "Intro", "creditos": 4, "semestre": 1, "tipo": "Plan Común", "prerrequisitos": []},
            {"codigo": "B", "nombre": "Next", "creditos": 4, "semestre": 2, "tipo": "Profesional", "prerrequisitos": ["A"]}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("B").unwrap().requires("A"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json_str("{\"not\": \"an array\"}"),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_dangling_prerequisites() {
        let catalog = Catalog::new(vec![
            Course::new("A", "Intro", 4, 1),
            Course::new("B", "Next", 4, 2).with_prerequisites(&["A", "GHOST"]),
        ])
        .unwrap();

        assert_eq!(
            catalog.dangling_prerequisites(),
            vec![DanglingPrerequisite {
                course: "B".to_string(),
                missing: "GHOST".to_string(),
            }]
        );
        assert!(sample().dangling_prerequisites().is_empty());
    }
}

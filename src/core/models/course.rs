//! Course model

use super::CourseKind;
use serde::{Deserialize, Serialize};

/// A course ("ramo") in the curriculum grid
///
/// Field names accept both the English spelling and the Spanish one used
/// by existing `ramos.json` files (`codigo`, `nombre`, `creditos`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g., "MAT1001")
    #[serde(alias = "codigo")]
    pub code: String,

    /// Course name (e.g., "Cálculo I")
    #[serde(alias = "nombre")]
    pub name: String,

    /// Credit count
    #[serde(alias = "creditos")]
    pub credits: u32,

    /// Semester in which the course is scheduled (1-based)
    #[serde(alias = "semestre")]
    pub semester: u32,

    /// Course category; uncategorised (`Other("")`) when the record has none
    #[serde(rename = "type", alias = "tipo", default)]
    pub kind: CourseKind,

    /// Codes of the courses that must be completed first
    #[serde(alias = "prerrequisitos", default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Create a new course without prerequisites
    ///
    /// # Arguments
    /// * `code` - Unique course code
    /// * `name` - Full course name
    /// * `credits` - Credit count
    /// * `semester` - 1-based semester
    #[must_use]
    pub fn new(code: &str, name: &str, credits: u32, semester: u32) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            semester,
            kind: CourseKind::default(),
            prerequisites: Vec::new(),
        }
    }

    /// Builder-style prerequisite list
    #[must_use]
    pub fn with_prerequisites(mut self, codes: &[&str]) -> Self {
        for code in codes {
            self.add_prerequisite(code);
        }
        self
    }

    /// Builder-style course kind
    #[must_use]
    pub fn with_kind(mut self, kind: CourseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a prerequisite by course code, ignoring duplicates
    pub fn add_prerequisite(&mut self, code: &str) {
        if !self.prerequisites.iter().any(|p| p == code) {
            self.prerequisites.push(code.to_string());
        }
    }

    /// Whether `code` is a direct prerequisite of this course
    #[must_use]
    pub fn requires(&self, code: &str) -> bool {
        self.prerequisites.iter().any(|p| p == code)
    }

    /// Academic year the course belongs to (two semesters per year)
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.semester.div_ceil(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("MAT1001", "Cálculo I", 6, 1);

        assert_eq!(course.code, "MAT1001");
        assert_eq!(course.name, "Cálculo I");
        assert_eq!(course.credits, 6);
        assert_eq!(course.semester, 1);
        assert!(course.prerequisites.is_empty());
        assert_eq!(course.kind, CourseKind::default());
    }

    #[test]
    fn test_year_is_semester_pairs() {
        assert_eq!(Course::new("A", "A", 1, 1).year(), 1);
        assert_eq!(Course::new("B", "B", 1, 2).year(), 1);
        assert_eq!(Course::new("C", "C", 1, 3).year(), 2);
        assert_eq!(Course::new("D", "D", 1, 10).year(), 5);
    }

    #[test]
    fn test_add_prerequisite_deduplicates() {
        let mut course = Course::new("MAT1002", "Cálculo II", 6, 2);
        course.add_prerequisite("MAT1001");
        course.add_prerequisite("MAT1001");

        assert_eq!(course.prerequisites, vec!["MAT1001".to_string()]);
        assert!(course.requires("MAT1001"));
        assert!(!course.requires("FIS1001"));
    }

    #[test]
    fn test_deserialize_spanish_fields() {
        let json = r#"{
            "codigo": "FIS1002",
            "nombre": "Física II",
            "creditos": 5,
            "semestre": 3,
            "tipo": "Ciencias Básicas",
            "prerrequisitos": ["FIS1001", "MAT1001"]
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();

        assert_eq!(course.code, "FIS1002");
        assert_eq!(course.name, "Física II");
        assert_eq!(course.credits, 5);
        assert_eq!(course.year(), 2);
        assert_eq!(course.kind, CourseKind::Basic);
        assert_eq!(course.prerequisites.len(), 2);
    }

    #[test]
    fn test_deserialize_missing_type() {
        let json = r#"{"codigo": "X1", "nombre": "Sin tipo", "creditos": 3, "semestre": 1}"#;
        let course: Course = serde_json::from_str(json).unwrap();

        assert_eq!(course.kind, CourseKind::Other(String::new()));
        assert_eq!(course.kind.slug(), "other");
    }

    #[test]
    fn test_deserialize_missing_prerequisites() {
        let json = r#"{"code": "ING100", "name": "Inglés I", "credits": 2, "semester": 1, "type": "Inglés"}"#;
        let course: Course = serde_json::from_str(json).unwrap();

        assert!(course.prerequisites.is_empty());
        assert_eq!(course.kind, CourseKind::Language);
    }
}

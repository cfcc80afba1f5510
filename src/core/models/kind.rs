//! Course categories
//!
//! Source catalogs label course types with free text ("Ciencias Básicas",
//! "Formación General", ...). Labels are normalised once at parse time and
//! mapped onto [`CourseKind`]; presentation uses [`CourseKind::slug`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Category of a course
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CourseKind {
    /// Mathematics and natural sciences foundation
    Basic,
    /// Discipline-specific courses
    Professional,
    /// General education
    General,
    /// Elective courses
    Elective,
    /// Internships, capstone and thesis work
    Practice,
    /// Language courses
    Language,
    /// Any label that matches no known category, kept verbatim.
    /// An empty label means the record had none.
    Other(String),
}

impl Default for CourseKind {
    /// No label: uncategorised, slug `other`
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// Lowercase, drop whitespace and punctuation, fold Spanish accents.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| match c.to_lowercase().next().unwrap_or(c) {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

impl CourseKind {
    /// Map a free-text label onto a kind
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "basic" | "basico" | "basica" | "cienciasbasicas" | "ciencias" => Self::Basic,
            "professional" | "profesional" | "especialidad" | "disciplinar" | "formacionprofesional" => {
                Self::Professional
            }
            "general" | "formaciongeneral" | "plancomun" | "transversal" => Self::General,
            "elective" | "electivo" | "electiva" | "optativo" | "optativa" => Self::Elective,
            "practice" | "practica" | "titulacion" | "tesis" | "memoria" => Self::Practice,
            "language" | "ingles" | "idioma" | "idiomas" => Self::Language,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Basic => "Ciencias Básicas",
            Self::Professional => "Profesional",
            Self::General => "Formación General",
            Self::Elective => "Electivo",
            Self::Practice => "Práctica",
            Self::Language => "Inglés",
            Self::Other(label) => label,
        }
    }

    /// Stable identifier usable as a CSS class or file-safe tag
    #[must_use]
    pub fn slug(&self) -> String {
        match self {
            Self::Basic => "basic".to_string(),
            Self::Professional => "professional".to_string(),
            Self::General => "general".to_string(),
            Self::Elective => "elective".to_string(),
            Self::Practice => "practice".to_string(),
            Self::Language => "language".to_string(),
            Self::Other(label) => {
                let slug = normalize(label);
                if slug.is_empty() {
                    "other".to_string()
                } else {
                    format!("other-{slug}")
                }
            }
        }
    }
}

impl FromStr for CourseKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CourseKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CourseKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

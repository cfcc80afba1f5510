//! Completion tracking
//!
//! [`CompletionSet`] holds the completed course codes and enforces the
//! prerequisite rule when codes are added. [`CompletionStore`] pairs a set
//! with a [`KeyValueStore`] and persists after every successful mutation.
//!
//! Un-completing a course never cascades: dependents completed earlier
//! stay completed even though their prerequisite is gone.

use crate::core::engine::{self, CourseState};
use crate::core::models::{Catalog, Course};
use crate::core::storage::{KeyValueStore, StorageError};
use crate::{debug, warn};
use std::collections::BTreeSet;
use thiserror::Error;

/// Key under which the completion list is persisted
pub const STORAGE_KEY: &str = "completed_courses";

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The course was added to the set
    Completed,
    /// The course was removed from the set
    Uncompleted,
}

/// Why a toggle left the set unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    /// Some prerequisites are not completed yet
    #[error("to complete \"{name}\" ({code}) first complete: {}", .missing.join(", "))]
    Blocked {
        /// Code of the blocked course
        code: String,
        /// Name of the blocked course
        name: String,
        /// Prerequisite codes still missing
        missing: Vec<String>,
    },
    /// No course with this code exists
    #[error("unknown course '{0}'")]
    UnknownCourse(String),
}

/// Errors raised by [`CompletionStore`] mutations
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The toggle was refused
    #[error(transparent)]
    Toggle(#[from] ToggleError),
    /// The new state could not be persisted
    #[error("failed to persist completion state: {0}")]
    Storage(#[from] StorageError),
}

/// Progress counters over a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Completed courses that exist in the catalog
    pub completed_courses: usize,
    /// Courses in the catalog
    pub total_courses: usize,
    /// Credits of the completed courses
    pub completed_credits: u64,
    /// Credits of the whole catalog
    pub total_credits: u64,
}

impl Progress {
    /// Completed credits as a percentage of total credits
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total_credits == 0 {
            0.0
        } else {
            self.completed_credits as f64 * 100.0 / self.total_credits as f64
        }
    }
}

/// Set of completed course codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    codes: BTreeSet<String>,
}

impl CompletionSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `code` is completed
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Number of completed codes
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether nothing is completed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Underlying ordered set
    #[must_use]
    pub const fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    /// Derived state of `course` against this set
    #[must_use]
    pub fn state_of(&self, course: &Course) -> CourseState {
        engine::compute_state(course, &self.codes)
    }

    /// Toggle completion of `code`
    ///
    /// Removing always succeeds. Adding requires every direct prerequisite
    /// to be completed already.
    ///
    /// # Errors
    /// [`ToggleError::Blocked`] when prerequisites are missing,
    /// [`ToggleError::UnknownCourse`] when the code is not in the catalog.
    /// The set is unchanged in both cases.
    pub fn toggle(&mut self, code: &str, catalog: &Catalog) -> Result<Toggled, ToggleError> {
        if self.codes.remove(code) {
            return Ok(Toggled::Uncompleted);
        }
        let course = catalog
            .get(code)
            .ok_or_else(|| ToggleError::UnknownCourse(code.to_string()))?;
        let missing = engine::missing_prerequisites(course, &self.codes);
        if !missing.is_empty() {
            return Err(ToggleError::Blocked {
                code: course.code.clone(),
                name: course.name.clone(),
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        self.codes.insert(course.code.clone());
        Ok(Toggled::Completed)
    }

    /// Remove every code
    pub fn clear(&mut self) {
        self.codes.clear();
    }

    /// Serialize as an ordered JSON array of codes
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.codes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parse a JSON array of codes; `None` if the data is malformed
    #[must_use]
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Vec<String>>(json)
            .ok()
            .map(|codes| codes.into_iter().collect())
    }

    /// Progress counters over `catalog`
    #[must_use]
    pub fn progress(&self, catalog: &Catalog) -> Progress {
        let completed: Vec<&Course> = catalog.iter().filter(|c| self.contains(&c.code)).collect();
        Progress {
            completed_courses: completed.len(),
            total_courses: catalog.len(),
            completed_credits: completed.iter().map(|c| u64::from(c.credits)).sum(),
            total_credits: catalog.total_credits(),
        }
    }
}

impl FromIterator<String> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// A [`CompletionSet`] persisted through a [`KeyValueStore`]
#[derive(Debug)]
pub struct CompletionStore<S: KeyValueStore> {
    set: CompletionSet,
    backend: S,
}

impl<S: KeyValueStore> CompletionStore<S> {
    /// Restore the completion set from `backend`
    ///
    /// A missing key, an unreadable backend or malformed data all yield an
    /// empty set.
    pub fn open(backend: S) -> Self {
        let set = match backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => CompletionSet::from_json(&raw).unwrap_or_else(|| {
                warn!("Stored completion data is malformed; starting with no completed courses");
                CompletionSet::new()
            }),
            Ok(None) => CompletionSet::new(),
            Err(e) => {
                warn!("Cannot read completion data ({e}); starting with no completed courses");
                CompletionSet::new()
            }
        };
        debug!("Restored {} completed course(s)", set.len());
        Self { set, backend }
    }

    /// Current completion set
    #[must_use]
    pub const fn set(&self) -> &CompletionSet {
        &self.set
    }

    /// Storage backend
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Toggle `code` and persist the new set
    ///
    /// # Errors
    /// Returns the toggle refusal, or a storage error if persisting failed.
    /// The set is unchanged in both cases.
    pub fn toggle(&mut self, code: &str, catalog: &Catalog) -> Result<Toggled, CompletionError> {
        let before = self.set.clone();
        let toggled = self.set.toggle(code, catalog)?;
        if let Err(e) = self.persist() {
            self.set = before;
            return Err(e.into());
        }
        debug!("Toggled {code}: {toggled:?}");
        Ok(toggled)
    }

    /// Discard all completion history, including the persisted copy
    ///
    /// # Errors
    /// Returns an error if the stored key cannot be removed; the set is kept
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.backend.remove(STORAGE_KEY)?;
        self.set.clear();
        Ok(())
    }

    /// Progress counters over `catalog`
    #[must_use]
    pub fn progress(&self, catalog: &Catalog) -> Progress {
        self.set.progress(catalog)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.backend.set(STORAGE_KEY, &self.set.to_json())
    }
}

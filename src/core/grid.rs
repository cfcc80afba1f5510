//! Curriculum grid
//!
//! Courses grouped by year, then semester, with a per-cell visual state.
//! The grouping is computed once; [`Grid::refresh`] only recomputes states
//! and highlight flags. Within a semester cells are ordered by course code.

use crate::core::completion::{CompletionSet, Progress};
use crate::core::engine;
use crate::core::models::{Catalog, CourseKind};
use std::collections::{BTreeMap, HashMap};

/// Persistent visual state of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Course is completed
    Completed,
    /// Course is not completed and its prerequisites are
    Unlocked,
    /// Neither completed nor unlocked
    #[default]
    Locked,
}

impl CellState {
    /// CSS class for the state (empty for locked cells)
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Unlocked => "unlocked",
            Self::Locked => "",
        }
    }

    /// Single-character marker for terminal output
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Completed => '✓',
            Self::Unlocked => '○',
            Self::Locked => '·',
        }
    }
}

/// Transient highlight flags; several may be set on one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    /// The focused course itself
    pub selected: bool,
    /// A prerequisite of the focused course
    pub prerequisite: bool,
    /// A course the focused course helps unlock
    pub unlocks: bool,
}

impl Highlight {
    /// Whether no flag is set
    #[must_use]
    pub const fn is_none(self) -> bool {
        !self.selected && !self.prerequisite && !self.unlocks
    }

    /// Space-separated CSS classes for the set flags
    #[must_use]
    pub fn classes(self) -> String {
        let mut classes = Vec::new();
        if self.selected {
            classes.push("highlight-selected");
        }
        if self.prerequisite {
            classes.push("highlight-prereq");
        }
        if self.unlocks {
            classes.push("highlight-unlocks");
        }
        classes.join(" ")
    }
}

/// Highlight flags for every course related to one focused course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    focus: Option<String>,
    flags: HashMap<String, Highlight>,
}

impl Highlights {
    /// No highlighting
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Highlight `code`, its prerequisites and its dependents
    ///
    /// Unknown codes produce no highlighting.
    #[must_use]
    pub fn focused_on(code: &str, catalog: &Catalog) -> Self {
        let Some(relations) = engine::relations(code, catalog) else {
            return Self::none();
        };
        let mut flags: HashMap<String, Highlight> = HashMap::new();
        flags.entry(code.to_string()).or_default().selected = true;
        for course in relations.prerequisites {
            flags.entry(course.code.clone()).or_default().prerequisite = true;
        }
        for course in relations.dependents {
            flags.entry(course.code.clone()).or_default().unlocks = true;
        }
        Self {
            focus: Some(code.to_string()),
            flags,
        }
    }

    /// Focused course, if any
    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Flags for `code`
    #[must_use]
    pub fn get(&self, code: &str) -> Highlight {
        self.flags.get(code).copied().unwrap_or_default()
    }
}

/// One course in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Credit count
    pub credits: u32,
    /// Course category
    pub kind: CourseKind,
    /// Number of direct prerequisites
    pub prerequisite_count: usize,
    /// Persistent state
    pub state: CellState,
    /// Transient highlight
    pub highlight: Highlight,
}

impl Cell {
    /// All CSS classes of the cell: `ramo`, kind slug, state, highlights
    #[must_use]
    pub fn classes(&self) -> String {
        let mut classes = vec!["ramo".to_string(), self.kind.slug()];
        let state = self.state.class();
        if !state.is_empty() {
            classes.push(state.to_string());
        }
        let highlight = self.highlight.classes();
        if !highlight.is_empty() {
            classes.push(highlight);
        }
        classes.join(" ")
    }
}

/// Courses of one semester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterGroup {
    /// 1-based semester number
    pub semester: u32,
    /// Cells ordered by course code
    pub cells: Vec<Cell>,
}

impl SemesterGroup {
    /// Credits scheduled in this semester
    #[must_use]
    pub fn credits(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.credits)).sum()
    }
}

/// Semesters of one academic year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGroup {
    /// 1-based year number
    pub year: u32,
    /// Semesters in ascending order
    pub semesters: Vec<SemesterGroup>,
}

/// The whole grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Years in ascending order
    pub years: Vec<YearGroup>,
    /// Progress at the last refresh
    pub progress: Progress,
}

impl Grid {
    /// Group the catalog by year and semester; every cell starts locked
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let mut by_year: BTreeMap<u32, BTreeMap<u32, Vec<Cell>>> = BTreeMap::new();
        for course in catalog {
            by_year
                .entry(course.year())
                .or_default()
                .entry(course.semester)
                .or_default()
                .push(Cell {
                    code: course.code.clone(),
                    name: course.name.clone(),
                    credits: course.credits,
                    kind: course.kind.clone(),
                    prerequisite_count: course.prerequisites.len(),
                    state: CellState::Locked,
                    highlight: Highlight::default(),
                });
        }

        let years = by_year
            .into_iter()
            .map(|(year, semesters)| YearGroup {
                year,
                semesters: semesters
                    .into_iter()
                    .map(|(semester, mut cells)| {
                        cells.sort_by(|a, b| a.code.cmp(&b.code));
                        SemesterGroup { semester, cells }
                    })
                    .collect(),
            })
            .collect();

        Self {
            years,
            progress: Progress {
                total_courses: catalog.len(),
                total_credits: catalog.total_credits(),
                ..Progress::default()
            },
        }
    }

    /// Recompute every cell's state and highlight
    ///
    /// Cells whose code has vanished from the catalog are skipped.
    pub fn refresh(&mut self, catalog: &Catalog, completed: &CompletionSet, highlights: &Highlights) {
        for cell in self.cells_mut() {
            let Some(course) = catalog.get(&cell.code) else {
                continue;
            };
            let state = completed.state_of(course);
            cell.state = if state.completed {
                CellState::Completed
            } else if state.unlocked {
                CellState::Unlocked
            } else {
                CellState::Locked
            };
            cell.highlight = highlights.get(&cell.code);
        }
        self.progress = completed.progress(catalog);
    }

    /// All cells in display order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.years
            .iter()
            .flat_map(|y| &y.semesters)
            .flat_map(|s| &s.cells)
    }

    fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.years
            .iter_mut()
            .flat_map(|y| &mut y.semesters)
            .flat_map(|s| &mut s.cells)
    }

    /// Cell for `code`
    #[must_use]
    pub fn cell(&self, code: &str) -> Option<&Cell> {
        self.cells().find(|c| c.code == code)
    }
}

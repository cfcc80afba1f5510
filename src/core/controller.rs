//! Interaction controller
//!
//! Owns the application state (catalog, completion store, selection,
//! hover focus, grid) and turns UI events into state transitions. The
//! front end only dispatches [`Event`]s and reads back the grid.
//!
//! Selection transitions:
//!
//! | state          | event          | next state     |
//! |----------------|----------------|----------------|
//! | `Idle`         | `Click(x)`     | `Selected(x)`  |
//! | `Selected(x)`  | `Click(x)`     | `Idle`         |
//! | `Selected(y)`  | `Click(x)`     | `Selected(x)`  |
//! | any            | `ClickOutside` | `Idle`         |
//!
//! Every click on a known course also toggles its completion. A blocked
//! toggle leaves completion untouched but the selection still moves.
//! Hover highlights are transient and take precedence over the selection
//! until `HoverEnd`.

use crate::core::completion::{CompletionError, CompletionStore, Progress, ToggleError, Toggled};
use crate::core::grid::{Grid, Highlights};
use crate::core::models::Catalog;
use crate::core::storage::{KeyValueStore, StorageError};
use crate::{debug, info};

/// Click-selection state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected
    #[default]
    Idle,
    /// A course is selected and its relations stay highlighted
    Selected(String),
}

impl Selection {
    /// Selected code, if any
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Selected(code) => Some(code),
        }
    }
}

/// Input events from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer entered a course
    Hover(String),
    /// Pointer left the hovered course
    HoverEnd,
    /// A course was clicked
    Click(String),
    /// A click landed outside every course
    ClickOutside,
    /// The user confirmed clearing every completed course
    ClearAll,
}

/// What an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Only highlighting or selection changed
    Highlighted,
    /// A click toggled completion
    Toggled {
        /// Clicked course
        code: String,
        /// Direction of the toggle
        toggled: Toggled,
    },
    /// A click was refused because prerequisites are missing
    Blocked(ToggleError),
    /// The event referenced an unknown course and was ignored
    Ignored,
    /// Completion history was cleared
    Cleared,
}

/// Errors that abort an event
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The completion state could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application state driven by [`Event`]s
#[derive(Debug)]
pub struct Controller<S: KeyValueStore> {
    catalog: Catalog,
    store: CompletionStore<S>,
    selection: Selection,
    hover: Option<String>,
    grid: Grid,
}

impl<S: KeyValueStore> Controller<S> {
    /// Build the controller and paint the initial grid
    pub fn new(catalog: Catalog, backend: S) -> Self {
        let store = CompletionStore::open(backend);
        let grid = Grid::build(&catalog);
        let mut controller = Self {
            catalog,
            store,
            selection: Selection::Idle,
            hover: None,
            grid,
        };
        controller.refresh();
        controller
    }

    /// Course catalog
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Completion store
    #[must_use]
    pub const fn store(&self) -> &CompletionStore<S> {
        &self.store
    }

    /// Current click selection
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Course under the pointer, if any
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hover.as_deref()
    }

    /// Grid as of the last event
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current progress counters
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.store.progress(&self.catalog)
    }

    /// Course whose relations are highlighted: hover first, then selection
    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.hover.as_deref().or_else(|| self.selection.code())
    }

    /// Apply one event and refresh the grid
    ///
    /// The grid is refreshed even when the event fails.
    ///
    /// # Errors
    /// Returns an error only if persisting the completion state fails. The
    /// completion set and the selection are then left as they were.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome, ControllerError> {
        debug!("Event {event:?} in state {:?}", self.selection);
        let result = match event {
            Event::Hover(code) => Ok(self.hover(code)),
            Event::HoverEnd => {
                self.hover = None;
                Ok(Outcome::Highlighted)
            }
            Event::Click(code) => self.click(&code),
            Event::ClickOutside => {
                self.selection = Selection::Idle;
                Ok(Outcome::Highlighted)
            }
            Event::ClearAll => self.clear_all(),
        };
        self.refresh();
        result
    }

    fn clear_all(&mut self) -> Result<Outcome, ControllerError> {
        self.store.clear_all()?;
        info!("Cleared all completed courses");
        Ok(Outcome::Cleared)
    }

    fn hover(&mut self, code: String) -> Outcome {
        if !self.catalog.contains(&code) {
            return Outcome::Ignored;
        }
        if self.selection.code() == Some(code.as_str()) {
            // already highlighted by the selection
            self.hover = None;
        } else {
            self.hover = Some(code);
        }
        Outcome::Highlighted
    }

    fn click(&mut self, code: &str) -> Result<Outcome, ControllerError> {
        if !self.catalog.contains(code) {
            debug!("Ignoring click on unknown course '{code}'");
            return Ok(Outcome::Ignored);
        }

        let outcome = match self.store.toggle(code, &self.catalog) {
            Ok(toggled) => Outcome::Toggled {
                code: code.to_string(),
                toggled,
            },
            Err(CompletionError::Toggle(refused)) => Outcome::Blocked(refused),
            Err(CompletionError::Storage(e)) => return Err(e.into()),
        };

        self.selection = match &self.selection {
            Selection::Selected(current) if current == code => Selection::Idle,
            _ => Selection::Selected(code.to_string()),
        };
        self.hover = None;
        Ok(outcome)
    }

    fn refresh(&mut self) {
        let highlights = self
            .focus()
            .map_or_else(Highlights::none, |code| Highlights::focused_on(code, &self.catalog));
        self.grid.refresh(&self.catalog, self.store.set(), &highlights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::CellState;
    use crate::core::models::Course;
    use crate::core::storage::{MemoryStore, ReadOnlyStore};

    fn controller() -> Controller<MemoryStore> {
        let catalog = Catalog::new(vec![
            Course::new("A", "Intro", 4, 1),
            Course::new("B", "Follow-up", 6, 2).with_prerequisites(&["A"]),
            Course::new("C", "Other", 2, 1),
        ])
        .unwrap();
        Controller::new(catalog, MemoryStore::new())
    }

    fn click(c: &mut Controller<MemoryStore>, code: &str) -> Outcome {
        c.dispatch(Event::Click(code.to_string())).unwrap()
    }

    #[test]
    fn test_initial_paint() {
        let c = controller();
        assert_eq!(c.selection(), &Selection::Idle);
        assert_eq!(c.grid().cell("A").unwrap().state, CellState::Unlocked);
        assert_eq!(c.grid().cell("B").unwrap().state, CellState::Locked);
    }

    #[test]
    fn test_click_idle_selects_and_toggles() {
        let mut c = controller();
        let outcome = click(&mut c, "A");

        assert_eq!(
            outcome,
            Outcome::Toggled {
                code: "A".to_string(),
                toggled: Toggled::Completed
            }
        );
        assert_eq!(c.selection(), &Selection::Selected("A".to_string()));
        assert_eq!(c.grid().cell("A").unwrap().state, CellState::Completed);
        assert_eq!(c.grid().cell("B").unwrap().state, CellState::Unlocked);
        assert!(c.grid().cell("B").unwrap().highlight.unlocks);
    }

    #[test]
    fn test_click_selected_returns_to_idle() {
        let mut c = controller();
        click(&mut c, "A");
        click(&mut c, "A");

        assert_eq!(c.selection(), &Selection::Idle);
        assert!(c.grid().cells().all(|cell| cell.highlight.is_none()));
        assert!(c.store().set().is_empty());
    }

    #[test]
    fn test_blocked_click_still_moves_selection() {
        let mut c = controller();
        click(&mut c, "C");
        let outcome = click(&mut c, "B");

        assert!(matches!(outcome, Outcome::Blocked(ToggleError::Blocked { ref code, .. }) if code == "B"));
        assert_eq!(c.selection(), &Selection::Selected("B".to_string()));
        assert!(!c.store().set().contains("B"));
        assert!(c.grid().cell("A").unwrap().highlight.prerequisite);
    }

    #[test]
    fn test_hover_is_transient() {
        let mut c = controller();
        click(&mut c, "C");
        c.dispatch(Event::Hover("B".to_string())).unwrap();
        assert_eq!(c.focus(), Some("B"));
        assert!(c.grid().cell("A").unwrap().highlight.prerequisite);
        assert!(!c.grid().cell("C").unwrap().highlight.selected);

        c.dispatch(Event::HoverEnd).unwrap();
        assert_eq!(c.focus(), Some("C"));
        assert!(c.grid().cell("C").unwrap().highlight.selected);
        assert!(!c.grid().cell("A").unwrap().highlight.prerequisite);
    }

    #[test]
    fn test_hover_on_selected_keeps_selection() {
        let mut c = controller();
        click(&mut c, "A");
        c.dispatch(Event::Hover("A".to_string())).unwrap();
        assert_eq!(c.hovered(), None);
        assert_eq!(c.focus(), Some("A"));
    }

    #[test]
    fn test_click_outside_and_unknown() {
        let mut c = controller();
        click(&mut c, "A");
        assert_eq!(click(&mut c, "GHOST"), Outcome::Ignored);
        assert_eq!(c.selection(), &Selection::Selected("A".to_string()));

        c.dispatch(Event::ClickOutside).unwrap();
        assert_eq!(c.selection(), &Selection::Idle);
        assert_eq!(
            c.dispatch(Event::Hover("GHOST".to_string())).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_failed_save_keeps_grid_and_store_in_sync() {
        let catalog = Catalog::new(vec![
            Course::new("A", "Intro", 4, 1),
            Course::new("B", "Follow-up", 6, 2).with_prerequisites(&["A"]),
        ])
        .unwrap();
        let mut c = Controller::new(catalog, ReadOnlyStore::default());

        assert!(c.dispatch(Event::Click("A".to_string())).is_err());
        assert!(!c.store().set().contains("A"));
        assert_eq!(c.selection(), &Selection::Idle);
        assert_eq!(c.grid().cell("A").unwrap().state, CellState::Unlocked);
        assert_eq!(c.grid().cell("B").unwrap().state, CellState::Locked);
        assert_eq!(c.progress(), c.grid().progress);
    }

    #[test]
    fn test_failed_clear_keeps_completions() {
        let catalog = Catalog::new(vec![Course::new("A", "Intro", 4, 1)]).unwrap();
        let mut c = Controller::new(
            catalog,
            ReadOnlyStore {
                value: Some(r#"["A"]"#.to_string()),
            },
        );
        c.dispatch(Event::Hover("A".to_string())).unwrap();

        assert!(c.dispatch(Event::ClearAll).is_err());
        assert!(c.store().set().contains("A"));
        assert_eq!(c.grid().cell("A").unwrap().state, CellState::Completed);
        assert_eq!(c.grid().progress.completed_courses, 1);
        assert!(c.grid().cell("A").unwrap().highlight.selected);
    }

    #[test]
    fn test_clear_all() {
        let mut c = controller();
        click(&mut c, "A");
        click(&mut c, "B");
        assert_eq!(c.progress().completed_courses, 2);

        assert_eq!(c.dispatch(Event::ClearAll).unwrap(), Outcome::Cleared);
        assert_eq!(c.progress().completed_courses, 0);
        assert_eq!(c.grid().cell("B").unwrap().state, CellState::Locked);
        assert_eq!(c.store().backend().get(crate::core::completion::STORAGE_KEY).unwrap(), None);
    }
}

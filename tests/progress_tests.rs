//! Integration tests for completion tracking on disk

use malla::core::completion::{Toggled, STORAGE_KEY};
use malla::core::controller::{Controller, Event, Outcome, Selection};
use malla::core::grid::CellState;
use malla::core::models::Catalog;
use malla::core::render::{GridRenderer, HtmlRenderer, RenderContext, TextRenderer};
use malla::core::storage::{FileStore, KeyValueStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample() -> Catalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/ramos.json");
    Catalog::load(path).expect("sample catalog should load")
}

fn click(controller: &mut Controller<FileStore>, code: &str) -> Outcome {
    controller
        .dispatch(Event::Click(code.to_string()))
        .expect("dispatch should not fail")
}

#[test]
fn completion_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut first = Controller::new(sample(), FileStore::new(dir.path()));
    click(&mut first, "MAT1001");
    click(&mut first, "FIS1001");
    click(&mut first, "FIS1101");
    assert_eq!(first.progress().completed_courses, 3);

    let stored = fs::read_to_string(dir.path().join(format!("{STORAGE_KEY}.json"))).unwrap();
    assert!(stored.contains("FIS1101"));

    let second = Controller::new(sample(), FileStore::new(dir.path()));
    assert_eq!(second.progress().completed_courses, 3);
    assert_eq!(second.progress().completed_credits, 18);
    assert_eq!(second.selection(), &Selection::Idle);
    assert_eq!(
        second.grid().cell("FIS1101").unwrap().state,
        CellState::Completed
    );
    assert_eq!(
        second.grid().cell("MAT1101").unwrap().state,
        CellState::Unlocked
    );
}

#[test]
fn blocked_click_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    let mut controller = Controller::new(sample(), FileStore::new(dir.path()));

    match click(&mut controller, "MAT2001") {
        Outcome::Blocked(reason) => {
            let message = reason.to_string();
            assert!(message.contains("Ecuaciones Diferenciales"));
            assert!(message.contains("MAT1002"));
            assert!(message.contains("MAT1101"));
        }
        other => panic!("expected a blocked click, got {other:?}"),
    }
    assert!(FileStore::new(dir.path()).get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn corrupt_state_starts_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path());
    store.set(STORAGE_KEY, "not json at all").unwrap();

    let mut controller = Controller::new(sample(), store);
    assert_eq!(controller.progress().completed_courses, 0);

    // The next successful toggle overwrites the corrupt value
    assert_eq!(
        click(&mut controller, "MAT1001"),
        Outcome::Toggled {
            code: "MAT1001".to_string(),
            toggled: Toggled::Completed
        }
    );
    let stored = FileStore::new(dir.path()).get(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(stored, r#"["MAT1001"]"#);
}

#[test]
fn clear_all_removes_state_file() {
    let dir = TempDir::new().unwrap();
    let mut controller = Controller::new(sample(), FileStore::new(dir.path()));
    click(&mut controller, "MAT1001");
    assert!(dir.path().join(format!("{STORAGE_KEY}.json")).exists());

    assert_eq!(
        controller.dispatch(Event::ClearAll).unwrap(),
        Outcome::Cleared
    );
    assert!(!dir.path().join(format!("{STORAGE_KEY}.json")).exists());

    let reopened = Controller::new(sample(), FileStore::new(dir.path()));
    assert_eq!(reopened.progress().completed_courses, 0);
}

#[test]
fn rendered_grid_reflects_state() {
    let dir = TempDir::new().unwrap();
    let mut controller = Controller::new(sample(), FileStore::new(dir.path()));
    click(&mut controller, "INF1001");
    controller
        .dispatch(Event::Hover("INF2001".to_string()))
        .unwrap();

    let ctx = RenderContext::new("Malla", controller.grid());
    let text = TextRenderer::new().render(&ctx).unwrap();
    assert!(text.contains("Programación"));
    assert!(text.contains("1/32 courses"));

    let out = dir.path().join("out").join("malla.html");
    HtmlRenderer::new().write(&ctx, &out).unwrap();
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(
        r#"class="ramo professional unlocked highlight-selected" data-codigo="INF2001""#
    ));
    assert!(html.contains(
        r#"class="ramo professional completed highlight-prereq" data-codigo="INF1001""#
    ));
    assert!(html.contains(r#"class="ramo professional highlight-unlocks" data-codigo="INF2102""#));
}

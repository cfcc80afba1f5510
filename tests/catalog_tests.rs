//! Integration tests for loading the sample catalog

use malla::core::grid::{CellState, Grid, Highlights};
use malla::core::completion::CompletionSet;
use malla::core::models::{Catalog, CatalogError, CourseKind};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/ramos.json")
}

fn sample() -> Catalog {
    Catalog::load(sample_path()).expect("sample catalog should load")
}

#[test]
fn sample_catalog_loads() {
    let catalog = sample();
    assert_eq!(catalog.len(), 32);
    assert_eq!(catalog.total_credits(), 169);
    assert!(catalog.dangling_prerequisites().is_empty());

    let calculo = catalog.get("MAT1001").unwrap();
    assert_eq!(calculo.name, "Cálculo I");
    assert_eq!(calculo.kind, CourseKind::Basic);
    assert!(calculo.prerequisites.is_empty());

    let titulo = catalog.get("INF4101").unwrap();
    assert_eq!(titulo.kind, CourseKind::Practice);
    assert_eq!(titulo.prerequisites.len(), 3);
    assert_eq!(titulo.year(), 4);
}

#[test]
fn sample_grid_layout() {
    let catalog = sample();
    let mut grid = Grid::build(&catalog);
    grid.refresh(&catalog, &CompletionSet::new(), &Highlights::none());

    assert_eq!(grid.years.len(), 4);
    for year in &grid.years {
        assert_eq!(year.semesters.len(), 2);
        for semester in &year.semesters {
            let codes: Vec<&str> = semester.cells.iter().map(|c| c.code.as_str()).collect();
            let mut sorted = codes.clone();
            sorted.sort_unstable();
            assert_eq!(codes, sorted);
        }
    }

    // Only courses without prerequisites start unlocked
    for cell in grid.cells() {
        let course = catalog.get(&cell.code).unwrap();
        let expected = if course.prerequisites.is_empty() {
            CellState::Unlocked
        } else {
            CellState::Locked
        };
        assert_eq!(cell.state, expected, "{}", cell.code);
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn malformed_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ramos.json");
    fs::write(&path, "{ \"codigo\": ").unwrap();
    assert!(matches!(
        Catalog::load(&path).unwrap_err(),
        CatalogError::Malformed(_)
    ));
}

#[test]
fn dangling_prerequisite_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ramos.json");
    fs::write(
        &path,
        r#"[
  {"codigo": "A", "nombre": "Uno", "creditos": 4, "semestre": 1},
  {"codigo": "B", "nombre": "Dos", "creditos": 4, "semestre": 2, "prerrequisitos": ["A", "Z"]}
]"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let dangling = catalog.dangling_prerequisites();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].course, "B");
    assert_eq!(dangling[0].missing, "Z");
}

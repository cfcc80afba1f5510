//! Info command handler

use super::open_controller;
use malla::config::Config;
use malla::core::engine;
use malla::core::grid::CellState;

/// Print the state and direct relations of one course.
pub fn run(config: &Config, code: &str) -> i32 {
    let controller = match open_controller(config) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };
    let catalog = controller.catalog();
    let (Some(course), Some(relations)) = (catalog.get(code), engine::relations(code, catalog)) else {
        eprintln!("✗ Unknown course: {code}");
        return 1;
    };

    let completed = controller.store().set();
    let state = match controller.grid().cell(code).map(|c| c.state) {
        Some(CellState::Completed) => "completed",
        Some(CellState::Unlocked) => "unlocked",
        _ => "locked",
    };

    println!("{} {}", course.code, course.name);
    println!(
        "  Año {}, Semestre {} · {} créditos · {}",
        course.year(),
        course.semester,
        course.credits,
        course.kind
    );
    println!("  State: {state}");

    if course.prerequisites.is_empty() {
        println!("  Prerequisites: none");
    } else {
        println!("  Prerequisites:");
        for prereq in &course.prerequisites {
            let mark = if completed.contains(prereq) { '✓' } else { '✗' };
            let name = catalog.get(prereq).map_or("(not in catalog)", |c| c.name.as_str());
            println!("    {mark} {prereq} {name}");
        }
    }

    if relations.dependents.is_empty() {
        println!("  Unlocks: nothing");
    } else {
        println!("  Unlocks:");
        for dependent in relations.dependents {
            println!("    → {} {}", dependent.code, dependent.name);
        }
    }
    0
}

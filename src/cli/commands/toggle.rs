//! Toggle command handler

use super::open_controller;
use malla::config::Config;
use malla::core::completion::Toggled;
use malla::core::controller::{Event, Outcome};
use malla::error;

/// Toggle each code in order and report the result.
///
/// Returns 1 if any toggle was blocked, unknown, or could not be saved.
pub fn run(config: &Config, codes: &[String]) -> i32 {
    let mut controller = match open_controller(config) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };

    let mut status = 0;
    for code in codes {
        let name = controller
            .catalog()
            .get(code)
            .map_or_else(String::new, |c| c.name.clone());
        match controller.dispatch(Event::Click(code.clone())) {
            Ok(Outcome::Toggled {
                toggled: Toggled::Completed,
                ..
            }) => println!("✓ {code} {name}: completed"),
            Ok(Outcome::Toggled {
                toggled: Toggled::Uncompleted,
                ..
            }) => println!("✓ {code} {name}: no longer completed"),
            Ok(Outcome::Blocked(reason)) => {
                eprintln!("✗ Cannot complete {code}: {reason}");
                status = 1;
            }
            Ok(_) => {
                eprintln!("✗ Unknown course: {code}");
                status = 1;
            }
            Err(e) => {
                error!("Toggle of {code} failed: {e}");
                eprintln!("✗ {e}");
                return 1;
            }
        }
    }

    let progress = controller.progress();
    malla::verbose!(
        "Progress: {}/{} courses, {}/{} credits",
        progress.completed_courses,
        progress.total_courses,
        progress.completed_credits,
        progress.total_credits
    );
    status
}

//! Clear command handler

use super::{confirm, open_controller};
use malla::config::Config;
use malla::core::controller::Event;

/// Forget every completed course after confirmation.
pub fn run(config: &Config, yes: bool) -> i32 {
    let mut controller = match open_controller(config) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };

    let count = controller.store().set().len();
    if count == 0 {
        println!("✓ No completed courses to clear");
        return 0;
    }

    if !yes && !confirm(&format!("Clear all {count} completed course(s)?")) {
        println!("✗ Clear cancelled");
        return 0;
    }

    match controller.dispatch(Event::ClearAll) {
        Ok(_) => {
            println!("✓ Cleared {count} completed course(s)");
            0
        }
        Err(e) => {
            eprintln!("✗ Failed to clear completion state: {e}");
            1
        }
    }
}

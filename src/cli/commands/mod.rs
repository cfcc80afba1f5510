//! CLI command handlers for `malla`.
//!
//! Each subcommand lives in its own module and returns a process exit code.

pub mod clear;
pub mod config;
pub mod info;
pub mod interactive;
pub mod show;
pub mod toggle;

use malla::config::Config;
use malla::core::controller::Controller;
use malla::core::models::Catalog;
use malla::core::storage::FileStore;
use malla::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Title used for rendered grids
pub const TITLE: &str = "Malla Curricular";

/// Load the catalog and restore completion state as configured
///
/// A catalog failure is terminal for the run; the message replaces the grid.
pub fn open_controller(config: &Config) -> Result<Controller<FileStore>, String> {
    let catalog_path = PathBuf::from(&config.paths.catalog);
    let catalog = Catalog::load(&catalog_path).map_err(|e| {
        error!("Catalog load failed: {e}");
        format!(
            "✗ Could not load the course catalog from {}: {e}",
            catalog_path.display()
        )
    })?;
    malla::verbose!(
        "✓ Loaded {} courses from {}",
        catalog.len(),
        catalog_path.display()
    );
    Ok(Controller::new(
        catalog,
        FileStore::new(&config.storage.state_dir),
    ))
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response).ok();
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

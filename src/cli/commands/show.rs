//! Show command handler

use super::{open_controller, TITLE};
use malla::config::Config;
use malla::core::controller::Event;
use malla::core::render::{GridRenderer, RenderContext, RenderFormat};
use malla::{error, info, warn};
use std::path::{Path, PathBuf};

/// Render the grid to stdout or a file.
///
/// HTML without an explicit output path goes to `<out_dir>/malla.html`.
pub fn run(config: &Config, format: RenderFormat, select: Option<&str>, output: Option<&Path>) -> i32 {
    let mut controller = match open_controller(config) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };

    if let Some(code) = select {
        if !controller.catalog().contains(code) {
            warn!("Cannot highlight unknown course '{code}'");
        }
        // Hover gives the highlight without toggling completion
        if let Err(e) = controller.dispatch(Event::Hover(code.to_string())) {
            error!("{e}");
        }
    }

    let ctx = RenderContext::new(TITLE, controller.grid());
    let renderer = format.renderer();

    let target: Option<PathBuf> = match (output, format) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, RenderFormat::Html) => {
            Some(PathBuf::from(&config.paths.out_dir).join(format!("malla.{}", format.extension())))
        }
        (None, RenderFormat::Text) => None,
    };

    match target {
        Some(path) => match renderer.write(&ctx, &path) {
            Ok(()) => {
                println!("✓ Grid written to: {}", path.display());
                info!("Rendered {format} grid to {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("✗ Failed to render grid: {e}");
                1
            }
        },
        None => match renderer.render(&ctx) {
            Ok(text) => {
                print!("{text}");
                0
            }
            Err(e) => {
                eprintln!("✗ Failed to render grid: {e}");
                1
            }
        },
    }
}

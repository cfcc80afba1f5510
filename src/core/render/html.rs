//! HTML grid renderer
//!
//! Produces a self-contained page from `templates/grid.html`. Cells carry
//! `data-codigo` and the state/highlight classes computed by the grid.

use crate::core::grid::Grid;
use crate::core::render::{GridRenderer, RenderContext, RenderError};
use askama::Template;

#[derive(Template)]
#[template(path = "grid.html")]
struct GridPage<'a> {
    title: &'a str,
    progress: String,
    grid: &'a Grid,
}

/// HTML renderer backed by an askama template
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Create a new HTML renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GridRenderer for HtmlRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let page = GridPage {
            title: ctx.title,
            progress: ctx.progress_line(),
            grid: ctx.grid,
        };
        Ok(page.render()?)
    }
}

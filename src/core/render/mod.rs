//! Grid renderers
//!
//! Turns a refreshed [`Grid`] into a terminal listing or a standalone HTML page.

pub mod html;
pub mod text;

pub use html::HtmlRenderer;
pub use text::TextRenderer;

use crate::core::grid::Grid;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while rendering or writing a grid
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template evaluation failed
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    /// Output could not be written
    #[error("cannot write {path}: {source}")]
    Io {
        /// Destination file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Plain text for the terminal
    #[default]
    Text,
    /// Self-contained HTML page
    Html,
}

impl RenderFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
        }
    }

    /// Renderer for this format
    #[must_use]
    pub fn renderer(&self) -> Box<dyn GridRenderer> {
        match self {
            Self::Text => Box::new(TextRenderer::new()),
            Self::Html => Box::new(HtmlRenderer::new()),
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "term" => Ok(Self::Text),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown render format: {s}")),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Everything a renderer needs
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Page or listing title
    pub title: &'a str,
    /// Grid refreshed with current state and highlights
    pub grid: &'a Grid,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context
    #[must_use]
    pub const fn new(title: &'a str, grid: &'a Grid) -> Self {
        Self { title, grid }
    }

    /// One-line progress summary
    #[must_use]
    pub fn progress_line(&self) -> String {
        let p = self.grid.progress;
        format!(
            "{}/{} courses, {}/{} credits ({:.1}%)",
            p.completed_courses,
            p.total_courses,
            p.completed_credits,
            p.total_credits,
            p.percent()
        )
    }
}

/// Trait for grid renderers
pub trait GridRenderer {
    /// Render the grid to a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError>;

    /// Render the grid into `output_path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn write(&self, ctx: &RenderContext, output_path: &Path) -> Result<(), RenderError> {
        let content = self.render(ctx)?;
        let io = |source| RenderError::Io {
            path: output_path.to_path_buf(),
            source,
        };
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io)?;
            }
        }
        fs::write(output_path, content).map_err(io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("HTML".parse::<RenderFormat>(), Ok(RenderFormat::Html));
        assert_eq!("txt".parse::<RenderFormat>(), Ok(RenderFormat::Text));
        assert!("pdf".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_format_extension_and_display() {
        assert_eq!(RenderFormat::Html.extension(), "html");
        assert_eq!(RenderFormat::Text.to_string(), "text");
    }
}

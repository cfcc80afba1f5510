//! Terminal grid renderer
//!
//! ```text
//! Año 1
//!   Semestre 1  (12 créditos)
//!     ✓ MAT1001  Álgebra                  6 cr  Ciencias Básicas
//!     ○ MAT1002  Cálculo I                6 cr  Ciencias Básicas  <- prerrequisito
//! ```

use crate::core::grid::{Cell, Highlight};
use crate::core::render::{GridRenderer, RenderContext, RenderError};
use std::fmt::Write;

/// Width of the name column
const NAME_WIDTH: usize = 40;

/// Plain-text renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Create a new text renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn highlight_note(highlight: Highlight) -> String {
        let mut notes = Vec::new();
        if highlight.selected {
            notes.push("seleccionado");
        }
        if highlight.prerequisite {
            notes.push("prerrequisito");
        }
        if highlight.unlocks {
            notes.push("desbloquea");
        }
        if notes.is_empty() {
            String::new()
        } else {
            format!("  <- {}", notes.join(", "))
        }
    }

    fn write_cell(out: &mut String, cell: &Cell) {
        let name: String = if cell.name.chars().count() > NAME_WIDTH {
            let mut cut: String = cell.name.chars().take(NAME_WIDTH - 1).collect();
            cut.push('…');
            cut
        } else {
            cell.name.clone()
        };
        let _ = writeln!(
            out,
            "    {} {:<10} {:<width$} {:>3} cr  {}{}",
            cell.state.marker(),
            cell.code,
            name,
            cell.credits,
            cell.kind,
            Self::highlight_note(cell.highlight),
            width = NAME_WIDTH
        );
    }
}

impl GridRenderer for TextRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let mut out = String::new();
        let _ = writeln!(out, "{}", ctx.title);
        let _ = writeln!(out, "{}", "=".repeat(ctx.title.chars().count()));
        let _ = writeln!(out, "Progreso: {}", ctx.progress_line());

        for year in &ctx.grid.years {
            let _ = writeln!(out, "\nAño {}", year.year);
            for semester in &year.semesters {
                let _ = writeln!(
                    out,
                    "  Semestre {}  ({} créditos)",
                    semester.semester,
                    semester.credits()
                );
                for cell in &semester.cells {
                    Self::write_cell(&mut out, cell);
                }
            }
        }

        let _ = writeln!(out, "\n✓ aprobado   ○ desbloqueado   · bloqueado");
        Ok(out)
    }
}

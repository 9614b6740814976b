//! Prompt cells as posted by the front end.

use crate::foundation::error::{BoardError, BoardResult};

/// Cells in the primary 5x5 grid.
pub const GRID_CELLS: usize = 25;
/// Cells in the optional extra-entries footer (indices 25..=28).
pub const EXTRA_CELLS: usize = 4;
/// Largest accepted cell list.
pub const MAX_CELLS: usize = GRID_CELLS + EXTRA_CELLS;
/// Highest rating a cell may carry.
pub const MAX_RATING: f64 = 5.0;

/// One grid slot's submission as posted by the front end.
///
/// The slot index is positional: the n-th entry of the cell list is cell `n`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptCell {
    /// Whether a submission occupies the slot.
    pub is_filled: bool,
    /// Submitted title, possibly with a parenthesized series suffix.
    pub title: String,
    /// Submitted author or creator.
    pub author: String,
    /// Absolute URL of the cover image.
    #[serde(alias = "imgLink")]
    pub cover_image_link: String,
    /// Rating in `[0, 5]`; fractional values are allowed.
    pub star_rating: f64,
    /// Whether the hard-mode variant of the prompt was completed.
    pub hard_mode: bool,
    /// Explicit label text replacing the board's default prompt label.
    pub prompt_text: Option<String>,
    /// Edition identifier from the lookup service, if any.
    pub edition_id: Option<String>,
}

impl PromptCell {
    /// A filled cell with a cover and rating.
    pub fn filled(title: impl Into<String>, cover_image_link: impl Into<String>, rating: f64) -> Self {
        Self {
            is_filled: true,
            title: title.into(),
            cover_image_link: cover_image_link.into(),
            star_rating: rating,
            ..Self::default()
        }
    }

    /// Rating clamped to `[0, MAX_RATING]`; non-finite ratings count as zero.
    pub fn clamped_rating(&self) -> f64 {
        if self.star_rating.is_finite() {
            self.star_rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }

    /// Title text shown on the board: everything before the first `(`, trimmed.
    pub fn display_title(&self) -> &str {
        display_title(&self.title)
    }

    /// Explicit label text, ignoring blank values.
    pub fn label_override(&self) -> Option<&str> {
        self.prompt_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Strip a parenthesized suffix such as a series name: `"The Hobbit (Illustrated)"` -> `"The Hobbit"`.
pub fn display_title(title: &str) -> &str {
    title.split('(').next().unwrap_or_default().trim()
}

/// Parse the JSON cell list posted by the front end.
pub fn parse_cells(json: &str) -> BoardResult<Vec<PromptCell>> {
    let cells: Vec<PromptCell> = serde_json::from_str(json)
        .map_err(|e| BoardError::validation(format!("invalid cell list: {e}")))?;
    validate_cells(&cells)?;
    Ok(cells)
}

/// Reject cell lists longer than the grid plus footer.
pub fn validate_cells(cells: &[PromptCell]) -> BoardResult<()> {
    if cells.len() > MAX_CELLS {
        return Err(BoardError::validation(format!(
            "at most {MAX_CELLS} cells are accepted, got {}",
            cells.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/board/model.rs"]
mod tests;

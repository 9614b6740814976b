//! Greedy word wrap.

use crate::{foundation::error::BoardResult, render::surface::DrawSurface};

/// Break `text` into lines no wider than `max_width` under `measure`.
///
/// Tokens are the pieces between single spaces. A line grows token by token while the measured
/// width stays within `max_width`; the token that overflows starts the next line. A token that
/// overflows on its own still gets a line of its own. A non-positive `max_width` disables wrapping.
pub fn wrap_lines(text: &str, max_width: f64, mut measure: impl FnMut(&str) -> f64) -> Vec<String> {
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in text.split(' ') {
        current.push(token);
        if current.len() == 1 || measure(&current.join(" ")) <= max_width {
            continue;
        }

        current.pop();
        lines.push(current.join(" "));
        current.clear();
        current.push(token);
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Wrap `text` with the surface's active font and draw one line per row.
///
/// Line `i` is drawn at `(x, y + line_height * i)` using the surface's current alignment.
/// Returns the number of lines drawn.
pub fn wrap_draw<S: DrawSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f64,
    y: f64,
    line_height: f64,
    max_width: f64,
) -> BoardResult<usize> {
    if max_width <= 0.0 {
        surface.fill_text(text, x, y)?;
        return Ok(1);
    }

    let mut measure_err = None;
    let lines = wrap_lines(text, max_width, |candidate| {
        match surface.measure_text(candidate) {
            Ok(w) => w,
            Err(e) => {
                measure_err.get_or_insert(e);
                0.0
            }
        }
    });
    if let Some(e) = measure_err {
        return Err(e);
    }

    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, x, y + line_height * i as f64)?;
    }
    Ok(lines.len())
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;

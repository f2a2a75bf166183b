//! Text Wrapping

use crate::host::Surface;

/// Default spacing between wrapped lines.
pub const LINE_HEIGHT: f32 = 18.0;

/// Greedy word wrap on single spaces, measured with the surface's font.
///
/// A word wider than `max_width` gets a line of its own rather than being
/// split. Empty input gives one empty line.
pub fn wrap<S: Surface + ?Sized>(surface: &S, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && surface.measure_text(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Wrap and draw at (x, y), one line every `line_height`. Returns the lines.
pub fn draw_wrapped<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
) -> Vec<String> {
    let lines = wrap(surface, text, max_width);
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(line, x, y + i as f32 * line_height);
    }
    lines
}

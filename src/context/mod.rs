//! Source context windows around a matched line.

use ropey::Rope;

/// Marker on the matched line.
pub const MATCH_MARKER: char = '→';

/// Minimum width line numbers are right-aligned to.
pub const LINE_NUMBER_WIDTH: usize = 4;

/// Number of lines shown before and after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    /// Lines before the matched line.
    pub before: usize,
    /// Lines after the matched line.
    pub after: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            before: 1,
            after: 1,
        }
    }
}

/// Line-indexed view of one file's text.
///
/// Lines are split on `\n` only, so numbering agrees with parser rows even
/// when the text holds a lone `\r`, form feed or U+2028.
pub struct ContextExtractor {
    rope: Rope,
    window: ContextWindow,
}

impl ContextExtractor {
    /// Index `text` for repeated window rendering.
    pub fn new(text: &str, window: ContextWindow) -> Self {
        Self {
            rope: Rope::from_str(text),
            window,
        }
    }

    /// Render the window around 1-based `line`.
    ///
    /// The window is clamped to the file. A line outside the file renders
    /// whatever part of the window remains, possibly nothing.
    pub fn render(&self, line: usize) -> String {
        let total = self.rope.len_lines();
        let first = line.saturating_sub(self.window.before).max(1);
        let last = line.saturating_add(self.window.after).min(total);
        if first > last {
            return String::new();
        }

        (first..=last)
            .map(|number| {
                let marker = if number == line { MATCH_MARKER } else { ' ' };
                let text = self.rope.line(number - 1).to_string();
                let text = text
                    .strip_suffix('\n')
                    .map(|t| t.strip_suffix('\r').unwrap_or(t))
                    .unwrap_or(&text);
                format!(
                    "{} {:>width$}: {}",
                    marker,
                    number,
                    text,
                    width = LINE_NUMBER_WIDTH
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a single window without keeping the index around.
pub fn render_context(text: &str, line: usize, window: ContextWindow) -> String {
    ContextExtractor::new(text, window).render(line)
}

//! Label wrapping.
//!
//! Labels are wrapped greedily against a character budget. The budget is
//! either given directly ([`WrapPolicy::CharCount`]) or estimated from a
//! pixel width and font size ([`WrapPolicy::ApproxWidth`]).
//!
//! # Example
//!
//! ```
//! use vellum_core::text::WrapPolicy;
//!
//! let wrapped = WrapPolicy::CharCount { max_chars: 10 }.wrap("The quick brown fox jumps");
//! assert_eq!(wrapped.lines(), ["The quick", "brown fox", "jumps"]);
//! ```

use std::mem;

/// Average glyph width as a fraction of the font size.
pub const AVG_CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Strategy used to decide how many characters fit on one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapPolicy {
    /// At most `max_chars` characters per line.
    CharCount { max_chars: usize },
    /// At most `max_width` pixels per line, assuming every glyph is
    /// `font_size * 0.6` wide.
    ApproxWidth { max_width: f32, font_size: f32 },
}

impl WrapPolicy {
    /// Character budget per line, never below one.
    pub fn char_budget(&self) -> usize {
        let budget = match *self {
            Self::CharCount { max_chars } => max_chars,
            // `as` saturates: NaN and negatives become 0, infinity becomes usize::MAX
            Self::ApproxWidth {
                max_width,
                font_size,
            } => (max_width / approx_char_width(font_size)).floor() as usize,
        };
        budget.max(1)
    }

    /// Wraps `text` into lines that fit this policy's budget.
    ///
    /// Words are separated by any whitespace run. A word longer than the
    /// budget starts a new line and is split every `budget` characters.
    pub fn wrap(&self, text: &str) -> WrappedText {
        wrap_to_budget(text, self.char_budget())
    }
}

/// Estimated width of one character at `font_size`.
pub fn approx_char_width(font_size: f32) -> f32 {
    font_size * AVG_CHAR_WIDTH_FACTOR
}

/// Estimated rendered width of `text` at `font_size`.
pub fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * approx_char_width(font_size)
}

/// The lines produced by [`WrapPolicy::wrap`].
///
/// Never empty: wrapping empty text yields one empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    lines: Vec<String>,
}

impl WrappedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the only line is empty
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Character count of the longest line
    pub fn max_line_chars(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

fn wrap_to_budget(text: &str, budget: usize) -> WrappedText {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        if word_len > budget {
            if !current.is_empty() {
                lines.push(mem::take(&mut current));
                current_len = 0;
            }
            while word_len > budget {
                let (head, tail) = split_at_char(word, budget);
                lines.push(head.to_string());
                word = tail;
                word_len -= budget;
            }
            if word.is_empty() {
                continue;
            }
        }

        let separator = usize::from(!current.is_empty());
        if current_len + separator + word_len <= budget {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_len += separator + word_len;
        } else {
            lines.push(mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    WrappedText { lines }
}

/// Splits after `n` chars, respecting UTF-8 boundaries.
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let index = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(index)
}

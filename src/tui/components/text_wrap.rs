//! Text layout helpers shared by every component that predicts its own height.
//!
//! Components wrap text here and hand ratatui pre-wrapped lines, so the
//! height a parent measures is exactly the height that gets drawn.

use std::borrow::Cow;

/// Word-wrap options used across the UI: break long words, split on ASCII spaces.
pub(crate) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrap `text` into at most `width` columns. Never returns an empty vector.
pub(crate) fn wrap(text: &str, width: u16) -> Vec<Cow<'_, str>> {
    if width == 0 {
        return vec![Cow::Borrowed("")];
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    if lines.is_empty() {
        vec![Cow::Borrowed("")]
    } else {
        lines
    }
}

/// Count wrapped lines, including a trailing empty line after a final `\n`
/// that textwrap may not report.
pub(crate) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count = count.saturating_add(1);
    }
    count
}

/// Byte offset of the character boundary before `pos`.
pub(crate) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(crate) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

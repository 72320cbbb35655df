//! Display-only soft wrapping.
//!
//! Wrapping is a presentation transform applied to a copy; grouping and
//! aggregation always see the unwrapped value.

/// Wrap `text` at word boundaries so no output line exceeds `width`
/// characters. Width counts `char`s, not bytes, so multibyte values do
/// not wrap early. Words longer than `width` are kept intact on their
/// own line rather than broken mid-word. Interior whitespace runs
/// collapse to a single space.
pub fn soft_wrap(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / width.max(1));
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len == 0 {
            out.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word_len;
        } else {
            out.push('\n');
            out.push_str(word);
            line_len = word_len;
        }
    }

    out
}

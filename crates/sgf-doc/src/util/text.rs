//! Whitespace handling shared by the value system and the message translator.

use std::borrow::Cow;

/// Converts every whitespace character other than space to a space, as the
/// SGF SimpleText type requires. Borrows when nothing changes.
pub fn simple_text(raw: &str) -> Cow<'_, str> {
    if raw.chars().all(|c| c == ' ' || !c.is_whitespace()) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(
        raw.chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect(),
    )
}

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

//! Small text helpers.

/// Everything before the first `\n`.
///
/// Returns the whole input when it contains no newline. A trailing `\r`
/// from CRLF input is kept, matching a plain split on `\n`.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or(text)
}

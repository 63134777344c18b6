//! Line tokenizer for IPPcode24 source.

/// The header every program starts with (compared ignoring ASCII case).
pub(crate) const HEADER: &str = ".IPPcode24";

/// Split a line into whitespace-separated words, dropping any `#` comment.
///
/// Returns an empty Vec for blank lines and comment-only lines. String
/// literals cannot contain raw whitespace or `#` (they use `\ddd` escapes),
/// so splitting never cuts through a literal.
pub(crate) fn tokenize_line(line: &str) -> Vec<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.split_whitespace().collect()
}

/// Returns true if `tokens` is exactly the header line.
pub(crate) fn is_header(tokens: &[&str]) -> bool {
    matches!(tokens, [word] if word.eq_ignore_ascii_case(HEADER))
}

/// Characters allowed in identifiers besides letters and digits.
const SPECIAL: &[char] = &['_', '-', '$', '&', '%', '*', '!', '?'];

/// Returns true if `name` is a valid variable or label identifier.
///
/// Identifiers consist of letters, digits and `_ - $ & % * ! ?`, and do
/// not start with a digit.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || SPECIAL.contains(&first))
        && chars.all(|c| c.is_alphanumeric() || SPECIAL.contains(&c))
}

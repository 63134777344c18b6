//! Escape sequences in string literals.
//!
//! A string literal may contain `\ddd`, three decimal digits naming a
//! codepoint. Every other character stands for itself.

use crate::error::DecodeError;

/// Decode all `\ddd` escapes in `text`.
pub fn decode(text: &str) -> Result<String, DecodeError> {
    let invalid = || DecodeError::InvalidEscape(text.to_string());

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut code = 0u32;
        for _ in 0..3 {
            let digit = chars.next().and_then(|d| d.to_digit(10)).ok_or_else(invalid)?;
            code = code * 10 + digit;
        }
        out.push(char::from_u32(code).ok_or_else(invalid)?);
    }

    Ok(out)
}

/// Returns true if every backslash in `text` starts a well-formed escape.
pub fn is_well_formed(text: &str) -> bool {
    decode(text).is_ok()
}

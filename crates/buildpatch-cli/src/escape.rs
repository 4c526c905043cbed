//! Backslash escapes for marker arguments
//!
//! Block markers often span a line break (`}\n\n// ...`), which is awkward to
//! pass on a command line, so marker flags understand `\n`, `\r`, `\t`, `\\`
//! and `\u{XXXX}`.

use crate::error::{CliError, Result};

/// Expand backslash escapes in a marker argument.
pub fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(unicode_escape(&mut chars, raw)?),
            Some(other) => {
                return Err(CliError::user(format!(
                    "unknown escape \\{other} in {raw:?}"
                )));
            }
            None => return Err(CliError::user(format!("trailing backslash in {raw:?}"))),
        }
    }

    Ok(out)
}

fn unicode_escape(chars: &mut std::str::Chars<'_>, raw: &str) -> Result<char> {
    let invalid = || CliError::user(format!("invalid \\u{{...}} escape in {raw:?}"));

    if chars.next() != Some('{') {
        return Err(invalid());
    }
    let mut hex = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some(c) => hex.push(c),
            None => return Err(invalid()),
        }
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(invalid)
}

//! Escape layers between raw names and the text stored in a host parameter.
//!
//! raw name -> matte-escaped token -> CSV field -> host string

const ESCAPE: char = '\\';
const MATTE_SPECIAL: [char; 5] = ['\\', '*', '?', '[', ']'];
const WILDCARDS: [char; 4] = ['*', '?', '[', ']'];
const HOST_SPECIAL: [char; 3] = ['\\', '[', ']'];

/// Backslash-escape `\ * ? [ ]` so a raw name never reads as a wildcard.
pub fn escape_matte(raw: &str) -> String {
    escape_chars(raw, &MATTE_SPECIAL)
}

pub fn unescape_matte(matte: &str) -> String {
    unescape_backslashes(matte)
}

/// Escape `\ [ ]`, which the host's parameter syntax would otherwise evaluate.
pub fn escape_host(csv: &str) -> String {
    escape_chars(csv, &HOST_SPECIAL)
}

pub fn unescape_host(host: &str) -> String {
    unescape_backslashes(host)
}

/// True if a matte-escaped token contains an unescaped `* ? [ ]`.
pub fn has_unescaped_wildcard(matte: &str) -> bool {
    let mut escaped = false;
    for c in matte.chars() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if WILDCARDS.contains(&c) {
            return true;
        }
    }
    false
}

fn escape_chars(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

// A trailing lone backslash is kept as-is.
fn unescape_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            out.push(chars.next().unwrap_or(ESCAPE));
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/matte/escape.rs"]
mod tests;

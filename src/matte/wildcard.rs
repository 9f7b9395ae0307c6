use globset::{GlobBuilder, GlobMatcher};

use crate::foundation::error::{CryptomatteError, CryptomatteResult};

/// Characters globset reads specially inside a `[...]` class.
const CLASS_SPECIAL: [char; 4] = [']', '^', '!', '-'];

/// Shell-style pattern compiled from a matte-escaped token.
///
/// `*` matches any run (including `/`), `?` one character, `[...]` and `[!...]`
/// character classes. A `[` without a closing `]` and a `^` opening a class are
/// literal. Matching is case-sensitive; escaped characters are literal.
#[derive(Clone, Debug)]
pub(crate) struct WildcardPattern {
    matcher: GlobMatcher,
}

impl WildcardPattern {
    pub(crate) fn new(matte: &str) -> CryptomatteResult<Self> {
        let glob = GlobBuilder::new(&to_glob_syntax(matte)?)
            .literal_separator(false)
            .backslash_escape(true)
            .case_insensitive(false)
            .build()
            .map_err(|e| CryptomatteError::validation(format!("invalid wildcard '{matte}': {e}")))?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub(crate) fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

// Brace alternation has no meaning in matte lists, and runs of `*` are a single
// `*`; globset would treat both specially. Classes are rebuilt item by item.
fn to_glob_syntax(matte: &str) -> CryptomatteResult<String> {
    let chars: Vec<char> = matte.chars().collect();
    let mut out = String::with_capacity(matte.len());
    let mut prev_star = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' => {
                out.push(c);
                // a trailing lone backslash matches itself
                out.push(chars.get(i).copied().unwrap_or('\\'));
                i += 1;
                prev_star = false;
                continue;
            }
            '*' if prev_star => continue,
            '[' => {
                match class_end(&chars, i) {
                    Some(end) => {
                        out.push_str(&class_to_glob(&chars[i..end])?);
                        i = end + 1;
                    }
                    None => out.push_str("\\["),
                }
                prev_star = false;
                continue;
            }
            '{' | '}' => out.push('\\'),
            _ => {}
        }
        out.push(c);
        prev_star = c == '*';
    }
    Ok(out)
}

/// Index of the `]` closing a class whose body starts at `start`.
///
/// A `]` directly after `[` or `[!` belongs to the body.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

fn class_to_glob(body: &[char]) -> CryptomatteResult<String> {
    let (negated, body) = match body.split_first() {
        Some((&'!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut special: Vec<char> = Vec::new();
    let mut plain = String::new();
    for (lo, hi) in class_items(body) {
        let (mut lo, mut hi) = (u32::from(lo), u32::from(hi));
        // special chars are ASCII, so stepping past them stays in range
        while lo <= hi && is_class_special(lo) {
            special.push(char::from(lo as u8));
            lo += 1;
        }
        while lo <= hi && is_class_special(hi) {
            special.push(char::from(hi as u8));
            hi -= 1;
        }
        let (Some(lo), Some(hi)) = (char::from_u32(lo), char::from_u32(hi)) else {
            continue;
        };
        if lo > hi {
            continue;
        }
        plain.push(lo);
        if lo != hi {
            plain.push('-');
            plain.push(hi);
        }
    }

    let has = |c: char| special.contains(&c);
    if plain.is_empty() && !has(']') {
        let singles: Vec<char> = CLASS_SPECIAL[1..]
            .iter()
            .copied()
            .filter(|&c| has(c))
            .collect();
        match (negated, singles.as_slice()) {
            (true, []) => return Ok("?".to_string()),
            (false, []) => {
                return Err(CryptomatteError::validation(
                    "character class matches nothing",
                ));
            }
            (false, &[c]) => return Ok(format!("\\{c}")),
            // no class body may open with `^` or `!`
            (false, _) if !has('-') => {
                let alts: Vec<String> = singles.iter().map(|c| format!("\\{c}")).collect();
                return Ok(format!("{{{}}}", alts.join(",")));
            }
            _ => {}
        }
    }

    let mut out = String::from(if negated { "[!" } else { "[" });
    let mut dash = has('-');
    // `]` only reads as a member in first position, `-` in first or last.
    if has(']') {
        out.push(']');
    } else if !negated && plain.is_empty() && dash {
        out.push('-');
        dash = false;
    }
    out.push_str(&plain);
    for c in ['^', '!'] {
        if has(c) {
            out.push(c);
        }
    }
    if dash {
        out.push('-');
    }
    out.push(']');
    Ok(out)
}

/// Split a class body into inclusive ranges; reversed ranges are dropped.
fn class_items(body: &[char]) -> Vec<(char, char)> {
    let mut items = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let lo = body[i];
        if body.get(i + 1) == Some(&'-') && i + 2 < body.len() {
            let hi = body[i + 2];
            if lo <= hi {
                items.push((lo, hi));
            }
            i += 3;
        } else {
            items.push((lo, lo));
            i += 1;
        }
    }
    items
}

fn is_class_special(c: u32) -> bool {
    char::from_u32(c).is_some_and(|c| CLASS_SPECIAL.contains(&c))
}

#[cfg(test)]
#[path = "../../tests/unit/matte/wildcard.rs"]
mod tests;

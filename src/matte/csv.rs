use crate::foundation::error::{CryptomatteError, CryptomatteResult};

const QUOTE: char = '"';
const DELIMITER: char = ',';
const ESCAPE: char = '\\';
const JOINER: &str = ", ";

/// Join fields as `", "`-separated CSV, in the given order.
///
/// Fields containing `"` or `\` have them backslash-escaped; fields containing
/// `"`, `\`, a space or a comma are quoted. Quotes are never doubled.
pub fn encode_csv<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let encoded: Vec<String> = fields.into_iter().map(|f| encode_field(f.as_ref())).collect();
    encoded.join(JOINER)
}

fn encode_field(field: &str) -> String {
    let needs_escape = field.contains([QUOTE, ESCAPE]);
    let needs_quotes = needs_escape || field.contains([' ', DELIMITER]);
    if !needs_quotes {
        return field.to_string();
    }

    let mut out = String::with_capacity(field.len() + 2);
    out.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    StartField,
    InField,
    Escape,
    InQuoted,
    EscapeInQuoted,
    AfterQuote,
}

/// Split CSV text into fields.
///
/// Quote `"`, delimiter `,`, escape `\`, no doubled quotes, spaces after a
/// delimiter skipped. Text between a closing quote and the next delimiter is
/// kept as part of the field.
pub fn decode_csv(input: &str) -> CryptomatteResult<Vec<String>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = State::StartField;

    for c in input.chars() {
        state = match state {
            State::StartField => match c {
                QUOTE => State::InQuoted,
                ESCAPE => State::Escape,
                ' ' => State::StartField,
                DELIMITER => {
                    fields.push(std::mem::take(&mut field));
                    State::StartField
                }
                _ => {
                    field.push(c);
                    State::InField
                }
            },
            State::InField => match c {
                ESCAPE => State::Escape,
                DELIMITER => {
                    fields.push(std::mem::take(&mut field));
                    State::StartField
                }
                _ => {
                    field.push(c);
                    State::InField
                }
            },
            State::Escape => {
                field.push(c);
                State::InField
            }
            State::InQuoted => match c {
                ESCAPE => State::EscapeInQuoted,
                QUOTE => State::AfterQuote,
                _ => {
                    field.push(c);
                    State::InQuoted
                }
            },
            State::EscapeInQuoted => {
                field.push(c);
                State::InQuoted
            }
            State::AfterQuote => match c {
                DELIMITER => {
                    fields.push(std::mem::take(&mut field));
                    State::StartField
                }
                _ => {
                    field.push(c);
                    State::InField
                }
            },
        };
    }

    match state {
        State::InQuoted | State::EscapeInQuoted => Err(CryptomatteError::csv(format!(
            "unterminated quoted field in '{input}'"
        ))),
        State::Escape => Err(CryptomatteError::csv(format!(
            "trailing escape character in '{input}'"
        ))),
        _ => {
            fields.push(field);
            Ok(fields)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matte/csv.rs"]
mod tests;

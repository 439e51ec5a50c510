//! vCard lexer for line unfolding and content line parsing.
//!
//! vCard uses the same folding rules as iCalendar (RFC 5545 §3.1). vCard 2.1
//! adds a second kind of continuation: a quoted-printable value whose line
//! ends in `=` continues on the next physical line.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::mime::is_quoted_printable;
use crate::rfc::vcard::core::VCardParameter;

/// Joins quoted-printable soft line breaks.
///
/// A line whose parameters declare `QUOTED-PRINTABLE` and that ends in `=`
/// is merged with the following physical line, dropping the `=` and the line
/// break. Merging continues for as long as the joined line keeps ending in `=`.
#[must_use]
pub fn join_soft_line_breaks(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut continuing = false;

    for line in input.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        let is_qp = continuing || declares_quoted_printable(content);

        if is_qp && let Some(stripped) = content.strip_suffix('=') {
            result.push_str(stripped);
            continuing = true;
        } else {
            result.push_str(line);
            continuing = false;
        }
    }

    result
}

fn declares_quoted_printable(line: &str) -> bool {
    let Some(colon) = find_value_separator(line) else {
        return false;
    };
    line[..colon]
        .split([';', '='])
        .any(is_quoted_printable)
}

/// Unfolds a vCard document by removing line continuations.
///
/// Line continuations are CRLF followed by a single space or tab.
/// Also handles bare LF for lenient parsing.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            } else {
                result.push(c);
            }
        } else if c == '\n' {
            if matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            } else {
                result.push('\n');
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits unfolded input into logical lines, dropping blank ones.
#[must_use]
pub fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters.
    pub params: Vec<VCardParameter>,
    /// Raw value string.
    pub value: String,
}

/// Parses a single content line into its components.
///
/// Format: `[group.]name[;param[=value]]*:value`
///
/// ## Errors
/// Returns an error if the line is missing the colon separator or the
/// property name contains characters outside `[A-Za-z0-9-]`.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (group, name_params) = parse_group(name_params);

    let (name, params_str) = match name_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (name_params, None),
    };
    let name = name.trim();

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params: params_str.map(parse_parameters).unwrap_or_default(),
        value: value.to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Quoted parameter values may contain colons.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses optional group prefix.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    if let Some((potential_group, rest)) = s.split_once('.')
        && !potential_group.is_empty()
        && potential_group
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return (Some(potential_group), rest);
    }
    (None, s)
}

/// Parses the parameter section of a content line.
fn parse_parameters(s: &str) -> Vec<VCardParameter> {
    let mut params = Vec::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let (param, rest) = parse_single_parameter(remaining);
        params.extend(param);
        remaining = rest;
    }

    params
}

/// Parses a single parameter and returns the remaining string.
///
/// A segment without `=` is a vCard 2.1 bare parameter (`TEL;CELL:`).
fn parse_single_parameter(s: &str) -> (Option<VCardParameter>, &str) {
    let semi_pos = s.find(';');

    match s.find('=') {
        Some(eq_pos) if semi_pos.is_none_or(|semi| eq_pos < semi) => {
            let name = s[..eq_pos].trim();
            let (values, remaining) = parse_param_values(&s[eq_pos + 1..]);
            (Some(VCardParameter::multi(name, values)), remaining)
        }
        _ => {
            let (token, remaining) = match semi_pos {
                Some(semi) => (&s[..semi], &s[semi + 1..]),
                None => (s, ""),
            };
            let param = (!token.trim().is_empty()).then(|| VCardParameter::bare(token));
            (param, remaining)
        }
    }
}

/// Parses parameter values (comma-separated, possibly quoted).
fn parse_param_values(s: &str) -> (Vec<String>, &str) {
    let mut values = Vec::new();
    let mut chars = s.chars().peekable();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut consumed = 0;

    while let Some(&c) = chars.peek() {
        consumed += c.len_utf8();

        match c {
            '"' => {
                chars.next();
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                chars.next();
                values.push(std::mem::take(&mut current_value));
            }
            ';' if !in_quotes => {
                chars.next();
                if !current_value.is_empty() || !values.is_empty() {
                    values.push(current_value);
                }
                return (values, &s[consumed..]);
            }
            '^' if !in_quotes => {
                // RFC 6868 caret encoding
                chars.next();
                if let Some(&next) = chars.peek() {
                    consumed += next.len_utf8();
                    chars.next();
                    match next {
                        'n' => current_value.push('\n'),
                        '\'' => current_value.push('"'),
                        '^' => current_value.push('^'),
                        _ => {
                            current_value.push('^');
                            current_value.push(next);
                        }
                    }
                } else {
                    current_value.push('^');
                }
            }
            _ => {
                chars.next();
                current_value.push(c);
            }
        }
    }

    if !current_value.is_empty() || !values.is_empty() {
        values.push(current_value);
    }

    (values, "")
}

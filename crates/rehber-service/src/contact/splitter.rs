//! Splitting a vCard document into independent blocks.
//!
//! Each block is parsed on its own so that one malformed card cannot take
//! down the cards around it.

const BEGIN_MARKER: &str = "BEGIN:VCARD";
const END_MARKER: &str = "END:VCARD";

fn starts_with_marker(line: &str, marker: &str) -> bool {
    line.trim()
        .get(..marker.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(marker))
}

/// ## Summary
/// Extracts every `BEGIN:VCARD` .. `END:VCARD` span, in source order.
///
/// A `BEGIN:VCARD` line starts a new block and discards any block still
/// open. An `END:VCARD` line closes the open block, inclusive. Lines outside
/// a block are ignored. Lines are rejoined with `\n`; folded continuation
/// lines are kept verbatim.
#[must_use]
pub fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in content.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if starts_with_marker(line, BEGIN_MARKER) {
            if current.is_some() {
                tracing::debug!("Discarding unterminated vCard block");
            }
            current = Some(vec![line]);
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
            if starts_with_marker(line, END_MARKER) {
                blocks.extend(current.take().map(|lines| lines.join("\n")));
            }
        }
    }

    if current.is_some() {
        tracing::debug!("Discarding unterminated vCard block at end of input");
    }

    blocks
}

/// Counts `BEGIN:VCARD` markers, terminated or not.
#[must_use]
pub fn count_begin_markers(content: &str) -> usize {
    content
        .lines()
        .filter(|line| starts_with_marker(line, BEGIN_MARKER))
        .count()
}

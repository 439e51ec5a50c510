//! vCard document parser.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, join_soft_line_breaks, parse_content_line, split_lines, unfold};
use super::values::{
    parse_address, parse_date_and_or_time, parse_organization, parse_structured_name,
    split_component, unescape_text,
};
use crate::rfc::vcard::core::{DateAndOrTime, VCard, VCardProperty, VCardValue, VCardVersion};

/// Parses a vCard document into one or more vCards.
///
/// ## Summary
/// Joins quoted-printable soft line breaks, unfolds the input and returns
/// every `BEGIN:VCARD` .. `END:VCARD` card found, in order.
///
/// ## Errors
/// Returns a parse error if any card is malformed: an unterminated card, an
/// unsupported `VERSION`, or a content line without a name or colon.
#[tracing::instrument(level = "trace", skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    let joined = join_soft_line_breaks(input);
    let unfolded = unfold(&joined);
    let lines = split_lines(&unfolded);

    tracing::trace!(count = lines.len(), "Split lines");

    let mut parser = Parser::new(lines);
    let result = parser.parse_document()?;

    tracing::trace!(count = result.len(), "Parsed vCards");

    Ok(result)
}

/// Parses a single vCard from input.
///
/// ## Summary
/// Convenience function for parsing one `BEGIN:VCARD` .. `END:VCARD` block.
/// Any cards after the first are ignored.
///
/// ## Errors
/// Returns an error if the input contains no vCard or is malformed.
pub fn parse_single(input: &str) -> ParseResult<VCard> {
    let cards = parse(input)?;
    cards.into_iter().next().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::UnexpectedEof,
            1,
            "no vCard found in document",
        )
    })
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.trim().eq_ignore_ascii_case(marker)
}

struct Parser {
    lines: Vec<String>,
    pos: usize,
}

impl Parser {
    fn new(lines: Vec<String>) -> Self {
        Self { lines, pos: 0 }
    }

    fn current_line(&self) -> usize {
        self.pos + 1
    }

    fn parse_document(&mut self) -> ParseResult<Vec<VCard>> {
        let mut cards = Vec::new();

        while self.pos < self.lines.len() {
            let is_begin = is_marker(&self.lines[self.pos], "BEGIN:VCARD");
            self.pos += 1;

            // Content outside a card is ignored
            if is_begin {
                cards.push(self.parse_vcard()?);
            }
        }

        Ok(cards)
    }

    fn parse_vcard(&mut self) -> ParseResult<VCard> {
        let mut card = VCard::new();
        let start_line = self.current_line();

        while self.pos < self.lines.len() {
            let line_num = self.current_line();
            let line = &self.lines[self.pos];
            self.pos += 1;

            if is_marker(line, "END:VCARD") {
                return Ok(card);
            }

            if is_marker(line, "BEGIN:VCARD") {
                break;
            }

            let content_line = parse_content_line(line, line_num)?;

            if content_line.name == "VERSION" {
                card.version = VCardVersion::parse(&content_line.value).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnsupportedVersion,
                        line_num,
                        format!("unsupported vCard version: {}", content_line.value.trim()),
                    )
                })?;
            } else {
                card.add_property(convert_to_property(content_line, line_num));
            }
        }

        Err(ParseError::new(
            ParseErrorKind::UnexpectedEof,
            start_line,
            "vCard not closed with END:VCARD",
        ))
    }
}

fn convert_to_property(line: ContentLine, line_num: usize) -> VCardProperty {
    let mut prop = VCardProperty {
        group: line.group,
        name: line.name,
        params: line.params,
        value: VCardValue::Unknown(String::new()),
        raw_value: line.value,
    };

    prop.value = if prop.is_base64() {
        decode_binary(&prop.raw_value, line_num)
    } else {
        let value_type = prop.get_param_value("VALUE");
        parse_property_value(&prop.name, &prop.raw_value, value_type, line_num)
    };

    prop
}

/// Decodes an inline base64 value, keeping the raw text if it is not base64.
fn decode_binary(raw_value: &str, line_num: usize) -> VCardValue {
    let compact: String = raw_value
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => VCardValue::Binary(bytes),
        Err(error) => {
            tracing::debug!(line = line_num, %error, "Undecodable base64 value kept as text");
            VCardValue::Unknown(raw_value.to_string())
        }
    }
}

fn parse_property_value(
    name: &str,
    raw_value: &str,
    value_type: Option<&str>,
    line_num: usize,
) -> VCardValue {
    match name {
        "N" => VCardValue::StructuredName(parse_structured_name(raw_value)),
        "ADR" => VCardValue::Address(parse_address(raw_value)),
        "ORG" => VCardValue::Organization(parse_organization(raw_value)),
        "BDAY" | "ANNIVERSARY" | "X-ANNIVERSARY" | "DEATHDATE" => {
            VCardValue::DateAndOrTime(lenient_date(raw_value, value_type, line_num))
        }
        _ => match value_type {
            Some(value_type) => parse_typed_value(raw_value, value_type),
            None => parse_untyped_value(name, raw_value),
        },
    }
}

fn parse_untyped_value(name: &str, raw_value: &str) -> VCardValue {
    match name {
        "URL" | "PHOTO" | "LOGO" | "SOUND" | "KEY" | "FBURL" | "CALADRURI" | "CALURI"
        | "SOURCE" | "MEMBER" | "IMPP" => VCardValue::Uri(raw_value.trim().to_string()),
        "NICKNAME" | "CATEGORIES" => VCardValue::TextList(split_component(raw_value)),
        _ => VCardValue::Text(unescape_text(raw_value)),
    }
}

fn lenient_date(raw_value: &str, value_type: Option<&str>, line_num: usize) -> DateAndOrTime {
    parse_date_and_or_time(raw_value, value_type, line_num).unwrap_or_else(|error| {
        tracing::trace!(%error, "Date kept as text");
        DateAndOrTime::Text(raw_value.trim().to_string())
    })
}

fn parse_typed_value(raw_value: &str, value_type: &str) -> VCardValue {
    match value_type.to_ascii_lowercase().as_str() {
        "text" => VCardValue::Text(unescape_text(raw_value)),
        "uri" | "url" => VCardValue::Uri(raw_value.trim().to_string()),
        _ => VCardValue::Unknown(raw_value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_VCARD: &str = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n\
N:Doe;John;;;\r\n\
EMAIL:john@example.com\r\n\
END:VCARD\r\n";

    #[test]
    fn parse_simple_vcard() {
        let cards = parse(SIMPLE_VCARD).unwrap();
        assert_eq!(cards.len(), 1);

        let card = &cards[0];
        assert_eq!(card.version, VCardVersion::V4);
        assert_eq!(card.formatted_name(), Some("John Doe"));

        let name = card.name().unwrap();
        assert_eq!(name.family, vec!["Doe"]);
        assert_eq!(name.given, vec!["John"]);
    }

    #[test]
    fn parse_with_groups() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Jane Doe\r\n\
item1.TEL:+1-555-555-5555\r\n\
item1.X-ABLABEL:Work\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let tel_props = cards[0].get_properties("TEL");
        assert_eq!(tel_props.len(), 1);
        assert_eq!(tel_props[0].group, Some("item1".to_string()));
    }

    #[test]
    fn parse_v21_card() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Y=C4=B1lmaz;Bu=C4=9Fra;;;\r\n\
TEL;CELL;PREF:05321234567\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert_eq!(card.version, VCardVersion::V2_1);

        let n = card.get_property("N").unwrap();
        assert_eq!(n.encoding(), Some("QUOTED-PRINTABLE"));
        assert_eq!(card.name().unwrap().given, vec!["Bu=C4=9Fra"]);

        let tel = card.get_property("TEL").unwrap();
        assert!(tel.has_type("cell"));
        assert!(tel.has_type("pref"));
    }

    #[test]
    fn parse_quoted_printable_soft_breaks() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
NOTE;ENCODING=QUOTED-PRINTABLE:=C3=87ok uzun bir not=\r\n\
 devam ediyor\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert_eq!(
            card.get_property("NOTE").unwrap().as_text(),
            Some("=C3=87ok uzun bir not devam ediyor")
        );
    }

    #[test]
    fn parse_base64_photo() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Photo Person\r\n\
PHOTO;ENCODING=b;TYPE=JPEG:/9j/\r\n\
 4AA=\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        let photo = card.get_property("PHOTO").unwrap();
        assert_eq!(
            photo.value.as_binary(),
            Some(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00][..])
        );
    }

    #[test]
    fn unparsable_birthday_is_kept_as_text() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Jane\r\n\
BDAY:12/04/1985\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        let bday = card.get_property("BDAY").unwrap();
        assert_eq!(
            bday.value.as_date_and_or_time(),
            Some(&DateAndOrTime::Text("12/04/1985".into()))
        );
    }

    #[test]
    fn parse_organization() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Doe\r\n\
ORG:Acme Inc.;Engineering;Backend Team\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        let org = cards[0].get_property("ORG").unwrap().value.as_organization().unwrap();
        assert_eq!(org.name, "Acme Inc.");
        assert_eq!(org.units, vec!["Engineering", "Backend Team"]);
    }

    #[test]
    fn parse_multiple_vcards() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Doe\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].formatted_name(), Some("John Doe"));
        assert_eq!(cards[1].formatted_name(), Some("Jane Doe"));
    }

    #[test]
    fn parse_folded_lines() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe with a very long name that\r\n  spans multiple lines\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(
            cards[0].formatted_name(),
            Some("John Doe with a very long name that spans multiple lines")
        );
    }

    #[test]
    fn parse_missing_end() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:John Doe\r\n";

        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn nested_begin_is_an_error() {
        let input = "\
BEGIN:VCARD\r\n\
FN:John Doe\r\n\
BEGIN:VCARD\r\n\
FN:Jane Doe\r\n\
END:VCARD\r\n";

        assert!(parse(input).is_err());
    }

    #[test]
    fn unsupported_version() {
        let input = "BEGIN:VCARD\r\nVERSION:9.9\r\nFN:X\r\nEND:VCARD\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedVersion);
    }

    #[test]
    fn parse_single_requires_a_card() {
        let err = parse_single("no cards here").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }
}

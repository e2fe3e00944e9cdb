//! Converts the engine's diagnostic stream into [`Message`]s.
//!
//! The engine prints one record per message:
//!
//! ```text
//! Line:12 col:3 - Error 23 (critical): unknown property <XY> found
//!     continuation lines are indented
//! Warning 41: empty variation found
//! ```
//!
//! Lines before the first record (the engine's banner) are skipped. Blank
//! lines end a record. After the first record, an unindented line that does
//! not start a record is itself a record that cannot be parsed.

use tracing::debug;

use crate::constants::{is_engine_message_id, UNKNOWN_SGFC_MESSAGE_ID};
use crate::message::{Message, MessageType};
use crate::util::text::collapse_whitespace;

const LOCATION_PREFIX: &str = "Line:";
const CRITICAL_MARKER: &str = "(critical)";

/// Severity words in the order they are tried.
const SEVERITIES: [(&str, MessageType); 3] = [
    ("Fatal error", MessageType::Fatal),
    ("Error", MessageType::Error),
    ("Warning", MessageType::Warning),
];

/// Translates the engine's combined output into messages, in emission order.
pub fn translate(stream: &str) -> Vec<Message> {
    let mut messages = Vec::new();
    let mut record: Option<Vec<&str>> = None;
    let mut seen_record = false;

    for line in stream.lines() {
        if line.trim().is_empty() {
            flush(&mut record, &mut messages);
            continue;
        }
        let indented = line.starts_with(char::is_whitespace);
        if indented {
            if let Some(lines) = record.as_mut() {
                lines.push(line);
            }
            continue;
        }
        if !seen_record && !starts_record(line) {
            continue;
        }
        seen_record = true;
        flush(&mut record, &mut messages);
        record = Some(vec![line]);
    }
    flush(&mut record, &mut messages);
    messages
}

fn flush(record: &mut Option<Vec<&str>>, messages: &mut Vec<Message>) {
    if let Some(lines) = record.take() {
        messages.push(parse_record(&lines.join("\n")));
    }
}

fn starts_record(line: &str) -> bool {
    line.starts_with(LOCATION_PREFIX) || split_severity(line).is_some()
}

fn split_severity(s: &str) -> Option<(MessageType, &str)> {
    SEVERITIES.iter().find_map(|(word, ty)| {
        let rest = s.strip_prefix(word)?;
        rest.starts_with(' ').then_some((*ty, rest))
    })
}

/// Parses one record. Never fails: a record that does not follow the
/// format becomes an Error message with unknown ID and no location.
fn parse_record(raw: &str) -> Message {
    parse_well_formed(raw).unwrap_or_else(|| {
        debug!(record = raw, "unparseable engine message");
        Message::new(
            UNKNOWN_SGFC_MESSAGE_ID,
            MessageType::Error,
            collapse_whitespace(raw),
        )
        .with_raw_text(raw)
    })
}

fn parse_well_formed(raw: &str) -> Option<Message> {
    let (location, rest) = match raw.strip_prefix(LOCATION_PREFIX) {
        Some(after) => {
            let (location, rest) = after.split_once(" - ")?;
            (Some(parse_location(location)?), rest)
        }
        None => (None, raw),
    };

    let (message_type, rest) = split_severity(rest)?;
    let (header, text) = rest.split_once(':')?;
    let header = header.trim();
    let (id_token, critical) = match header.strip_suffix(CRITICAL_MARKER) {
        Some(id) => (id.trim_end(), true),
        None => (header, false),
    };
    let id = id_token
        .parse::<i32>()
        .ok()
        .filter(|id| is_engine_message_id(*id))
        .unwrap_or(UNKNOWN_SGFC_MESSAGE_ID);

    let (line, column) = location.unzip();
    Some(
        Message::new(id, message_type, collapse_whitespace(text))
            .with_location(line, column)
            .with_critical(critical)
            .with_raw_text(raw),
    )
}

/// Parses `<line> col:<column>`.
fn parse_location(s: &str) -> Option<(u32, u32)> {
    let (line, column) = s.split_once(" col:")?;
    Some((line.trim().parse().ok()?, column.trim().parse().ok()?))
}

//! Document encoding and decoding.
//!
//! The encoder is deterministic: property order within a node is fixed by
//! [`PropertyType`] declaration order (unknown identifiers last, sorted by
//! name) and values are written in stored order. Each game starts on its own
//! line, every node after the first in a sequence starts a new line, and each
//! variation opens a new line.
//!
//! The decoder accepts any SGF text: input before the first `(` is skipped,
//! whitespace between tokens is ignored, lowercase letters in identifiers
//! are dropped, and values that do not parse as their declared kind are kept
//! as `Unknown`.

use tracing::debug;

use crate::codec::text::{split_composed, unescape, Reader, Writer};
use crate::codec::value::parse_value;
use crate::error::DecodeError;
use crate::model::{
    ComposedValue, Document, Game, Multiplicity, Node, NodeId, Property, PropertySchema,
    PropertyType, PropertyValue, SingleValue, ValueKind,
};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes all games of a document.
pub fn encode_document(document: &Document) -> String {
    let mut writer = Writer::new();
    for game in document.games() {
        write_game(&mut writer, game);
        writer.write_char('\n');
    }
    writer.into_string()
}

/// Encodes a single game as one game tree. A game without nodes is written
/// as a tree with one empty node.
pub fn encode_game(game: &Game) -> String {
    let mut writer = Writer::new();
    write_game(&mut writer, game);
    writer.into_string()
}

fn write_game(writer: &mut Writer, game: &Game) {
    writer.write_char('(');
    match game.root() {
        Some(root) => write_sequence(writer, game, root),
        None => writer.write_char(';'),
    }
    writer.write_char(')');
}

/// Writes `start` and its main chain, then each variation of the last node
/// in the chain as a parenthesized subtree.
fn write_sequence(writer: &mut Writer, game: &Game, start: NodeId) {
    let mut current = start;
    let mut first = true;
    loop {
        if !first {
            writer.write_char('\n');
        }
        first = false;
        let Some(node) = game.node(current) else { return };
        write_node(writer, node);
        match node.children() {
            [] => return,
            [only] => current = *only,
            variations => {
                for child in variations {
                    writer.write_str("\n(");
                    write_sequence(writer, game, *child);
                    writer.write_char(')');
                }
                return;
            }
        }
    }
}

fn write_node(writer: &mut Writer, node: &Node) {
    writer.write_char(';');
    let mut properties: Vec<&Property> = node.properties().iter().collect();
    properties.sort_by(|a, b| {
        (a.property_type(), a.name()).cmp(&(b.property_type(), b.name()))
    });
    for property in properties {
        write_property(writer, property);
    }
}

fn write_property(writer: &mut Writer, property: &Property) {
    writer.write_str(property.name());
    let escape_single_colon = property
        .schema()
        .is_some_and(|schema| schema.allows_composed());
    for value in property.values() {
        writer.write_char('[');
        match value {
            PropertyValue::Single(v) => writer.write_escaped(&v.raw_value(), escape_single_colon),
            PropertyValue::Composed(c) => {
                writer.write_escaped(&c.first().raw_value(), true);
                writer.write_char(':');
                writer.write_escaped(&c.second().raw_value(), false);
            }
        }
        writer.write_char(']');
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes SGF text into a document.
pub fn decode_document(text: &str) -> Result<Document, DecodeError> {
    let mut reader = Reader::new(text);
    let mut document = Document::new();

    loop {
        skip_to_game_tree(&mut reader);
        if reader.is_empty() {
            break;
        }
        let mut game = Game::new();
        let root = read_game_tree(&mut reader, &mut game, None)?;
        game.root = Some(root);
        document.append_game(game);
    }

    debug!(games = document.len(), "decoded document");
    Ok(document)
}

/// Skips everything up to the next `(`.
fn skip_to_game_tree(reader: &mut Reader<'_>) {
    while let Some(c) = reader.peek() {
        if c == '(' {
            return;
        }
        reader.next_char();
    }
}

/// Reads `( Sequence GameTree* )`, attaching the sequence below `parent`.
/// Returns the id of the sequence's first node.
fn read_game_tree(
    reader: &mut Reader<'_>,
    game: &mut Game,
    parent: Option<NodeId>,
) -> Result<NodeId, DecodeError> {
    let (line, column) = reader.position();
    reader.expect('(', "game tree")?;
    reader.skip_whitespace();

    let mut first = None;
    let mut last = parent;
    while reader.peek() == Some(';') {
        reader.next_char();
        let node = read_node(reader)?;
        let mut tree = game.tree_builder();
        let id = match last {
            Some(p) => tree.attach_new(p, node),
            None => tree.create_node(node),
        };
        first.get_or_insert(id);
        last = Some(id);
        reader.skip_whitespace();
    }
    let (Some(first), Some(last)) = (first, last) else {
        return Err(DecodeError::EmptyGameTree { line, column });
    };

    loop {
        reader.skip_whitespace();
        let (line, column) = reader.position();
        match reader.peek() {
            Some('(') => {
                read_game_tree(reader, game, Some(last))?;
            }
            Some(')') => {
                reader.next_char();
                return Ok(first);
            }
            Some(c) => return Err(reader.unexpected_at(line, column, "'(' or ')'", c)),
            None => {
                return Err(DecodeError::UnexpectedEof {
                    line,
                    column,
                    context: "game tree",
                });
            }
        }
    }
}

/// A property as read from text, before schema interpretation.
struct RawProperty {
    name: String,
    values: Vec<String>,
    line: u32,
    column: u32,
}

/// Reads the properties of one node (the `;` is already consumed).
fn read_node(reader: &mut Reader<'_>) -> Result<Node, DecodeError> {
    let mut raw: Vec<RawProperty> = Vec::new();
    loop {
        reader.skip_whitespace();
        let (line, column) = reader.position();
        match reader.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                let name = read_identifier(reader);
                if name.is_empty() {
                    return Err(reader.unexpected_at(line, column, "property identifier", c));
                }
                let values = read_values(reader)?;
                if values.is_empty() {
                    return Err(DecodeError::MissingValue { line, column });
                }
                // Repeated identifiers within a node are merged.
                match raw.iter_mut().find(|p| p.name == name) {
                    Some(existing) => existing.values.extend(values),
                    None => raw.push(RawProperty { name, values, line, column }),
                }
            }
            _ => break,
        }
    }

    let mut properties = Vec::with_capacity(raw.len());
    for property in raw {
        properties.push(interpret_property(property)?);
    }
    Ok(Node::with_properties(properties))
}

/// Reads an identifier, keeping only uppercase letters.
fn read_identifier(reader: &mut Reader<'_>) -> String {
    let mut name = String::new();
    while let Some(c) = reader.peek().filter(char::is_ascii_alphabetic) {
        reader.next_char();
        if c.is_ascii_uppercase() {
            name.push(c);
        }
    }
    name
}

fn read_values(reader: &mut Reader<'_>) -> Result<Vec<String>, DecodeError> {
    let mut values = Vec::new();
    loop {
        reader.skip_whitespace();
        if reader.peek() != Some('[') {
            return Ok(values);
        }
        reader.next_char();
        values.push(reader.read_escaped_value()?);
    }
}

fn interpret_property(raw: RawProperty) -> Result<Property, DecodeError> {
    let RawProperty { name, values, line, column } = raw;
    let property_type = PropertyType::from_name(&name);
    let Some(schema) = property_type.schema() else {
        let values = values
            .iter()
            .map(|v| SingleValue::Unknown(unescape(v)).into())
            .collect::<Vec<PropertyValue>>();
        return Property::from_name(name, values)
            .map_err(|source| DecodeError::InvalidProperty { line, column, source });
    };

    let parsed: Vec<PropertyValue> = values
        .iter()
        .map(|escaped| interpret_value(escaped, &schema))
        .collect();

    if schema.multiplicity == Multiplicity::Single && parsed.len() > 1 {
        debug!(
            property = %name,
            count = parsed.len(),
            line,
            column,
            "single-value property has several values"
        );
    }

    Property::decoded(property_type, parsed)
        .map_err(|source| DecodeError::InvalidProperty { line, column, source })
}

fn interpret_value(escaped: &str, schema: &PropertySchema) -> PropertyValue {
    if let Some((a, b)) = schema.composed_kinds() {
        if let Some((first, second)) = split_composed(escaped) {
            let first = parse_value(&unescape(first), a);
            let second = parse_value(&unescape(second), b);
            if let Ok(composed) = ComposedValue::new(first, second) {
                return composed.into();
            }
        }
    }
    let raw = unescape(escaped);
    if raw.is_empty() && schema.allows_none() {
        return SingleValue::None.into();
    }
    let kind = schema.single_kind().unwrap_or(ValueKind::Unknown);
    parse_value(&raw, kind).into()
}

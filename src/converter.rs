//! MusicXML element conversion logic
//!
//! Maps the parsed element tree to the score model in a single forward pass:
//! score → instrument parts → measures → notes. Either a complete [`Score`]
//! is produced or one [`ParseError`] describing the first failure; there is
//! no partial output.
//!
//! Numeric fields (octave, alter, duration, fifths) that carry non-numeric
//! text fail the whole parse. Structurally optional elements that are absent
//! yield absent or default values instead.

use std::collections::HashMap;

use roxmltree::Document;

use crate::errors::{ParseError, ParseResult};
use crate::parser::{self, Element};
use crate::types::{
    Attributes, Clef, Instrument, Key, Measure, Note, NoteKind, Pitch, Score, Time,
};

/// Title used when the document declares none
pub const DEFAULT_TITLE: &str = "untitled";

/// Composer used when the document declares none
pub const DEFAULT_COMPOSER: &str = "unknown";

/// Parse a MusicXML string into a [`Score`].
///
/// Accepts uncompressed MusicXML text. A DOCTYPE declaration, if present,
/// is stripped before parsing.
///
/// # Example
///
/// ```
/// let musicxml = r#"<?xml version="1.0"?>
/// <score-partwise version="3.1">
///   <part-list>
///     <score-part id="P1"><part-name>Piano</part-name></score-part>
///   </part-list>
///   <part id="P1">
///     <measure number="1">
///       <note><pitch><step>C</step><octave>4</octave></pitch><duration>4</duration></note>
///     </measure>
///   </part>
/// </score-partwise>"#;
///
/// let score = musicxml_import::parse_musicxml(musicxml).unwrap();
/// assert_eq!(score.instruments[0].name, "Piano");
/// ```
pub fn parse_musicxml(xml: &str) -> ParseResult<Score> {
    let cleaned = parser::strip_doctype(xml);
    let doc =
        Document::parse(&cleaned).map_err(|e| ParseError::InvalidXml(e.to_string()))?;
    score_from_document(&doc)
}

/// Parse an already-parsed document tree into a [`Score`].
pub fn score_from_document(doc: &Document<'_>) -> ParseResult<Score> {
    let root = parser::root_element(doc);

    if root.tag() == "score-timewise" {
        return Err(ParseError::UnsupportedFormat(
            "score-timewise (use score-partwise instead)".to_string(),
        ));
    }

    let title = root
        .descendant("work-title")
        .and_then(|e| e.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let composer = root
        .descendants("creator")
        .into_iter()
        .find(|c| c.attr("type") == Some("composer"))
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_COMPOSER.to_string());

    let catalogue = parse_part_list(&root);

    let mut instruments = Vec::new();
    for part in root.children("part") {
        let id = part
            .attr("id")
            .ok_or_else(|| ParseError::MissingElement("part id attribute".to_string()))?;

        let name = catalogue
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string());

        instruments.push(convert_part(&part, &name)?);
    }

    log::debug!("parsed score '{}': {} instrument(s)", title, instruments.len());

    Ok(Score {
        title,
        composer,
        instruments,
    })
}

/// Build the ID → display-name catalogue from `<part-list>`.
///
/// An absent part-list yields an empty catalogue; every part then falls
/// back to its raw ID as display name.
fn parse_part_list(root: &Element) -> HashMap<String, String> {
    let mut catalogue = HashMap::new();

    let Some(part_list) = root.descendant("part-list") else {
        return catalogue;
    };

    for score_part in part_list.children("score-part") {
        let Some(id) = score_part.attr("id") else {
            continue;
        };

        let name = score_part
            .child_text("part-name")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(id);

        catalogue.insert(id.to_string(), name.to_string());
    }

    catalogue
}

/// Convert one `<part>` element and its resolved display name.
fn convert_part(part: &Element, name: &str) -> ParseResult<Instrument> {
    let measures = part
        .children("measure")
        .iter()
        .map(convert_measure)
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(Instrument {
        name: name.to_string(),
        measures,
    })
}

/// Convert one `<measure>` element.
///
/// Dynamics carried by `<direction>` elements are applied to the measure's
/// FIRST note, the last direction winning. This is a known simplification:
/// MusicXML attaches a direction to whatever note follows it, not to the
/// start of the measure. A direction in a measure with no notes is dropped
/// without error.
fn convert_measure(measure: &Element) -> ParseResult<Measure> {
    let number = measure.attr("number").map(str::to_string);

    let attributes = measure
        .child("attributes")
        .map(|a| convert_attributes(&a))
        .transpose()?;

    let mut notes = measure
        .children("note")
        .iter()
        .map(convert_note)
        .collect::<ParseResult<Vec<_>>>()?;

    for direction in measure.children("direction") {
        let Some(marking) = direction.descendant("dynamics").and_then(dynamics_marking)
        else {
            continue;
        };

        match notes.first_mut() {
            Some(first) => first.dynamics = Some(marking),
            None => {
                log::debug!("dropping dynamics '{}' in a measure with no notes", marking)
            }
        }
    }

    Ok(Measure {
        number,
        attributes,
        notes,
    })
}

/// Convert one `<attributes>` element.
fn convert_attributes(attrs: &Element) -> ParseResult<Attributes> {
    let divisions = attrs.child_text("divisions").map(str::to_string);

    let key = attrs
        .child("key")
        .map(|k| -> ParseResult<Key> {
            let fifths = k
                .child_text("fifths")
                .map(|text| parse_number::<i8>("fifths", text))
                .transpose()?;
            let mode = k.child_text("mode").map(str::to_string);
            Ok(Key { fifths, mode })
        })
        .transpose()?;

    let time = attrs.child("time").map(|t| Time {
        beats: t.child_text("beats").map(str::to_string),
        beat_type: t.child_text("beat-type").map(str::to_string),
    });

    let clef = attrs.child("clef").map(|c| Clef {
        sign: c.child_text("sign").map(str::to_string),
        line: c.child_text("line").map(str::to_string),
    });

    Ok(Attributes {
        divisions,
        key,
        time,
        clef,
    })
}

/// Convert one `<note>` element.
fn convert_note(note: &Element) -> ParseResult<Note> {
    // A rest marker wins outright; a stray <pitch> sibling is ignored.
    let kind = if note.child("rest").is_some() {
        NoteKind::Rest
    } else {
        let pitch = note
            .child("pitch")
            .ok_or_else(|| ParseError::MissingElement("pitch".to_string()))?;
        NoteKind::Pitched(convert_pitch(&pitch)?)
    };

    let duration = note
        .child_text("duration")
        .map(|text| parse_number::<u32>("duration", text))
        .transpose()?;

    let note_type = note.child_text("type").map(str::to_string);

    let mut dynamics = None;
    let mut articulations = Vec::new();

    if let Some(notations) = note.child("notations") {
        if let Some(dynamics_el) = notations.child("dynamics") {
            dynamics = dynamics_marking(dynamics_el);
        }

        if let Some(articulations_el) = notations.child("articulations") {
            articulations = articulations_el
                .child_elements()
                .iter()
                .map(|a| a.tag().to_string())
                .collect();
        }
    }

    Ok(Note {
        kind,
        duration,
        note_type,
        dynamics,
        articulations,
    })
}

/// Convert one `<pitch>` element.
fn convert_pitch(pitch: &Element) -> ParseResult<Pitch> {
    let step = pitch
        .child_text("step")
        .ok_or_else(|| ParseError::MissingElement("step".to_string()))?
        .trim();

    if !matches!(step, "A" | "B" | "C" | "D" | "E" | "F" | "G") {
        return Err(ParseError::InvalidValue {
            element: "step".to_string(),
            value: step.to_string(),
            reason: "expected a step letter A-G".to_string(),
        });
    }

    let octave_text = pitch
        .child_text("octave")
        .ok_or_else(|| ParseError::MissingElement("octave".to_string()))?;
    let octave = parse_number::<i8>("octave", octave_text)?;

    let alter = match pitch.child_text("alter") {
        Some(text) => parse_number::<i8>("alter", text)?,
        None => 0,
    };

    Ok(Pitch {
        step: step.to_string(),
        octave,
        alter,
    })
}

/// The marking carried by a `<dynamics>` element: the tag name of its first
/// child element, lower-cased. Further children are not considered.
fn dynamics_marking(dynamics: Element) -> Option<String> {
    dynamics
        .child_elements()
        .first()
        .map(|mark| mark.tag().to_ascii_lowercase())
}

fn parse_number<T: std::str::FromStr>(element: &str, text: &str) -> ParseResult<T> {
    text.trim().parse().map_err(|_| ParseError::InvalidValue {
        element: element.to_string(),
        value: text.to_string(),
        reason: "expected an integer".to_string(),
    })
}

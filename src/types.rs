//! Score data model
//!
//! The records built by the importer: a `Score` owns its `Instrument`s, each
//! instrument its `Measure`s, each measure its `Note`s. Every record is
//! constructed once during the import pass and never mutated afterward.
//!
//! All types serialize to the JSON shape of the external interface:
//! `title`, `composer`, `instruments[].instrument`,
//! `instruments[].measures[].{number,attributes,notes}`, with notes carrying
//! `isRest`, `pitch{step,octave,alter}`, `duration`, `noteType`, `dynamics`
//! and `articulations`.

use serde::{Deserialize, Serialize};

/// A complete parsed score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Work title, `"untitled"` when the document carries none
    pub title: String,

    /// Composer credit, `"unknown"` when the document carries none
    pub composer: String,

    /// One entry per `<part>` element, in document order
    pub instruments: Vec<Instrument>,
}

impl Score {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to a human-readable JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total number of notes (rests included) across all instruments.
    pub fn note_count(&self) -> usize {
        self.instruments.iter().map(Instrument::note_count).sum()
    }
}

/// One instrument part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Display name from the part-list catalogue, or the raw part ID when
    /// no catalogue name resolves
    #[serde(rename = "instrument")]
    pub name: String,

    /// Measures in document order
    pub measures: Vec<Measure>,
}

impl Instrument {
    /// Total number of notes (rests included) across all measures.
    pub fn note_count(&self) -> usize {
        self.measures.iter().map(|m| m.notes.len()).sum()
    }
}

/// One measure of an instrument part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// The `number` attribute, verbatim. Not guaranteed numeric or unique.
    pub number: Option<String>,

    /// Musical context from this measure onward, when the source declares one
    pub attributes: Option<Attributes>,

    /// Notes in document order
    pub notes: Vec<Note>,
}

/// Measure-level musical context
///
/// Sub-fields absent in the source stay absent here; nothing is zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Subdivisions per quarter note, verbatim text
    pub divisions: Option<String>,
    pub key: Option<Key>,
    pub time: Option<Time>,
    pub clef: Option<Clef>,
}

/// Key signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Signed count of sharps (+) or flats (-) on the circle of fifths
    pub fifths: Option<i8>,
    /// Mode name such as "major" or "minor"
    pub mode: Option<String>,
}

/// Time signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Time {
    pub beats: Option<String>,
    #[serde(rename = "beatType")]
    pub beat_type: Option<String>,
}

/// Clef
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clef {
    pub sign: Option<String>,
    pub line: Option<String>,
}

/// One note or rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Rest or pitched, never both
    #[serde(flatten)]
    pub kind: NoteKind,

    /// Duration in divisions-units. `None` means the source declared no
    /// duration, which is distinct from a duration of zero.
    pub duration: Option<u32>,

    /// Visual note type such as "whole", "half", "quarter", "eighth"
    #[serde(rename = "noteType")]
    pub note_type: Option<String>,

    /// Dynamic marking such as "mf" or "ff", from the note's own notations
    /// or from a measure-level direction
    pub dynamics: Option<String>,

    /// Articulation names in document order
    pub articulations: Vec<String>,
}

impl Note {
    pub fn is_rest(&self) -> bool {
        matches!(self.kind, NoteKind::Rest)
    }

    pub fn pitch(&self) -> Option<&Pitch> {
        match &self.kind {
            NoteKind::Pitched(pitch) => Some(pitch),
            NoteKind::Rest => None,
        }
    }
}

/// Rest-vs-pitched duality as a tagged union
///
/// Serializes as an `isRest` flag plus an optional `pitch` object; a rest
/// carries no `pitch` key at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteKindRepr", into = "NoteKindRepr")]
pub enum NoteKind {
    Rest,
    Pitched(Pitch),
}

/// Wire shape of [`NoteKind`]
#[derive(Serialize, Deserialize)]
struct NoteKindRepr {
    #[serde(rename = "isRest")]
    is_rest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pitch: Option<Pitch>,
}

impl From<NoteKind> for NoteKindRepr {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Rest => NoteKindRepr {
                is_rest: true,
                pitch: None,
            },
            NoteKind::Pitched(pitch) => NoteKindRepr {
                is_rest: false,
                pitch: Some(pitch),
            },
        }
    }
}

impl TryFrom<NoteKindRepr> for NoteKind {
    type Error = String;

    fn try_from(repr: NoteKindRepr) -> Result<Self, Self::Error> {
        match repr {
            // A stray pitch on a rest is dropped, matching the importer.
            NoteKindRepr { is_rest: true, .. } => Ok(NoteKind::Rest),
            NoteKindRepr {
                is_rest: false,
                pitch: Some(pitch),
            } => Ok(NoteKind::Pitched(pitch)),
            NoteKindRepr {
                is_rest: false,
                pitch: None,
            } => Err("a non-rest note must carry a pitch".to_string()),
        }
    }
}

/// Musical pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    /// Step letter, one of A-G
    pub step: String,

    /// Octave number (4 = middle C octave)
    pub octave: i8,

    /// Semitone offset (-1 = flat, +1 = sharp). Always present, 0 when the
    /// source declares none.
    pub alter: i8,
}

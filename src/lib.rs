//! MusicXML Score Import
//!
//! Converts uncompressed MusicXML (score-partwise) documents into an
//! immutable, queryable score model and serializes that model to JSON.
//!
//! # Architecture
//!
//! ```text
//! MusicXML String
//!   ↓ [Parse with roxmltree]
//! XML DOM
//!   ↓ [Extract musical data]
//! Score (instruments → measures → notes)
//!   ↓ [serde_json]
//! JSON
//! ```
//!
//! The import is a pure, synchronous, single-pass computation: no I/O, no
//! shared state, safe to run concurrently on independent documents. Callers
//! receive either a complete [`Score`] or a single [`ParseError`].
//!
//! # Example
//!
//! ```
//! use musicxml_import::parse_musicxml;
//!
//! let score = parse_musicxml(
//!     r#"<score-partwise version="3.1"><part-list/></score-partwise>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(score.title, "untitled");
//! assert!(score.instruments.is_empty());
//! ```

pub mod converter;
pub mod errors;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use converter::{parse_musicxml, score_from_document, DEFAULT_COMPOSER, DEFAULT_TITLE};
pub use errors::{ParseError, ParseResult};
pub use types::{
    Attributes, Clef, Instrument, Key, Measure, Note, NoteKind, Pitch, Score, Time,
};

//! JSON wire codec for content records.
//!
//! Serialization is deterministic: declared members in schema order,
//! optional members omitted when absent (never `null`), then additional
//! fields in insertion order. Parsing is discriminant-driven with a strict
//! mode (unknown members are errors) and a lenient mode (unknown members
//! are captured for round-tripping).

pub mod de;
pub mod ser;

pub use de::{parse_note, parse_note_lenient};
pub use ser::note_to_json;

/// Serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit captured additional fields, at every nesting level.
    pub include_additional_fields: bool,
    /// Emit indented multi-line JSON instead of compact.
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_additional_fields: true,
            pretty: false,
        }
    }
}

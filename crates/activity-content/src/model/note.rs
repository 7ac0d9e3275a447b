//! The Note content record.

use crate::codec::{self, WriteOptions};
use crate::error::{ValidationError, WriteError};
use crate::model::{AdditionalFields, Attachment, Location, Tag};
use crate::util::datetime::Timestamp;

/// Wire discriminant emitted for notes.
pub(crate) const TYPE_NOTE: &str = "Note";

/// MIME type of note content, fixed by the schema.
pub(crate) const MEDIA_TYPE_TEXT_PLAIN: &str = "text/plain";

/// Declared wire members of a note object.
pub(crate) const NOTE_FIELDS: &[&str] = &[
    "@context",
    "type",
    "content",
    "mediaType",
    "name",
    "published",
    "location",
    "attachment",
    "tag",
];

/// A post created by a user: the top-level content record.
///
/// Immutable once built. The wire constants (`@context`, `type`,
/// `mediaType`) are materialized by the serializer rather than stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Note {
    /// The plain-text content of the note.
    pub content: String,
    /// Display name of the note.
    pub name: Option<String>,
    /// Publication time, serialized as ISO-8601 UTC.
    pub published: Option<Timestamp>,
    pub location: Option<Location>,
    /// Attachments in caller order.
    pub attachments: Vec<Attachment>,
    /// Tags in caller order.
    pub tags: Vec<Tag>,
    pub additional_fields: AdditionalFields,
}

impl Note {
    /// Runs the ordered validation rules over this note and its nested
    /// entities, failing fast with the first violated rule.
    ///
    /// Validation is always explicit: neither serialization nor parsing
    /// invokes it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validate::validate_note(self)
    }

    /// Renders this note as canonical JSON text.
    pub fn to_json(&self, options: &WriteOptions) -> Result<String, WriteError> {
        codec::ser::note_to_json(self, options)
    }
}

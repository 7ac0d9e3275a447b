//! Builder API for ergonomic record construction.
//!
//! Builders are single-owner staging objects consumed and returned by value
//! for fluent chaining. Single-valued setters overwrite (last write wins);
//! `add`-style calls append to ordered collections. `build()` never fails
//! and materializes schema defaults; missing or out-of-range values are the
//! validator's concern. The one construction-time failure is
//! [`ReservedFieldError`] from the additional-field setters.
//!
//! # Example
//!
//! ```rust
//! use activity_content::builders;
//!
//! let note = builders::note("Note Content")
//!     .name("Note Name")
//!     .hashtag("#content")
//!     .build();
//! assert_eq!(note.content, "Note Content");
//! ```

use serde_json::Value;

use crate::error::ReservedFieldError;
use crate::model::attachment::{
    Attachment, AttachmentKind, LinkAttachment, MediaAttachment, MediaLink, MediaType,
    LINK_ATTACHMENT_FIELDS, MEDIA_ATTACHMENT_FIELDS, MEDIA_LINK_FIELDS,
};
use crate::model::hash::{Hash, HashAlgorithm, HASH_FIELDS};
use crate::model::location::{Location, LocationUnit, LOCATION_FIELDS};
use crate::model::note::{Note, NOTE_FIELDS};
use crate::model::tag::{Hashtag, Mention, Tag, HASHTAG_FIELDS, MENTION_FIELDS};
use crate::model::AdditionalFields;
use crate::util::datetime::Timestamp;

/// Builder for [`Note`] records.
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    content: String,
    name: Option<String>,
    published: Option<Timestamp>,
    location: Option<Location>,
    attachments: Vec<Attachment>,
    tags: Vec<Tag>,
    additional_fields: AdditionalFields,
}

impl NoteBuilder {
    /// Creates a builder for a note with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
            published: None,
            location: None,
            attachments: Vec::new(),
            tags: Vec::new(),
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the publication time.
    pub fn published(mut self, published: Timestamp) -> Self {
        self.published = Some(published);
        self
    }

    /// Sets the location.
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Appends an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Appends a tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Appends a mention tag for the given DSNP user URI.
    pub fn mention(mut self, id: impl Into<String>) -> Self {
        self.tags.push(Tag::Mention(Mention {
            id: id.into(),
            name: None,
            additional_fields: AdditionalFields::new(),
        }));
        self
    }

    /// Appends a mention tag carrying the mentioned user's display name.
    pub fn mention_named(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.tags.push(Tag::Mention(Mention {
            id: id.into(),
            name: Some(name.into()),
            additional_fields: AdditionalFields::new(),
        }));
        self
    }

    /// Appends a hashtag tag.
    pub fn hashtag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(Tag::Hashtag(Hashtag {
            name: name.into(),
            additional_fields: AdditionalFields::new(),
        }));
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields.try_insert(key, value, NOTE_FIELDS)?;
        Ok(self)
    }

    /// Stores several additional fields under the same rules.
    pub fn additional_fields(
        mut self,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Self, ReservedFieldError> {
        for (key, value) in fields {
            self.additional_fields.try_insert(key, value, NOTE_FIELDS)?;
        }
        Ok(self)
    }

    /// Builds the immutable note.
    pub fn build(self) -> Note {
        Note {
            content: self.content,
            name: self.name,
            published: self.published,
            location: self.location,
            attachments: self.attachments,
            tags: self.tags,
            additional_fields: self.additional_fields,
        }
    }
}

/// Builder for the Video/Image/Audio attachment variants.
#[derive(Debug, Clone)]
pub struct MediaAttachmentBuilder {
    kind: AttachmentKind,
    name: Option<String>,
    urls: Vec<MediaLink>,
    additional_fields: AdditionalFields,
}

impl MediaAttachmentBuilder {
    fn new(kind: AttachmentKind) -> Self {
        Self {
            kind,
            name: None,
            urls: Vec::new(),
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Creates a builder for a video attachment.
    pub fn video() -> Self {
        Self::new(AttachmentKind::Video)
    }

    /// Creates a builder for an image attachment.
    pub fn image() -> Self {
        Self::new(AttachmentKind::Image)
    }

    /// Creates a builder for an audio attachment.
    pub fn audio() -> Self {
        Self::new(AttachmentKind::Audio)
    }

    /// Sets the attachment name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a media link (the same content in one more format).
    pub fn url(mut self, link: MediaLink) -> Self {
        self.urls.push(link);
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, MEDIA_ATTACHMENT_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable attachment.
    pub fn build(self) -> Attachment {
        let media = MediaAttachment {
            name: self.name,
            url: self.urls,
            additional_fields: self.additional_fields,
        };
        match self.kind {
            AttachmentKind::Video => Attachment::Video(media),
            AttachmentKind::Image => Attachment::Image(media),
            AttachmentKind::Audio => Attachment::Audio(media),
            // Link attachments have their own builder; the three public
            // constructors never produce this kind.
            AttachmentKind::Link => unreachable!("media builder has no Link kind"),
        }
    }
}

/// Builder for the Link attachment variant.
#[derive(Debug, Clone)]
pub struct LinkAttachmentBuilder {
    href: String,
    name: Option<String>,
    additional_fields: AdditionalFields,
}

impl LinkAttachmentBuilder {
    /// Creates a builder for a link attachment with the given URL.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Sets the link name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, LINK_ATTACHMENT_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable attachment.
    pub fn build(self) -> Attachment {
        Attachment::Link(LinkAttachment {
            name: self.name,
            href: self.href,
            additional_fields: self.additional_fields,
        })
    }
}

/// Builder for [`MediaLink`]s.
#[derive(Debug, Clone)]
pub struct MediaLinkBuilder {
    media_type: MediaType,
    href: String,
    hashes: Vec<Hash>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    additional_fields: AdditionalFields,
}

impl MediaLinkBuilder {
    /// Creates a builder for a media link with the given MIME type and URL.
    pub fn new(media_type: MediaType, href: impl Into<String>) -> Self {
        Self {
            media_type,
            href: href.into(),
            hashes: Vec::new(),
            width: None,
            height: None,
            duration: None,
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Appends a content hash.
    pub fn hash(mut self, hash: Hash) -> Self {
        self.hashes.push(hash);
        self
    }

    /// Appends several content hashes.
    pub fn hashes(mut self, hashes: impl IntoIterator<Item = Hash>) -> Self {
        self.hashes.extend(hashes);
        self
    }

    /// Sets the rendering width hint.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the rendering height hint.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the ISO-8601 duration of the linked media.
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, MEDIA_LINK_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable media link.
    pub fn build(self) -> MediaLink {
        MediaLink {
            media_type: self.media_type,
            hash: self.hashes,
            href: self.href,
            width: self.width,
            height: self.height,
            duration: self.duration,
            additional_fields: self.additional_fields,
        }
    }
}

/// Builder for [`Hash`]es over pre-computed digests.
#[derive(Debug, Clone)]
pub struct HashBuilder {
    digest: String,
    algorithm: HashAlgorithm,
    additional_fields: AdditionalFields,
}

impl HashBuilder {
    /// Creates a builder for the given hex digest, defaulting the algorithm
    /// to keccak256.
    pub fn new(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            algorithm: HashAlgorithm::Keccak256,
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Overrides the algorithm the digest was computed with.
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields.try_insert(key, value, HASH_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable hash.
    pub fn build(self) -> Hash {
        Hash {
            algorithm: self.algorithm,
            digest: self.digest,
            additional_fields: self.additional_fields,
        }
    }
}

/// Builder for [`Location`]s.
#[derive(Debug, Clone)]
pub struct LocationBuilder {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    accuracy: Option<f64>,
    altitude: Option<f64>,
    radius: Option<f64>,
    unit: Option<LocationUnit>,
    additional_fields: AdditionalFields,
}

impl LocationBuilder {
    /// Creates a builder for the given coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            name: None,
            accuracy: None,
            altitude: None,
            radius: None,
            unit: None,
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Sets the location name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the coordinate accuracy as a percentage.
    pub fn accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Sets the altitude.
    pub fn altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Sets the radius around the coordinate.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the unit for radius and altitude.
    pub fn unit(mut self, unit: LocationUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, LOCATION_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable location, defaulting the unit to meters.
    pub fn build(self) -> Location {
        Location {
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy: self.accuracy,
            altitude: self.altitude,
            radius: self.radius,
            unit: self.unit.unwrap_or(LocationUnit::Meter),
            additional_fields: self.additional_fields,
        }
    }
}

/// Builder for mention tags.
#[derive(Debug, Clone)]
pub struct MentionBuilder {
    id: String,
    name: Option<String>,
    additional_fields: AdditionalFields,
}

impl MentionBuilder {
    /// Creates a builder for a mention of the given DSNP user URI.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Sets the display name of the mentioned user.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, MENTION_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable tag.
    pub fn build(self) -> Tag {
        Tag::Mention(Mention {
            id: self.id,
            name: self.name,
            additional_fields: self.additional_fields,
        })
    }
}

/// Builder for hashtag tags.
#[derive(Debug, Clone)]
pub struct HashtagBuilder {
    name: String,
    additional_fields: AdditionalFields,
}

impl HashtagBuilder {
    /// Creates a builder for the given hashtag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            additional_fields: AdditionalFields::new(),
        }
    }

    /// Stores an additional field, failing if `key` shadows a schema field.
    pub fn additional_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ReservedFieldError> {
        self.additional_fields
            .try_insert(key, value, HASHTAG_FIELDS)?;
        Ok(self)
    }

    /// Builds the immutable tag.
    pub fn build(self) -> Tag {
        Tag::Hashtag(Hashtag {
            name: self.name,
            additional_fields: self.additional_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_builder_basic() {
        let note = NoteBuilder::new("hello world")
            .name("greeting")
            .published(Timestamp::from_epoch_millis(1_705_314_600_000))
            .hashtag("#hi")
            .mention_named("dsnp://1", "newUser")
            .build();

        assert_eq!(note.content, "hello world");
        assert_eq!(note.name.as_deref(), Some("greeting"));
        assert_eq!(note.tags.len(), 2);
        match &note.tags[1] {
            Tag::Mention(mention) => {
                assert_eq!(mention.id, "dsnp://1");
                assert_eq!(mention.name.as_deref(), Some("newUser"));
            }
            _ => panic!("expected mention"),
        }
    }

    #[test]
    fn test_note_builder_last_write_wins() {
        let note = NoteBuilder::new("x").name("first").name("second").build();
        assert_eq!(note.name.as_deref(), Some("second"));
    }

    #[test]
    fn test_note_builder_reserved_field() {
        let err = NoteBuilder::new("x")
            .additional_field("content", "y")
            .unwrap_err();
        assert_eq!(err.field, "content");

        // Any declared member is reserved, including the derived ones.
        assert!(NoteBuilder::new("x").additional_field("@context", 1).is_err());
        assert!(NoteBuilder::new("x").additional_field("mediaType", 1).is_err());
    }

    #[test]
    fn test_note_builder_additional_field_order() {
        let note = NoteBuilder::new("x")
            .additional_field("backgroundColor", 123)
            .unwrap()
            .additional_field("title", "Note Title")
            .unwrap()
            .build();

        let keys: Vec<&str> = note
            .additional_fields
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["backgroundColor", "title"]);
    }

    #[test]
    fn test_media_attachment_builder() {
        let hash = HashBuilder::new("ab".repeat(32)).build();
        let link = MediaLinkBuilder::new(MediaType::Mp4, "https://example.com/video.mp4")
            .hash(hash)
            .width(1280)
            .height(720)
            .build();
        let attachment = MediaAttachmentBuilder::video()
            .name("clip")
            .url(link)
            .build();

        assert_eq!(attachment.kind(), AttachmentKind::Video);
        let media = attachment.as_media().unwrap();
        assert_eq!(media.url.len(), 1);
        assert_eq!(media.url[0].width, Some(1280));
        assert_eq!(media.url[0].hash[0].algorithm, HashAlgorithm::Keccak256);
    }

    #[test]
    fn test_link_attachment_builder() {
        let attachment = LinkAttachmentBuilder::new("https://example.com/article")
            .name("an article")
            .build();
        let link = attachment.as_link().unwrap();
        assert_eq!(link.href, "https://example.com/article");
    }

    #[test]
    fn test_location_builder_defaults_unit() {
        let location = LocationBuilder::new(40.76567, -73.980835)
            .name("Unfinished")
            .radius(20.0)
            .build();
        assert_eq!(location.unit, LocationUnit::Meter);
        assert_eq!(location.latitude, 40.76567);
    }

    #[test]
    fn test_hash_builder_reserved_field() {
        assert!(HashBuilder::new("ab").additional_field("value", 1).is_err());
        assert!(HashBuilder::new("ab").additional_field("note", 1).is_ok());
    }
}

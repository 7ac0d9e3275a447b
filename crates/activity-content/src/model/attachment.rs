//! Attachments: the closed variant set of external content on a record.
//!
//! Audio, image, and video attachments share one shape (a list of media
//! links, each a concrete file in one format); link attachments point at
//! dynamic content that carries no hashes.

use crate::model::{AdditionalFields, Hash};

/// Declared wire members of a media attachment (Video/Image/Audio).
pub(crate) const MEDIA_ATTACHMENT_FIELDS: &[&str] = &["type", "name", "url"];

/// Declared wire members of a link attachment.
pub(crate) const LINK_ATTACHMENT_FIELDS: &[&str] = &["type", "name", "href"];

/// Declared wire members of a media link object.
pub(crate) const MEDIA_LINK_FIELDS: &[&str] = &[
    "type",
    "mediaType",
    "hash",
    "href",
    "width",
    "height",
    "duration",
];

/// Wire marker emitted on media link objects.
pub(crate) const TYPE_LINK_MARKER: &str = "Link";

/// The attachment families, doubling as the wire discriminant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Video,
    Image,
    Audio,
    Link,
}

impl AttachmentKind {
    /// Returns the wire discriminant for this kind.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AttachmentKind::Video => "Video",
            AttachmentKind::Image => "Image",
            AttachmentKind::Audio => "Audio",
            AttachmentKind::Link => "Link",
        }
    }

    /// Maps a wire discriminant onto the kind set.
    pub fn from_wire(name: &str) -> Option<AttachmentKind> {
        match name {
            "Video" => Some(AttachmentKind::Video),
            "Image" => Some(AttachmentKind::Image),
            "Audio" => Some(AttachmentKind::Audio),
            "Link" => Some(AttachmentKind::Link),
            _ => None,
        }
    }

    /// The MIME prefix a free-form media type must carry for this family.
    pub(crate) fn mime_prefix(&self) -> Option<&'static str> {
        match self {
            AttachmentKind::Video => Some("video/"),
            AttachmentKind::Image => Some("image/"),
            AttachmentKind::Audio => Some("audio/"),
            AttachmentKind::Link => None,
        }
    }
}

/// MIME types for media links, one closed set across the three media
/// families. Unsupported MIME strings are carried verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    // audio
    Mp3,
    OggAudio,
    WebMAudio,
    // image
    Jpeg,
    Png,
    Svg,
    WebP,
    Gif,
    // video
    Mpeg,
    OggVideo,
    WebMVideo,
    H265,
    Mp4,
    /// Any other MIME string, preserved verbatim.
    Other(String),
}

impl MediaType {
    /// Returns the MIME string for this media type.
    pub fn mime(&self) -> &str {
        match self {
            MediaType::Mp3 => "audio/mpeg",
            MediaType::OggAudio => "audio/ogg",
            MediaType::WebMAudio => "audio/webm",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Svg => "image/svg+xml",
            MediaType::WebP => "image/webp",
            MediaType::Gif => "image/gif",
            MediaType::Mpeg => "video/mpeg",
            MediaType::OggVideo => "video/ogg",
            MediaType::WebMVideo => "video/webm",
            MediaType::H265 => "video/H265",
            MediaType::Mp4 => "video/mp4",
            MediaType::Other(mime) => mime,
        }
    }

    /// Maps a MIME string onto the media type set. Total: unknown strings
    /// become `Other`.
    pub fn from_mime(mime: &str) -> MediaType {
        match mime {
            "audio/mpeg" => MediaType::Mp3,
            "audio/ogg" => MediaType::OggAudio,
            "audio/webm" => MediaType::WebMAudio,
            "image/jpeg" => MediaType::Jpeg,
            "image/png" => MediaType::Png,
            "image/svg+xml" => MediaType::Svg,
            "image/webp" => MediaType::WebP,
            "image/gif" => MediaType::Gif,
            "video/mpeg" => MediaType::Mpeg,
            "video/ogg" => MediaType::OggVideo,
            "video/webm" => MediaType::WebMVideo,
            "video/H265" => MediaType::H265,
            "video/mp4" => MediaType::Mp4,
            other => MediaType::Other(other.to_string()),
        }
    }

    /// Whether this is a supported (non-`Other`) type of the given family.
    pub fn supported_for(&self, kind: AttachmentKind) -> bool {
        match kind {
            AttachmentKind::Audio => matches!(
                self,
                MediaType::Mp3 | MediaType::OggAudio | MediaType::WebMAudio
            ),
            AttachmentKind::Image => matches!(
                self,
                MediaType::Jpeg | MediaType::Png | MediaType::Svg | MediaType::WebP | MediaType::Gif
            ),
            AttachmentKind::Video => matches!(
                self,
                MediaType::Mpeg
                    | MediaType::OggVideo
                    | MediaType::WebMVideo
                    | MediaType::H265
                    | MediaType::Mp4
            ),
            AttachmentKind::Link => false,
        }
    }
}

/// One concrete file behind a media attachment: a URL in a specific format
/// plus the hashes proving its authenticity.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLink {
    pub media_type: MediaType,
    /// Hashes for linked-content validation; at least one is required.
    pub hash: Vec<Hash>,
    pub href: String,
    /// Rendering width hint in device-independent pixels.
    pub width: Option<u32>,
    /// Rendering height hint in device-independent pixels.
    pub height: Option<u32>,
    /// ISO-8601 duration of the linked media.
    pub duration: Option<String>,
    pub additional_fields: AdditionalFields,
}

/// A media attachment body, shared by the Video/Image/Audio variants.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAttachment {
    pub name: Option<String>,
    /// The same content in alternative formats, in caller order.
    pub url: Vec<MediaLink>,
    pub additional_fields: AdditionalFields,
}

/// A link attachment: a URL to dynamic content, never hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAttachment {
    pub name: Option<String>,
    pub href: String,
    pub additional_fields: AdditionalFields,
}

/// External content associated with a record.
///
/// A closed set; the wire discriminant is the `type` member.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Video(MediaAttachment),
    Image(MediaAttachment),
    Audio(MediaAttachment),
    Link(LinkAttachment),
}

impl Attachment {
    /// Returns the kind of this attachment.
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Video(_) => AttachmentKind::Video,
            Attachment::Image(_) => AttachmentKind::Image,
            Attachment::Audio(_) => AttachmentKind::Audio,
            Attachment::Link(_) => AttachmentKind::Link,
        }
    }

    /// The media body, for the three media variants.
    pub fn as_media(&self) -> Option<&MediaAttachment> {
        match self {
            Attachment::Video(media) | Attachment::Image(media) | Attachment::Audio(media) => {
                Some(media)
            }
            Attachment::Link(_) => None,
        }
    }

    /// The link body, for the Link variant.
    pub fn as_link(&self) -> Option<&LinkAttachment> {
        match self {
            Attachment::Link(link) => Some(link),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_round_trip() {
        for kind in [
            AttachmentKind::Video,
            AttachmentKind::Image,
            AttachmentKind::Audio,
            AttachmentKind::Link,
        ] {
            assert_eq!(AttachmentKind::from_wire(kind.wire_name()), Some(kind));
        }
        assert_eq!(AttachmentKind::from_wire("Hologram"), None);
    }

    #[test]
    fn test_media_type_mime_round_trip() {
        for mime in [
            "audio/mpeg",
            "audio/ogg",
            "audio/webm",
            "image/jpeg",
            "image/png",
            "image/svg+xml",
            "image/webp",
            "image/gif",
            "video/mpeg",
            "video/ogg",
            "video/webm",
            "video/H265",
            "video/mp4",
            "application/x-custom",
        ] {
            assert_eq!(MediaType::from_mime(mime).mime(), mime);
        }
    }

    #[test]
    fn test_supported_for_families() {
        assert!(MediaType::Mp4.supported_for(AttachmentKind::Video));
        assert!(!MediaType::Mp4.supported_for(AttachmentKind::Audio));
        assert!(MediaType::Mp3.supported_for(AttachmentKind::Audio));
        assert!(MediaType::Png.supported_for(AttachmentKind::Image));
        // Other is never "supported", even with a matching prefix.
        assert!(
            !MediaType::Other("video/x-custom".to_string()).supported_for(AttachmentKind::Video)
        );
    }
}

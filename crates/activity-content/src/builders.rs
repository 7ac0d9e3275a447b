//! Entry points for building content records.
//!
//! Thin constructors over the builders in [`crate::model::builder`], grouped
//! so call sites read as `builders::note(..)`, `builders::attachment::video()`,
//! `builders::tag::mention(..)`.

use crate::model::{
    HashBuilder, LocationBuilder, MediaLinkBuilder, MediaType, NoteBuilder,
};

/// Starts a note with the given plain-text content.
pub fn note(content: impl Into<String>) -> NoteBuilder {
    NoteBuilder::new(content)
}

/// Starts a hash over a pre-computed hex digest (keccak256 by default).
pub fn hash(digest: impl Into<String>) -> HashBuilder {
    HashBuilder::new(digest)
}

/// Starts a location at the given coordinate.
pub fn location(latitude: f64, longitude: f64) -> LocationBuilder {
    LocationBuilder::new(latitude, longitude)
}

/// Starts a media link with the given MIME type and URL.
pub fn media_link(media_type: MediaType, href: impl Into<String>) -> MediaLinkBuilder {
    MediaLinkBuilder::new(media_type, href)
}

/// Constructors for the attachment variants.
pub mod attachment {
    use crate::model::{LinkAttachmentBuilder, MediaAttachmentBuilder};

    /// Starts a video attachment.
    pub fn video() -> MediaAttachmentBuilder {
        MediaAttachmentBuilder::video()
    }

    /// Starts an image attachment.
    pub fn image() -> MediaAttachmentBuilder {
        MediaAttachmentBuilder::image()
    }

    /// Starts an audio attachment.
    pub fn audio() -> MediaAttachmentBuilder {
        MediaAttachmentBuilder::audio()
    }

    /// Starts a link attachment with the given URL.
    pub fn link(href: impl Into<String>) -> LinkAttachmentBuilder {
        LinkAttachmentBuilder::new(href)
    }
}

/// Constructors for the tag variants.
pub mod tag {
    use crate::model::{HashtagBuilder, MentionBuilder};

    /// Starts a mention of the given DSNP user URI.
    pub fn mention(id: impl Into<String>) -> MentionBuilder {
        MentionBuilder::new(id)
    }

    /// Starts a hashtag.
    pub fn hashtag(name: impl Into<String>) -> HashtagBuilder {
        HashtagBuilder::new(name)
    }
}

//! The content record data model.
//!
//! Records are plain immutable structs built through the fluent builders in
//! [`builder`]. Closed wire variants (attachment kinds, tag kinds, location
//! units) are Rust enums; every record carries an [`AdditionalFields`] map
//! for round-tripping extension members.

pub mod attachment;
pub mod builder;
pub mod fields;
pub mod hash;
pub mod location;
pub mod note;
pub mod tag;

pub use attachment::{
    Attachment, AttachmentKind, LinkAttachment, MediaAttachment, MediaLink, MediaType,
};
pub use builder::{
    HashBuilder, HashtagBuilder, LinkAttachmentBuilder, LocationBuilder, MediaAttachmentBuilder,
    MediaLinkBuilder, MentionBuilder, NoteBuilder,
};
pub use fields::AdditionalFields;
pub use hash::{Hash, HashAlgorithm};
pub use location::{Location, LocationUnit};
pub use note::Note;
pub use tag::{Hashtag, Mention, Tag};

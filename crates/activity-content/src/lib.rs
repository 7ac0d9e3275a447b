//! Activity Content: typed social content records over Activity Streams.
//!
//! Records are built with fluent builders, validated explicitly (never
//! implicitly), and serialized to canonical JSON. Parsing is available in a
//! strict mode that rejects undeclared members and a lenient mode that
//! captures them for byte-faithful round-tripping.
//!
//! # Quick start
//!
//! ```rust
//! use activity_content::{builders, parse_note_lenient, WriteOptions};
//!
//! let note = builders::note("Hello from the protocol")
//!     .name("greeting")
//!     .hashtag("#hello")
//!     .build();
//! note.validate()?;
//!
//! let json = note.to_json(&WriteOptions::default())?;
//! let parsed = parse_note_lenient(&json)?;
//! assert_eq!(parsed, note);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builders;
pub mod codec;
pub mod error;
pub mod model;
pub mod util;
pub mod validate;

pub use codec::{note_to_json, parse_note, parse_note_lenient, WriteOptions};
pub use error::{FieldError, ParseError, ReservedFieldError, Rule, ValidationError, WriteError};
pub use model::{
    AdditionalFields, Attachment, AttachmentKind, Hash, HashAlgorithm, Hashtag, LinkAttachment,
    Location, LocationUnit, MediaAttachment, MediaLink, MediaType, Mention, Note, Tag,
};
pub use util::datetime::Timestamp;
pub use validate::validate_note;

/// The JSON-LD context emitted on every record.
pub const ACTIVITY_STREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

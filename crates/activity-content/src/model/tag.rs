//! Tags: mentions of users and hashtags.

use crate::model::AdditionalFields;

/// Declared wire members of a mention object.
pub(crate) const MENTION_FIELDS: &[&str] = &["type", "id", "name"];

/// Declared wire members of a hashtag object.
pub(crate) const HASHTAG_FIELDS: &[&str] = &["type", "name"];

/// Wire discriminants for tags.
pub(crate) const TYPE_MENTION: &str = "Mention";
pub(crate) const TYPE_HASHTAG: &str = "Hashtag";

/// A mention of another user by DSNP user URI.
#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    /// DSNP user URI of the mentioned user (`dsnp://<id>`).
    pub id: String,
    pub name: Option<String>,
    pub additional_fields: AdditionalFields,
}

/// A hashtag associated with a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Hashtag {
    pub name: String,
    pub additional_fields: AdditionalFields,
}

/// A tag on a record: either a mention or a hashtag.
///
/// A closed set; the wire discriminant is the `type` member.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Mention(Mention),
    Hashtag(Hashtag),
}

impl Tag {
    /// Returns the wire discriminant for this tag.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Tag::Mention(_) => TYPE_MENTION,
            Tag::Hashtag(_) => TYPE_HASHTAG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let mention = Tag::Mention(Mention {
            id: "dsnp://1".to_string(),
            name: None,
            additional_fields: AdditionalFields::new(),
        });
        let hashtag = Tag::Hashtag(Hashtag {
            name: "#content".to_string(),
            additional_fields: AdditionalFields::new(),
        });
        assert_eq!(mention.wire_name(), "Mention");
        assert_eq!(hashtag.wire_name(), "Hashtag");
    }
}

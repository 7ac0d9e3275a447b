//! Error types for Activity Content building, validation, and JSON codec.

use thiserror::Error;

/// Identifiers for the validator's rules.
///
/// Rules run in a fixed order; the first violated rule aborts validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Note content must be non-empty.
    EmptyContent,
    /// Latitude must lie in [-90, +90].
    LatitudeRange,
    /// Longitude must lie in [-180, +180].
    LongitudeRange,
    /// Accuracy must be >= 0 when present.
    NegativeAccuracy,
    /// Altitude must be >= 0 when present.
    NegativeAltitude,
    /// Radius must be >= 0 when present.
    NegativeRadius,
    /// A media attachment must carry at least one media link.
    EmptyUrlList,
    /// An href must use a supported URL scheme (http/https).
    InvalidHref,
    /// A media link must carry at least one hash.
    EmptyHashList,
    /// A digest must match the length and character set its algorithm prescribes.
    InvalidDigest,
    /// A media link needs at least one hash with a supported algorithm.
    NoSupportedHash,
    /// A free-form MIME type must match the attachment family's prefix.
    UnsupportedMediaType,
    /// A media attachment needs at least one link with a supported MIME type.
    NoSupportedMediaType,
    /// A duration must be an ISO-8601 duration string.
    InvalidDuration,
    /// A mention id must be a DSNP user URI.
    InvalidMentionId,
    /// A hashtag name must be non-empty.
    EmptyHashtag,
}

impl Rule {
    /// Returns the stable identifier string for this rule.
    pub fn id(&self) -> &'static str {
        match self {
            Rule::EmptyContent => "empty-content",
            Rule::LatitudeRange => "latitude-range",
            Rule::LongitudeRange => "longitude-range",
            Rule::NegativeAccuracy => "negative-accuracy",
            Rule::NegativeAltitude => "negative-altitude",
            Rule::NegativeRadius => "negative-radius",
            Rule::EmptyUrlList => "empty-url-list",
            Rule::InvalidHref => "invalid-href",
            Rule::EmptyHashList => "empty-hash-list",
            Rule::InvalidDigest => "invalid-digest",
            Rule::NoSupportedHash => "no-supported-hash",
            Rule::UnsupportedMediaType => "unsupported-media-type",
            Rule::NoSupportedMediaType => "no-supported-media-type",
            Rule::InvalidDuration => "invalid-duration",
            Rule::InvalidMentionId => "invalid-mention-id",
            Rule::EmptyHashtag => "empty-hashtag",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Error produced by the first violated validation rule.
///
/// Carries the path of the offending field within the nested record
/// (e.g. `attachment[0].url[1].hash[0].value`), the violated rule, and the
/// offending value rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule {rule} violated at {path}: {value}")]
pub struct ValidationError {
    /// Path locating the offending value, in serialized member names.
    pub path: String,
    /// The violated rule.
    pub rule: Rule,
    /// The offending value, rendered as text.
    pub value: String,
}

impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, rule: Rule, value: impl ToString) -> Self {
        Self {
            path: path.into(),
            rule,
            value: value.to_string(),
        }
    }
}

/// Error during JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not syntactically valid JSON.
    #[error("malformed JSON: {detail}")]
    Malformed { detail: String },

    /// Strict mode encountered a field outside the declared schema.
    #[error("unknown field `{field}` at {path}")]
    UnknownField { path: String, field: String },

    /// A discriminant held a value outside the closed variant set.
    #[error("unknown variant `{value}` at {path}")]
    UnknownVariant { path: String, value: String },

    /// A declared field held a JSON value of the wrong shape.
    #[error("invalid value at {path}: expected {expected}")]
    InvalidField { path: String, expected: &'static str },
}

/// Error during JSON rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("JSON rendering failed: {detail}")]
    Render { detail: String },
}

/// Error raised when an additional field would shadow a schema field.
///
/// This is the one construction-time failure; builders otherwise never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("additional field `{field}` collides with a schema field")]
pub struct ReservedFieldError {
    /// The rejected key.
    pub field: String,
}

/// Error from the typed additional-field accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no additional field named `{field}`")]
    Missing { field: String },

    #[error("additional field `{field}` is not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_stable() {
        assert_eq!(Rule::LatitudeRange.id(), "latitude-range");
        assert_eq!(Rule::EmptyHashList.id(), "empty-hash-list");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("location.latitude", Rule::LatitudeRange, 95.0);
        assert_eq!(
            err.to_string(),
            "rule latitude-range violated at location.latitude: 95"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::UnknownVariant {
            path: "attachment[0].type".to_string(),
            value: "Hologram".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown variant `Hologram` at attachment[0].type"
        );
    }
}

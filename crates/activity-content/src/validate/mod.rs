//! Semantic validation of content records.
//!
//! Validation is explicit and fail-fast: rules run in a fixed order over the
//! record and its nested entities, and the first violation aborts with a
//! single [`ValidationError`] locating the offending field. Neither the
//! builders nor the codec ever run these rules implicitly.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Rule, ValidationError};
use crate::model::attachment::{Attachment, LinkAttachment, MediaAttachment, MediaType};
use crate::model::location::Location;
use crate::model::note::Note;
use crate::model::tag::Tag;

lazy_static! {
    static ref RE_HREF: Regex = Regex::new(r"^https?://.+").unwrap();
    static ref RE_MENTION_ID: Regex = Regex::new(r"^dsnp://[1-9][0-9]{0,19}$").unwrap();
    static ref RE_DURATION: Regex = Regex::new(
        r"^-?P(([0-9]+Y)?([0-9]+M)?([0-9]+D)?(T([0-9]+H)?([0-9]+M)?([0-9]+(\.[0-9]+)?S)?)?)+$"
    )
    .unwrap();
    static ref RE_DIGEST: Regex = Regex::new(r"^(0x)?[0-9A-Fa-f]{64}$").unwrap();
}

/// Validates a note and every nested entity, failing with the first
/// violated rule.
pub fn validate_note(note: &Note) -> Result<(), ValidationError> {
    if note.content.is_empty() {
        return Err(ValidationError::new("content", Rule::EmptyContent, ""));
    }
    if let Some(location) = &note.location {
        validate_location(location)?;
    }
    for (index, attachment) in note.attachments.iter().enumerate() {
        validate_attachment(attachment, &format!("attachment[{index}]"))?;
    }
    for (index, tag) in note.tags.iter().enumerate() {
        validate_tag(tag, &format!("tag[{index}]"))?;
    }
    Ok(())
}

fn validate_location(location: &Location) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(ValidationError::new(
            "location.latitude",
            Rule::LatitudeRange,
            location.latitude,
        ));
    }
    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(ValidationError::new(
            "location.longitude",
            Rule::LongitudeRange,
            location.longitude,
        ));
    }
    if let Some(accuracy) = location.accuracy {
        if accuracy < 0.0 {
            return Err(ValidationError::new(
                "location.accuracy",
                Rule::NegativeAccuracy,
                accuracy,
            ));
        }
    }
    if let Some(altitude) = location.altitude {
        if altitude < 0.0 {
            return Err(ValidationError::new(
                "location.altitude",
                Rule::NegativeAltitude,
                altitude,
            ));
        }
    }
    if let Some(radius) = location.radius {
        if radius < 0.0 {
            return Err(ValidationError::new(
                "location.radius",
                Rule::NegativeRadius,
                radius,
            ));
        }
    }
    Ok(())
}

fn validate_attachment(attachment: &Attachment, path: &str) -> Result<(), ValidationError> {
    match attachment {
        Attachment::Video(media) | Attachment::Image(media) | Attachment::Audio(media) => {
            validate_media_attachment(attachment, media, path)
        }
        Attachment::Link(link) => validate_link_attachment(link, path),
    }
}

fn validate_media_attachment(
    attachment: &Attachment,
    media: &MediaAttachment,
    path: &str,
) -> Result<(), ValidationError> {
    let kind = attachment.kind();
    if media.url.is_empty() {
        return Err(ValidationError::new(
            format!("{path}.url"),
            Rule::EmptyUrlList,
            "[]",
        ));
    }

    for (index, link) in media.url.iter().enumerate() {
        let link_path = format!("{path}.url[{index}]");
        if !RE_HREF.is_match(&link.href) {
            return Err(ValidationError::new(
                format!("{link_path}.href"),
                Rule::InvalidHref,
                &link.href,
            ));
        }
        if link.hash.is_empty() {
            return Err(ValidationError::new(
                format!("{link_path}.hash"),
                Rule::EmptyHashList,
                "[]",
            ));
        }
        for (hash_index, hash) in link.hash.iter().enumerate() {
            // Digest shape is only prescribed for supported algorithms.
            if hash.algorithm.digest_hex_len().is_some() && !RE_DIGEST.is_match(&hash.digest) {
                return Err(ValidationError::new(
                    format!("{link_path}.hash[{hash_index}].value"),
                    Rule::InvalidDigest,
                    &hash.digest,
                ));
            }
        }
        if !link
            .hash
            .iter()
            .any(|hash| hash.algorithm.digest_hex_len().is_some())
        {
            let algorithms: Vec<&str> = link
                .hash
                .iter()
                .map(|hash| hash.algorithm.wire_name())
                .collect();
            return Err(ValidationError::new(
                format!("{link_path}.hash"),
                Rule::NoSupportedHash,
                algorithms.join(", "),
            ));
        }
        if let MediaType::Other(mime) = &link.media_type {
            if let Some(prefix) = kind.mime_prefix() {
                if !mime.starts_with(prefix) {
                    return Err(ValidationError::new(
                        format!("{link_path}.mediaType"),
                        Rule::UnsupportedMediaType,
                        mime,
                    ));
                }
            }
        }
        if let Some(duration) = &link.duration {
            if !RE_DURATION.is_match(duration) {
                return Err(ValidationError::new(
                    format!("{link_path}.duration"),
                    Rule::InvalidDuration,
                    duration,
                ));
            }
        }
    }

    if !media
        .url
        .iter()
        .any(|link| link.media_type.supported_for(kind))
    {
        let mimes: Vec<&str> = media.url.iter().map(|link| link.media_type.mime()).collect();
        return Err(ValidationError::new(
            format!("{path}.url"),
            Rule::NoSupportedMediaType,
            mimes.join(", "),
        ));
    }
    Ok(())
}

fn validate_link_attachment(link: &LinkAttachment, path: &str) -> Result<(), ValidationError> {
    if !RE_HREF.is_match(&link.href) {
        return Err(ValidationError::new(
            format!("{path}.href"),
            Rule::InvalidHref,
            &link.href,
        ));
    }
    Ok(())
}

fn validate_tag(tag: &Tag, path: &str) -> Result<(), ValidationError> {
    match tag {
        Tag::Mention(mention) => {
            if !RE_MENTION_ID.is_match(&mention.id) {
                return Err(ValidationError::new(
                    format!("{path}.id"),
                    Rule::InvalidMentionId,
                    &mention.id,
                ));
            }
        }
        Tag::Hashtag(hashtag) => {
            if hashtag.name.is_empty() {
                return Err(ValidationError::new(
                    format!("{path}.name"),
                    Rule::EmptyHashtag,
                    "",
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders;
    use crate::model::{HashAlgorithm, MediaType};

    fn valid_link(media_type: MediaType) -> crate::model::MediaLink {
        builders::media_link(media_type, "https://example.com/file")
            .hash(builders::hash("ab".repeat(32)).build())
            .build()
    }

    #[test]
    fn test_empty_content() {
        let note = builders::note("").build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::EmptyContent);
        assert_eq!(err.path, "content");
    }

    #[test]
    fn test_latitude_out_of_range() {
        let note = builders::note("x")
            .location(builders::location(95.0, 0.0).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::LatitudeRange);
        assert_eq!(err.path, "location.latitude");
        assert_eq!(err.value, "95");
    }

    #[test]
    fn test_negative_radius() {
        let note = builders::note("x")
            .location(builders::location(0.0, 0.0).radius(-1.0).build())
            .build();
        assert_eq!(note.validate().unwrap_err().rule, Rule::NegativeRadius);
    }

    #[test]
    fn test_media_attachment_needs_urls() {
        let note = builders::note("x")
            .attachment(builders::attachment::video().build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::EmptyUrlList);
        assert_eq!(err.path, "attachment[0].url");
    }

    #[test]
    fn test_bad_href_scheme() {
        let link = builders::media_link(MediaType::Mp4, "ftp://example.com/v.mp4")
            .hash(builders::hash("ab".repeat(32)).build())
            .build();
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::InvalidHref);
        assert_eq!(err.path, "attachment[0].url[0].href");
    }

    #[test]
    fn test_media_link_needs_hashes() {
        let link = builders::media_link(MediaType::Mp4, "https://example.com/v.mp4").build();
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        assert_eq!(note.validate().unwrap_err().rule, Rule::EmptyHashList);
    }

    #[test]
    fn test_digest_shape() {
        let link = builders::media_link(MediaType::Mp4, "https://example.com/v.mp4")
            .hash(builders::hash("zz".repeat(32)).build())
            .build();
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::InvalidDigest);
        assert_eq!(err.path, "attachment[0].url[0].hash[0].value");
    }

    #[test]
    fn test_prefixed_digest_accepted() {
        let link = builders::media_link(MediaType::Mp4, "https://example.com/v.mp4")
            .hash(builders::hash(format!("0x{}", "ab".repeat(32))).build())
            .build();
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        assert!(note.validate().is_ok());
    }

    #[test]
    fn test_unknown_algorithm_skips_digest_check() {
        // An unsupported algorithm's digest has no prescribed shape, but a
        // link hashed only with unsupported algorithms is rejected.
        let link = builders::media_link(MediaType::Mp4, "https://example.com/v.mp4")
            .hash(
                builders::hash("whatever")
                    .algorithm(HashAlgorithm::Other("blake3".to_string()))
                    .build(),
            )
            .build();
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::NoSupportedHash);
        assert_eq!(err.value, "blake3");
    }

    #[test]
    fn test_other_mime_prefix_mismatch() {
        let link = valid_link(MediaType::Other("audio/flac".to_string()));
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::UnsupportedMediaType);
        assert_eq!(err.path, "attachment[0].url[0].mediaType");
    }

    #[test]
    fn test_no_supported_media_type() {
        // Matching prefix, so the per-link check passes, but the family has
        // no supported format at all.
        let link = valid_link(MediaType::Other("video/x-custom".to_string()));
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(link).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::NoSupportedMediaType);
        assert_eq!(err.path, "attachment[0].url");
    }

    #[test]
    fn test_one_supported_format_is_enough() {
        let note = builders::note("x")
            .attachment(
                builders::attachment::video()
                    .url(valid_link(MediaType::Other("video/x-custom".to_string())))
                    .url(valid_link(MediaType::Mp4))
                    .build(),
            )
            .build();
        assert!(note.validate().is_ok());
    }

    #[test]
    fn test_duration_pattern() {
        let good = valid_link(MediaType::Mp4);
        for duration in ["PT30S", "PT1H2M3.5S", "P1DT12H", "-PT5M"] {
            let link = {
                let mut link = good.clone();
                link.duration = Some(duration.to_string());
                link
            };
            let note = builders::note("x")
                .attachment(builders::attachment::video().url(link).build())
                .build();
            assert!(note.validate().is_ok(), "{duration} should validate");
        }

        let mut bad = good.clone();
        bad.duration = Some("30 seconds".to_string());
        let note = builders::note("x")
            .attachment(builders::attachment::video().url(bad).build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::InvalidDuration);
        assert_eq!(err.path, "attachment[0].url[0].duration");
    }

    #[test]
    fn test_link_attachment_href() {
        let note = builders::note("x")
            .attachment(builders::attachment::link("not a url").build())
            .build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::InvalidHref);
        assert_eq!(err.path, "attachment[0].href");
    }

    #[test]
    fn test_mention_id_pattern() {
        for id in ["dsnp://1", "dsnp://9999999999999999999"] {
            let note = builders::note("x").mention(id).build();
            assert!(note.validate().is_ok(), "{id} should validate");
        }
        for id in ["dsnp://0", "dsnp://", "user:1", "dsnp://012"] {
            let note = builders::note("x").mention(id).build();
            let err = note.validate().unwrap_err();
            assert_eq!(err.rule, Rule::InvalidMentionId, "{id}");
            assert_eq!(err.path, "tag[0].id");
        }
    }

    #[test]
    fn test_empty_hashtag() {
        let note = builders::note("x").hashtag("").build();
        let err = note.validate().unwrap_err();
        assert_eq!(err.rule, Rule::EmptyHashtag);
        assert_eq!(err.path, "tag[0].name");
    }

    #[test]
    fn test_first_failure_wins() {
        // Both the content and a tag are invalid; content is checked first.
        let note = builders::note("").hashtag("").build();
        assert_eq!(note.validate().unwrap_err().rule, Rule::EmptyContent);
    }
}

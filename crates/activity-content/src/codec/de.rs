//! JSON parsing of content records.
//!
//! Decoding is discriminant-driven over `serde_json::Value` trees. Strict
//! mode rejects any member outside the declared schema; lenient mode
//! captures such members verbatim into the owning entity's
//! `additional_fields`, preserving their order, so a reserialization
//! reproduces them. Neither mode runs semantic validation.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::attachment::{
    Attachment, AttachmentKind, LinkAttachment, MediaAttachment, MediaLink, MediaType,
    TYPE_LINK_MARKER,
};
use crate::model::hash::{Hash, HashAlgorithm};
use crate::model::location::{Location, LocationUnit, TYPE_PLACE};
use crate::model::note::{Note, MEDIA_TYPE_TEXT_PLAIN, TYPE_NOTE};
use crate::model::tag::{Hashtag, Mention, Tag, TYPE_HASHTAG, TYPE_MENTION};
use crate::model::AdditionalFields;
use crate::util::datetime::Timestamp;
use crate::ACTIVITY_STREAMS_CONTEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    Lenient,
}

/// Parses a note, rejecting any member outside the declared schema.
pub fn parse_note(json: &str) -> Result<Note, ParseError> {
    parse(json, Mode::Strict)
}

/// Parses a note, capturing undeclared members as additional fields.
pub fn parse_note_lenient(json: &str) -> Result<Note, ParseError> {
    parse(json, Mode::Lenient)
}

fn parse(json: &str, mode: Mode) -> Result<Note, ParseError> {
    let value: Value = serde_json::from_str(json).map_err(|err| ParseError::Malformed {
        detail: err.to_string(),
    })?;
    let Value::Object(map) = value else {
        return Err(ParseError::Malformed {
            detail: "top-level value is not an object".to_string(),
        });
    };
    decode_note(&map, mode)
}

fn decode_note(map: &Map<String, Value>, mode: Mode) -> Result<Note, ParseError> {
    let mut note = Note::default();
    let mut saw_type = false;

    for (key, value) in map {
        match key.as_str() {
            "@context" => {
                let context = expect_str(value, "@context")?;
                if context != ACTIVITY_STREAMS_CONTEXT {
                    return Err(unknown_variant("@context", context));
                }
            }
            "type" => {
                expect_discriminant(value, "type", TYPE_NOTE)?;
                saw_type = true;
            }
            "content" => note.content = expect_str(value, "content")?.to_string(),
            "mediaType" => {
                let media_type = expect_str(value, "mediaType")?;
                if media_type != MEDIA_TYPE_TEXT_PLAIN {
                    return Err(unknown_variant("mediaType", media_type));
                }
            }
            "name" => note.name = Some(expect_str(value, "name")?.to_string()),
            "published" => {
                let text = expect_str(value, "published")?;
                let timestamp =
                    Timestamp::parse_iso8601(text).map_err(|_| ParseError::InvalidField {
                        path: "published".to_string(),
                        expected: "an ISO-8601 datetime",
                    })?;
                note.published = Some(timestamp);
            }
            "location" => {
                let object = expect_object(value, "location")?;
                note.location = Some(decode_location(object, mode)?);
            }
            "attachment" => {
                let items = expect_array(value, "attachment")?;
                for (index, item) in items.iter().enumerate() {
                    let path = format!("attachment[{index}]");
                    let object = expect_object(item, &path)?;
                    note.attachments.push(decode_attachment(object, &path, mode)?);
                }
            }
            "tag" => {
                let items = expect_array(value, "tag")?;
                for (index, item) in items.iter().enumerate() {
                    let path = format!("tag[{index}]");
                    let object = expect_object(item, &path)?;
                    note.tags.push(decode_tag(object, &path, mode)?);
                }
            }
            other => capture_unknown(&mut note.additional_fields, "", other, value, mode)?,
        }
    }

    if !saw_type {
        return Err(ParseError::InvalidField {
            path: "type".to_string(),
            expected: "the discriminant \"Note\"",
        });
    }
    Ok(note)
}

fn decode_attachment(
    map: &Map<String, Value>,
    path: &str,
    mode: Mode,
) -> Result<Attachment, ParseError> {
    let kind = decode_kind(map, path)?;
    match kind {
        AttachmentKind::Link => Ok(Attachment::Link(decode_link_attachment(map, path, mode)?)),
        AttachmentKind::Video | AttachmentKind::Image | AttachmentKind::Audio => {
            let media = decode_media_attachment(map, path, mode)?;
            Ok(match kind {
                AttachmentKind::Video => Attachment::Video(media),
                AttachmentKind::Image => Attachment::Image(media),
                AttachmentKind::Audio => Attachment::Audio(media),
                AttachmentKind::Link => unreachable!(),
            })
        }
    }
}

fn decode_kind(map: &Map<String, Value>, path: &str) -> Result<AttachmentKind, ParseError> {
    let type_path = join(path, "type");
    let Some(value) = map.get("type") else {
        return Err(ParseError::InvalidField {
            path: type_path,
            expected: "a string discriminant",
        });
    };
    let name = expect_str(value, &type_path)?;
    AttachmentKind::from_wire(name).ok_or_else(|| unknown_variant(&type_path, name))
}

fn decode_media_attachment(
    map: &Map<String, Value>,
    path: &str,
    mode: Mode,
) -> Result<MediaAttachment, ParseError> {
    let mut media = MediaAttachment {
        name: None,
        url: Vec::new(),
        additional_fields: AdditionalFields::new(),
    };
    for (key, value) in map {
        match key.as_str() {
            "type" => {}
            "name" => media.name = Some(expect_str(value, &join(path, "name"))?.to_string()),
            "url" => {
                let items = expect_array(value, &join(path, "url"))?;
                for (index, item) in items.iter().enumerate() {
                    let link_path = format!("{path}.url[{index}]");
                    let object = expect_object(item, &link_path)?;
                    media.url.push(decode_media_link(object, &link_path, mode)?);
                }
            }
            other => capture_unknown(&mut media.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(media)
}

fn decode_link_attachment(
    map: &Map<String, Value>,
    path: &str,
    mode: Mode,
) -> Result<LinkAttachment, ParseError> {
    let mut link = LinkAttachment {
        name: None,
        href: String::new(),
        additional_fields: AdditionalFields::new(),
    };
    for (key, value) in map {
        match key.as_str() {
            "type" => {}
            "name" => link.name = Some(expect_str(value, &join(path, "name"))?.to_string()),
            "href" => link.href = expect_str(value, &join(path, "href"))?.to_string(),
            other => capture_unknown(&mut link.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(link)
}

fn decode_media_link(
    map: &Map<String, Value>,
    path: &str,
    mode: Mode,
) -> Result<MediaLink, ParseError> {
    let mut link = MediaLink {
        media_type: MediaType::Other(String::new()),
        hash: Vec::new(),
        href: String::new(),
        width: None,
        height: None,
        duration: None,
        additional_fields: AdditionalFields::new(),
    };
    for (key, value) in map {
        match key.as_str() {
            "type" => {
                expect_discriminant(value, &join(path, "type"), TYPE_LINK_MARKER)?;
            }
            "mediaType" => {
                link.media_type =
                    MediaType::from_mime(expect_str(value, &join(path, "mediaType"))?);
            }
            "hash" => {
                let items = expect_array(value, &join(path, "hash"))?;
                for (index, item) in items.iter().enumerate() {
                    let hash_path = format!("{path}.hash[{index}]");
                    let object = expect_object(item, &hash_path)?;
                    link.hash.push(decode_hash(object, &hash_path, mode)?);
                }
            }
            "href" => link.href = expect_str(value, &join(path, "href"))?.to_string(),
            "width" => link.width = Some(expect_u32(value, &join(path, "width"))?),
            "height" => link.height = Some(expect_u32(value, &join(path, "height"))?),
            "duration" => {
                link.duration = Some(expect_str(value, &join(path, "duration"))?.to_string());
            }
            other => capture_unknown(&mut link.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(link)
}

fn decode_hash(map: &Map<String, Value>, path: &str, mode: Mode) -> Result<Hash, ParseError> {
    let mut hash = Hash::new(HashAlgorithm::Other(String::new()), "");
    for (key, value) in map {
        match key.as_str() {
            "algorithm" => {
                hash.algorithm =
                    HashAlgorithm::from_wire(expect_str(value, &join(path, "algorithm"))?);
            }
            "value" => hash.digest = expect_str(value, &join(path, "value"))?.to_string(),
            other => capture_unknown(&mut hash.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(hash)
}

fn decode_location(map: &Map<String, Value>, mode: Mode) -> Result<Location, ParseError> {
    let mut location = Location {
        name: None,
        latitude: f64::NAN,
        longitude: f64::NAN,
        accuracy: None,
        altitude: None,
        radius: None,
        unit: LocationUnit::Meter,
        additional_fields: AdditionalFields::new(),
    };
    let mut saw_latitude = false;
    let mut saw_longitude = false;
    for (key, value) in map {
        match key.as_str() {
            "type" => {
                expect_discriminant(value, "location.type", TYPE_PLACE)?;
            }
            "name" => location.name = Some(expect_str(value, "location.name")?.to_string()),
            "accuracy" => location.accuracy = Some(expect_f64(value, "location.accuracy")?),
            "altitude" => location.altitude = Some(expect_f64(value, "location.altitude")?),
            "latitude" => {
                location.latitude = expect_f64(value, "location.latitude")?;
                saw_latitude = true;
            }
            "longitude" => {
                location.longitude = expect_f64(value, "location.longitude")?;
                saw_longitude = true;
            }
            "radius" => location.radius = Some(expect_f64(value, "location.radius")?),
            "units" => {
                let name = expect_str(value, "location.units")?;
                location.unit = LocationUnit::from_wire(name)
                    .ok_or_else(|| unknown_variant("location.units", name))?;
            }
            other => {
                capture_unknown(&mut location.additional_fields, "location", other, value, mode)?;
            }
        }
    }
    if !saw_latitude {
        return Err(ParseError::InvalidField {
            path: "location.latitude".to_string(),
            expected: "a number",
        });
    }
    if !saw_longitude {
        return Err(ParseError::InvalidField {
            path: "location.longitude".to_string(),
            expected: "a number",
        });
    }
    Ok(location)
}

fn decode_tag(map: &Map<String, Value>, path: &str, mode: Mode) -> Result<Tag, ParseError> {
    let type_path = join(path, "type");
    let Some(value) = map.get("type") else {
        return Err(ParseError::InvalidField {
            path: type_path,
            expected: "a string discriminant",
        });
    };
    let name = expect_str(value, &type_path)?;
    match name {
        TYPE_MENTION => Ok(Tag::Mention(decode_mention(map, path, mode)?)),
        TYPE_HASHTAG => Ok(Tag::Hashtag(decode_hashtag(map, path, mode)?)),
        other => Err(unknown_variant(&type_path, other)),
    }
}

fn decode_mention(map: &Map<String, Value>, path: &str, mode: Mode) -> Result<Mention, ParseError> {
    let mut mention = Mention {
        id: String::new(),
        name: None,
        additional_fields: AdditionalFields::new(),
    };
    for (key, value) in map {
        match key.as_str() {
            "type" => {}
            "id" => mention.id = expect_str(value, &join(path, "id"))?.to_string(),
            "name" => mention.name = Some(expect_str(value, &join(path, "name"))?.to_string()),
            other => capture_unknown(&mut mention.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(mention)
}

fn decode_hashtag(map: &Map<String, Value>, path: &str, mode: Mode) -> Result<Hashtag, ParseError> {
    let mut hashtag = Hashtag {
        name: String::new(),
        additional_fields: AdditionalFields::new(),
    };
    for (key, value) in map {
        match key.as_str() {
            "type" => {}
            "name" => hashtag.name = expect_str(value, &join(path, "name"))?.to_string(),
            other => capture_unknown(&mut hashtag.additional_fields, path, other, value, mode)?,
        }
    }
    Ok(hashtag)
}

/// Routes a member outside the declared schema: an error in strict mode, a
/// verbatim capture in lenient mode.
fn capture_unknown(
    fields: &mut AdditionalFields,
    entity_path: &str,
    key: &str,
    value: &Value,
    mode: Mode,
) -> Result<(), ParseError> {
    match mode {
        Mode::Strict => Err(ParseError::UnknownField {
            path: join(entity_path, key),
            field: key.to_string(),
        }),
        Mode::Lenient => {
            fields.insert_unchecked(key.to_string(), value.clone());
            Ok(())
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn unknown_variant(path: &str, value: &str) -> ParseError {
    ParseError::UnknownVariant {
        path: path.to_string(),
        value: value.to_string(),
    }
}

fn expect_discriminant(value: &Value, path: &str, expected: &str) -> Result<(), ParseError> {
    let name = expect_str(value, path)?;
    if name == expected {
        Ok(())
    } else {
        Err(unknown_variant(path, name))
    }
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ParseError> {
    value.as_str().ok_or_else(|| ParseError::InvalidField {
        path: path.to_string(),
        expected: "a string",
    })
}

fn expect_f64(value: &Value, path: &str) -> Result<f64, ParseError> {
    value.as_f64().ok_or_else(|| ParseError::InvalidField {
        path: path.to_string(),
        expected: "a number",
    })
}

fn expect_u32(value: &Value, path: &str) -> Result<u32, ParseError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ParseError::InvalidField {
            path: path.to_string(),
            expected: "an unsigned integer",
        })
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ParseError> {
    value.as_object().ok_or_else(|| ParseError::InvalidField {
        path: path.to_string(),
        expected: "an object",
    })
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ParseError> {
    value.as_array().ok_or_else(|| ParseError::InvalidField {
        path: path.to_string(),
        expected: "an array",
    })
}

//! JSON rendering of content records.
//!
//! Each entity is lowered to a `serde_json::Map` with its declared members
//! in schema order, the wire constants materialized, absent optionals
//! omitted, and additional fields appended in insertion order.

use serde_json::{Map, Value};

use crate::codec::WriteOptions;
use crate::error::WriteError;
use crate::model::attachment::{
    Attachment, LinkAttachment, MediaAttachment, MediaLink, TYPE_LINK_MARKER,
};
use crate::model::hash::Hash;
use crate::model::location::{Location, TYPE_PLACE};
use crate::model::note::{Note, MEDIA_TYPE_TEXT_PLAIN, TYPE_NOTE};
use crate::model::tag::{Tag, TYPE_HASHTAG, TYPE_MENTION};
use crate::model::AdditionalFields;
use crate::ACTIVITY_STREAMS_CONTEXT;

/// Renders a note as JSON text.
pub fn note_to_json(note: &Note, options: &WriteOptions) -> Result<String, WriteError> {
    let value = Value::Object(encode_note(note, options)?);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    rendered.map_err(|err| WriteError::Render {
        detail: err.to_string(),
    })
}

fn encode_note(note: &Note, options: &WriteOptions) -> Result<Map<String, Value>, WriteError> {
    let mut out = Map::new();
    out.insert("@context".to_string(), ACTIVITY_STREAMS_CONTEXT.into());
    out.insert("type".to_string(), TYPE_NOTE.into());
    out.insert("content".to_string(), note.content.clone().into());
    out.insert("mediaType".to_string(), MEDIA_TYPE_TEXT_PLAIN.into());
    if let Some(name) = &note.name {
        out.insert("name".to_string(), name.clone().into());
    }
    if let Some(published) = note.published {
        out.insert("published".to_string(), published.to_iso8601().into());
    }
    if let Some(location) = &note.location {
        out.insert(
            "location".to_string(),
            Value::Object(encode_location(location, options)?),
        );
    }
    if !note.attachments.is_empty() {
        let attachments = note
            .attachments
            .iter()
            .map(|attachment| encode_attachment(attachment, options).map(Value::Object))
            .collect::<Result<Vec<_>, _>>()?;
        out.insert("attachment".to_string(), Value::Array(attachments));
    }
    if !note.tags.is_empty() {
        let tags = note
            .tags
            .iter()
            .map(|tag| Value::Object(encode_tag(tag, options)))
            .collect();
        out.insert("tag".to_string(), Value::Array(tags));
    }
    append_additional(&mut out, &note.additional_fields, options);
    Ok(out)
}

fn encode_attachment(
    attachment: &Attachment,
    options: &WriteOptions,
) -> Result<Map<String, Value>, WriteError> {
    match attachment {
        Attachment::Video(media) | Attachment::Image(media) | Attachment::Audio(media) => {
            encode_media_attachment(attachment.kind().wire_name(), media, options)
        }
        Attachment::Link(link) => Ok(encode_link_attachment(link, options)),
    }
}

fn encode_media_attachment(
    wire_name: &str,
    media: &MediaAttachment,
    options: &WriteOptions,
) -> Result<Map<String, Value>, WriteError> {
    let mut out = Map::new();
    out.insert("type".to_string(), wire_name.into());
    if let Some(name) = &media.name {
        out.insert("name".to_string(), name.clone().into());
    }
    let urls = media
        .url
        .iter()
        .map(|link| encode_media_link(link, options).map(Value::Object))
        .collect::<Result<Vec<_>, _>>()?;
    out.insert("url".to_string(), Value::Array(urls));
    append_additional(&mut out, &media.additional_fields, options);
    Ok(out)
}

fn encode_link_attachment(link: &LinkAttachment, options: &WriteOptions) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".to_string(), TYPE_LINK_MARKER.into());
    if let Some(name) = &link.name {
        out.insert("name".to_string(), name.clone().into());
    }
    out.insert("href".to_string(), link.href.clone().into());
    append_additional(&mut out, &link.additional_fields, options);
    out
}

fn encode_media_link(
    link: &MediaLink,
    options: &WriteOptions,
) -> Result<Map<String, Value>, WriteError> {
    let mut out = Map::new();
    out.insert("type".to_string(), TYPE_LINK_MARKER.into());
    out.insert("mediaType".to_string(), link.media_type.mime().into());
    let hashes = link
        .hash
        .iter()
        .map(|hash| Value::Object(encode_hash(hash, options)))
        .collect();
    out.insert("hash".to_string(), Value::Array(hashes));
    out.insert("href".to_string(), link.href.clone().into());
    if let Some(width) = link.width {
        out.insert("width".to_string(), width.into());
    }
    if let Some(height) = link.height {
        out.insert("height".to_string(), height.into());
    }
    if let Some(duration) = &link.duration {
        out.insert("duration".to_string(), duration.clone().into());
    }
    append_additional(&mut out, &link.additional_fields, options);
    Ok(out)
}

fn encode_hash(hash: &Hash, options: &WriteOptions) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("algorithm".to_string(), hash.algorithm.wire_name().into());
    out.insert("value".to_string(), hash.digest.clone().into());
    append_additional(&mut out, &hash.additional_fields, options);
    out
}

fn encode_location(
    location: &Location,
    options: &WriteOptions,
) -> Result<Map<String, Value>, WriteError> {
    let mut out = Map::new();
    out.insert("type".to_string(), TYPE_PLACE.into());
    if let Some(name) = &location.name {
        out.insert("name".to_string(), name.clone().into());
    }
    if let Some(accuracy) = location.accuracy {
        out.insert("accuracy".to_string(), finite_number(accuracy)?);
    }
    if let Some(altitude) = location.altitude {
        out.insert("altitude".to_string(), finite_number(altitude)?);
    }
    out.insert("latitude".to_string(), finite_number(location.latitude)?);
    out.insert("longitude".to_string(), finite_number(location.longitude)?);
    if let Some(radius) = location.radius {
        out.insert("radius".to_string(), finite_number(radius)?);
    }
    out.insert("units".to_string(), location.unit.wire_name().into());
    append_additional(&mut out, &location.additional_fields, options);
    Ok(out)
}

fn encode_tag(tag: &Tag, options: &WriteOptions) -> Map<String, Value> {
    let mut out = Map::new();
    match tag {
        Tag::Mention(mention) => {
            out.insert("type".to_string(), TYPE_MENTION.into());
            out.insert("id".to_string(), mention.id.clone().into());
            if let Some(name) = &mention.name {
                out.insert("name".to_string(), name.clone().into());
            }
            append_additional(&mut out, &mention.additional_fields, options);
        }
        Tag::Hashtag(hashtag) => {
            out.insert("type".to_string(), TYPE_HASHTAG.into());
            out.insert("name".to_string(), hashtag.name.clone().into());
            append_additional(&mut out, &hashtag.additional_fields, options);
        }
    }
    out
}

fn append_additional(out: &mut Map<String, Value>, fields: &AdditionalFields, options: &WriteOptions) {
    if !options.include_additional_fields {
        return;
    }
    for (key, value) in fields {
        out.insert(key.clone(), value.clone());
    }
}

// JSON has no representation for NaN or the infinities.
fn finite_number(value: f64) -> Result<Value, WriteError> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| WriteError::Render {
            detail: format!("non-finite number {value}"),
        })
}

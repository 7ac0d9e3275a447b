//! End-to-end round trips: build, validate, serialize, reparse, compare.

use proptest::prelude::*;

use activity_content::{
    builders, parse_note, parse_note_lenient, Attachment, LocationUnit, MediaLink, MediaType,
    Note, Tag, Timestamp, WriteOptions,
};

fn sample_note() -> Note {
    let hash = builders::hash("ab".repeat(32)).build();
    let link = builders::media_link(MediaType::Mp4, "https://example.com/clip.mp4")
        .hash(hash)
        .width(1280)
        .height(720)
        .build();
    builders::note("Note Content")
        .name("Note Name")
        .attachment(builders::attachment::video().url(link).build())
        .mention_named("dsnp://1", "newUser")
        .hashtag("#content")
        .location(
            builders::location(40.76567, -73.980835)
                .name("Unfinished")
                .radius(20.0)
                .unit(LocationUnit::Meter)
                .build(),
        )
        .build()
}

#[test]
fn full_note_round_trips() {
    let note = sample_note();
    note.validate().unwrap();

    let json = note.to_json(&WriteOptions::default()).unwrap();
    assert_eq!(parse_note_lenient(&json).unwrap(), note);
    // Nothing undeclared in the output, so strict mode agrees.
    assert_eq!(parse_note(&json).unwrap(), note);
}

#[test]
fn variant_discriminants_round_trip() {
    let note = sample_note();
    let json = note.to_json(&WriteOptions::default()).unwrap();
    assert!(json.contains("\"type\":\"Video\""));

    let parsed = parse_note(&json).unwrap();
    match &parsed.attachments[0] {
        Attachment::Video(media) => {
            assert_eq!(media.url[0].media_type, MediaType::Mp4);
            assert_eq!(media.url[0].width, Some(1280));
            assert_eq!(media.url[0].height, Some(720));
        }
        other => panic!("expected video attachment, got {other:?}"),
    }
    match &parsed.tags[..] {
        [Tag::Mention(mention), Tag::Hashtag(hashtag)] => {
            assert_eq!(mention.id, "dsnp://1");
            assert_eq!(hashtag.name, "#content");
        }
        other => panic!("unexpected tags {other:?}"),
    }
}

#[test]
fn extension_fields_survive_reserialization() {
    let note = builders::note("hello")
        .additional_field("backgroundColor", "teal")
        .unwrap()
        .additional_field("revision", 7)
        .unwrap()
        .build();
    let json = note.to_json(&WriteOptions::default()).unwrap();

    // Strict parsing refuses the extensions; lenient carries them through a
    // second serialization in their original order.
    parse_note(&json).unwrap_err();
    let reparsed = parse_note_lenient(&json).unwrap();
    assert_eq!(reparsed.to_json(&WriteOptions::default()).unwrap(), json);
}

#[test]
fn published_round_trips_as_utc() {
    let note = builders::note("t")
        .published(Timestamp::from_epoch_millis(1_705_314_600_000))
        .build();
    let json = note.to_json(&WriteOptions::default()).unwrap();
    assert!(json.contains("\"published\":\"2024-01-15T10:30:00Z\""));
    assert_eq!(parse_note(&json).unwrap().published, note.published);
}

fn arb_media_link() -> impl Strategy<Value = MediaLink> {
    (
        proptest::string::string_regex("[0-9a-f]{64}").unwrap(),
        proptest::option::of(1u32..4096),
        proptest::option::of(1u32..4096),
    )
        .prop_map(|(digest, width, height)| {
            let mut link = builders::media_link(MediaType::Mp4, "https://example.com/m.mp4")
                .hash(builders::hash(digest).build());
            if let Some(width) = width {
                link = link.width(width);
            }
            if let Some(height) = height {
                link = link.height(height);
            }
            link.build()
        })
}

fn arb_attachment() -> impl Strategy<Value = Attachment> {
    prop_oneof![
        arb_media_link().prop_map(|link| builders::attachment::video().url(link).build()),
        arb_media_link().prop_map(|link| builders::attachment::image().url(link).build()),
        "[a-z]{1,12}".prop_map(|path| {
            builders::attachment::link(format!("https://example.com/{path}")).build()
        }),
    ]
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    prop_oneof![
        "[a-z]{1,10}".prop_map(|name| builders::tag::hashtag(format!("#{name}")).build()),
        (1u64..1_000_000u64).prop_map(|id| builders::tag::mention(format!("dsnp://{id}")).build()),
    ]
}

// Keys prefixed to stay clear of every declared schema member.
fn arb_extension() -> impl Strategy<Value = (String, serde_json::Value)> {
    (
        "x[a-zA-Z]{1,8}",
        prop_oneof![
            any::<i64>().prop_map(serde_json::Value::from),
            any::<bool>().prop_map(serde_json::Value::from),
            "[ -~]{0,16}".prop_map(serde_json::Value::from),
        ],
    )
}

fn arb_note() -> impl Strategy<Value = Note> {
    (
        "[ -~]{1,40}",
        proptest::option::of("[ -~]{1,20}"),
        proptest::option::of(0i64..4_102_444_800_000i64),
        proptest::option::of((-90.0f64..=90.0, -180.0f64..=180.0)),
        proptest::collection::vec(arb_attachment(), 0..3),
        proptest::collection::vec(arb_tag(), 0..3),
        proptest::collection::vec(arb_extension(), 0..3),
    )
        .prop_map(
            |(content, name, published, coords, attachments, tags, extensions)| {
                let mut note = builders::note(content);
                if let Some(name) = name {
                    note = note.name(name);
                }
                if let Some(millis) = published {
                    note = note.published(Timestamp::from_epoch_millis(millis));
                }
                if let Some((latitude, longitude)) = coords {
                    note = note.location(builders::location(latitude, longitude).build());
                }
                for attachment in attachments {
                    note = note.attachment(attachment);
                }
                for tag in tags {
                    note = note.tag(tag);
                }
                for (key, value) in extensions {
                    note = note.additional_field(key, value).unwrap();
                }
                note.build()
            },
        )
}

proptest! {
    #[test]
    fn arbitrary_notes_round_trip(note in arb_note()) {
        let json = note.to_json(&WriteOptions::default()).unwrap();
        let reparsed = parse_note_lenient(&json).unwrap();
        prop_assert_eq!(&reparsed, &note);
        prop_assert_eq!(reparsed.to_json(&WriteOptions::default()).unwrap(), json);
    }
}

//! Output set construction tests.
//!
//! Tests verify:
//! - Duplicate tags keep their first occurrence
//! - Offset tags never reach an output directory
//! - Values survive re-encoding to either byte order
//! - Duplicate directories keep their first occurrence
//! - Decode failures name the failing directory and tag
//! - Aggregates and output sets can be shared across threads

use bytes::Bytes;

use tiff_metadata::format::tiff::tags::{
    COPYRIGHT, EXIF_OFFSET, GPS_INFO, GPS_LATITUDE, IMAGE_WIDTH, JPEG_INTERCHANGE_FORMAT, MAKE,
    STRIP_BYTE_COUNTS, STRIP_OFFSETS, X_RESOLUTION,
};
use tiff_metadata::{
    build_output_directory, build_output_set, ByteOrder, Directory, Field, FieldType, FieldValue,
    ImageData, JpegData, OutputSet, TagRegistry, TiffMetadata, WriteError, DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS,
    DIRECTORY_TYPE_ROOT, DIRECTORY_TYPE_THUMBNAIL,
};

use super::test_utils::{
    ascii_field, gps_directory, long_field, metadata, rational_field, rationals, short_field,
};

const LE: ByteOrder = ByteOrder::LittleEndian;
const BE: ByteOrder = ByteOrder::BigEndian;

fn root_directory(byte_order: ByteOrder) -> Directory {
    Directory::new(
        DIRECTORY_TYPE_ROOT,
        vec![
            short_field(IMAGE_WIDTH.tag, &[640], byte_order, 0),
            ascii_field(MAKE.tag, "Canon", byte_order, 1),
            long_field(STRIP_OFFSETS.tag, &[8, 4104], byte_order, 2),
            long_field(STRIP_BYTE_COUNTS.tag, &[4096, 4096], byte_order, 3),
            rational_field(X_RESOLUTION.tag, &[(72, 1)], byte_order, 4),
            long_field(EXIF_OFFSET.tag, &[8200], byte_order, 5),
            long_field(GPS_INFO.tag, &[8400], byte_order, 6),
        ],
    )
}

// =============================================================================
// Dedup
// =============================================================================

#[test]
fn test_dedup_matches_first_occurrence() {
    let registry = TagRegistry::standard();
    let with_duplicate = Directory::new(
        DIRECTORY_TYPE_ROOT,
        vec![
            ascii_field(MAKE.tag, "Canon", LE, 0),
            ascii_field(MAKE.tag, "Nikon", LE, 1),
        ],
    );
    let first_only = Directory::new(DIRECTORY_TYPE_ROOT, vec![ascii_field(MAKE.tag, "Canon", LE, 0)]);

    let deduped = build_output_directory(&with_duplicate, &registry, LE).unwrap();
    let expected = build_output_directory(&first_only, &registry, LE).unwrap();
    assert_eq!(deduped, expected);
    assert_eq!(deduped.fields().len(), 1);
}

// =============================================================================
// Offset Stripping
// =============================================================================

#[test]
fn test_offset_tags_never_written() {
    let registry = TagRegistry::standard();
    let output = build_output_directory(&root_directory(LE), &registry, LE).unwrap();

    for tag in [STRIP_OFFSETS.tag, EXIF_OFFSET.tag, GPS_INFO.tag] {
        assert!(output.find_field(tag).is_none(), "offset tag 0x{tag:04X} was written");
    }
    // Byte counts are not offsets
    assert!(output.find_field(STRIP_BYTE_COUNTS.tag).is_some());
    assert_eq!(output.fields().len(), 4);
}

#[test]
fn test_thumbnail_offset_stripped_jpeg_kept() {
    let registry = TagRegistry::standard();
    let thumbnail = Directory::new(
        DIRECTORY_TYPE_THUMBNAIL,
        vec![long_field(JPEG_INTERCHANGE_FORMAT.tag, &[1024], LE, 0)],
    )
    .with_jpeg_data(JpegData::new(vec![0xFF, 0xD8, 0xFF, 0xD9]));

    let output = build_output_directory(&thumbnail, &registry, BE).unwrap();
    assert!(output.fields().is_empty());
    assert_eq!(output.jpeg_data().unwrap().data().as_ref(), &[0xFF, 0xD8, 0xFF, 0xD9]);
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_round_trip_across_byte_orders() {
    let registry = TagRegistry::standard();
    let source = root_directory(LE);

    for target in [LE, BE] {
        let output = build_output_directory(&source, &registry, target).unwrap();
        for field in output.fields() {
            let original = source.find_field_by_id(field.tag()).unwrap();
            assert_eq!(field.field_type(), original.field_type());
            assert_eq!(field.count(), original.count());
            assert_eq!(field.sort_hint(), Some(original.sort_hint()));
            assert_eq!(field.value(target).unwrap(), original.value().unwrap());
        }
    }
}

#[test]
fn test_latin1_ascii_bytes_preserved() {
    let registry = TagRegistry::standard();
    // "\u{a9} 2020" as a camera writes it, not valid UTF-8
    let raw = vec![0xA9, 0x20, 0x32, 0x30, 0x32, 0x30, 0x00];
    let source = Directory::new(
        DIRECTORY_TYPE_ROOT,
        vec![Field::new(COPYRIGHT.tag, FieldType::Ascii, raw.clone(), LE, 0)],
    );

    for target in [LE, BE] {
        let output = build_output_directory(&source, &registry, target).unwrap();
        let copyright = output.find_field(COPYRIGHT.tag).unwrap();
        assert_eq!(copyright.bytes().as_ref(), &raw[..]);
        assert_eq!(copyright.count(), 7);
    }
}

#[test]
fn test_big_endian_bytes() {
    let registry = TagRegistry::standard();
    let output = build_output_directory(&root_directory(LE), &registry, BE).unwrap();

    assert_eq!(output.byte_order(), BE);
    let width = output.find_field(IMAGE_WIDTH.tag).unwrap();
    assert_eq!(width.bytes().as_ref(), &[0x02, 0x80]);
    let make = output.find_field(MAKE.tag).unwrap();
    assert_eq!(make.bytes().as_ref(), b"Canon\0");
}

#[test]
fn test_sorted_fields_follow_tag_order() {
    let registry = TagRegistry::standard();
    let source = Directory::new(
        DIRECTORY_TYPE_ROOT,
        vec![
            rational_field(X_RESOLUTION.tag, &[(72, 1)], LE, 0),
            ascii_field(MAKE.tag, "Canon", LE, 1),
            short_field(IMAGE_WIDTH.tag, &[640], LE, 2),
        ],
    );
    let output = build_output_directory(&source, &registry, LE).unwrap();
    let tags: Vec<u16> = output.sorted_fields().iter().map(|f| f.tag()).collect();
    assert_eq!(tags, vec![IMAGE_WIDTH.tag, MAKE.tag, X_RESOLUTION.tag]);
}

// =============================================================================
// Output Sets
// =============================================================================

#[test]
fn test_duplicate_gps_directory_skipped() {
    let meta = metadata(
        LE,
        vec![
            root_directory(LE),
            gps_directory("N", "E", LE),
            gps_directory("S", "W", LE),
        ],
    );
    let set = meta.output_set().unwrap();

    let gps: Vec<_> = set
        .directories()
        .iter()
        .filter(|d| d.directory_type() == DIRECTORY_TYPE_GPS)
        .collect();
    assert_eq!(gps.len(), 1);

    let registry = TagRegistry::standard();
    let expected = build_output_directory(&gps_directory("N", "E", LE), &registry, LE).unwrap();
    assert_eq!(gps[0], &expected);
}

#[test]
fn test_output_set_keeps_directory_order_and_payloads() {
    let strips = ImageData::Strips(vec![Bytes::from_static(&[1, 2]), Bytes::from_static(&[3])]);
    let meta = metadata(
        BE,
        vec![
            root_directory(BE).with_image_data(strips.clone()),
            Directory::new(DIRECTORY_TYPE_EXIF, vec![]),
            gps_directory("N", "E", BE),
        ],
    );

    let set = build_output_set(&meta, LE).unwrap();
    assert_eq!(set.byte_order(), LE);
    let types: Vec<i32> = set.directories().iter().map(|d| d.directory_type()).collect();
    assert_eq!(types, vec![DIRECTORY_TYPE_ROOT, DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS]);
    assert_eq!(set.directories()[0].image_data(), Some(&strips));

    // The source is left untouched
    assert_eq!(meta.byte_order(), BE);
    assert_eq!(meta.directories()[0].fields().len(), 7);
}

#[test]
fn test_decode_failure_reported() {
    let broken = Field::new(X_RESOLUTION.tag, FieldType::Rational, vec![0u8; 12], LE, 0);
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, vec![]),
            Directory::new(DIRECTORY_TYPE_EXIF, vec![broken]),
        ],
    );

    match meta.output_set() {
        Err(WriteError::Field {
            directory_type,
            tag,
            ..
        }) => {
            assert_eq!(directory_type, DIRECTORY_TYPE_EXIF);
            assert_eq!(tag, X_RESOLUTION.tag);
        }
        other => panic!("expected a field write error, got {:?}", other),
    }
}

#[test]
fn test_rewrite_gps_position() {
    let meta = metadata(LE, vec![root_directory(LE), gps_directory("N", "E", LE)]);
    let mut set = meta.output_set().unwrap();
    set.set_gps_in_degrees(-0.5, -33.75).unwrap();

    let gps = set.find_directory(DIRECTORY_TYPE_GPS).unwrap();
    assert_eq!(gps.fields().len(), 4);
    let latitude = gps.find_field(GPS_LATITUDE.tag).unwrap();
    assert_eq!(latitude.sort_hint(), None);
    assert_eq!(
        latitude.value(LE).unwrap(),
        FieldValue::Rationals(rationals(&[(33, 1), (45, 1), (0, 1)]))
    );
    // EXIF directory was created to link the GPS directory
    assert!(set.find_directory(DIRECTORY_TYPE_EXIF).is_some());
}

// =============================================================================
// Thread Safety
// =============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_across_threads() {
    assert_send_sync::<TiffMetadata>();
    assert_send_sync::<OutputSet>();

    let meta = metadata(LE, vec![root_directory(LE), gps_directory("N", "E", LE)]);
    let sets: Vec<OutputSet> = std::thread::scope(|scope| {
        let handles: Vec<_> = [LE, BE]
            .into_iter()
            .map(|target| {
                let meta = &meta;
                scope.spawn(move || build_output_set(meta, target).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sets[0].byte_order(), LE);
    assert_eq!(sets[1].byte_order(), BE);
    assert_eq!(sets[0].directories().len(), sets[1].directories().len());
}

//! Tag resolution and typed accessor tests.
//!
//! Tests verify:
//! - A tag is found in its declared directory first
//! - Ambiguous tags never widen past their declared directory
//! - Unambiguous tags fall back to same-category directories
//! - Directory-agnostic and unknown tags use the unrestricted scan
//! - Type mismatches read as absent

use tiff_metadata::format::tiff::tags::{
    EXPOSURE_TIME, GPS_LATITUDE_REF, IMAGE_WIDTH, INTEROP_INDEX, MAKE, PADDING,
    THUMBNAIL_IMAGE_WIDTH, USER_COMMENT, XP_TITLE,
};
use tiff_metadata::{
    ByteOrder, Directory, DirectoryAffinity, Field, FieldType, FieldValue, TagInfo, TagRegistry,
    DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS, DIRECTORY_TYPE_INTEROPERABILITY, DIRECTORY_TYPE_ROOT,
    DIRECTORY_TYPE_THUMBNAIL,
};

use super::test_utils::{
    ascii_field, long_field, metadata, metadata_with_registry, rational_field, rationals,
    short_field,
};

const LE: ByteOrder = ByteOrder::LittleEndian;

// =============================================================================
// Exact Directory Precedence
// =============================================================================

#[test]
fn test_declared_directory_wins() {
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_THUMBNAIL, vec![short_field(IMAGE_WIDTH.tag, &[160], LE, 0)]),
            Directory::new(DIRECTORY_TYPE_ROOT, vec![short_field(IMAGE_WIDTH.tag, &[4000], LE, 0)]),
        ],
    );

    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), Some(vec![4000]));
    assert_eq!(meta.short_values(&THUMBNAIL_IMAGE_WIDTH).unwrap(), Some(vec![160]));
}

#[test]
fn test_ambiguous_tag_does_not_widen() {
    // ImageWidth is defined for both IFD0 and IFD1
    assert_eq!(TagRegistry::standard().tags_matching(IMAGE_WIDTH.tag), 2);

    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_THUMBNAIL,
            vec![short_field(IMAGE_WIDTH.tag, &[160], LE, 0)],
        )],
    );

    assert!(meta.find_field(&IMAGE_WIDTH, false).is_none());
    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), None);
}

#[test]
fn test_ambiguous_non_image_tag_does_not_widen() {
    // 0x0001 is GPSLatitudeRef and InteropIndex
    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_INTEROPERABILITY,
            vec![ascii_field(INTEROP_INDEX.tag, "R98", LE, 0)],
        )],
    );

    assert!(meta.find_field(&GPS_LATITUDE_REF, false).is_none());
    assert_eq!(
        meta.ascii_values(&INTEROP_INDEX).unwrap(),
        Some(vec!["R98".to_string()])
    );
}

#[test]
fn test_exact_match_flag_disables_fallback() {
    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_THUMBNAIL,
            vec![ascii_field(MAKE.tag, "Canon", LE, 0)],
        )],
    );

    assert!(meta.find_field(&MAKE, true).is_none());
    assert!(meta.find_field(&MAKE, false).is_some());
}

// =============================================================================
// Fallbacks
// =============================================================================

#[test]
fn test_unambiguous_tag_falls_back_to_same_category() {
    // Make is only defined for IFD0; a thumbnail IFD is the same category
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_EXIF, vec![ascii_field(MAKE.tag, "Exif", LE, 0)]),
            Directory::new(DIRECTORY_TYPE_THUMBNAIL, vec![ascii_field(MAKE.tag, "Thumb", LE, 0)]),
        ],
    );

    assert_eq!(
        meta.ascii_values(&MAKE).unwrap(),
        Some(vec!["Thumb".to_string()])
    );
}

#[test]
fn test_unambiguous_non_image_tag_falls_back() {
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, vec![rational_field(EXPOSURE_TIME.tag, &[(1, 60)], LE, 0)]),
            Directory::new(DIRECTORY_TYPE_GPS, vec![rational_field(EXPOSURE_TIME.tag, &[(1, 250)], LE, 0)]),
        ],
    );

    assert_eq!(
        meta.rational_values(&EXPOSURE_TIME).unwrap(),
        Some(rationals(&[(1, 250)]))
    );
}

#[test]
fn test_unambiguous_tag_unrestricted_scan() {
    // No image directory at all: the last-resort scan finds the EXIF copy
    let meta = metadata(
        LE,
        vec![Directory::new(DIRECTORY_TYPE_EXIF, vec![ascii_field(MAKE.tag, "Exif", LE, 0)])],
    );

    assert_eq!(
        meta.ascii_values(&MAKE).unwrap(),
        Some(vec!["Exif".to_string()])
    );
}

#[test]
fn test_any_directory_tag() {
    let padding = Field::new(PADDING.tag, FieldType::Undefined, vec![0u8; 4], LE, 0);
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, vec![]),
            Directory::new(DIRECTORY_TYPE_EXIF, vec![padding]),
        ],
    );

    assert_eq!(PADDING.directory, DirectoryAffinity::Any);
    assert_eq!(meta.byte_values(&PADDING).unwrap(), Some(vec![0; 4]));
}

#[test]
fn test_unknown_tag_found_anywhere() {
    let meta = metadata(
        LE,
        vec![Directory::new(DIRECTORY_TYPE_GPS, vec![long_field(0xC4A5, &[7], LE, 0)])],
    );

    let unknown = TagInfo::unknown(0xC4A5);
    assert_eq!(meta.long_values(&unknown).unwrap(), Some(vec![7]));
    assert_eq!(
        meta.field_value(&unknown).unwrap(),
        Some(FieldValue::Longs(vec![7]))
    );
}

// =============================================================================
// Injected Registries
// =============================================================================

#[test]
fn test_custom_registry_controls_ambiguity() {
    let directories = || {
        vec![Directory::new(
            DIRECTORY_TYPE_THUMBNAIL,
            vec![short_field(IMAGE_WIDTH.tag, &[160], LE, 0)],
        )]
    };

    // Without the thumbnail definition ImageWidth is unambiguous and widens
    let root_only = TagRegistry::new([IMAGE_WIDTH]);
    let meta = metadata_with_registry(root_only, LE, directories());
    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), Some(vec![160]));

    // An empty registry knows nothing, so the lookup is lenient as well
    let meta = metadata_with_registry(TagRegistry::default(), LE, directories());
    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), Some(vec![160]));

    // The standard registry sees the ambiguity
    let meta = metadata(LE, directories());
    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), None);
}

// =============================================================================
// Typed Accessors
// =============================================================================

#[test]
fn test_type_mismatch_reads_as_absent() {
    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_ROOT,
            vec![ascii_field(IMAGE_WIDTH.tag, "wide", LE, 0)],
        )],
    );

    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), None);
    assert_eq!(meta.long_values(&IMAGE_WIDTH).unwrap(), None);
    // The tag does not accept ASCII either
    assert_eq!(meta.ascii_values(&IMAGE_WIDTH).unwrap(), None);
}

#[test]
fn test_long_image_width() {
    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_ROOT,
            vec![long_field(IMAGE_WIDTH.tag, &[70_000], LE, 0)],
        )],
    );

    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), None);
    assert_eq!(meta.long_values(&IMAGE_WIDTH).unwrap(), Some(vec![70_000]));
}

#[test]
fn test_big_endian_values() {
    let be = ByteOrder::BigEndian;
    let meta = metadata(
        be,
        vec![Directory::new(
            DIRECTORY_TYPE_ROOT,
            vec![short_field(IMAGE_WIDTH.tag, &[0x0102], be, 0)],
        )],
    );

    let field = meta.find_field(&IMAGE_WIDTH, false).unwrap();
    assert_eq!(field.raw_bytes().as_ref(), &[0x01, 0x02]);
    assert_eq!(meta.short_values(&IMAGE_WIDTH).unwrap(), Some(vec![0x0102]));
}

#[test]
fn test_text_decoders_skip_type_check() {
    let mut comment = b"ASCII\0\0\0".to_vec();
    comment.extend_from_slice(b"hello");
    let title: Vec<u8> = "Hi"
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .chain([0, 0])
        .collect();

    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, vec![Field::new(XP_TITLE.tag, FieldType::Byte, title, LE, 0)]),
            Directory::new(
                DIRECTORY_TYPE_EXIF,
                vec![Field::new(USER_COMMENT.tag, FieldType::Byte, comment, LE, 0)],
            ),
        ],
    );

    // UserComment declares UNDEFINED; the BYTE copy is still decoded
    assert_eq!(meta.byte_values(&USER_COMMENT).unwrap(), None);
    assert_eq!(
        meta.gps_text_value(&USER_COMMENT).unwrap(),
        Some("hello".to_string())
    );
    assert_eq!(meta.xp_string_value(&XP_TITLE).unwrap(), Some("Hi".to_string()));
}

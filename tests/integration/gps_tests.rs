//! GPS derivation tests.
//!
//! Tests verify:
//! - Decimal coordinates from degrees/minutes/seconds
//! - Hemisphere references and their failures
//! - Missing GPS data reads as absent
//! - Malformed coordinate arrays are errors

use tiff_metadata::format::tiff::tags::{
    GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};
use tiff_metadata::{
    ByteOrder, Directory, TiffError, DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS, DIRECTORY_TYPE_ROOT,
};

use super::test_utils::{ascii_field, gps_directory, metadata, rational_field, rationals};

const LE: ByteOrder = ByteOrder::LittleEndian;
const BE: ByteOrder = ByteOrder::BigEndian;

// =============================================================================
// Decimal Coordinates
// =============================================================================

#[test]
fn test_gps_example() {
    let meta = metadata(BE, vec![gps_directory("N", "E", BE)]);
    let gps = meta.gps().unwrap().unwrap();

    assert_eq!(gps.latitude_ref, "N");
    assert_eq!(gps.latitude.to_vec(), rationals(&[(8, 1), (40, 1), (422, 10)]));
    assert!((gps.to_decimal_latitude().unwrap() - 8.6784).abs() < 1e-4);
    assert!((gps.to_decimal_longitude().unwrap() - 115.4394).abs() < 1e-4);
}

#[test]
fn test_southern_latitude_negates() {
    let meta = metadata(LE, vec![gps_directory("S", "W", LE)]);
    let gps = meta.gps().unwrap().unwrap();

    assert!((gps.to_decimal_latitude().unwrap() + 8.6784).abs() < 1e-4);
    assert!((gps.to_decimal_longitude().unwrap() + 115.4394).abs() < 1e-4);
}

#[test]
fn test_unknown_reference_fails() {
    let meta = metadata(LE, vec![gps_directory("X", "E", LE)]);
    let gps = meta.gps().unwrap().unwrap();

    let err = gps.to_decimal_latitude().unwrap_err();
    assert!(matches!(err, TiffError::UnknownReference { .. }));
    assert!(err.to_string().contains("\"X\""));
}

#[test]
fn test_display() {
    let meta = metadata(LE, vec![gps_directory("N", "E", LE)]);
    let gps = meta.gps().unwrap().unwrap();
    assert_eq!(
        gps.to_string(),
        "[GPS. Latitude: 8 degrees, 40 minutes, 42.2 seconds N, \
         Longitude: 115 degrees, 26 minutes, 21.8 seconds E]"
    );
}

// =============================================================================
// Missing and Malformed Data
// =============================================================================

#[test]
fn test_no_gps_directory() {
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, vec![]),
            Directory::new(DIRECTORY_TYPE_EXIF, vec![]),
        ],
    );
    assert_eq!(meta.gps().unwrap(), None);
}

#[test]
fn test_any_missing_tag_is_absent() {
    for missing in [
        GPS_LATITUDE_REF.tag,
        GPS_LATITUDE.tag,
        GPS_LONGITUDE_REF.tag,
        GPS_LONGITUDE.tag,
    ] {
        let complete = gps_directory("N", "E", LE);
        let fields = complete
            .fields()
            .iter()
            .filter(|f| f.tag() != missing)
            .cloned()
            .collect();
        let meta = metadata(LE, vec![Directory::new(DIRECTORY_TYPE_GPS, fields)]);
        assert_eq!(meta.gps().unwrap(), None, "tag 0x{missing:04X} removed");
    }
}

#[test]
fn test_gps_tags_outside_gps_directory_ignored() {
    // Coordinates in the wrong directory do not count
    let misplaced = gps_directory("N", "E", LE);
    let meta = metadata(
        LE,
        vec![
            Directory::new(DIRECTORY_TYPE_ROOT, misplaced.fields().to_vec()),
            Directory::new(DIRECTORY_TYPE_GPS, vec![]),
        ],
    );
    assert_eq!(meta.gps().unwrap(), None);
}

#[test]
fn test_wrong_element_count_fails() {
    let meta = metadata(
        LE,
        vec![Directory::new(
            DIRECTORY_TYPE_GPS,
            vec![
                ascii_field(GPS_LATITUDE_REF.tag, "N", LE, 0),
                rational_field(GPS_LATITUDE.tag, &[(8, 1), (40, 1)], LE, 1),
                ascii_field(GPS_LONGITUDE_REF.tag, "E", LE, 2),
                rational_field(GPS_LONGITUDE.tag, &[(115, 1), (26, 1), (218, 10)], LE, 3),
            ],
        )],
    );

    let err = meta.gps().unwrap_err();
    assert!(matches!(err, TiffError::InvalidTagValue { tag: "GPSLatitude", .. }));
}

#[test]
fn test_first_gps_directory_used() {
    let meta = metadata(
        LE,
        vec![gps_directory("N", "E", LE), gps_directory("S", "W", LE)],
    );
    let gps = meta.gps().unwrap().unwrap();
    assert_eq!(gps.latitude_ref, "N");
}

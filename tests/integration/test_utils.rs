//! Test utilities for integration tests.
//!
//! Builders for fields, directories and metadata aggregates with the raw
//! bytes a decoder would produce.

use std::sync::Arc;

use tiff_metadata::{
    ByteOrder, Directory, Field, FieldType, Rational, TagRegistry, TiffMetadata,
    DIRECTORY_TYPE_GPS,
};
use tiff_metadata::format::tiff::tags::{
    GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};

// =============================================================================
// Field Builders
// =============================================================================

/// ASCII field with a single NUL-terminated string.
pub fn ascii_field(tag: u16, text: &str, byte_order: ByteOrder, sort_hint: u32) -> Field {
    let mut raw = text.as_bytes().to_vec();
    raw.push(0);
    Field::new(tag, FieldType::Ascii, raw, byte_order, sort_hint)
}

pub fn short_field(tag: u16, values: &[u16], byte_order: ByteOrder, sort_hint: u32) -> Field {
    let mut raw = Vec::new();
    for &value in values {
        byte_order.write_u16(&mut raw, value);
    }
    Field::new(tag, FieldType::Short, raw, byte_order, sort_hint)
}

pub fn long_field(tag: u16, values: &[u32], byte_order: ByteOrder, sort_hint: u32) -> Field {
    let mut raw = Vec::new();
    for &value in values {
        byte_order.write_u32(&mut raw, value);
    }
    Field::new(tag, FieldType::Long, raw, byte_order, sort_hint)
}

pub fn rational_field(
    tag: u16,
    values: &[(u32, u32)],
    byte_order: ByteOrder,
    sort_hint: u32,
) -> Field {
    let mut raw = Vec::new();
    for &(numerator, denominator) in values {
        byte_order.write_u32(&mut raw, numerator);
        byte_order.write_u32(&mut raw, denominator);
    }
    Field::new(tag, FieldType::Rational, raw, byte_order, sort_hint)
}

// =============================================================================
// Aggregates
// =============================================================================

pub fn metadata(byte_order: ByteOrder, directories: Vec<Directory>) -> TiffMetadata {
    metadata_with_registry(TagRegistry::standard(), byte_order, directories)
}

pub fn metadata_with_registry(
    registry: TagRegistry,
    byte_order: ByteOrder,
    directories: Vec<Directory>,
) -> TiffMetadata {
    TiffMetadata::new(Arc::new(registry), byte_order, directories)
}

/// GPS directory for 8°40'42.2" / 115°26'21.8" with the given references.
pub fn gps_directory(latitude_ref: &str, longitude_ref: &str, byte_order: ByteOrder) -> Directory {
    Directory::new(
        DIRECTORY_TYPE_GPS,
        vec![
            ascii_field(GPS_LATITUDE_REF.tag, latitude_ref, byte_order, 0),
            rational_field(GPS_LATITUDE.tag, &[(8, 1), (40, 1), (422, 10)], byte_order, 1),
            ascii_field(GPS_LONGITUDE_REF.tag, longitude_ref, byte_order, 2),
            rational_field(
                GPS_LONGITUDE.tag,
                &[(115, 1), (26, 1), (218, 10)],
                byte_order,
                3,
            ),
        ],
    )
}

pub fn rationals(values: &[(u32, u32)]) -> Vec<Rational> {
    values
        .iter()
        .map(|&(numerator, denominator)| Rational::new(numerator, denominator))
        .collect()
}

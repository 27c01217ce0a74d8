//! Write-side model: output fields, directories and sets.
//!
//! An output set is built fresh from a [`TiffMetadata`] for every re-encode.
//! Unlike the read model it guarantees that each directory holds a tag at
//! most once and that no field carries a file-relative offset; offsets are
//! recomputed by the byte-level encoder when it lays out the file.

use bytes::Bytes;
use tracing::debug;

use crate::error::{TiffError, WriteError};
use crate::format::tiff::tags::{GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF};
use crate::format::tiff::{
    directory_type_name, ByteOrder, FieldType, FieldValue, Rational, TagInfo, TagRegistry,
    DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS, DIRECTORY_TYPE_ROOT,
};

use super::aggregate::TiffMetadata;
use super::directory::{Directory, ImageData, JpegData};

// =============================================================================
// OutputField
// =============================================================================

/// A field re-encoded for writing.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    tag_info: TagInfo,
    field_type: FieldType,
    count: usize,
    bytes: Bytes,
    sort_hint: Option<u32>,
}

impl OutputField {
    /// Create an output field from already-encoded bytes.
    ///
    /// The element count is derived from the byte length.
    pub fn new(
        tag_info: TagInfo,
        field_type: FieldType,
        bytes: impl Into<Bytes>,
        sort_hint: Option<u32>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            tag_info,
            field_type,
            count: bytes.len() / field_type.size_in_bytes(),
            bytes,
            sort_hint,
        }
    }

    /// Encode `value` as `field_type` in `byte_order`.
    pub fn from_value(
        tag_info: TagInfo,
        field_type: FieldType,
        value: &FieldValue,
        byte_order: ByteOrder,
        sort_hint: Option<u32>,
    ) -> Result<Self, TiffError> {
        let bytes = value.encode(field_type, byte_order)?;
        Ok(Self::new(tag_info, field_type, bytes, sort_hint))
    }

    #[inline]
    pub fn tag(&self) -> u16 {
        self.tag_info.tag
    }

    /// Registry descriptor the field was resolved to.
    pub fn tag_info(&self) -> &TagInfo {
        &self.tag_info
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Encoded value bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Ordering key from the source field. `None` for fields created on
    /// the write side, which sort before carried-over fields with the same tag.
    #[inline]
    pub fn sort_hint(&self) -> Option<u32> {
        self.sort_hint
    }

    /// Decode the encoded bytes back into a value.
    pub fn value(&self, byte_order: ByteOrder) -> Result<FieldValue, TiffError> {
        self.field_type.decode(&self.bytes, byte_order)
    }
}

// =============================================================================
// OutputDirectory
// =============================================================================

/// One directory of an output set.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDirectory {
    directory_type: i32,
    byte_order: ByteOrder,
    fields: Vec<OutputField>,
    image_data: Option<ImageData>,
    jpeg_data: Option<JpegData>,
}

impl OutputDirectory {
    pub fn new(directory_type: i32, byte_order: ByteOrder) -> Self {
        Self {
            directory_type,
            byte_order,
            fields: Vec::new(),
            image_data: None,
            jpeg_data: None,
        }
    }

    #[inline]
    pub fn directory_type(&self) -> i32 {
        self.directory_type
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn description(&self) -> String {
        directory_type_name(self.directory_type)
    }

    pub fn find_field(&self, tag: u16) -> Option<&OutputField> {
        self.fields.iter().find(|field| field.tag() == tag)
    }

    /// Remove the field with ID `tag`. Returns whether one was present.
    pub fn remove_field(&mut self, tag: u16) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.tag() != tag);
        self.fields.len() != before
    }

    /// Add a field, replacing any field with the same tag.
    pub fn add(&mut self, field: OutputField) {
        if self.remove_field(field.tag()) {
            debug!(
                directory_type = self.directory_type,
                tag = field.tag(),
                "replacing existing output field"
            );
        }
        self.fields.push(field);
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[OutputField] {
        &self.fields
    }

    /// Fields in on-disk order: by tag, then by sort hint.
    pub fn sorted_fields(&self) -> Vec<&OutputField> {
        let mut sorted: Vec<&OutputField> = self.fields.iter().collect();
        sorted.sort_by_key(|field| (field.tag(), field.sort_hint()));
        sorted
    }

    pub fn image_data(&self) -> Option<&ImageData> {
        self.image_data.as_ref()
    }

    pub fn set_image_data(&mut self, image_data: Option<ImageData>) {
        self.image_data = image_data;
    }

    pub fn jpeg_data(&self) -> Option<&JpegData> {
        self.jpeg_data.as_ref()
    }

    pub fn set_jpeg_data(&mut self, jpeg_data: Option<JpegData>) {
        self.jpeg_data = jpeg_data;
    }
}

// =============================================================================
// OutputSet
// =============================================================================

/// Every directory to be written, at most one per directory type.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSet {
    byte_order: ByteOrder,
    directories: Vec<OutputDirectory>,
}

impl OutputSet {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            directories: Vec::new(),
        }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn directories(&self) -> &[OutputDirectory] {
        &self.directories
    }

    /// Append a directory.
    ///
    /// # Errors
    /// `DuplicateDirectory` if a directory of the same type is present.
    pub fn add_directory(&mut self, directory: OutputDirectory) -> Result<(), WriteError> {
        if self.find_directory(directory.directory_type()).is_some() {
            return Err(WriteError::DuplicateDirectory(directory.directory_type()));
        }
        self.directories.push(directory);
        Ok(())
    }

    pub fn find_directory(&self, directory_type: i32) -> Option<&OutputDirectory> {
        self.directories
            .iter()
            .find(|d| d.directory_type() == directory_type)
    }

    pub fn find_directory_mut(&mut self, directory_type: i32) -> Option<&mut OutputDirectory> {
        self.directories
            .iter_mut()
            .find(|d| d.directory_type() == directory_type)
    }

    /// The directory of `directory_type`, appended empty if missing.
    pub fn get_or_create_directory(&mut self, directory_type: i32) -> &mut OutputDirectory {
        let index = match self
            .directories
            .iter()
            .position(|d| d.directory_type() == directory_type)
        {
            Some(index) => index,
            None => {
                self.directories
                    .push(OutputDirectory::new(directory_type, self.byte_order));
                self.directories.len() - 1
            }
        };
        &mut self.directories[index]
    }

    /// Replace the GPS position with the given decimal coordinates.
    ///
    /// Creates the root, EXIF and GPS directories when missing, since a GPS
    /// directory is only reachable through them. Negative values are written
    /// as W / S references.
    ///
    /// # Errors
    /// `InvalidTagValue` if a coordinate is not finite or out of range.
    pub fn set_gps_in_degrees(&mut self, longitude: f64, latitude: f64) -> Result<(), TiffError> {
        check_range(GPS_LONGITUDE.name, longitude, 180.0)?;
        check_range(GPS_LATITUDE.name, latitude, 90.0)?;

        let byte_order = self.byte_order;
        self.get_or_create_directory(DIRECTORY_TYPE_ROOT);
        self.get_or_create_directory(DIRECTORY_TYPE_EXIF);
        let gps = self.get_or_create_directory(DIRECTORY_TYPE_GPS);

        let longitude_ref = if longitude < 0.0 { "W" } else { "E" };
        let latitude_ref = if latitude < 0.0 { "S" } else { "N" };

        gps.add(ascii_field(GPS_LONGITUDE_REF, longitude_ref, byte_order)?);
        gps.add(dms_field(GPS_LONGITUDE, longitude.abs(), byte_order)?);
        gps.add(ascii_field(GPS_LATITUDE_REF, latitude_ref, byte_order)?);
        gps.add(dms_field(GPS_LATITUDE, latitude.abs(), byte_order)?);
        Ok(())
    }
}

fn check_range(tag: &'static str, value: f64, limit: f64) -> Result<(), TiffError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(TiffError::InvalidTagValue {
            tag,
            message: format!("{value} is outside [-{limit}, {limit}]"),
        });
    }
    Ok(())
}

fn ascii_field(tag_info: TagInfo, text: &str, byte_order: ByteOrder) -> Result<OutputField, TiffError> {
    let value = FieldValue::Ascii(vec![text.to_string()]);
    OutputField::from_value(tag_info, FieldType::Ascii, &value, byte_order, None)
}

fn dms_field(tag_info: TagInfo, degrees: f64, byte_order: ByteOrder) -> Result<OutputField, TiffError> {
    let minutes = degrees.fract() * 60.0;
    let seconds = minutes.fract() * 60.0;
    let value = FieldValue::Rationals(vec![
        Rational::new(degrees.trunc() as u32, 1),
        Rational::new(minutes.trunc() as u32, 1),
        Rational::from_f64(seconds),
    ]);
    OutputField::from_value(tag_info, FieldType::Rational, &value, byte_order, None)
}

// =============================================================================
// Builder
// =============================================================================

/// Re-encode one directory for writing in `byte_order`.
///
/// Repeated tags keep their first occurrence and offset tags are dropped.
/// Every other field is decoded and encoded again in the target order,
/// keeping its type and sort hint. Raster and JPEG payloads are carried over.
///
/// # Errors
/// `WriteError::Field` naming the field whose bytes failed to decode.
pub fn build_output_directory(
    directory: &Directory,
    registry: &TagRegistry,
    byte_order: ByteOrder,
) -> Result<OutputDirectory, WriteError> {
    let directory_type = directory.directory_type();
    let mut output = OutputDirectory::new(directory_type, byte_order);

    for field in directory.fields() {
        let tag = field.tag();
        if output.find_field(tag).is_some() {
            debug!(directory_type, tag, "dropping duplicate tag");
            continue;
        }

        let tag_info = registry.resolve(directory_type, tag);
        if tag_info.is_offset {
            debug!(directory_type, tag = %tag_info, "stripping offset tag");
            continue;
        }

        let output_field = field
            .value()
            .and_then(|value| {
                OutputField::from_value(
                    tag_info,
                    field.field_type(),
                    &value,
                    byte_order,
                    Some(field.sort_hint()),
                )
            })
            .map_err(|source| WriteError::Field {
                directory_type,
                tag,
                source,
            })?;
        output.fields.push(output_field);
    }

    output.image_data = directory.image_data().cloned();
    output.jpeg_data = directory.jpeg_data().cloned();
    Ok(output)
}

/// Build the output set for `metadata` in `byte_order`.
///
/// Only the first directory of each type is kept.
pub fn build_output_set(metadata: &TiffMetadata, byte_order: ByteOrder) -> Result<OutputSet, WriteError> {
    let mut set = OutputSet::new(byte_order);

    for directory in metadata.directories() {
        if set.find_directory(directory.directory_type()).is_some() {
            debug!(
                directory = %directory.description(),
                "skipping duplicate directory"
            );
            continue;
        }
        let output = build_output_directory(directory, metadata.registry(), byte_order)?;
        set.add_directory(output)?;
    }

    debug!(
        directories = set.directories().len(),
        byte_order = %byte_order,
        "built output set"
    );
    Ok(set)
}

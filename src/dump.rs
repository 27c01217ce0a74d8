//! JSON interchange format for decoded metadata and built output sets.
//!
//! A byte-level TIFF decoder hands its result to this crate as a
//! [`MetadataDump`]; raw field bytes and payloads travel as hex strings so
//! the dump is exact regardless of field type.
//!
//! ```json
//! {
//!   "byte_order": "little",
//!   "directories": [
//!     {
//!       "type": 0,
//!       "fields": [
//!         { "tag": 271, "type": 2, "bytes": "43616e6f6e00" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{DumpError, TiffError};
use crate::format::tiff::{ByteOrder, FieldType, TagRegistry};
use crate::metadata::{
    Directory, Field, ImageData, JpegData, OutputDirectory, OutputField, OutputSet, TiffMetadata,
};

// =============================================================================
// Read Side
// =============================================================================

/// A decoded file: byte order plus directories in decode order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDump {
    pub byte_order: ByteOrder,
    pub directories: Vec<DirectoryDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryDump {
    #[serde(rename = "type")]
    pub directory_type: i32,

    #[serde(default)]
    pub fields: Vec<FieldDump>,

    /// Embedded JPEG, hex encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg: Option<String>,

    /// Strip buffers, hex encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strips: Option<Vec<String>>,

    /// Tile buffers, hex encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDump {
    pub tag: u16,

    /// Numeric TIFF field type (1 = BYTE ... 12 = DOUBLE)
    #[serde(rename = "type")]
    pub field_type: u16,

    /// Raw value bytes in the dump's byte order, hex encoded
    pub bytes: String,

    /// Defaults to the field's position in its directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_hint: Option<u32>,
}

impl MetadataDump {
    /// Parse a dump from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DumpError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dump file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot an aggregate.
    pub fn from_metadata(metadata: &TiffMetadata) -> Self {
        let directories = metadata
            .directories()
            .iter()
            .map(|directory| {
                let (strips, tiles) = payload_dump(directory.image_data());
                DirectoryDump {
                    directory_type: directory.directory_type(),
                    fields: directory
                        .fields()
                        .iter()
                        .map(|field| FieldDump {
                            tag: field.tag(),
                            field_type: field.field_type().as_u16(),
                            bytes: hex::encode(field.raw_bytes()),
                            sort_hint: Some(field.sort_hint()),
                        })
                        .collect(),
                    jpeg: directory.jpeg_data().map(|jpeg| hex::encode(jpeg.data())),
                    strips,
                    tiles,
                }
            })
            .collect();

        Self {
            byte_order: metadata.byte_order(),
            directories,
        }
    }

    /// Build the metadata aggregate, interpreting tags with `registry`.
    ///
    /// # Errors
    /// `Hex` for malformed hex strings, `Tiff(UnknownFieldType)` for a field
    /// type outside 1..=12.
    pub fn into_metadata(self, registry: Arc<TagRegistry>) -> Result<TiffMetadata, DumpError> {
        let byte_order = self.byte_order;
        let directories = self
            .directories
            .into_iter()
            .map(|directory| directory.into_directory(byte_order))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TiffMetadata::new(registry, byte_order, directories))
    }
}

impl DirectoryDump {
    fn into_directory(self, byte_order: ByteOrder) -> Result<Directory, DumpError> {
        let directory_type = self.directory_type;

        let fields = self
            .fields
            .into_iter()
            .enumerate()
            .map(|(position, field)| -> Result<Field, DumpError> {
                let field_type = FieldType::from_u16(field.field_type)
                    .ok_or(TiffError::UnknownFieldType(field.field_type))?;
                let raw = decode_hex(&field.bytes, || format!("tag 0x{:04X}", field.tag))?;
                let sort_hint = field.sort_hint.unwrap_or(position as u32);
                Ok(Field::new(field.tag, field_type, raw, byte_order, sort_hint))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut directory = Directory::new(directory_type, fields);

        // A directory is either tiled or stripped; tiles win if both are given
        let image_data = match (self.tiles, self.strips) {
            (Some(tiles), _) => Some(ImageData::Tiles(decode_elements(&tiles, directory_type, "tile")?)),
            (None, Some(strips)) => {
                Some(ImageData::Strips(decode_elements(&strips, directory_type, "strip")?))
            }
            (None, None) => None,
        };
        if let Some(image_data) = image_data {
            directory = directory.with_image_data(image_data);
        }

        if let Some(jpeg) = self.jpeg {
            let data = decode_hex(&jpeg, || format!("JPEG of directory {directory_type}"))?;
            directory = directory.with_jpeg_data(JpegData::new(data));
        }

        Ok(directory)
    }
}

fn decode_hex(text: &str, context: impl FnOnce() -> String) -> Result<Vec<u8>, DumpError> {
    hex::decode(text.trim()).map_err(|source| DumpError::Hex {
        context: context(),
        source,
    })
}

fn decode_elements(
    elements: &[String],
    directory_type: i32,
    kind: &str,
) -> Result<Vec<Bytes>, DumpError> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            decode_hex(element, || format!("{kind} {index} of directory {directory_type}"))
                .map(Bytes::from)
        })
        .collect()
}

fn payload_dump(image_data: Option<&ImageData>) -> (Option<Vec<String>>, Option<Vec<String>>) {
    match image_data {
        Some(ImageData::Strips(strips)) => (Some(strips.iter().map(hex::encode).collect()), None),
        Some(ImageData::Tiles(tiles)) => (None, Some(tiles.iter().map(hex::encode).collect())),
        None => (None, None),
    }
}

// =============================================================================
// Write Side
// =============================================================================

/// A built output set, fields in on-disk order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSetDump {
    pub byte_order: ByteOrder,
    pub directories: Vec<OutputDirectoryDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputDirectoryDump {
    #[serde(rename = "type")]
    pub directory_type: i32,
    pub name: String,
    pub fields: Vec<OutputFieldDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jpeg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFieldDump {
    pub tag: u16,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: u16,
    pub count: usize,
    pub bytes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_hint: Option<u32>,
}

impl From<&OutputSet> for OutputSetDump {
    fn from(set: &OutputSet) -> Self {
        Self {
            byte_order: set.byte_order(),
            directories: set.directories().iter().map(OutputDirectoryDump::from).collect(),
        }
    }
}

impl From<&OutputDirectory> for OutputDirectoryDump {
    fn from(directory: &OutputDirectory) -> Self {
        let (strips, tiles) = payload_dump(directory.image_data());
        Self {
            directory_type: directory.directory_type(),
            name: directory.description(),
            fields: directory
                .sorted_fields()
                .into_iter()
                .map(OutputFieldDump::from)
                .collect(),
            jpeg: directory.jpeg_data().map(|jpeg| hex::encode(jpeg.data())),
            strips,
            tiles,
        }
    }
}

impl From<&OutputField> for OutputFieldDump {
    fn from(field: &OutputField) -> Self {
        Self {
            tag: field.tag(),
            name: field.tag_info().name,
            field_type: field.field_type().as_u16(),
            count: field.count(),
            bytes: hex::encode(field.bytes()),
            sort_hint: field.sort_hint(),
        }
    }
}

impl OutputSetDump {
    pub fn to_json_pretty(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

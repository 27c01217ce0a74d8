//! The metadata of one decoded file.
//!
//! [`TiffMetadata`] owns every directory read from a file, in decode order,
//! and answers tag queries across them. Because many tag IDs are defined by
//! more than one directory type (image dimensions appear in IFD0 and in the
//! thumbnail IFD, 0x0001 is both a GPS and an Interop tag), lookups follow a
//! fixed precedence:
//!
//! 1. Directories whose type equals the tag's declared directory.
//! 2. For tags the registry defines in a single directory type only:
//!    directories of the same category (image vs. non-image).
//! 3. For tags with no declared directory: every directory.
//!
//! A tag declared for one directory type and defined by several never
//! widens past step 1.

use std::sync::Arc;

use tracing::trace;

use crate::error::{TiffError, WriteError};
use crate::format::tiff::{
    decode_gps_text, decode_xp_string, ByteOrder, DirectoryAffinity, FieldValue, Rational,
    SRational, TagInfo, TagRegistry,
};

use super::directory::Directory;
use super::field::Field;
use super::gps::{derive_gps, GpsInfo};
use super::output::{build_output_set, OutputSet};

/// Every directory of a decoded file plus the registry used to interpret it.
#[derive(Debug, Clone)]
pub struct TiffMetadata {
    registry: Arc<TagRegistry>,
    byte_order: ByteOrder,
    directories: Vec<Directory>,
}

impl TiffMetadata {
    /// Build the aggregate from directories in decode order.
    ///
    /// # Arguments
    /// * `byte_order` - byte order of the source file, the default target
    ///   when building an output set
    pub fn new(registry: Arc<TagRegistry>, byte_order: ByteOrder, directories: Vec<Directory>) -> Self {
        Self {
            registry,
            byte_order,
            directories,
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Directories in decode order.
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// Every field of every directory, in aggregate order.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.directories.iter().flat_map(|d| d.fields().iter())
    }

    /// First directory with the given type.
    pub fn find_directory(&self, directory_type: i32) -> Option<&Directory> {
        self.directories
            .iter()
            .find(|d| d.directory_type() == directory_type)
    }

    // =========================================================================
    // Tag Resolution
    // =========================================================================

    /// Resolve `tag` across all directories.
    ///
    /// # Arguments
    /// * `exact_directory_match` - only consider directories whose type is
    ///   exactly the tag's declared directory
    pub fn find_field(&self, tag: &TagInfo, exact_directory_match: bool) -> Option<&Field> {
        let tags_matching = self.registry.tags_matching(tag.tag);
        let declared = tag.directory;

        if exact_directory_match || declared != DirectoryAffinity::Any {
            let declared_type = declared.directory_type();
            if let Some(field) = self.scan(tag, |d| d.directory_type() == declared_type) {
                trace!(tag = %tag, directory_type = declared_type, "resolved in declared directory");
                return Some(field);
            }

            if exact_directory_match || tags_matching > 1 {
                trace!(tag = %tag, tags_matching, "not in declared directory, not widening");
                return None;
            }

            let image = declared.is_image_directory();
            if let Some(field) = self.scan(tag, |d| d.is_image_directory() == image) {
                trace!(tag = %tag, image, "resolved in same-category directory");
                return Some(field);
            }
        }

        let field = self.scan(tag, |_| true);
        if field.is_some() {
            trace!(tag = %tag, "resolved by unrestricted scan");
        }
        field
    }

    fn scan(&self, tag: &TagInfo, include: impl Fn(&Directory) -> bool) -> Option<&Field> {
        self.directories
            .iter()
            .filter(|d| include(d))
            .find_map(|d| d.find_field(tag))
    }

    // =========================================================================
    // Typed Accessors
    // =========================================================================
    //
    // A missing field and a field whose on-disk type the tag does not accept
    // both read as `None`. Only malformed bytes are errors.

    /// Decoded value of `tag`, whatever its type.
    pub fn field_value(&self, tag: &TagInfo) -> Result<Option<FieldValue>, TiffError> {
        self.find_field(tag, false).map(Field::value).transpose()
    }

    fn typed<T>(
        &self,
        tag: &TagInfo,
        extract: impl FnOnce(FieldValue) -> Option<T>,
    ) -> Result<Option<T>, TiffError> {
        let Some(field) = self.find_field(tag, false) else {
            return Ok(None);
        };
        if !tag.accepts(field.field_type()) {
            trace!(tag = %tag, field_type = %field.field_type(), "field type not accepted by tag");
            return Ok(None);
        }
        Ok(extract(field.value()?))
    }

    /// BYTE (or UNDEFINED) values.
    pub fn byte_values(&self, tag: &TagInfo) -> Result<Option<Vec<u8>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Bytes(v) | FieldValue::Undefined(v) => Some(v),
            _ => None,
        })
    }

    /// ASCII strings.
    pub fn ascii_values(&self, tag: &TagInfo) -> Result<Option<Vec<String>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Ascii(v) => Some(v),
            _ => None,
        })
    }

    pub fn short_values(&self, tag: &TagInfo) -> Result<Option<Vec<u16>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Shorts(v) => Some(v),
            _ => None,
        })
    }

    pub fn long_values(&self, tag: &TagInfo) -> Result<Option<Vec<u32>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Longs(v) => Some(v),
            _ => None,
        })
    }

    pub fn rational_values(&self, tag: &TagInfo) -> Result<Option<Vec<Rational>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Rationals(v) => Some(v),
            _ => None,
        })
    }

    pub fn sbyte_values(&self, tag: &TagInfo) -> Result<Option<Vec<i8>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::SBytes(v) => Some(v),
            _ => None,
        })
    }

    pub fn sshort_values(&self, tag: &TagInfo) -> Result<Option<Vec<i16>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::SShorts(v) => Some(v),
            _ => None,
        })
    }

    pub fn slong_values(&self, tag: &TagInfo) -> Result<Option<Vec<i32>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::SLongs(v) => Some(v),
            _ => None,
        })
    }

    pub fn srational_values(&self, tag: &TagInfo) -> Result<Option<Vec<SRational>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::SRationals(v) => Some(v),
            _ => None,
        })
    }

    pub fn float_values(&self, tag: &TagInfo) -> Result<Option<Vec<f32>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Floats(v) => Some(v),
            _ => None,
        })
    }

    pub fn double_values(&self, tag: &TagInfo) -> Result<Option<Vec<f64>>, TiffError> {
        self.typed(tag, |value| match value {
            FieldValue::Doubles(v) => Some(v),
            _ => None,
        })
    }

    /// EXIF encoded text. Decoded without checking accepted types.
    pub fn gps_text_value(&self, tag: &TagInfo) -> Result<Option<String>, TiffError> {
        self.find_field(tag, false)
            .map(|field| {
                decode_gps_text(
                    tag.name,
                    field.field_type(),
                    field.raw_bytes(),
                    field.byte_order(),
                )
            })
            .transpose()
    }

    /// Windows XP string. Decoded without checking accepted types.
    pub fn xp_string_value(&self, tag: &TagInfo) -> Result<Option<String>, TiffError> {
        self.find_field(tag, false)
            .map(|field| decode_xp_string(tag.name, field.field_type(), field.raw_bytes()))
            .transpose()
    }

    // =========================================================================
    // Derived Data
    // =========================================================================

    /// GPS position, if the file has a complete GPS block.
    pub fn gps(&self) -> Result<Option<GpsInfo>, TiffError> {
        derive_gps(self)
    }

    /// Clean output set in the source byte order.
    pub fn output_set(&self) -> Result<OutputSet, WriteError> {
        build_output_set(self, self.byte_order)
    }
}

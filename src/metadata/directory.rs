use std::fmt;

use bytes::Bytes;

use crate::format::tiff::{directory_type_name, TagInfo};

use super::field::Field;

/// Raster payload referenced by an image directory.
///
/// Pixel data is opaque at this level: the payload is carried from the
/// read model to the output set untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Strip-organized image, one buffer per strip
    Strips(Vec<Bytes>),

    /// Tile-organized image, one buffer per tile
    Tiles(Vec<Bytes>),
}

impl ImageData {
    /// The strip or tile buffers.
    pub fn elements(&self) -> &[Bytes] {
        match self {
            ImageData::Strips(elements) | ImageData::Tiles(elements) => elements,
        }
    }

    pub fn is_tiled(&self) -> bool {
        matches!(self, ImageData::Tiles(_))
    }
}

/// Embedded JPEG stream (typically an EXIF thumbnail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegData(Bytes);

impl JpegData {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn data(&self) -> &Bytes {
        &self.0
    }
}

/// One image file directory: its fields and optional embedded images.
///
/// Fields keep their on-disk order. Tag uniqueness is not enforced here;
/// a repeated tag is a writer defect and lookups return the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    directory_type: i32,
    fields: Vec<Field>,
    image_data: Option<ImageData>,
    jpeg_data: Option<JpegData>,
}

impl Directory {
    pub fn new(directory_type: i32, fields: Vec<Field>) -> Self {
        Self {
            directory_type,
            fields,
            image_data: None,
            jpeg_data: None,
        }
    }

    /// Attach a raster payload.
    pub fn with_image_data(mut self, image_data: ImageData) -> Self {
        self.image_data = Some(image_data);
        self
    }

    /// Attach an embedded JPEG.
    pub fn with_jpeg_data(mut self, jpeg_data: JpegData) -> Self {
        self.jpeg_data = Some(jpeg_data);
        self
    }

    #[inline]
    pub fn directory_type(&self) -> i32 {
        self.directory_type
    }

    /// Image directories have a non-negative type.
    #[inline]
    pub fn is_image_directory(&self) -> bool {
        self.directory_type >= 0
    }

    /// First field whose tag ID matches `tag`.
    pub fn find_field(&self, tag: &TagInfo) -> Option<&Field> {
        self.find_field_by_id(tag.tag)
    }

    /// First field with the numeric tag ID `tag`.
    pub fn find_field_by_id(&self, tag: u16) -> Option<&Field> {
        self.fields.iter().find(|field| field.tag() == tag)
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn image_data(&self) -> Option<&ImageData> {
        self.image_data.as_ref()
    }

    pub fn jpeg_data(&self) -> Option<&JpegData> {
        self.jpeg_data.as_ref()
    }

    /// Name of the directory type ("Root", "Gps", "IFD2", ...).
    pub fn description(&self) -> String {
        directory_type_name(self.directory_type)
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.description())?;
        if self.image_data.is_some() {
            f.write_str(" (tiffImageData)")?;
        }
        if self.jpeg_data.is_some() {
            f.write_str(" (jpegImageData)")?;
        }
        write!(f, " {} fields", self.fields.len())
    }
}

//! TIFF field types, directory types and tag descriptors.
//!
//! This module defines the vocabulary for metadata handling:
//! - Field types that determine how raw values are encoded
//! - Directory types that distinguish image IFDs from EXIF/GPS/Interop IFDs
//! - Tag descriptors (`TagInfo`) carrying the per-tag rules the lookup and
//!   output code relies on
//! - A catalogue of well-known TIFF, EXIF, GPS and Interop tags

use std::fmt;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Each field type has a fixed element size, which is how the element count
/// of an output field is derived from its encoded byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL-terminated strings (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two LONGs: numerator, denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SByte = 6,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two SLONGs: numerator, denominator (8 bytes)
    SRational = 10,

    /// IEEE single precision float (4 bytes)
    Float = 11,

    /// IEEE double precision float (8 bytes)
    Double = 12,
}

impl FieldType {
    /// Every classic TIFF field type, in numeric order.
    pub const ALL: &'static [FieldType] = &[
        FieldType::Byte,
        FieldType::Ascii,
        FieldType::Short,
        FieldType::Long,
        FieldType::Rational,
        FieldType::SByte,
        FieldType::Undefined,
        FieldType::SShort,
        FieldType::SLong,
        FieldType::SRational,
        FieldType::Float,
        FieldType::Double,
    ];

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Get the numeric type ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Upper-case TIFF type name (`SHORT`, `RATIONAL`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Directory Types
// =============================================================================
//
// Non-negative values are image directories (IFD0, IFD1, ...), negative
// values are metadata directories reached through an offset tag.

/// Directory type used when a tag does not declare a directory.
pub const DIRECTORY_TYPE_UNKNOWN: i32 = -1;

/// Primary image directory (IFD0).
pub const DIRECTORY_TYPE_ROOT: i32 = 0;

/// Thumbnail directory (IFD1).
pub const DIRECTORY_TYPE_THUMBNAIL: i32 = 1;

/// Third image directory (IFD2).
pub const DIRECTORY_TYPE_IFD2: i32 = 2;

/// Fourth image directory (IFD3).
pub const DIRECTORY_TYPE_IFD3: i32 = 3;

/// EXIF sub-directory.
pub const DIRECTORY_TYPE_EXIF: i32 = -2;

/// GPS sub-directory.
pub const DIRECTORY_TYPE_GPS: i32 = -3;

/// Interoperability sub-directory.
pub const DIRECTORY_TYPE_INTEROPERABILITY: i32 = -4;

/// Maker notes sub-directory.
pub const DIRECTORY_TYPE_MAKER_NOTES: i32 = -5;

/// Human-readable name of a directory type.
pub fn directory_type_name(directory_type: i32) -> String {
    match directory_type {
        DIRECTORY_TYPE_ROOT => "Root".to_string(),
        DIRECTORY_TYPE_THUMBNAIL => "Thumbnail".to_string(),
        DIRECTORY_TYPE_EXIF => "Exif".to_string(),
        DIRECTORY_TYPE_GPS => "Gps".to_string(),
        DIRECTORY_TYPE_INTEROPERABILITY => "Interoperability".to_string(),
        DIRECTORY_TYPE_MAKER_NOTES => "Maker Notes".to_string(),
        DIRECTORY_TYPE_UNKNOWN => "Unknown".to_string(),
        n if n >= 0 => format!("IFD{n}"),
        n => format!("Bad Type ({n})"),
    }
}

/// The directory a tag is declared to live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryAffinity {
    /// The tag may appear in any directory
    Any,

    /// The tag belongs to directories of exactly this type
    Exact(i32),
}

impl DirectoryAffinity {
    /// Directory type compared against during exact-match lookups.
    ///
    /// `Any` maps to [`DIRECTORY_TYPE_UNKNOWN`].
    #[inline]
    pub const fn directory_type(self) -> i32 {
        match self {
            DirectoryAffinity::Any => DIRECTORY_TYPE_UNKNOWN,
            DirectoryAffinity::Exact(directory_type) => directory_type,
        }
    }

    /// Whether the declared directory is an image directory.
    #[inline]
    pub const fn is_image_directory(self) -> bool {
        match self {
            DirectoryAffinity::Any => false,
            DirectoryAffinity::Exact(directory_type) => directory_type >= 0,
        }
    }
}

// =============================================================================
// Tag Descriptors
// =============================================================================

/// How a tag's value is turned into text, when it is text at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Decoded purely from the field type
    Plain,

    /// EXIF/GPS text with an 8-byte character code prefix
    GpsText,

    /// Windows XP string (UTF-16LE stored as BYTE)
    XpString,
}

/// Static description of one tag number in one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagInfo {
    /// Display name
    pub name: &'static str,

    /// Numeric tag ID
    pub tag: u16,

    /// On-disk types this tag accepts
    pub data_types: &'static [FieldType],

    /// Directory the tag is declared in
    pub directory: DirectoryAffinity,

    /// Value is a file-relative pointer and must never be copied verbatim
    pub is_offset: bool,

    /// Text decoding rule
    pub kind: TagKind,
}

impl TagInfo {
    /// Create a plain, non-offset tag descriptor.
    pub const fn new(
        name: &'static str,
        tag: u16,
        data_types: &'static [FieldType],
        directory: DirectoryAffinity,
    ) -> Self {
        Self {
            name,
            tag,
            data_types,
            directory,
            is_offset: false,
            kind: TagKind::Plain,
        }
    }

    /// Mark this tag as an offset tag.
    pub const fn offset(mut self) -> Self {
        self.is_offset = true;
        self
    }

    /// Set the text decoding rule.
    pub const fn with_kind(mut self, kind: TagKind) -> Self {
        self.kind = kind;
        self
    }

    /// Descriptor for a tag the registry knows nothing about.
    ///
    /// Accepts every field type and may appear in any directory.
    pub const fn unknown(tag: u16) -> Self {
        Self::new("Unknown Tag", tag, FieldType::ALL, DirectoryAffinity::Any)
    }

    /// Whether `field_type` is among the accepted on-disk types.
    #[inline]
    pub fn accepts(&self, field_type: FieldType) -> bool {
        self.data_types.contains(&field_type)
    }
}

impl fmt::Display for TagInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name, self.tag)
    }
}

// =============================================================================
// Well-Known Tags
// =============================================================================

const BYTE: &[FieldType] = &[FieldType::Byte];
const ASCII: &[FieldType] = &[FieldType::Ascii];
const SHORT: &[FieldType] = &[FieldType::Short];
const LONG: &[FieldType] = &[FieldType::Long];
const SHORT_OR_LONG: &[FieldType] = &[FieldType::Short, FieldType::Long];
const RATIONAL: &[FieldType] = &[FieldType::Rational];
const SRATIONAL: &[FieldType] = &[FieldType::SRational];
const SLONG: &[FieldType] = &[FieldType::SLong];
const UNDEFINED: &[FieldType] = &[FieldType::Undefined];
const DOUBLE: &[FieldType] = &[FieldType::Double];
const GPS_TEXT: &[FieldType] = &[FieldType::Undefined, FieldType::Ascii];

const ROOT: DirectoryAffinity = DirectoryAffinity::Exact(DIRECTORY_TYPE_ROOT);
const THUMBNAIL: DirectoryAffinity = DirectoryAffinity::Exact(DIRECTORY_TYPE_THUMBNAIL);
const EXIF: DirectoryAffinity = DirectoryAffinity::Exact(DIRECTORY_TYPE_EXIF);
const GPS: DirectoryAffinity = DirectoryAffinity::Exact(DIRECTORY_TYPE_GPS);
const INTEROP: DirectoryAffinity = DirectoryAffinity::Exact(DIRECTORY_TYPE_INTEROPERABILITY);

// Baseline TIFF (IFD0)
pub const NEW_SUBFILE_TYPE: TagInfo = TagInfo::new("NewSubfileType", 0x00FE, LONG, ROOT);
pub const IMAGE_WIDTH: TagInfo = TagInfo::new("ImageWidth", 0x0100, SHORT_OR_LONG, ROOT);
pub const IMAGE_LENGTH: TagInfo = TagInfo::new("ImageLength", 0x0101, SHORT_OR_LONG, ROOT);
pub const BITS_PER_SAMPLE: TagInfo = TagInfo::new("BitsPerSample", 0x0102, SHORT, ROOT);
pub const COMPRESSION: TagInfo = TagInfo::new("Compression", 0x0103, SHORT, ROOT);
pub const PHOTOMETRIC_INTERPRETATION: TagInfo =
    TagInfo::new("PhotometricInterpretation", 0x0106, SHORT, ROOT);
pub const IMAGE_DESCRIPTION: TagInfo = TagInfo::new("ImageDescription", 0x010E, ASCII, ROOT);
pub const MAKE: TagInfo = TagInfo::new("Make", 0x010F, ASCII, ROOT);
pub const MODEL: TagInfo = TagInfo::new("Model", 0x0110, ASCII, ROOT);
pub const STRIP_OFFSETS: TagInfo =
    TagInfo::new("StripOffsets", 0x0111, SHORT_OR_LONG, ROOT).offset();
pub const ORIENTATION: TagInfo = TagInfo::new("Orientation", 0x0112, SHORT, ROOT);
pub const SAMPLES_PER_PIXEL: TagInfo = TagInfo::new("SamplesPerPixel", 0x0115, SHORT, ROOT);
pub const ROWS_PER_STRIP: TagInfo = TagInfo::new("RowsPerStrip", 0x0116, SHORT_OR_LONG, ROOT);
pub const STRIP_BYTE_COUNTS: TagInfo =
    TagInfo::new("StripByteCounts", 0x0117, SHORT_OR_LONG, ROOT);
pub const X_RESOLUTION: TagInfo = TagInfo::new("XResolution", 0x011A, RATIONAL, ROOT);
pub const Y_RESOLUTION: TagInfo = TagInfo::new("YResolution", 0x011B, RATIONAL, ROOT);
pub const PLANAR_CONFIGURATION: TagInfo =
    TagInfo::new("PlanarConfiguration", 0x011C, SHORT, ROOT);
pub const RESOLUTION_UNIT: TagInfo = TagInfo::new("ResolutionUnit", 0x0128, SHORT, ROOT);
pub const SOFTWARE: TagInfo = TagInfo::new("Software", 0x0131, ASCII, ROOT);
pub const DATE_TIME: TagInfo = TagInfo::new("DateTime", 0x0132, ASCII, ROOT);
pub const ARTIST: TagInfo = TagInfo::new("Artist", 0x013B, ASCII, ROOT);
pub const TILE_WIDTH: TagInfo = TagInfo::new("TileWidth", 0x0142, SHORT_OR_LONG, ROOT);
pub const TILE_LENGTH: TagInfo = TagInfo::new("TileLength", 0x0143, SHORT_OR_LONG, ROOT);
pub const TILE_OFFSETS: TagInfo = TagInfo::new("TileOffsets", 0x0144, LONG, ROOT).offset();
pub const TILE_BYTE_COUNTS: TagInfo =
    TagInfo::new("TileByteCounts", 0x0145, SHORT_OR_LONG, ROOT);
pub const SUB_IFDS: TagInfo = TagInfo::new("SubIFDs", 0x014A, LONG, ROOT).offset();
pub const YCBCR_POSITIONING: TagInfo = TagInfo::new("YCbCrPositioning", 0x0213, SHORT, ROOT);
pub const COPYRIGHT: TagInfo = TagInfo::new("Copyright", 0x8298, ASCII, ROOT);
pub const MODEL_PIXEL_SCALE: TagInfo = TagInfo::new("ModelPixelScaleTag", 0x830E, DOUBLE, ROOT);
pub const EXIF_OFFSET: TagInfo = TagInfo::new("ExifOffset", 0x8769, LONG, ROOT).offset();
pub const GPS_INFO: TagInfo = TagInfo::new("GPSInfo", 0x8825, LONG, ROOT).offset();
pub const XP_TITLE: TagInfo =
    TagInfo::new("XPTitle", 0x9C9B, BYTE, ROOT).with_kind(TagKind::XpString);
pub const XP_COMMENT: TagInfo =
    TagInfo::new("XPComment", 0x9C9C, BYTE, ROOT).with_kind(TagKind::XpString);
pub const XP_AUTHOR: TagInfo =
    TagInfo::new("XPAuthor", 0x9C9D, BYTE, ROOT).with_kind(TagKind::XpString);
pub const XP_KEYWORDS: TagInfo =
    TagInfo::new("XPKeywords", 0x9C9E, BYTE, ROOT).with_kind(TagKind::XpString);

// Thumbnail (IFD1)
pub const THUMBNAIL_IMAGE_WIDTH: TagInfo =
    TagInfo::new("ThumbnailImageWidth", 0x0100, SHORT_OR_LONG, THUMBNAIL);
pub const THUMBNAIL_IMAGE_LENGTH: TagInfo =
    TagInfo::new("ThumbnailImageLength", 0x0101, SHORT_OR_LONG, THUMBNAIL);
pub const JPEG_INTERCHANGE_FORMAT: TagInfo =
    TagInfo::new("JPEGInterchangeFormat", 0x0201, LONG, THUMBNAIL).offset();
pub const JPEG_INTERCHANGE_FORMAT_LENGTH: TagInfo =
    TagInfo::new("JPEGInterchangeFormatLength", 0x0202, LONG, THUMBNAIL);

// EXIF
pub const EXPOSURE_TIME: TagInfo = TagInfo::new("ExposureTime", 0x829A, RATIONAL, EXIF);
pub const F_NUMBER: TagInfo = TagInfo::new("FNumber", 0x829D, RATIONAL, EXIF);
pub const EXPOSURE_PROGRAM: TagInfo = TagInfo::new("ExposureProgram", 0x8822, SHORT, EXIF);
pub const ISO: TagInfo = TagInfo::new("ISO", 0x8827, SHORT, EXIF);
pub const EXIF_VERSION: TagInfo = TagInfo::new("ExifVersion", 0x9000, UNDEFINED, EXIF);
pub const DATE_TIME_ORIGINAL: TagInfo = TagInfo::new("DateTimeOriginal", 0x9003, ASCII, EXIF);
pub const DATE_TIME_DIGITIZED: TagInfo = TagInfo::new("DateTimeDigitized", 0x9004, ASCII, EXIF);
pub const SHUTTER_SPEED_VALUE: TagInfo =
    TagInfo::new("ShutterSpeedValue", 0x9201, SRATIONAL, EXIF);
pub const APERTURE_VALUE: TagInfo = TagInfo::new("ApertureValue", 0x9202, RATIONAL, EXIF);
pub const EXPOSURE_COMPENSATION: TagInfo =
    TagInfo::new("ExposureCompensation", 0x9204, SRATIONAL, EXIF);
pub const METERING_MODE: TagInfo = TagInfo::new("MeteringMode", 0x9207, SHORT, EXIF);
pub const FLASH: TagInfo = TagInfo::new("Flash", 0x9209, SHORT, EXIF);
pub const FOCAL_LENGTH: TagInfo = TagInfo::new("FocalLength", 0x920A, RATIONAL, EXIF);
pub const MAKER_NOTE: TagInfo = TagInfo::new("MakerNote", 0x927C, UNDEFINED, EXIF);
pub const USER_COMMENT: TagInfo =
    TagInfo::new("UserComment", 0x9286, UNDEFINED, EXIF).with_kind(TagKind::GpsText);
pub const COLOR_SPACE: TagInfo = TagInfo::new("ColorSpace", 0xA001, SHORT, EXIF);
pub const EXIF_IMAGE_WIDTH: TagInfo =
    TagInfo::new("ExifImageWidth", 0xA002, SHORT_OR_LONG, EXIF);
pub const EXIF_IMAGE_LENGTH: TagInfo =
    TagInfo::new("ExifImageLength", 0xA003, SHORT_OR_LONG, EXIF);
pub const INTEROP_OFFSET: TagInfo = TagInfo::new("InteropOffset", 0xA005, LONG, EXIF).offset();
pub const LENS_MODEL: TagInfo = TagInfo::new("LensModel", 0xA434, ASCII, EXIF);

// Tags that may appear in any directory
pub const PADDING: TagInfo = TagInfo::new("Padding", 0xEA1C, UNDEFINED, DirectoryAffinity::Any);
pub const OFFSET_SCHEMA: TagInfo =
    TagInfo::new("OffsetSchema", 0xEA1D, SLONG, DirectoryAffinity::Any);

// GPS
pub const GPS_VERSION_ID: TagInfo = TagInfo::new("GPSVersionID", 0x0000, BYTE, GPS);
pub const GPS_LATITUDE_REF: TagInfo = TagInfo::new("GPSLatitudeRef", 0x0001, ASCII, GPS);
pub const GPS_LATITUDE: TagInfo = TagInfo::new("GPSLatitude", 0x0002, RATIONAL, GPS);
pub const GPS_LONGITUDE_REF: TagInfo = TagInfo::new("GPSLongitudeRef", 0x0003, ASCII, GPS);
pub const GPS_LONGITUDE: TagInfo = TagInfo::new("GPSLongitude", 0x0004, RATIONAL, GPS);
pub const GPS_ALTITUDE_REF: TagInfo = TagInfo::new("GPSAltitudeRef", 0x0005, BYTE, GPS);
pub const GPS_ALTITUDE: TagInfo = TagInfo::new("GPSAltitude", 0x0006, RATIONAL, GPS);
pub const GPS_TIME_STAMP: TagInfo = TagInfo::new("GPSTimeStamp", 0x0007, RATIONAL, GPS);
pub const GPS_SATELLITES: TagInfo = TagInfo::new("GPSSatellites", 0x0008, ASCII, GPS);
pub const GPS_MAP_DATUM: TagInfo = TagInfo::new("GPSMapDatum", 0x0012, ASCII, GPS);
pub const GPS_PROCESSING_METHOD: TagInfo =
    TagInfo::new("GPSProcessingMethod", 0x001B, GPS_TEXT, GPS).with_kind(TagKind::GpsText);
pub const GPS_AREA_INFORMATION: TagInfo =
    TagInfo::new("GPSAreaInformation", 0x001C, GPS_TEXT, GPS).with_kind(TagKind::GpsText);
pub const GPS_DATE_STAMP: TagInfo = TagInfo::new("GPSDateStamp", 0x001D, ASCII, GPS);

// Interoperability
pub const INTEROP_INDEX: TagInfo = TagInfo::new("InteropIndex", 0x0001, ASCII, INTEROP);
pub const INTEROP_VERSION: TagInfo = TagInfo::new("InteropVersion", 0x0002, UNDEFINED, INTEROP);

/// Every tag in the well-known catalogue.
pub const STANDARD_TAGS: &[TagInfo] = &[
    NEW_SUBFILE_TYPE,
    IMAGE_WIDTH,
    IMAGE_LENGTH,
    BITS_PER_SAMPLE,
    COMPRESSION,
    PHOTOMETRIC_INTERPRETATION,
    IMAGE_DESCRIPTION,
    MAKE,
    MODEL,
    STRIP_OFFSETS,
    ORIENTATION,
    SAMPLES_PER_PIXEL,
    ROWS_PER_STRIP,
    STRIP_BYTE_COUNTS,
    X_RESOLUTION,
    Y_RESOLUTION,
    PLANAR_CONFIGURATION,
    RESOLUTION_UNIT,
    SOFTWARE,
    DATE_TIME,
    ARTIST,
    TILE_WIDTH,
    TILE_LENGTH,
    TILE_OFFSETS,
    TILE_BYTE_COUNTS,
    SUB_IFDS,
    YCBCR_POSITIONING,
    COPYRIGHT,
    MODEL_PIXEL_SCALE,
    EXIF_OFFSET,
    GPS_INFO,
    XP_TITLE,
    XP_COMMENT,
    XP_AUTHOR,
    XP_KEYWORDS,
    THUMBNAIL_IMAGE_WIDTH,
    THUMBNAIL_IMAGE_LENGTH,
    JPEG_INTERCHANGE_FORMAT,
    JPEG_INTERCHANGE_FORMAT_LENGTH,
    EXPOSURE_TIME,
    F_NUMBER,
    EXPOSURE_PROGRAM,
    ISO,
    EXIF_VERSION,
    DATE_TIME_ORIGINAL,
    DATE_TIME_DIGITIZED,
    SHUTTER_SPEED_VALUE,
    APERTURE_VALUE,
    EXPOSURE_COMPENSATION,
    METERING_MODE,
    FLASH,
    FOCAL_LENGTH,
    MAKER_NOTE,
    USER_COMMENT,
    COLOR_SPACE,
    EXIF_IMAGE_WIDTH,
    EXIF_IMAGE_LENGTH,
    INTEROP_OFFSET,
    LENS_MODEL,
    PADDING,
    OFFSET_SCHEMA,
    GPS_VERSION_ID,
    GPS_LATITUDE_REF,
    GPS_LATITUDE,
    GPS_LONGITUDE_REF,
    GPS_LONGITUDE,
    GPS_ALTITUDE_REF,
    GPS_ALTITUDE,
    GPS_TIME_STAMP,
    GPS_SATELLITES,
    GPS_MAP_DATUM,
    GPS_PROCESSING_METHOD,
    GPS_AREA_INFORMATION,
    GPS_DATE_STAMP,
    INTEROP_INDEX,
    INTEROP_VERSION,
];

// =============================================================================
// Tests
// =============================================================================

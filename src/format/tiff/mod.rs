//! TIFF vocabulary and value codecs.
//!
//! This module holds everything the metadata model needs to interpret raw
//! field bytes, independent of where those bytes came from.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. Every field keeps the order it was read
//!   with; output sets may re-encode in either order.
//!
//! - **Field types**: the on-disk encoding of a value (BYTE, ASCII, SHORT,
//!   RATIONAL, ...). A field's type decides how its raw bytes decode.
//!
//! - **Tag registry**: maps a numeric tag to the descriptors that define it,
//!   including the directory it belongs to and whether it is an offset that
//!   must never be copied verbatim.

mod byte_order;
mod registry;
pub mod tags;
mod text;
mod values;

pub use byte_order::ByteOrder;
pub use registry::TagRegistry;
pub use tags::{
    directory_type_name, DirectoryAffinity, FieldType, TagInfo, TagKind, DIRECTORY_TYPE_EXIF,
    DIRECTORY_TYPE_GPS, DIRECTORY_TYPE_IFD2, DIRECTORY_TYPE_IFD3,
    DIRECTORY_TYPE_INTEROPERABILITY, DIRECTORY_TYPE_MAKER_NOTES, DIRECTORY_TYPE_ROOT,
    DIRECTORY_TYPE_THUMBNAIL, DIRECTORY_TYPE_UNKNOWN,
};
pub use text::{decode_gps_text, decode_xp_string};
pub use values::{FieldValue, Rational, SRational};

//! # tiff-metadata
//!
//! The directory/field metadata layer of a TIFF/EXIF codec.
//!
//! A TIFF file is a chain of image file directories (IFDs): the primary
//! image, a thumbnail, and the EXIF, GPS and Interoperability sub-directories
//! hanging off them. This crate models the decoded directories and fields,
//! answers tag queries across them, and prepares a clean directory set for
//! re-encoding.
//!
//! ## Features
//!
//! - **Multi-directory tag resolution**: tags are looked up in their declared
//!   directory first, then in directories of the same category when the tag
//!   ID is unambiguous, then everywhere for directory-agnostic tags
//! - **Typed accessors**: one per field type; a field with an unexpected
//!   on-disk type reads as absent rather than failing
//! - **Output sets**: duplicate tags and directories collapsed, offset tags
//!   stripped, values re-encoded to a target byte order
//! - **GPS derivation**: degrees/minutes/seconds plus hemisphere references
//!   converted to decimal coordinates
//!
//! ## Architecture
//!
//! - [`mod@format`] - Byte order, field types, tag catalogue and registry, value codecs
//! - [`metadata`] - Fields, directories, the metadata aggregate and output sets
//! - [`dump`] - JSON interchange format used by the command-line tool
//! - [`io`] - Endian-aware integer helpers
//! - [`config`] - CLI types
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tiff_metadata::format::tiff::tags::MAKE;
//! use tiff_metadata::{ByteOrder, Directory, Field, FieldType, TagRegistry, TiffMetadata};
//!
//! let make = Field::new(MAKE.tag, FieldType::Ascii, &b"Canon\0"[..], ByteOrder::LittleEndian, 0);
//! let metadata = TiffMetadata::new(
//!     Arc::new(TagRegistry::standard()),
//!     ByteOrder::LittleEndian,
//!     vec![Directory::new(0, vec![make])],
//! );
//!
//! assert_eq!(
//!     metadata.ascii_values(&MAKE).unwrap(),
//!     Some(vec!["Canon".to_string()])
//! );
//! ```

pub mod config;
pub mod dump;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;

// Re-export commonly used types
pub use dump::{MetadataDump, OutputSetDump};
pub use error::{DumpError, TiffError, WriteError};
pub use format::tiff::{
    directory_type_name, ByteOrder, DirectoryAffinity, FieldType, FieldValue, Rational,
    SRational, TagInfo, TagKind, TagRegistry, DIRECTORY_TYPE_EXIF, DIRECTORY_TYPE_GPS,
    DIRECTORY_TYPE_INTEROPERABILITY, DIRECTORY_TYPE_ROOT, DIRECTORY_TYPE_THUMBNAIL,
};
pub use metadata::{
    build_output_directory, build_output_set, derive_gps, Directory, Field, GpsInfo, ImageData,
    JpegData, OutputDirectory, OutputField, OutputSet, TiffMetadata,
};

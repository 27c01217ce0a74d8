//! Directory and field model for decoded TIFF/EXIF metadata.
//!
//! The read side is a [`TiffMetadata`] holding [`Directory`] values, each a
//! list of [`Field`]s with their raw bytes. Lookups resolve tags across
//! directories and decode values on demand.
//!
//! The write side is an [`OutputSet`] built from the read side for a target
//! byte order: duplicate tags and directories are collapsed and offset
//! tags are removed, ready for a byte-level encoder.

mod aggregate;
mod directory;
mod field;
mod gps;
mod output;

pub use aggregate::TiffMetadata;
pub use directory::{Directory, ImageData, JpegData};
pub use field::Field;
pub use gps::{derive_gps, GpsInfo};
pub use output::{
    build_output_directory, build_output_set, OutputDirectory, OutputField, OutputSet,
};

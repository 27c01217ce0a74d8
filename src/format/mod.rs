//! Format-level building blocks.
//!
//! The [`tiff`] module defines field types, byte order, the tag registry and
//! the codecs that turn raw field bytes into typed values and back.

pub mod tiff;

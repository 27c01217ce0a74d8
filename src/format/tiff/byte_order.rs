//! Byte order handling.
//!
//! TIFF files declare their endianness in the first two bytes of the header
//! (`II` = little-endian, `MM` = big-endian). Every field keeps the order it
//! was read with; output sets may target either order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::{
    read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le, write_u16_be,
    write_u16_le, write_u32_be, write_u32_le, write_u64_be, write_u64_le,
};

/// Byte order (endianness) of field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    #[serde(rename = "little")]
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    #[serde(rename = "big")]
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }

    /// Append a u16 using this byte order.
    #[inline]
    pub fn write_u16(self, out: &mut Vec<u8>, value: u16) {
        match self {
            ByteOrder::LittleEndian => write_u16_le(out, value),
            ByteOrder::BigEndian => write_u16_be(out, value),
        }
    }

    /// Append a u32 using this byte order.
    #[inline]
    pub fn write_u32(self, out: &mut Vec<u8>, value: u32) {
        match self {
            ByteOrder::LittleEndian => write_u32_le(out, value),
            ByteOrder::BigEndian => write_u32_be(out, value),
        }
    }

    /// Append a u64 using this byte order.
    #[inline]
    pub fn write_u64(self, out: &mut Vec<u8>, value: u64) {
        match self {
            ByteOrder::LittleEndian => write_u64_le(out, value),
            ByteOrder::BigEndian => write_u64_be(out, value),
        }
    }

    /// Short name used on the command line and in dumps.
    pub const fn name(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "little",
            ByteOrder::BigEndian => "big",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "ii" | "intel" => Ok(ByteOrder::LittleEndian),
            "big" | "be" | "mm" | "motorola" => Ok(ByteOrder::BigEndian),
            other => Err(format!(
                "unknown byte order '{other}' (expected 'little' or 'big')"
            )),
        }
    }
}

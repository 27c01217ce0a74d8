//! Endian-aware integer helpers shared by the byte order codec.

mod endian;

pub use endian::{
    read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le, write_u16_be,
    write_u16_le, write_u32_be, write_u32_le, write_u64_be, write_u64_le,
};

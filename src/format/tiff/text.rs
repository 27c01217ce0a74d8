//! Specialized text decoders.
//!
//! Two tag families store text in ways the plain ASCII type cannot express:
//!
//! - EXIF "encoded text" (GPSProcessingMethod, GPSAreaInformation,
//!   UserComment) is stored as UNDEFINED bytes whose first 8 bytes name the
//!   character code.
//! - Windows XP tags (XPTitle, XPComment, ...) are UTF-16LE strings stored
//!   as BYTE arrays.
//!
//! These decoders work on raw bytes directly and do not consult the tag's
//! accepted types.

use crate::error::TiffError;

use super::byte_order::ByteOrder;
use super::tags::FieldType;

/// Length of the character code prefix of EXIF encoded text.
const CHARACTER_CODE_LEN: usize = 8;

const CODE_ASCII: &[u8; CHARACTER_CODE_LEN] = b"ASCII\0\0\0";
const CODE_JIS: &[u8; CHARACTER_CODE_LEN] = b"JIS\0\0\0\0\0";
const CODE_UNICODE: &[u8; CHARACTER_CODE_LEN] = b"UNICODE\0";
const CODE_UNDEFINED: &[u8; CHARACTER_CODE_LEN] = &[0; CHARACTER_CODE_LEN];

/// Decode EXIF encoded text.
///
/// ASCII fields decode as their first string. BYTE and UNDEFINED fields are
/// decoded by their character code prefix; UNICODE text uses the field's
/// byte order. Unknown or missing prefixes decode the whole buffer as text.
pub fn decode_gps_text(
    tag: &'static str,
    field_type: FieldType,
    bytes: &[u8],
    byte_order: ByteOrder,
) -> Result<String, TiffError> {
    match field_type {
        FieldType::Ascii => {
            let text = bytes.split(|&b| b == 0).next().unwrap_or(&[]);
            Ok(latin1(text))
        }
        FieldType::Undefined | FieldType::Byte => {
            if bytes.len() < CHARACTER_CODE_LEN {
                return Ok(trim_nul(latin1(bytes)));
            }
            let (code, body) = bytes.split_at(CHARACTER_CODE_LEN);
            let text = if code == CODE_UNICODE {
                utf16(tag, body, byte_order)?
            } else if code == CODE_ASCII || code == CODE_UNDEFINED || code == CODE_JIS {
                latin1(body)
            } else {
                latin1(bytes)
            };
            Ok(trim_nul(text))
        }
        other => Err(TiffError::InvalidText {
            tag,
            message: format!("GPS text field not encoded as bytes ({other})"),
        }),
    }
}

/// Decode a Windows XP string: UTF-16LE stored as BYTE, trailing NULs
/// removed. An odd byte count is [`TiffError::InvalidText`].
pub fn decode_xp_string(
    tag: &'static str,
    field_type: FieldType,
    bytes: &[u8],
) -> Result<String, TiffError> {
    if field_type != FieldType::Byte {
        return Err(TiffError::InvalidText {
            tag,
            message: format!("text field not encoded as bytes ({field_type})"),
        });
    }
    Ok(trim_nul(utf16(tag, bytes, ByteOrder::LittleEndian)?))
}

fn utf16(tag: &'static str, bytes: &[u8], byte_order: ByteOrder) -> Result<String, TiffError> {
    if bytes.len() % 2 != 0 {
        return Err(TiffError::InvalidText {
            tag,
            message: format!("UTF-16 text has an odd length of {} bytes", bytes.len()),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| byte_order.read_u16(pair))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn trim_nul(mut text: String) -> String {
    let trimmed_len = text.trim_end_matches('\0').len();
    text.truncate(trimmed_len);
    text
}

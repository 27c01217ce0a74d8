use bytes::Bytes;

use crate::error::TiffError;
use crate::format::tiff::{
    decode_gps_text, decode_xp_string, ByteOrder, FieldType, FieldValue, TagInfo, TagKind,
};

/// One decoded tag/value pair.
///
/// A field keeps its raw bytes exactly as read, together with the byte
/// order needed to interpret them. Values are decoded on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    tag: u16,
    field_type: FieldType,
    raw: Bytes,
    byte_order: ByteOrder,
    sort_hint: u32,
}

impl Field {
    /// Create a field.
    ///
    /// # Arguments
    /// * `sort_hint` - ordering key carried over to output fields, usually
    ///   the field's position in its directory on disk
    pub fn new(
        tag: u16,
        field_type: FieldType,
        raw: impl Into<Bytes>,
        byte_order: ByteOrder,
        sort_hint: u32,
    ) -> Self {
        Self {
            tag,
            field_type,
            raw: raw.into(),
            byte_order,
            sort_hint,
        }
    }

    /// Create a field by encoding `value` as `field_type`.
    pub fn from_value(
        tag: u16,
        field_type: FieldType,
        value: &FieldValue,
        byte_order: ByteOrder,
        sort_hint: u32,
    ) -> Result<Self, TiffError> {
        let raw = value.encode(field_type, byte_order)?;
        Ok(Self::new(tag, field_type, raw, byte_order, sort_hint))
    }

    #[inline]
    pub fn tag(&self) -> u16 {
        self.tag
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Raw value bytes in the field's byte order.
    #[inline]
    pub fn raw_bytes(&self) -> &Bytes {
        &self.raw
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    pub fn sort_hint(&self) -> u32 {
        self.sort_hint
    }

    /// Number of elements implied by the raw length.
    pub fn count(&self) -> usize {
        self.raw.len() / self.field_type.size_in_bytes()
    }

    /// Decode the raw bytes according to the field type.
    pub fn value(&self) -> Result<FieldValue, TiffError> {
        self.field_type.decode(&self.raw, self.byte_order)
    }

    /// The field's value as a single string.
    ///
    /// Only ASCII fields have a string value; the first NUL-separated string
    /// is returned.
    pub fn string_value(&self) -> Result<String, TiffError> {
        match self.value()? {
            FieldValue::Ascii(strings) => Ok(strings.into_iter().next().unwrap_or_default()),
            other => Err(TiffError::InvalidTagValue {
                tag: "string value",
                message: format!(
                    "tag 0x{:04X} is {}, not ASCII",
                    self.tag,
                    other.type_name()
                ),
            }),
        }
    }

    /// Human-readable value, decoded with the text rule of `info`.
    ///
    /// Decode failures are rendered rather than returned.
    pub fn value_description(&self, info: &TagInfo) -> String {
        let described = match info.kind {
            TagKind::GpsText => {
                decode_gps_text(info.name, self.field_type, &self.raw, self.byte_order)
                    .map(|text| format!("'{text}'"))
            }
            TagKind::XpString => decode_xp_string(info.name, self.field_type, &self.raw)
                .map(|text| format!("'{text}'")),
            TagKind::Plain => self.value().map(|value| value.to_string()),
        };
        described.unwrap_or_else(|e| format!("Invalid value: {e}"))
    }
}

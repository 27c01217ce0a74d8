//! Field value codec.
//!
//! Raw field bytes are decoded into a [`FieldValue`] according to the
//! field's on-disk type and byte order, and encoded back for a (possibly
//! different) target byte order when building output sets.
//!
//! Every type is decoded as an array; a scalar tag is simply an array of
//! one element.

use std::fmt;

use crate::error::TiffError;

use super::byte_order::ByteOrder;
use super::tags::FieldType;

// =============================================================================
// Rationals
// =============================================================================

/// Unsigned fraction stored as two LONGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Value as a float. A zero denominator yields infinity or NaN.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Closest fraction to `value` with numerator and denominator in `u32`.
    ///
    /// Negative and NaN inputs map to 0/1, values beyond `u32::MAX` saturate.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Self::new(0, 1);
        }
        if value >= u32::MAX as f64 {
            return Self::new(u32::MAX, 1);
        }
        let (numerator, denominator) = continued_fraction(value, u32::MAX as u64);
        Self::new(numerator as u32, denominator as u32)
    }

    /// Short decimal rendering: integers without a fraction, otherwise up
    /// to three fractional digits.
    pub fn to_display_string(self) -> String {
        if self.denominator != 0 && self.numerator % self.denominator == 0 {
            return (self.numerator / self.denominator).to_string();
        }
        trim_decimal(format!("{:.3}", self.to_f64()))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Signed fraction stored as two SLONGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Value as a float. A zero denominator yields infinity or NaN.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Closest fraction to `value` with numerator and denominator in `i32`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::new(0, 1);
        }
        let magnitude = value.abs();
        let sign = if value < 0.0 { -1 } else { 1 };
        if magnitude >= i32::MAX as f64 {
            return Self::new(sign * i32::MAX, 1);
        }
        if magnitude == 0.0 {
            return Self::new(0, 1);
        }
        let (numerator, denominator) = continued_fraction(magnitude, i32::MAX as u64);
        Self::new(sign * numerator as i32, denominator as i32)
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Best convergent of `value` (positive, finite) whose terms stay within `limit`.
fn continued_fraction(value: f64, limit: u64) -> (u64, u64) {
    // Convergents h/k, seeded with h(-2)/k(-2) = 0/1 and h(-1)/k(-1) = 1/0.
    let (mut h_prev, mut h) = (0u64, 1u64);
    let (mut k_prev, mut k) = (1u64, 0u64);
    let mut x = value;

    for _ in 0..64 {
        let whole = x.floor();
        let a = whole as u64;
        let next_h = a.checked_mul(h).and_then(|v| v.checked_add(h_prev));
        let next_k = a.checked_mul(k).and_then(|v| v.checked_add(k_prev));
        match (next_h, next_k) {
            (Some(nh), Some(nk)) if nh <= limit && nk <= limit => {
                h_prev = h;
                h = nh;
                k_prev = k;
                k = nk;
            }
            _ => break,
        }

        let fraction = x - whole;
        let approx = h as f64 / k as f64;
        if fraction < 1e-12 || (approx - value).abs() <= value * 1e-12 {
            break;
        }
        x = 1.0 / fraction;
    }

    (h, k)
}

fn trim_decimal(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

// =============================================================================
// FieldValue
// =============================================================================

/// A decoded field value, one variant per field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bytes(Vec<u8>),
    /// NUL-separated strings, without terminators. Each byte maps to the
    /// `char` of the same code point (Latin-1), so any byte survives a
    /// decode and re-encode.
    Ascii(Vec<String>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<Rational>),
    SBytes(Vec<i8>),
    Undefined(Vec<u8>),
    SShorts(Vec<i16>),
    SLongs(Vec<i32>),
    SRationals(Vec<SRational>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
}

impl FieldValue {
    /// Name of the value's variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bytes(_) => "BYTE",
            FieldValue::Ascii(_) => "ASCII",
            FieldValue::Shorts(_) => "SHORT",
            FieldValue::Longs(_) => "LONG",
            FieldValue::Rationals(_) => "RATIONAL",
            FieldValue::SBytes(_) => "SBYTE",
            FieldValue::Undefined(_) => "UNDEFINED",
            FieldValue::SShorts(_) => "SSHORT",
            FieldValue::SLongs(_) => "SLONG",
            FieldValue::SRationals(_) => "SRATIONAL",
            FieldValue::Floats(_) => "FLOAT",
            FieldValue::Doubles(_) => "DOUBLE",
        }
    }

    /// Number of elements (strings for ASCII).
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Bytes(v) | FieldValue::Undefined(v) => v.len(),
            FieldValue::Ascii(v) => v.len(),
            FieldValue::Shorts(v) => v.len(),
            FieldValue::Longs(v) => v.len(),
            FieldValue::Rationals(v) => v.len(),
            FieldValue::SBytes(v) => v.len(),
            FieldValue::SShorts(v) => v.len(),
            FieldValue::SLongs(v) => v.len(),
            FieldValue::SRationals(v) => v.len(),
            FieldValue::Floats(v) => v.len(),
            FieldValue::Doubles(v) => v.len(),
        }
    }

    /// Whether the value holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode this value as `field_type` in `byte_order`.
    ///
    /// BYTE and UNDEFINED values are interchangeable; any other pairing of
    /// value and type that differs is a [`TiffError::ValueTypeMismatch`].
    /// ASCII strings are written one byte per `char` and fail with
    /// [`TiffError::UnencodableText`] past U+00FF.
    pub fn encode(&self, field_type: FieldType, byte_order: ByteOrder) -> Result<Vec<u8>, TiffError> {
        let mut out = Vec::with_capacity(self.len() * field_type.size_in_bytes());
        match (self, field_type) {
            (FieldValue::Bytes(v) | FieldValue::Undefined(v), FieldType::Byte | FieldType::Undefined) => {
                out.extend_from_slice(v);
            }
            (FieldValue::Ascii(strings), FieldType::Ascii) => {
                for s in strings {
                    for c in s.chars() {
                        let byte = u8::try_from(c).map_err(|_| TiffError::UnencodableText(c))?;
                        out.push(byte);
                    }
                    out.push(0);
                }
            }
            (FieldValue::Shorts(v), FieldType::Short) => {
                for &x in v {
                    byte_order.write_u16(&mut out, x);
                }
            }
            (FieldValue::Longs(v), FieldType::Long) => {
                for &x in v {
                    byte_order.write_u32(&mut out, x);
                }
            }
            (FieldValue::Rationals(v), FieldType::Rational) => {
                for r in v {
                    byte_order.write_u32(&mut out, r.numerator);
                    byte_order.write_u32(&mut out, r.denominator);
                }
            }
            (FieldValue::SBytes(v), FieldType::SByte) => {
                out.extend(v.iter().map(|&x| x as u8));
            }
            (FieldValue::SShorts(v), FieldType::SShort) => {
                for &x in v {
                    byte_order.write_u16(&mut out, x as u16);
                }
            }
            (FieldValue::SLongs(v), FieldType::SLong) => {
                for &x in v {
                    byte_order.write_u32(&mut out, x as u32);
                }
            }
            (FieldValue::SRationals(v), FieldType::SRational) => {
                for r in v {
                    byte_order.write_u32(&mut out, r.numerator as u32);
                    byte_order.write_u32(&mut out, r.denominator as u32);
                }
            }
            (FieldValue::Floats(v), FieldType::Float) => {
                for &x in v {
                    byte_order.write_u32(&mut out, x.to_bits());
                }
            }
            (FieldValue::Doubles(v), FieldType::Double) => {
                for &x in v {
                    byte_order.write_u64(&mut out, x.to_bits());
                }
            }
            (value, field_type) => {
                return Err(TiffError::ValueTypeMismatch {
                    value: value.type_name(),
                    field_type: field_type.name(),
                })
            }
        }
        Ok(out)
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    const MAX_SHOWN: usize = 16;
    for (i, item) in items.iter().take(MAX_SHOWN).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    if items.len() > MAX_SHOWN {
        write!(f, ", ... ({} total)", items.len())?;
    }
    Ok(())
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bytes(v) | FieldValue::Undefined(v) => join(f, v),
            FieldValue::Ascii(strings) => {
                let quoted: Vec<String> = strings.iter().map(|s| format!("'{s}'")).collect();
                join(f, &quoted)
            }
            FieldValue::Shorts(v) => join(f, v),
            FieldValue::Longs(v) => join(f, v),
            FieldValue::Rationals(v) => join(f, v),
            FieldValue::SBytes(v) => join(f, v),
            FieldValue::SShorts(v) => join(f, v),
            FieldValue::SLongs(v) => join(f, v),
            FieldValue::SRationals(v) => join(f, v),
            FieldValue::Floats(v) => join(f, v),
            FieldValue::Doubles(v) => join(f, v),
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

impl FieldType {
    /// Decode raw bytes of this type.
    ///
    /// # Errors
    /// `InvalidFieldLength` if `bytes` is not a whole number of elements.
    pub fn decode(self, bytes: &[u8], byte_order: ByteOrder) -> Result<FieldValue, TiffError> {
        let size = self.size_in_bytes();
        if bytes.len() % size != 0 {
            return Err(TiffError::InvalidFieldLength {
                field_type: self.name(),
                len: bytes.len(),
                element_size: size,
            });
        }
        let chunks = bytes.chunks_exact(size);

        let value = match self {
            FieldType::Byte => FieldValue::Bytes(bytes.to_vec()),
            FieldType::Undefined => FieldValue::Undefined(bytes.to_vec()),
            FieldType::Ascii => FieldValue::Ascii(decode_ascii(bytes)),
            FieldType::SByte => FieldValue::SBytes(bytes.iter().map(|&b| b as i8).collect()),
            FieldType::Short => {
                FieldValue::Shorts(chunks.map(|c| byte_order.read_u16(c)).collect())
            }
            FieldType::SShort => {
                FieldValue::SShorts(chunks.map(|c| byte_order.read_u16(c) as i16).collect())
            }
            FieldType::Long => FieldValue::Longs(chunks.map(|c| byte_order.read_u32(c)).collect()),
            FieldType::SLong => {
                FieldValue::SLongs(chunks.map(|c| byte_order.read_u32(c) as i32).collect())
            }
            FieldType::Rational => FieldValue::Rationals(
                chunks
                    .map(|c| Rational::new(byte_order.read_u32(&c[0..4]), byte_order.read_u32(&c[4..8])))
                    .collect(),
            ),
            FieldType::SRational => FieldValue::SRationals(
                chunks
                    .map(|c| {
                        SRational::new(
                            byte_order.read_u32(&c[0..4]) as i32,
                            byte_order.read_u32(&c[4..8]) as i32,
                        )
                    })
                    .collect(),
            ),
            FieldType::Float => FieldValue::Floats(
                chunks
                    .map(|c| f32::from_bits(byte_order.read_u32(c)))
                    .collect(),
            ),
            FieldType::Double => FieldValue::Doubles(
                chunks
                    .map(|c| f64::from_bits(byte_order.read_u64(c)))
                    .collect(),
            ),
        };
        Ok(value)
    }
}

/// Split ASCII bytes on NUL. A single trailing terminator does not start a
/// new string; text after the last NUL is kept. Bytes above 0x7F are
/// read as Latin-1.
fn decode_ascii(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(&[0]).unwrap_or(bytes);
    body.split(|&b| b == 0)
        .map(|s| s.iter().map(|&b| char::from(b)).collect())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

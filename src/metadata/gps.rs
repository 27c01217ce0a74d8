//! GPS position derived from the GPS directory.
//!
//! Coordinates are stored as three rationals (degrees, minutes, seconds)
//! plus a one-letter hemisphere reference.

use std::fmt;

use crate::error::TiffError;
use crate::format::tiff::tags::{GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF};
use crate::format::tiff::{FieldValue, Rational, DIRECTORY_TYPE_GPS};

use super::aggregate::TiffMetadata;
use super::field::Field;

/// Raw GPS coordinates of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsInfo {
    pub latitude_ref: String,
    pub longitude_ref: String,
    /// Degrees, minutes, seconds
    pub latitude: [Rational; 3],
    /// Degrees, minutes, seconds
    pub longitude: [Rational; 3],
}

impl GpsInfo {
    /// Latitude in decimal degrees, negative for the southern hemisphere.
    ///
    /// # Errors
    /// `UnknownReference` if the reference is not N or S.
    pub fn to_decimal_latitude(&self) -> Result<f64, TiffError> {
        let degrees = to_decimal(&self.latitude);
        match self.latitude_ref.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(degrees),
            "S" => Ok(-degrees),
            _ => Err(TiffError::UnknownReference {
                axis: "latitude",
                reference: self.latitude_ref.clone(),
            }),
        }
    }

    /// Longitude in decimal degrees, negative for the western hemisphere.
    ///
    /// # Errors
    /// `UnknownReference` if the reference is not E or W.
    pub fn to_decimal_longitude(&self) -> Result<f64, TiffError> {
        let degrees = to_decimal(&self.longitude);
        match self.longitude_ref.trim().to_ascii_uppercase().as_str() {
            "E" => Ok(degrees),
            "W" => Ok(-degrees),
            _ => Err(TiffError::UnknownReference {
                axis: "longitude",
                reference: self.longitude_ref.clone(),
            }),
        }
    }
}

fn to_decimal(dms: &[Rational; 3]) -> f64 {
    dms[0].to_f64() + dms[1].to_f64() / 60.0 + dms[2].to_f64() / 3600.0
}

impl fmt::Display for GpsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[GPS. Latitude: {} degrees, {} minutes, {} seconds {}, Longitude: {} degrees, {} minutes, {} seconds {}]",
            self.latitude[0].to_display_string(),
            self.latitude[1].to_display_string(),
            self.latitude[2].to_display_string(),
            self.latitude_ref,
            self.longitude[0].to_display_string(),
            self.longitude[1].to_display_string(),
            self.longitude[2].to_display_string(),
            self.longitude_ref,
        )
    }
}

/// Read the GPS position from the first GPS directory.
///
/// Returns `Ok(None)` when there is no GPS directory or any of the four
/// coordinate tags is missing.
///
/// # Errors
/// `InvalidTagValue` if a coordinate is not exactly three rationals.
pub fn derive_gps(metadata: &TiffMetadata) -> Result<Option<GpsInfo>, TiffError> {
    let Some(gps) = metadata.find_directory(DIRECTORY_TYPE_GPS) else {
        return Ok(None);
    };

    let (Some(latitude_ref), Some(latitude), Some(longitude_ref), Some(longitude)) = (
        gps.find_field(&GPS_LATITUDE_REF),
        gps.find_field(&GPS_LATITUDE),
        gps.find_field(&GPS_LONGITUDE_REF),
        gps.find_field(&GPS_LONGITUDE),
    ) else {
        return Ok(None);
    };

    Ok(Some(GpsInfo {
        latitude_ref: latitude_ref.string_value()?,
        longitude_ref: longitude_ref.string_value()?,
        latitude: dms(GPS_LATITUDE.name, latitude)?,
        longitude: dms(GPS_LONGITUDE.name, longitude)?,
    }))
}

fn dms(tag: &'static str, field: &Field) -> Result<[Rational; 3], TiffError> {
    match field.value()? {
        FieldValue::Rationals(values) => {
            <[Rational; 3]>::try_from(values).map_err(|values| TiffError::InvalidTagValue {
                tag,
                message: format!(
                    "expected three values for latitude and longitude, got {}",
                    values.len()
                ),
            })
        }
        other => Err(TiffError::InvalidTagValue {
            tag,
            message: format!("expected RATIONAL values, got {}", other.type_name()),
        }),
    }
}

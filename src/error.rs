use thiserror::Error;

/// Errors that can occur when decoding field values.
///
/// Absence is never an error here: a missing tag or a field whose on-disk
/// type the tag does not accept is reported as `None` by the lookup APIs.
/// These variants cover data that is present but malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TiffError {
    /// Raw byte length is not a whole number of elements
    #[error("Invalid field length for {field_type}: {len} bytes is not a multiple of {element_size}")]
    InvalidFieldLength {
        field_type: &'static str,
        len: usize,
        element_size: usize,
    },

    /// Unknown field type in a field record
    #[error("Unknown field type: {0}")]
    UnknownFieldType(u16),

    /// A value cannot be encoded with the requested field type
    #[error("Cannot encode {value} value as {field_type}")]
    ValueTypeMismatch {
        value: &'static str,
        field_type: &'static str,
    },

    /// Character has no single-byte form in an ASCII field
    #[error("Cannot encode {0:?} in an ASCII field")]
    UnencodableText(char),

    /// Tag has unexpected type or count
    #[error("Invalid tag value for {tag}: {message}")]
    InvalidTagValue { tag: &'static str, message: String },

    /// GPS reference letter is not one of N/S or E/W
    #[error("Unknown {axis} ref: \"{reference}\"")]
    UnknownReference {
        axis: &'static str,
        reference: String,
    },

    /// Text field could not be decoded
    #[error("Invalid text in {tag}: {message}")]
    InvalidText { tag: &'static str, message: String },
}

/// Errors raised while building an output set for re-encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    /// A source field could not be decoded and re-encoded
    #[error("Failed to write tag 0x{tag:04X} in directory {directory_type}: {source}")]
    Field {
        directory_type: i32,
        tag: u16,
        #[source]
        source: TiffError,
    },

    /// Output set already holds a directory of this type
    #[error("Output set already contains a directory of type {0}")]
    DuplicateDirectory(i32),
}

/// Errors from loading or saving the JSON interchange format.
#[derive(Debug, Error)]
pub enum DumpError {
    /// I/O error while reading or writing a dump file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field or payload bytes are not valid hex
    #[error("Invalid hex in {context}: {source}")]
    Hex {
        context: String,
        #[source]
        source: hex::FromHexError,
    },

    /// Field value error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// Output set construction failed
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

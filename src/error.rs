//! Error types for the VMF mesher.

use thiserror::Error;

/// Result type alias using ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for VMF conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON config file.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Brace imbalance while extracting a block.
    #[error("malformed {kind} block (unbalanced braces near offset {offset})")]
    MalformedBlock {
        /// Block keyword ("solid" or "side").
        kind: &'static str,
        /// Byte offset of the block opening in its parent text.
        offset: usize,
    },

    /// A required field was absent from a side block.
    #[error("side {side_id}: missing required field \"{field}\"")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
        /// Id attribute of the side, for locating it in the source.
        side_id: String,
    },

    /// A numeric field could not be parsed.
    #[error("side {side_id}: invalid value for \"{field}\": {value:?}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Id attribute of the side.
        side_id: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A side cannot produce a valid flat normal.
    #[error("side {side_id}: degenerate face ({reason})")]
    DegenerateFace {
        /// Id attribute of the side.
        side_id: String,
        /// What made the face degenerate.
        reason: &'static str,
    },

    /// A face references a position index outside the position list.
    #[error("face references out-of-range position index {index}")]
    BadFaceIndex {
        /// The 1-based index that has no matching position record.
        index: u32,
    },
}

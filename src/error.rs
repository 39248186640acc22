//! Structured error types for the kvitto rendering pipeline.
//!
//! The variants cover the real failure sources: JSON parsing, font
//! loading, image handling, canvas draw calls, and persisting the final
//! file. Rendering is deterministic, so nothing here is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The unified error type returned by all public kvitto API functions.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON input failed to parse as a valid receipt.
    #[error("failed to parse receipt: {source}{hint}")]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// Font data could not be parsed or embedded. Fatal: raised before
    /// any drawing happens.
    #[error("font error: {0}")]
    FontLoad(String),

    /// An image could not be read or decoded.
    #[error("image error: {0}")]
    Image(String),

    /// A canvas draw call failed. Remaining layout steps are abandoned.
    #[error("canvas error: {0}")]
    Canvas(String),

    /// The rendered document could not be written to disk. No partial
    /// file is left behind.
    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output naming requires a non-empty receipt number.
    #[error("receipt number must not be empty")]
    EmptyReceiptNumber,
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "\n  Hint: check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "\n  Hint: the JSON is valid but doesn't match the receipt schema. Check field names and types."
            }
            serde_json::error::Category::Eof => {
                "\n  Hint: unexpected end of input. Is the JSON truncated?"
            }
            serde_json::error::Category::Io => "",
        };
        Error::Parse {
            source: e,
            hint: hint.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum GuideError {
    /// The input record is missing a required field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The finished document could not be persisted
    #[error("failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error("failed to encode QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error(transparent)]
    /// A record or configuration file was not valid JSON
    Json(#[from] serde_json::Error),

    /// The page order referenced a page that isn't in the document
    #[error("page missing from document")]
    PageMissing,
}

impl GuideError {
    pub(crate) fn export<P: Into<PathBuf>>(path: P, source: std::io::Error) -> GuideError {
        GuideError::Export {
            path: path.into(),
            source,
        }
    }
}

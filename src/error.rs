use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error("input file not found: {0}")]
    /// The question file does not exist
    InputMissing(PathBuf),

    #[error("failed to read {path}: {source}")]
    /// The question file exists but could not be read
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question collection in {path}: {source}")]
    /// The question file is not a JSON array
    InputUnparseable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no questions found in {0}")]
    /// The question file holds an empty array
    EmptyCollection(PathBuf),

    #[error("failed to load config file {path}: {reason}")]
    /// The configuration file could not be read or parsed
    Config { path: PathBuf, reason: String },

    #[error("unknown page size {0:?}")]
    /// The configured page size name is not recognised
    UnknownPageSize(String),

    #[error("no question file in {0} could be processed")]
    /// A language batch produced no output at all
    NothingProcessed(PathBuf),

    #[error("page is missing from the document")]
    /// A page id in the page order does not refer to a page in the document
    PageMissing,
}

/// Errors raised while planning the layout of a single card
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("card of {width}x{height}pt is too small to lay out")]
    CardTooSmall { width: f32, height: f32 },
}

//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

/// Reason an upload was rejected before any decoding took place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File must be an image")]
    NotAnImage,

    #[error("File size must be less than 10MB")]
    TooLarge,

    #[error("File type not supported. Please use JPEG, PNG, WebP, or GIF.")]
    UnsupportedType,
}

/// Why the uploaded bytes could not be turned into a raster.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    #[error("image has empty dimensions {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("JPEG data ends before the end-of-image marker")]
    TruncatedJpeg,

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to process image. Please try again.")]
    Decode(#[from] DecodeError),

    #[error("Image is {width}x{height}, larger than the {max}px limit")]
    DimensionLimit { width: u32, height: u32, max: u32 },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unknown content section: {0}")]
    UnknownSection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;

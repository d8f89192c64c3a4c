//! Raster decoding with a dimension cap.
//!
//! The header is read first so an oversized source is rejected before any
//! pixel buffer is allocated. Readers borrow the input through a `Cursor` and
//! are dropped at the end of each call, on success and failure alike.

use crate::{DecodeError, Error, Result};
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use std::io::Cursor;

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(DecodeError::UnrecognizedFormat.into());
    }
    Ok(reader)
}

/// The JPEG decoder pads a short scan with grey instead of failing, so a cut
/// upload is caught here. Encoders may pad the file with zeros after EOI.
fn has_jpeg_end_marker(bytes: &[u8]) -> bool {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0x00)
        .map_or(0, |i| i + 1);
    bytes[..end].ends_with(&[0xFF, 0xD9])
}

/// Read width and height from the image header without decoding pixels.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    reader(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::Image(e).into())
}

/// Decode `bytes` into a raster, refusing sources wider or taller than
/// `max_dimension` pixels.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<DynamicImage> {
    let (width, height) = read_dimensions(bytes)?;
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyDimensions { width, height }.into());
    }
    if width > max_dimension || height > max_dimension {
        return Err(Error::DimensionLimit {
            width,
            height,
            max: max_dimension,
        });
    }

    let mut reader = reader(bytes)?;
    if reader.format() == Some(ImageFormat::Jpeg) && !has_jpeg_end_marker(bytes) {
        return Err(DecodeError::TruncatedJpeg.into());
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);
    reader.limits(limits);

    reader.decode().map_err(|e| DecodeError::Image(e).into())
}

//! Aspect-preserving resize and re-encode of a single variant.

use crate::models::{SizeConfig, SizeVariant};
use crate::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

/// Output dimensions for `config` given the source size.
///
/// With only a width the height follows the source aspect ratio. With both,
/// the result fits inside the requested box without cropping.
pub fn fit_dimensions(source: (u32, u32), config: &SizeConfig) -> (u32, u32) {
    let (src_w, src_h) = source;
    let aspect = src_w as f64 / src_h as f64;
    let width = config.width as f64;
    let height_by_width = width / aspect;

    let (w, h) = match config.height {
        None => (width, height_by_width),
        Some(max_h) if height_by_width <= max_h as f64 => (width, height_by_width),
        Some(max_h) => (max_h as f64 * aspect, max_h as f64),
    };

    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// PNG sources stay PNG to keep transparency; everything else becomes JPEG.
pub fn output_mime(source_mime: &str) -> &'static str {
    if source_mime == "image/png" {
        "image/png"
    } else {
        "image/jpeg"
    }
}

pub fn resize_variant(
    image: &DynamicImage,
    config: SizeConfig,
    source_mime: &str,
) -> Result<SizeVariant> {
    let (width, height) = fit_dimensions((image.width(), image.height()), &config);
    let resized = image.resize_exact(width, height, FilterType::Lanczos3);

    let mime_type = output_mime(source_mime);
    let mut data = Vec::new();
    // PNG is lossless, so the preset quality does not apply.
    let quality = if mime_type == "image/png" {
        resized.write_with_encoder(PngEncoder::new(&mut data))?;
        1.0
    } else {
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
        rgb.write_with_encoder(JpegEncoder::new_with_quality(
            &mut data,
            config.jpeg_quality(),
        ))?;
        config.quality
    };

    Ok(SizeVariant {
        width,
        height,
        mime_type,
        quality,
        data,
    })
}

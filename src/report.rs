//! Human-readable size reporting for processed photos
//!
//! Summarizes how the three stored renditions compare to the uploaded file
//! and builds the responsive `srcset` the public pages render.

use crate::models::{ImageMetadata, PhotoRecord};
use serde::Serialize;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Round to `decimals` places with ties away from zero. `format!` alone
/// rounds ties to even, which turns 1.125 into "1.12".
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// `sizes` attribute used by every photo slot on the public site.
pub const RESPONSIVE_SIZES: &str = "(max-width: 640px) 100vw, (max-width: 1024px) 50vw, 33vw";

/// Format a byte count in base-1024 units with at most two decimals.
///
/// ```
/// use campaign_media::report::format_file_size;
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(-2048), "-2 KB");
/// ```
pub fn format_file_size(bytes: i64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let sign = if bytes < 0 { "-" } else { "" };
    let magnitude = bytes.unsigned_abs();

    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && magnitude >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }

    let value = magnitude as f64 / 1024u64.pow(unit as u32) as f64;
    let formatted = format!("{:.2}", round_to(value, 2));
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    format!("{}{} {}", sign, trimmed, SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SizeSavings {
    pub original: String,
    pub processed: String,
    pub savings: String,
    pub savings_percent: String,
}

/// Compare the upload against the combined size of its three variants.
///
/// Savings go negative when the variants outweigh the source; that is
/// reported as-is.
pub fn calculate_size_savings(metadata: &ImageMetadata) -> SizeSavings {
    let original = metadata.original_size as i64;
    let processed = metadata.processed_sizes.total() as i64;
    let savings = original - processed;

    let percent = if original == 0 {
        0.0
    } else {
        savings as f64 * 100.0 / original as f64
    };

    SizeSavings {
        original: format_file_size(original),
        processed: format_file_size(processed),
        savings: format_file_size(savings),
        savings_percent: format!("{:.1}%", round_to(percent, 1)),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveSources {
    pub src_set: String,
    pub sizes: String,
    pub src: String,
}

pub fn responsive_sources(record: &PhotoRecord) -> ResponsiveSources {
    let sizes = &record.photo_metadata.processed_sizes;
    ResponsiveSources {
        src_set: format!(
            "{} {}w, {} {}w, {} {}w",
            record.photo_small,
            sizes.small.width,
            record.photo_medium,
            sizes.medium.width,
            record.photo_large,
            sizes.large.width
        ),
        sizes: RESPONSIVE_SIZES.to_string(),
        src: record.photo_large.clone(),
    }
}

//! Pixel-width measurement and truncation for SERP titles and descriptions.
//!
//! Widths come from a fixed per-character table (see [`widths`]) instead of a
//! font rasterizer. Sums are kept in integer font units and only converted to
//! pixels at the end, so a string's width does not depend on the order its
//! characters were added in.

pub mod widths;

use crate::utils::round2;
use serde::Serialize;

pub use widths::char_units;

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Display caps for one SERP element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLimits {
    /// Desktop pixel cap
    pub desktop: f64,
    /// Mobile pixel cap
    pub mobile: f64,
    /// Font size in pixels
    pub font_size: f64,
    /// Secondary guardrail, checked independently of pixel width
    pub max_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SerpLimits {
    pub title: DisplayLimits,
    pub description: DisplayLimits,
}

pub const SERP_LIMITS: SerpLimits = SerpLimits {
    title: DisplayLimits {
        desktop: 600.0,
        mobile: 500.0,
        font_size: 20.0,
        max_chars: 60,
    },
    description: DisplayLimits {
        desktop: 920.0,
        mobile: 680.0,
        font_size: 14.0,
        max_chars: 160,
    },
};

/// Result of measuring one string against a set of limits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelMeasurement {
    pub text: String,
    pub pixel_width: f64,
    pub max_pixel_width: f64,
    pub character_count: usize,
    pub is_truncated: bool,
    pub percent_used: f64,
    pub desktop_preview: String,
    pub mobile_preview: String,
}

/// Total advance of `text` in thousandths of an em
pub fn text_units(text: &str) -> u64 {
    text.chars().map(|c| u64::from(char_units(c))).sum()
}

fn units_to_px(units: u64, font_size: f64) -> f64 {
    units as f64 * font_size / 1000.0
}

/// Rendered width of `text` at `font_size`, in pixels
pub fn calculate_pixel_width(text: &str, font_size: f64) -> f64 {
    units_to_px(text_units(text), font_size)
}

pub fn calculate_title_pixel_width(text: &str) -> f64 {
    calculate_pixel_width(text, SERP_LIMITS.title.font_size)
}

pub fn calculate_description_pixel_width(text: &str) -> f64 {
    calculate_pixel_width(text, SERP_LIMITS.description.font_size)
}

pub fn will_be_truncated(text: &str, max_width: f64, font_size: f64) -> bool {
    calculate_pixel_width(text, font_size) > max_width
}

/// Cut `text` so that it, plus the ellipsis, renders within `max_width`.
///
/// Text that already fits is returned unchanged. When not even the ellipsis
/// fits, the result is empty.
pub fn truncate_to_pixel_width(text: &str, max_width: f64, font_size: f64) -> String {
    if !will_be_truncated(text, max_width, font_size) {
        return text.to_string();
    }

    let ellipsis_units = text_units(ELLIPSIS);
    if units_to_px(ellipsis_units, font_size) > max_width {
        ::log::debug!(
            "Ellipsis alone exceeds {}px at {}px font, truncating to nothing",
            max_width,
            font_size
        );
        return String::new();
    }

    let mut used = 0u64;
    let mut end = 0;
    for (idx, c) in text.char_indices() {
        let next = used + u64::from(char_units(c));
        if units_to_px(next + ellipsis_units, font_size) > max_width {
            break;
        }
        used = next;
        end = idx + c.len_utf8();
    }

    format!("{}{}", text[..end].trim_end(), ELLIPSIS)
}

/// Measure `text` against `limits`, producing both previews
pub fn measure(text: &str, limits: &DisplayLimits) -> PixelMeasurement {
    let pixel_width = calculate_pixel_width(text, limits.font_size);
    let is_truncated = pixel_width > limits.desktop;

    PixelMeasurement {
        text: text.to_string(),
        pixel_width,
        max_pixel_width: limits.desktop,
        character_count: text.chars().count(),
        is_truncated,
        percent_used: round2(pixel_width / limits.desktop * 100.0),
        desktop_preview: truncate_to_pixel_width(text, limits.desktop, limits.font_size),
        mobile_preview: truncate_to_pixel_width(text, limits.mobile, limits.font_size),
    }
}

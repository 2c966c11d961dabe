//! Fixed-precision rounding and number formatting
//!
//! Rounding is round-half-away-from-zero at a given number of decimal
//! digits. It is applied when a value is written out or compared, never to
//! the stored machine position.

/// Decimal digits for extrusion (E) words.
pub const EXTRUSION_DIGITS: u32 = 5;

/// Decimal digits for feed rate (F) words.
pub const FEED_DIGITS: u32 = 3;

/// Round `value` to `digits` decimal places, halves away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

/// Format `value` rounded to `digits` places with trailing zeros removed.
///
/// `15.0` prints as `15`, `0.20` as `0.2`, and a rounded negative zero as `0`.
pub fn format_decimal(value: f64, digits: u32) -> String {
    let rounded = round_to(value, digits);
    let mut text = format!("{:.*}", digits as usize, rounded);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

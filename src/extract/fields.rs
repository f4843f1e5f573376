//! Turns cleaned recognizer text into field values.

use super::normalize::{FieldKind, NormalizationRules};
use super::synergy::synergy_code;

const INCHES_PER_FOOT: f64 = 12.0;
const CM_PER_INCH: f64 = 2.54;

/// Key used for the metadata segment that carries no label.
pub const WEIGHT_KEY: &str = "WEIGHT";

/// Splits a full name into first and last name on single spaces.
/// Missing parts are empty.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split(' ');
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.next().unwrap_or_default().to_string();
    (first, last)
}

/// Converts feet and inches readings to whole centimeters.
///
/// Unparsable readings count as 0. The result is truncated, not rounded.
pub fn height_in_cm(feet: &str, inches: &str, rules: &NormalizationRules) -> u64 {
    let inches = rules.apply(FieldKind::HeightInches, inches);
    let feet = parse_or_zero(feet);
    let inches = parse_or_zero(&inches);

    ((feet * INCHES_PER_FOOT + inches) * CM_PER_INCH) as u64
}

fn parse_or_zero(text: &str) -> f64 {
    text.parse::<u32>().map(f64::from).unwrap_or(0.0)
}

/// Parses the inline metadata block into `(key, value)` pairs in the order
/// they appear.
///
/// Brackets count as pipes. The text ahead of the first delimiter is not
/// data and is dropped. A segment without a colon is the weight.
pub fn parse_metadata(block: &str, rules: &NormalizationRules) -> Vec<(String, String)> {
    block
        .replace(['[', ']'], "|")
        .split('|')
        .skip(1)
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            if segment.contains(':') {
                let mut parts = segment.split(':');
                let key = parts.next().unwrap_or_default().trim().to_string();
                let value = parts.next().unwrap_or_default().trim().to_string();
                (key, value)
            } else {
                let weight = rules.apply(FieldKind::Weight, segment.trim());
                (WEIGHT_KEY.to_string(), weight.trim().to_string())
            }
        })
        .collect()
}

/// Resolves one synergy slot reading to its code.
pub fn resolve_synergy(reading: &str, rules: &NormalizationRules) -> Option<&'static str> {
    let phrase = rules.apply(FieldKind::Synergy, reading);
    synergy_code(&phrase.trim().to_lowercase())
}

/// Repairs a numeric stat reading.
pub fn stat_value(reading: &str, rules: &NormalizationRules) -> String {
    rules.apply(FieldKind::Stat, reading)
}

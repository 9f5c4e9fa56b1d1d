use byte_unit::{Byte, UnitType};

/// Formats a number with thousands separators and at most two decimals,
/// trailing zeros removed: `1536.0` gives `1,536`, `1234.567` gives `1,234.57`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.2}", value.abs());
    let (integer_part, fraction_part) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let fraction_part = fraction_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + integer_part.len() / 3 + 1);
    // -0.001 rounds to zero and must not print as "-0"
    if value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    let digits = integer_part.len();
    for (i, digit) in integer_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !fraction_part.is_empty() {
        out.push('.');
        out.push_str(fraction_part);
    }
    out
}

/// Formats a byte count with binary prefixes and one decimal, `1536.0` gives `1.5 KiB`.
///
/// Returns `None` for values that are not a byte count (negative or not finite).
pub fn format_bytes(value: f64) -> Option<String> {
    if !value.is_finite() || value < 0.0 || value > u64::MAX as f64 {
        return None;
    }
    let adjusted = Byte::from_u64(value.round() as u64).get_appropriate_unit(UnitType::Binary);
    Some(format!("{:.1} {}", adjusted.get_value(), adjusted.get_unit()))
}

// -- size.rs --

use super::error::{Error, Result};

// --

/// Converts a size string such as `"10M"` into bytes.
///
/// The numeral is decimal and the single suffix is one of `K`, `M`, `G`
/// (case-insensitive), scaling by 1024, 1024² and 1024³.
pub fn parse_size(s: &str) -> Result<u64> {
    let invalid = || Error::InvalidSize(s.to_string());

    let unit = s.chars().last().ok_or_else(invalid)?;
    let digits = &s[..s.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut n: u64 = 0;
    for b in digits.bytes() {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(u64::from(b - b'0')))
            .ok_or_else(invalid)?;
    }

    let scale: u64 = match unit {
        'K' | 'k' => 1 << 10,
        'M' | 'm' => 1 << 20,
        'G' | 'g' => 1 << 30,
        _ => return Err(invalid()),
    };

    match n.checked_mul(scale) {
        Some(0) | None => Err(invalid()),
        Some(bytes) => Ok(bytes),
    }
}

// --

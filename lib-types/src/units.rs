//! Decimal unit scaling
//!
//! The ledger core only ever sees minimal units. These helpers convert
//! between display strings such as `"12.5"` and minimal units at the client
//! boundary.

use crate::primitives::Amount;

/// `10^decimals`, or `None` if it does not fit in an `Amount`
pub fn scale_factor(decimals: u8) -> Option<Amount> {
    (10 as Amount).checked_pow(decimals as u32)
}

/// Parse a decimal display string into minimal units.
///
/// Returns `None` for malformed input, for more fractional digits than
/// `decimals`, and on overflow.
pub fn parse_units(input: &str, decimals: u8) -> Option<Amount> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > decimals as usize {
        return None;
    }

    let scale = scale_factor(decimals)?;
    let whole_value: Amount = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let fraction_value: Amount = if fraction.is_empty() {
        0
    } else {
        let padding = scale_factor(decimals - fraction.len() as u8)?;
        fraction.parse::<Amount>().ok()?.checked_mul(padding)?
    };

    whole_value.checked_mul(scale)?.checked_add(fraction_value)
}

/// Render minimal units as a decimal display string, trimming trailing zeros
pub fn format_units(amount: Amount, decimals: u8) -> String {
    let scale = match scale_factor(decimals) {
        Some(scale) => scale,
        None => return amount.to_string(),
    };
    if decimals == 0 {
        return amount.to_string();
    }

    let whole = amount / scale;
    let fraction = amount % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let padded = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

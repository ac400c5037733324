use thiserror::Error;

/// Amounts are integer cents, so 45.67 is stored as 4567.
pub type Cents = i64;

/// Largest magnitude `parse_cents` accepts: one trillion units.
pub const MAX_CENTS: Cents = 100_000_000_000_000;

/// Format cents with exactly two decimals.
/// Example: 5000 -> "50.00", -1015 -> "-10.15"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents with the shortest decimal form: trailing zeros and a bare
/// decimal point are dropped.
/// Example: 88985 -> "889.85", 88950 -> "889.5", 90000 -> "900"
pub fn format_cents_compact(cents: Cents) -> String {
    if cents % 100 == 0 {
        return (cents / 100).to_string();
    }
    format_cents(cents).trim_end_matches('0').to_string()
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000
/// Digits past the second decimal place are truncated. Magnitudes above
/// `MAX_CENTS` are rejected.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::OutOfRange(input.to_string()))?
    };

    // Pad or truncate the fraction to two digits
    let decimal_cents: i64 = decimal_str
        .chars()
        .chain(std::iter::repeat('0'))
        .take(2)
        .fold(0, |acc, c| acc * 10 + i64::from(c as u8 - b'0'));

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .filter(|&c| c <= MAX_CENTS)
        .ok_or_else(|| ParseCentsError::OutOfRange(input.to_string()))?;
    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("invalid money format: '{0}'")]
    InvalidFormat(String),

    #[error("amount out of range: '{0}'")]
    OutOfRange(String),
}

/// Ten years. Token lifetimes above this are treated as misconfiguration.
pub const MAX_DURATION_SECS: i64 = 3650 * 24 * 60 * 60;

/// Parses a duration given either as bare seconds (`"900"`) or with a single
/// unit suffix: `s`, `m`, `h` or `d` (`"15m"`, `"720h"`, `"30d"`).
///
/// Returns `None` for empty, negative, zero or otherwise malformed input, and
/// for anything longer than [`MAX_DURATION_SECS`].
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 60 * 60),
        'd' => (&value[..value.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (value, 1),
        _ => return None,
    };

    let amount: i64 = digits.parse().ok()?;
    if amount <= 0 {
        return None;
    }
    amount
        .checked_mul(multiplier)
        .filter(|secs| *secs <= MAX_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_seconds() {
        assert_eq!(parse_duration_secs("900"), Some(900));
    }

    #[test]
    fn test_suffixed_units() {
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("15m"), Some(900));
        assert_eq!(parse_duration_secs("720h"), Some(2_592_000));
        assert_eq!(parse_duration_secs("30d"), Some(2_592_000));
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(parse_duration_secs(""), None);
        assert_eq!(parse_duration_secs("0"), None);
        assert_eq!(parse_duration_secs("-5m"), None);
        assert_eq!(parse_duration_secs("ten"), None);
        assert_eq!(parse_duration_secs("10w"), None);
        assert_eq!(parse_duration_secs("m"), None);
    }

    #[test]
    fn test_caps_at_ten_years() {
        assert_eq!(parse_duration_secs("3650d"), Some(MAX_DURATION_SECS));
        assert_eq!(parse_duration_secs("3651d"), None);
        assert_eq!(parse_duration_secs("9223372036854775807"), None);
        assert_eq!(parse_duration_secs("9223372036854775807d"), None);
    }
}

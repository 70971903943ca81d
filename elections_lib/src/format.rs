//! Display formatting for vote shares and counts.

/// Formats a vote share given as a fraction (`0.5` is 50%). Values are
/// truncated toward zero to one decimal place; nonzero shares under 1% show
/// as `<1%`. Non-finite input formats as an empty string.
pub fn percent_filter(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    // Round away float noise before truncating, so 0.486 stays 48.6.
    let tenths = ((value * 1000.0 * 1e6).round() / 1e6).trunc() as i64;
    let pct = (value * 100.0 * 1e9).round() / 1e9;
    if pct == 0.0 {
        "0%".to_string()
    } else if pct == 100.0 {
        "100%".to_string()
    } else if pct > 0.0 && pct < 1.0 {
        "<1%".to_string()
    } else {
        let sign = if tenths < 0 { "-" } else { "" };
        format!("{}{}.{}%", sign, (tenths / 10).abs(), (tenths % 10).abs())
    }
}

/// Formats an integer with thousands separators.
pub fn comma_filter(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_edges() {
        assert_eq!(percent_filter(0.0), "0%");
        assert_eq!(percent_filter(0.001), "<1%");
        assert_eq!(percent_filter(0.5), "50.0%");
        assert_eq!(percent_filter(1.0), "100%");
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent_filter(0.486), "48.6%");
        assert_eq!(percent_filter(0.4869), "48.6%");
        assert_eq!(percent_filter(0.01), "1.0%");
        assert_eq!(percent_filter(0.999), "99.9%");
        assert_eq!(percent_filter(0.9999), "99.9%");
    }

    #[test]
    fn test_percent_non_finite_is_empty() {
        assert_eq!(percent_filter(f64::NAN), "");
        assert_eq!(percent_filter(f64::INFINITY), "");
        assert_eq!(percent_filter(f64::NEG_INFINITY), "");
    }

    #[test]
    fn test_comma() {
        assert_eq!(comma_filter(0), "0");
        assert_eq!(comma_filter(999), "999");
        assert_eq!(comma_filter(1000), "1,000");
        assert_eq!(comma_filter(62984828), "62,984,828");
        assert_eq!(comma_filter(-1234567), "-1,234,567");
    }
}

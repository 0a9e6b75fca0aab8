//! Number formatting for display. The explorer pipeline returns raw numbers;
//! these helpers are for whoever renders them (and for log lines).

/// Formats an integer with thousands separators
///
/// # Examples
/// ```
/// use sales_explorer::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Short form with K/M/B suffix, one decimal above a thousand.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{sign}{:.1}B", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}{:.1}K", abs / 1_000.0)
    } else {
        format!("{sign}{:.0}", abs)
    }
}

/// Ratio as a signed percentage, `0.125` -> `+12.5%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:+.1}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(1_500.0), "1.5K");
        assert_eq!(format_compact(2_340_000.0), "2.3M");
        assert_eq!(format_compact(7_000_000_000.0), "7.0B");
        assert_eq!(format_compact(-12_000.0), "-12.0K");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.125), "+12.5%");
        assert_eq!(format_percent(-0.5), "-50.0%");
        assert_eq!(format_percent(0.0), "+0.0%");
    }
}

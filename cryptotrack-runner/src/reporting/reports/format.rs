//! Number formatting for reports.

/// `1234567.891` -> `"1,234,567.89"`.
pub fn with_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + decimals + 2);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// USD amount with thousands separators and 2 decimals: `$1,234.50`.
pub fn currency(value: f64) -> String {
    format!("${}", with_thousands(value, 2))
}

/// Signed percentage with 2 decimals, without the `%` sign.
pub fn percent(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(with_thousands(0.0, 2), "0.00");
        assert_eq!(with_thousands(999.0, 2), "999.00");
        assert_eq!(with_thousands(1000.0, 2), "1,000.00");
        assert_eq!(with_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(with_thousands(100_000.0, 0), "100,000");
    }

    #[test]
    fn currency_format() {
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(1_320_000_000_000.0), "$1,320,000,000,000.00");
        assert_eq!(currency(-12.5), "$-12.50");
    }

    #[test]
    fn rounding_carries_into_new_group() {
        assert_eq!(currency(999.999), "$1,000.00");
    }

    #[test]
    fn percent_format() {
        assert_eq!(percent(5.0), "5.00");
        assert_eq!(percent(-2.345), "-2.35");
        assert_eq!(percent(12.3456), "12.35");
    }
}

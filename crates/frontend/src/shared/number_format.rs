//! Number formatting for balances, costs and token counts

/// Format with a thousands separator (space) and the given number of decimals
///
/// # Examples
///
/// ```text
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    // "-0.00" reads badly in a ledger
    let sign = if grouped.chars().all(|c| c == '0' || c == ' ')
        && decimal_part.map(|d| d.chars().all(|c| c == '0')).unwrap_or(true)
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Balance / revenue: `$1 234.56`
pub fn format_usd(value: f64) -> String {
    with_dollar(format_number_with_decimals(value, 2))
}

/// Per-request costs are fractions of a cent: `$0.0021`
pub fn format_cost(value: f64) -> String {
    with_dollar(format_number_with_decimals(value, 4))
}

/// Signed ledger amount: `+$5.00` / `-$0.02`
pub fn format_signed_usd(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_usd(value))
    } else {
        format_usd(value)
    }
}

/// Integer counts: `1 234 567`
pub fn format_count(value: i64) -> String {
    format_number_with_decimals(value as f64, 0)
}

fn with_dollar(formatted: String) -> String {
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", formatted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1 234.6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
        assert_eq!(format_number_with_decimals(1234567.891, 3), "1 234 567.891");
        assert_eq!(format_number_with_decimals(-1234.5, 2), "-1 234.50");
        assert_eq!(format_number_with_decimals(123.0, 0), "123");
    }

    #[test]
    fn test_money() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1234.5), "$1 234.50");
        assert_eq!(format_usd(-2.5), "-$2.50");
        assert_eq!(format_cost(0.00213), "$0.0021");
        assert_eq!(format_signed_usd(5.0), "+$5.00");
        assert_eq!(format_signed_usd(-0.02), "-$0.02");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_usd(-0.0001), "$0.00");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1234567), "1 234 567");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(-1234), "-1 234");
    }
}

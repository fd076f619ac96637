use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with no decimals and `,` as the thousands separator.
///
/// `1234567.5` renders as `1,234,568`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "0".to_string();
    }

    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded.is_sign_negative() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a count with `,` as the thousands separator.
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Formats a percentage rate with two decimals, e.g. `3.50%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", rate.round_dp(2))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_are_grouped_and_rounded() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(12500.00)), "12,500");
        assert_eq!(format_amount(dec!(1234567.5)), "1,234,568");
        assert_eq!(format_amount(dec!(-45210.4)), "-45,210");
        assert_eq!(format_amount(dec!(-0.2)), "0");
    }

    #[test]
    fn counts_and_rates() {
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(1_000_000), "1,000,000");
        assert_eq!(format_rate(dec!(3.5)), "3.50%");
        assert_eq!(format_rate(dec!(4.126)), "4.13%");
    }
}

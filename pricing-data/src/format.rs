use pricing_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats an amount with two decimal places, thousands separators and a
/// currency suffix, e.g. `19,425.00 AED`.
pub fn format_money(
    amount: Decimal,
    currency: &str,
) -> String {
    let rounded = format!("{:.2}", round_half_up(amount));
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    format!("{sign}{}.{fraction} {currency}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_money(dec!(19425), "AED"), "19,425.00 AED");
        assert_eq!(format_money(dec!(1234567.891), "AED"), "1,234,567.89 AED");
    }

    #[test]
    fn formats_small_amounts_without_separator() {
        assert_eq!(format_money(dec!(925), "AED"), "925.00 AED");
        assert_eq!(format_money(dec!(0), "USD"), "0.00 USD");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_money(dec!(0.005), "AED"), "0.01 AED");
        assert_eq!(format_money(dec!(-1000.005), "AED"), "-1,000.01 AED");
    }
}

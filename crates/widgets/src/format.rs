/// Insert `,` thousands separators: `1247832` → `"1,247,832"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount with separators and two decimals: `"$89,432.50"`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
    let cents = (amount * 100.0).round() as u64;
    format!("${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Per-second rate: `"2341/s"`.
pub fn format_rate(per_sec: u64) -> String {
    format!("{per_sec}/s")
}

/// Milliseconds with one decimal: `"123.4ms"`.
pub fn format_ms(ms: f64) -> String {
    format!("{ms:.1}ms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_247_832), "1,247,832");
    }

    #[test]
    fn currency_two_decimals() {
        assert_eq!(format_currency(89_432.5), "$89,432.50");
        assert_eq!(format_currency(0.004), "$0.00");
        assert_eq!(format_currency(f64::NAN), "$0.00");
    }

    #[test]
    fn rate_and_ms() {
        assert_eq!(format_rate(2_341), "2341/s");
        assert_eq!(format_ms(123.44), "123.4ms");
    }
}

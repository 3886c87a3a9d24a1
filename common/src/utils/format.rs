//! Display formatting helpers shared by tables and reports.

/// Formats a USD amount with thousands separators, e.g. `$84,000`.
///
/// Cents are shown only when the amount is not whole.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let whole = amount.trunc() as u64;
    let cents = ((amount - amount.trunc()) * 100.0).round() as u64;

    let mut digits = whole.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{tail},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents:02}")
    }
}

/// Formats a size in GB, switching to TB above 1024 GB.
pub fn format_gb(gb: f64) -> String {
    if gb >= 1024.0 {
        format!("{:.1} TB", gb / 1024.0)
    } else {
        format!("{gb:.0} GB")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(84_000.0), "$84,000");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(950.0), "$950");
    }

    #[test]
    fn keeps_cents_when_fractional() {
        assert_eq!(format_currency(45.5), "$45.50");
    }

    #[test]
    fn switches_to_terabytes() {
        assert_eq!(format_gb(500.0), "500 GB");
        assert_eq!(format_gb(2048.0), "2.0 TB");
    }
}

// 💲 Display formatting
// The only place estimates get rounded.

/// `146_100_000.0` → `"$146.1M"`; negative values keep the sign in front
pub fn format_millions(value: f64) -> String {
    let millions = value / 1_000_000.0;
    // Sign follows the displayed value so tiny negatives print as $0.0M
    if (millions * 10.0).round() < 0.0 {
        format!("-${:.1}M", -millions)
    } else {
        format!("${:.1}M", millions.abs())
    }
}

/// Millions as a bare number with one decimal, for tables and charts
pub fn to_millions(value: f64) -> f64 {
    (value / 100_000.0).round() / 10.0
}

/// `150_000.0` → `"$150K"`
pub fn format_rate_thousands(rate: f64) -> String {
    let thousands = rate / 1_000.0;
    if thousands.fract() == 0.0 {
        format!("${:.0}K", thousands)
    } else {
        format!("${:.1}K", thousands)
    }
}

/// `150_000.0` → `"$150,000"`
pub fn format_rate(rate: f64) -> String {
    format!("${}", group_thousands(rate.round() as i64))
}

/// `1234` → `"1,234"`
pub fn format_headcount(headcount: u32) -> String {
    group_thousands(i64::from(headcount))
}

/// `62.833` → `"62.8%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

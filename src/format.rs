//! Display helpers for counts and yen amounts.

/// `1000` -> `"¥1,000"`.
pub fn format_currency(amount: u64) -> String {
    format!("¥{}", group_thousands(amount))
}

/// `5` -> `"5枚"`.
pub fn format_count(count: u64) -> String {
    format!("{}枚", count)
}

/// Compact amount for calendar cells: `"¥1.5万"`, `"¥3k"`, `"¥800"`.
pub fn format_currency_short(amount: u64) -> String {
    if amount >= 10_000 {
        // tenths of 10,000, rounded half up
        let tenths = (amount + 500) / 1_000;
        format!("¥{}.{}万", tenths / 10, tenths % 10)
    } else if amount >= 1_000 {
        format!("¥{}k", (amount + 500) / 1_000)
    } else {
        format!("¥{}", amount)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

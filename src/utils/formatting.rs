//! Formatting utilities used for CLI and document outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Group the integer part with commas: 12345 → "12,345".
fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount with cents: 3200.0 → "$3,200.00"
pub fn money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!("{sign}${}.{cents}", group_thousands(int_part))
}

/// Dollar amount without cents, as printed in invoice tables: 640.0 → "$640"
pub fn money_whole(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.0}", amount.abs());
    format!("{sign}${}", group_thousands(&fixed))
}

pub fn hours(h: f64) -> String {
    format!("{:.1} Hours", h)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "✓ Yes" } else { "✗ No" }
}

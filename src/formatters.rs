//! Display formatting shared by every surface.

/// Formats an amount as US dollars: `$1,234.50`.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Lowercases, drops everything but ASCII word characters and spaces, then
/// turns each run of spaces into a single `-`. Leading and trailing spaces
/// become dashes too, so `" Grand Suite "` is `"-grand-suite-"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut after_space = false;
    for c in text.to_lowercase().chars() {
        if c == ' ' {
            if !after_space {
                slug.push('-');
                after_space = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            after_space = false;
        }
    }
    slug
}

/// Cuts `text` to `max_chars` characters and appends `...` when it was longer.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Formats a number with `,` thousands separators and at most three
/// fraction digits, trailing zeros dropped (`82500` → `82,500`,
/// `1234.5` → `1,234.5`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_yen(value: f64) -> String {
    format!("¥{}", format_number(value))
}

/// 去掉 `¥` 與千分位逗號後解析，失敗時回傳 0
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| *c != '¥' && *c != ',').collect();
    parse_float_prefix(cleaned.trim()).unwrap_or(0.0)
}

/// Parses the longest leading float literal, ignoring anything after it
/// (`"4003 aprox"` → 4003). Returns `None` when there is no leading number.
fn parse_float_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(82500.0), "82,500");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-16500.0), "-16,500");
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(82500.0), "¥82,500");
        assert_eq!(format_yen(0.0), "¥0");
    }

    #[test]
    fn test_parse_price_strips_symbol_and_separators() {
        assert_eq!(parse_price("¥16,500"), 16500.0);
        assert_eq!(parse_price("¥4,003"), 4003.0);
        assert_eq!(parse_price("1,234.50"), 1234.5);
        assert_eq!(parse_price("4003 aprox"), 4003.0);
    }

    #[test]
    fn test_parse_price_falls_back_to_zero() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("¥"), 0.0);
        assert_eq!(parse_price("consultar"), 0.0);
    }
}

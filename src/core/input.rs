//! Amount text handling for the editable fields

const MAX_WHOLE_DIGITS: usize = 12;
const MAX_INTEGER_DIGITS: usize = 10;
const MAX_FRACTION_DIGITS: usize = 8;

/// Keeps digits and a single decimal point, trimming overly long input.
///
/// Without a point at most 12 digits survive. With one, the integer part is
/// capped at 10 digits and the fraction at 8; digits after any further
/// points are folded into the fraction.
pub fn sanitize_amount(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return whole.chars().take(MAX_WHOLE_DIGITS).collect();
    }

    let integer: String = whole.chars().take(MAX_INTEGER_DIGITS).collect();
    let fraction: String = rest.concat().chars().take(MAX_FRACTION_DIGITS).collect();
    format!("{integer}.{fraction}")
}

/// Keeps only digits and points, without length limits.
pub fn strip_non_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parses the leading number in `text`, yielding zero when there is none.
pub fn parse_amount(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if fraction_end > fraction_start || has_digits {
            end = fraction_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return 0.0;
    }

    trimmed[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses `text` as a whole number, allowing `,` or `_` digit grouping and
/// exponents. Returns `None` when anything else is left over.
pub fn parse_exact_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    let starts_numeric = cleaned
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !starts_numeric {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a number the way scripts see it.
///
/// Integral values drop their fractional part (`3.0` renders as `3`), other
/// values use the shortest representation that round-trips. Magnitudes are
/// always written positionally, never with an exponent. Infinities and NaN are
/// spelled out.
///
/// ## Example
/// ```
/// use tern::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(3.5), "3.5");
/// assert_eq!(format_number(-0.25), "-0.25");
/// assert_eq!(format_number(1e21), "1000000000000000000000");
/// assert_eq!(format_number(0.0001), "0.0001");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // `Display` for f64 already omits a zero fraction.
    value.to_string()
}

/// Parses user-supplied text as a number.
///
/// Surrounding whitespace is ignored. Returns `None` when the trimmed text is
/// not a floating-point literal.
///
/// ## Example
/// ```
/// use tern::util::num::parse_number;
///
/// assert_eq!(parse_number(" 42 "), Some(42.0));
/// assert_eq!(parse_number("1e3"), Some(1000.0));
/// assert_eq!(parse_number("forty-two"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

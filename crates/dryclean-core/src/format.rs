//! Input formatting for phone and payment-card fields.

const PHONE_DIGITS: usize = 10;
const CARD_DIGITS: usize = 16;

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Formats a US phone number as it is typed: `(555) 123-4567`.
///
/// Non-digits are dropped and input beyond ten digits is ignored. Partial
/// input is formatted progressively (`"555"`, `"(555) 12"`, ...).
#[must_use]
pub fn format_phone_number(input: &str) -> String {
    let d = digits(input, PHONE_DIGITS);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("({}) {}", &d[..3], &d[3..]),
        _ => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
    }
}

/// Formats a card number into groups of four: `4242 4242 4242 4242`.
#[must_use]
pub fn format_card_number(input: &str) -> String {
    format_groups(&digits(input, CARD_DIGITS))
}

/// Masks a card number, keeping only the last four digits visible.
///
/// `"4242424242424242"` becomes `"**** **** **** 4242"`. Inputs with four or
/// fewer digits are returned as their digits.
#[must_use]
pub fn mask_card_number(input: &str) -> String {
    let d = digits(input, CARD_DIGITS);
    if d.len() <= 4 {
        return d;
    }
    let (hidden, visible) = d.split_at(d.len() - 4);
    let masked: String = "*".repeat(hidden.len()) + visible;
    format_groups(&masked)
}

fn format_groups(s: &str) -> String {
    s.as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Small utility helpers for text normalization, encoding, and formatting.
//!
//! The functions in this module are intentionally lightweight and
//! dependency-free to keep hot paths fast. They are used by the filter
//! engine, the view-model builders, and the UI.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// Pad `value` with spaces to `width` terminal columns, accounting for wide
/// characters; values already wider than `width` are returned as-is.
#[must_use]
pub fn pad_columns(value: &str, width: usize) -> String {
    let w = value.width();
    if w >= width {
        return value.to_string();
    }
    format!("{value}{}", " ".repeat(width - w))
}

/// Case-fold a value for matching; the single normalization step shared by
/// the free-text filter and the component-tag haystack.
#[must_use]
pub fn normalize_text(value: &str) -> String {
    value.to_lowercase()
}

/// Strip angle-bracket markup and collapse runs of whitespace.
///
/// Descriptions in hand-edited datasets occasionally carry inline HTML; list
/// excerpts must never show raw tags.
#[must_use]
pub fn strip_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;
    for ch in value.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// What: Build a short excerpt from a possibly-marked-up description.
///
/// Inputs:
/// - `value`: Raw description text.
/// - `max_len`: Character budget for the excerpt.
///
/// Output:
/// - The cleaned text, truncated at a character boundary with a trailing
///   ellipsis when it exceeds `max_len`.
#[must_use]
pub fn excerpt(value: &str, max_len: usize) -> String {
    let clean = strip_markup(value);
    if clean.chars().count() <= max_len {
        return clean;
    }
    let cut: String = clean.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Format an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`; unparsable input is
/// returned unchanged.
#[must_use]
pub fn format_date(iso: &str) -> String {
    match chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Format an amount as Euro with Italian separators, e.g. `1.250,00 €`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (units, frac) = (cents / 100, (cents % 100).abs());
    let mut digits = units.abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let rest = digits.split_off(digits.len() - 3);
        grouped = format!(".{rest}{grouped}");
    }
    let sign = if units < 0 { "-" } else { "" };
    format!("{sign}{digits}{grouped},{frac:02} €")
}

/// Build the "request info" mailto link carrying the product coordinates as
/// query parameters, mirroring the contact-page URLs of the web catalog.
#[must_use]
pub fn contact_url(
    email: &str,
    product_id: &str,
    name: &str,
    code: &str,
    category: &str,
    variant: Option<&str>,
) -> String {
    let mut url = format!(
        "mailto:{email}?subject={}&body=product%3D{}%26nome%3D{}%26codice%3D{}%26cat%3D{}",
        percent_encode(&format!("Richiesta informazioni {name}")),
        percent_encode(product_id),
        percent_encode(name),
        percent_encode(code),
        percent_encode(category),
    );
    if let Some(v) = variant {
        url.push_str("%26variant%3D");
        url.push_str(&percent_encode(v));
    }
    url
}

/// Build the WhatsApp deep link with a pre-filled message.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", percent_encode(message))
}

/// Build the shareable deep link for a product or one of its variants, in
/// the same shape as the catalog's web URLs.
#[must_use]
pub fn share_url(product_id: &str, sub: Option<&str>) -> String {
    match sub {
        Some(code) => format!("prodotto.html?id={product_id}&sub={}", percent_encode(code)),
        None => format!("prodotto.html?id={product_id}"),
    }
}

//! Lexical helpers for scanning raw JSON text

use std::fmt::Write;

use super::ScanAbort;

/// Decode the JSON string literal starting at `pos`
///
/// `pos` must point at the opening quote. Returns the decoded contents and
/// the offset one past the closing quote. Runs of unescaped characters are
/// copied as slices; escape sequences (including `\uXXXX` and surrogate
/// pairs) are resolved in place.
pub(super) fn read_string(text: &str, pos: usize) -> Result<(String, usize), ScanAbort> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'"') {
        return Err(ScanAbort::Malformed);
    }
    let mut decoded = String::new();
    let mut i = pos + 1;
    let mut run = i;
    loop {
        match bytes.get(i) {
            None => return Err(ScanAbort::Malformed),
            Some(b'"') => {
                decoded.push_str(&text[run..i]);
                return Ok((decoded, i + 1));
            }
            Some(b'\\') => {
                decoded.push_str(&text[run..i]);
                let (c, next) = read_escape(text, i)?;
                decoded.push(c);
                i = next;
                run = i;
            }
            Some(_) => i += 1,
        }
    }
}

fn read_escape(text: &str, backslash: usize) -> Result<(char, usize), ScanAbort> {
    match text.as_bytes().get(backslash + 1) {
        Some(b'"') => Ok(('"', backslash + 2)),
        Some(b'\\') => Ok(('\\', backslash + 2)),
        Some(b'/') => Ok(('/', backslash + 2)),
        Some(b'b') => Ok(('\u{0008}', backslash + 2)),
        Some(b'f') => Ok(('\u{000C}', backslash + 2)),
        Some(b'n') => Ok(('\n', backslash + 2)),
        Some(b'r') => Ok(('\r', backslash + 2)),
        Some(b't') => Ok(('\t', backslash + 2)),
        Some(b'u') => read_unicode_escape(text, backslash + 2),
        _ => Err(ScanAbort::Malformed),
    }
}

/// Resolve `\uXXXX`, pairing a high surrogate with the low surrogate that
/// must follow it
fn read_unicode_escape(text: &str, digits: usize) -> Result<(char, usize), ScanAbort> {
    let high = read_hex4(text, digits)?;
    if (0xD800..=0xDBFF).contains(&high) {
        let bytes = text.as_bytes();
        if bytes.get(digits + 4) == Some(&b'\\') && bytes.get(digits + 5) == Some(&b'u') {
            let low = read_hex4(text, digits + 6)?;
            if (0xDC00..=0xDFFF).contains(&low) {
                let cp = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(cp)
                    .map(|c| (c, digits + 10))
                    .ok_or(ScanAbort::Malformed);
            }
        }
        return Err(ScanAbort::Malformed);
    }
    char::from_u32(high)
        .map(|c| (c, digits + 4))
        .ok_or(ScanAbort::Malformed)
}

fn read_hex4(text: &str, pos: usize) -> Result<u32, ScanAbort> {
    let digits = text
        .as_bytes()
        .get(pos..pos + 4)
        .filter(|d| d.iter().all(u8::is_ascii_hexdigit))
        .ok_or(ScanAbort::Malformed)?;
    // The slice is all ASCII hex digits
    let digits = std::str::from_utf8(digits).map_err(|_| ScanAbort::Malformed)?;
    u32::from_str_radix(digits, 16).map_err(|_| ScanAbort::Malformed)
}

/// Lex the longest valid JSON number starting at `pos`
///
/// Returns the offset one past the number's final character. Nothing after
/// that character is examined, so `0001` lexes as `0` and `123abc` as `123`;
/// the caller decides whether the remainder matters.
pub(super) fn read_number(text: &str, pos: usize) -> Result<usize, ScanAbort> {
    let bytes = text.as_bytes();
    let mut i = pos;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b) if b.is_ascii_digit() => {
            while bytes.get(i).map_or(false, u8::is_ascii_digit) {
                i += 1;
            }
        }
        _ => return Err(ScanAbort::Malformed),
    }
    if bytes.get(i) == Some(&b'.') {
        let mut j = i + 1;
        while bytes.get(j).map_or(false, u8::is_ascii_digit) {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let first_digit = j;
        while bytes.get(j).map_or(false, u8::is_ascii_digit) {
            j += 1;
        }
        if j > first_digit {
            i = j;
        }
    }
    Ok(i)
}

/// Append `s` to `out` with JSON-safe escaping
pub(super) fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}

//! Evaluation of literal tokens into constant values.
//!
//! Branch expressions may spell a constant as a literal (`case 6:`), so the
//! raw token text is turned into the same [`ConstValue`] the front end
//! reports for declared constants. Anything that cannot be evaluated exactly
//! yields `None`.

use super::ast::LitKind;
use super::types::ConstValue;

/// Evaluates a literal token. Returns `None` for malformed or unsupported
/// literals (imaginary numbers, hex floats, out-of-range integers).
pub fn literal_value(kind: LitKind, raw: &str) -> Option<ConstValue> {
    match kind {
        LitKind::Int => parse_int(raw).map(ConstValue::Int),
        LitKind::Float => parse_float(raw).map(ConstValue::float),
        LitKind::Char => parse_char(raw).map(|c| ConstValue::Int(i128::from(u32::from(c)))),
        LitKind::String => parse_string(raw).map(ConstValue::Str),
        LitKind::Imag => None,
    }
}

fn parse_int(raw: &str) -> Option<i128> {
    let s = raw.replace('_', "");
    let (digits, radix) = match s.get(..2) {
        Some("0x") | Some("0X") => (&s[2..], 16),
        Some("0o") | Some("0O") => (&s[2..], 8),
        Some("0b") | Some("0B") => (&s[2..], 2),
        // Legacy octal: 0755
        _ if s.len() > 1 && s.starts_with('0') => (&s[1..], 8),
        _ => (s.as_str(), 10),
    };
    if digits.is_empty() {
        return None;
    }
    i128::from_str_radix(digits, radix).ok()
}

fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.replace('_', "");
    if s.starts_with("0x") || s.starts_with("0X") {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_char(raw: &str) -> Option<char> {
    let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let c = match chars.next()? {
        // Byte escapes in a rune literal denote the code point of that value
        '\\' => match unescape(&mut chars, '\'')? {
            Escape::Byte(b) => char::from(b),
            Escape::Char(c) => c,
        },
        c => c,
    };
    // Exactly one character between the quotes
    if chars.next().is_some() {
        return None;
    }
    Some(c)
}

fn parse_string(raw: &str) -> Option<String> {
    if let Some(inner) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return Some(inner.replace('\r', ""));
    }

    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    let mut buf = [0u8; 4];
    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match unescape(&mut chars, '"')? {
                Escape::Byte(b) => {
                    bytes.push(b);
                    continue;
                }
                Escape::Char(c) => c,
            }
        } else {
            c
        };
        bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
    String::from_utf8(bytes).ok()
}

/// A decoded escape sequence.
enum Escape {
    /// `\xNN` or `\NNN`: a single byte
    Byte(u8),
    Char(char),
}

/// Decodes one escape sequence; the leading backslash is already consumed.
fn unescape<I>(chars: &mut I, quote: char) -> Option<Escape>
where
    I: Iterator<Item = char>,
{
    let c = match chars.next()? {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        '\\' => '\\',
        q if q == quote => q,
        'x' => return u8::try_from(hex_digits(chars, 2)?).ok().map(Escape::Byte),
        'u' => return char::from_u32(hex_digits(chars, 4)?).map(Escape::Char),
        'U' => return char::from_u32(hex_digits(chars, 8)?).map(Escape::Char),
        d @ '0'..='7' => {
            let mut value = d.to_digit(8)?;
            for _ in 0..2 {
                value = value * 8 + chars.next()?.to_digit(8)?;
            }
            // Octal escapes above \377 are invalid
            return u8::try_from(value).ok().map(Escape::Byte);
        }
        _ => return None,
    };
    Some(Escape::Char(c))
}

fn hex_digits<I>(chars: &mut I, len: usize) -> Option<u32>
where
    I: Iterator<Item = char>,
{
    let mut value = 0u32;
    for _ in 0..len {
        value = value.checked_mul(16)? + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

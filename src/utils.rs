use std::borrow::Cow;

use abnf_core::is_ctl as is_CTL;

/// Undo quoted-pair escaping: `\X` becomes `X` for any character `X`.
///
/// This function only allocates a new String when the input actually
/// contains an escape.
pub fn unescape_quoted(escaped: &str) -> Cow<str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }

    let mut unescaped = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(c) = chars.next() {
                unescaped.push(c);
            }
        } else {
            unescaped.push(c);
        }
    }

    Cow::Owned(unescaped)
}

/// `specials` from RFC 5322 (plus SP and controls): any of these in a
/// local part forces a quoted-string rendering.
pub fn is_quote_trigger(c: char) -> bool {
    if !c.is_ascii() {
        return false;
    }

    let byte = c as u8;

    is_CTL(byte)
        || matches!(
            byte,
            b' ' | b'"'
                | b'('
                | b')'
                | b','
                | b':'
                | b';'
                | b'<'
                | b'>'
                | b'@'
                | b'['
                | b'\\'
                | b']'
        )
}

/// Whether a raw local part cannot be rendered as a bare dot-atom.
pub fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value.contains("..")
        || value.starts_with('.')
        || value.ends_with('.')
        || value.chars().any(is_quote_trigger)
}

/// Render a raw local part the way it must appear inside an address:
/// bare when possible, otherwise wrapped in DQUOTEs with `\`, `"`, SP,
/// and HTAB escaped.
///
/// SP and HTAB are escaped because unescaped whitespace inside a quoted
/// string is folding whitespace and would vanish on a re-parse.
pub fn encode_local_part(value: &str) -> Cow<str> {
    if !needs_quoting(value) {
        return Cow::Borrowed(value);
    }

    let mut encoded = String::with_capacity(value.len() + 2);

    encoded.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | ' ' | '\t') {
            encoded.push('\\');
        }
        encoded.push(c);
    }
    encoded.push('"');

    Cow::Owned(encoded)
}

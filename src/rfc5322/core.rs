use std::borrow::Cow;

use abnf_core::{is_alpha as is_ALPHA, is_digit as is_DIGIT};
use mailaddr_types::core::{CommentElement, CommentTree};
use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    error::{make_error, Error, ErrorKind},
    sequence::delimited,
    IResult,
};

use crate::utils::unescape_quoted;

// ----- character classes -----

/// ```abnf
/// atext = ALPHA / DIGIT / "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" /
///         "-" / "/" / "=" / "?" / "^" / "_" / "`" / "{" / "|" / "}" / "~"
/// ```
///
/// RFC 6532 widens `atext` to include `UTF8-non-ascii`, so every code
/// point outside ASCII is accepted as well.
pub fn is_atext(c: char) -> bool {
    if !c.is_ascii() {
        return true;
    }

    let byte = c as u8;

    is_ALPHA(byte)
        || is_DIGIT(byte)
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
        )
}

/// Folding whitespace: WSP plus the CRLF of a folded line.
pub fn is_fws_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// ```abnf
/// dtext = %d33-90 / %d94-126
/// ```
///
/// Printable ASCII without `[`, `]`, and `\`.
pub fn is_dtext(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '[' | ']' | '\\')
}

// ----- tokens -----

/// `atom = 1*atext` (CFWS handled by the callers)
pub fn atom(input: &str) -> IResult<&str, &str> {
    take_while1(is_atext)(input)
}

/// ```abnf
/// dot-atom-text = 1*atext *("." 1*atext)
/// ```
///
/// CFWS is permitted around the atoms but never inside them; comments
/// found there are appended to `comments`. The returned value joins the
/// atoms with single dots and borrows from the input whenever no CFWS
/// interrupted the run.
pub fn dot_atom<'a>(
    input: &'a str,
    comments: &mut Vec<CommentElement<'a>>,
) -> IResult<&'a str, Cow<'a, str>> {
    let (mut rest, first) = atom(input)?;

    let mut atoms = vec![first];
    let mut contiguous = true;

    loop {
        let (after_lead, lead) = cfws(rest)?;
        let after_dot = match char::<_, Error<&str>>('.')(after_lead) {
            Ok((after_dot, _)) => after_dot,
            Err(_) => break,
        };
        let (after_trail, trail) = cfws(after_dot)?;
        // A committed dot must be followed by another atom.
        let (after_atom, part) = atom(after_trail)?;

        if after_lead.len() < rest.len() || after_trail.len() < after_dot.len() {
            contiguous = false;
        }
        comments.extend(lead);
        comments.extend(trail);

        atoms.push(part);
        rest = after_atom;
    }

    let value = if contiguous {
        Cow::Borrowed(&input[..input.len() - rest.len()])
    } else {
        Cow::Owned(atoms.join("."))
    };

    Ok((rest, value))
}

/// ```abnf
/// quoted-string = DQUOTE *([FWS] qcontent) [FWS] DQUOTE
/// ```
///
/// A `\` escapes any following character; an unescaped DQUOTE terminates
/// the span. Folding whitespace is semantically invisible and dropped
/// from the value, so `" "` has the value `""`. Only allocates when an
/// escape or FWS has to be rewritten.
pub fn quoted_string(input: &str) -> IResult<&str, Cow<str>> {
    let (body, _) = char('"')(input)?;

    let bytes = body.as_bytes();
    let mut value = String::new();
    let mut clean = true;
    let mut at = 0;

    loop {
        let Some(&byte) = bytes.get(at) else {
            // Unterminated quoted string.
            return Err(nom::Err::Error(make_error(input, ErrorKind::Char)));
        };

        match byte {
            b'"' => {
                let value = if clean {
                    Cow::Borrowed(&body[..at])
                } else {
                    Cow::Owned(value)
                };

                return Ok((&body[at + 1..], value));
            }
            b'\\' => {
                let Some(c) = body[at + 1..].chars().next() else {
                    // Dangling escape at end of input.
                    return Err(nom::Err::Error(make_error(input, ErrorKind::Char)));
                };

                if clean {
                    value.push_str(&body[..at]);
                    clean = false;
                }
                value.push(c);
                at += 1 + c.len_utf8();
            }
            b' ' | b'\t' | b'\r' | b'\n' => {
                if clean {
                    value.push_str(&body[..at]);
                    clean = false;
                }
                at += 1;
            }
            _ => {
                // # Safety
                //
                // `unwrap` is safe because `at` is on a char boundary and
                // `body[at..]` is non-empty.
                let c = body[at..].chars().next().unwrap();

                if !clean {
                    value.push(c);
                }
                at += c.len_utf8();
            }
        }
    }
}

/// ```abnf
/// comment  = "(" *([FWS] ccontent) [FWS] ")"
/// ccontent = ctext / quoted-pair / comment
/// ```
///
/// Nesting depth is unbounded. Literal runs between nested comments
/// become `Text` elements (quoted-pairs unescaped, whitespace kept
/// verbatim); each nested span becomes one `Nested` element. A span
/// without any element yields a single empty `Text`, so `()` parses to
/// `[""]`.
pub fn comment(input: &str) -> IResult<&str, CommentTree> {
    let (body, _) = char('(')(input)?;

    let bytes = body.as_bytes();
    let mut elements: Vec<CommentElement> = Vec::new();
    let mut start = 0;
    let mut at = 0;

    loop {
        let Some(&byte) = bytes.get(at) else {
            // Unmatched "(".
            return Err(nom::Err::Error(make_error(input, ErrorKind::Char)));
        };

        match byte {
            b'\\' => {
                let Some(c) = body[at + 1..].chars().next() else {
                    return Err(nom::Err::Error(make_error(input, ErrorKind::Char)));
                };

                at += 1 + c.len_utf8();
            }
            b'(' => {
                if at > start {
                    elements.push(CommentElement::Text(unescape_quoted(&body[start..at])));
                }

                let (remaining, nested) = comment(&body[at..])?;
                elements.push(CommentElement::Nested(nested));

                at = body.len() - remaining.len();
                start = at;
            }
            b')' => {
                if at > start {
                    elements.push(CommentElement::Text(unescape_quoted(&body[start..at])));
                }
                if elements.is_empty() {
                    elements.push(CommentElement::Text(Cow::Borrowed("")));
                }

                return Ok((&body[at + 1..], CommentTree::from(elements)));
            }
            _ => {
                // # Safety
                //
                // `unwrap` is safe because `at` is on a char boundary and
                // `body[at..]` is non-empty.
                let c = body[at..].chars().next().unwrap();

                at += c.len_utf8();
            }
        }
    }
}

/// ```abnf
/// CFWS = (1*([FWS] comment) [FWS]) / FWS
/// ```
///
/// Consumes any run of folding whitespace and comments (including none)
/// and splices the elements of every comment into one flat sequence:
/// `(a)(b)` contributes `["a", "b"]`, `(())` contributes `[[""]]`.
pub fn cfws(input: &str) -> IResult<&str, Vec<CommentElement>> {
    let mut elements = Vec::new();
    let mut rest = input;

    loop {
        let trimmed = rest.trim_start_matches(is_fws_char);

        if trimmed.starts_with('(') {
            let (remaining, tree) = comment(trimmed)?;
            elements.extend(tree.into_elements());
            rest = remaining;
        } else {
            return Ok((trimmed, elements));
        }
    }
}

/// ```abnf
/// domain-literal = "[" *dtext "]"
/// ```
///
/// Returns the raw bracket contents; classification happens later.
pub fn domain_literal(input: &str) -> IResult<&str, &str> {
    delimited(char('['), take_while(is_dtext), char(']'))(input)
}

//! Parsers for the `addr-spec` grammar of RFC 5322, widened per RFC 6532.

use std::borrow::Cow;

use mailaddr_types::core::CommentElement;
use nom::{character::complete::char, IResult};

pub mod core;

use self::core::{cfws, domain_literal, dot_atom, quoted_string};

/// The raw decomposition of `local-part "@" domain`, before any domain
/// classification or policy has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrSpec<'a> {
    pub local_part: Cow<'a, str>,
    /// True iff the local part matched the quoted-string alternative.
    pub quoted_string: bool,
    pub local_comments: Vec<CommentElement<'a>>,
    /// For a domain literal, the raw bracket contents.
    pub domain: Cow<'a, str>,
    /// True iff the domain matched the domain-literal alternative.
    pub domain_literal: bool,
    pub domain_comments: Vec<CommentElement<'a>>,
}

/// ```abnf
/// addr-spec  = local-part "@" domain
/// local-part = dot-atom / quoted-string
/// domain     = dot-atom / domain-literal
/// ```
///
/// CFWS is consumed around every token; comments left of the `@` are
/// collected into `local_comments`, comments right of it (including
/// trailing ones) into `domain_comments`. The caller decides what to do
/// with a non-empty remainder -- a second `@` or an unmatched `)` shows
/// up there.
pub fn addr_spec(input: &str) -> IResult<&str, AddrSpec> {
    let (rest, mut local_comments) = cfws(input)?;

    let (rest, (local_part, quoted)) = if rest.starts_with('"') {
        let (rest, value) = quoted_string(rest)?;
        (rest, (value, true))
    } else {
        let (rest, value) = dot_atom(rest, &mut local_comments)?;
        (rest, (value, false))
    };

    let (rest, trailing) = cfws(rest)?;
    local_comments.extend(trailing);

    let (rest, _) = char('@')(rest)?;

    let (rest, mut domain_comments) = cfws(rest)?;

    let (rest, (domain, literal)) = if rest.starts_with('[') {
        let (rest, value) = domain_literal(rest)?;
        (rest, (Cow::Borrowed(value), true))
    } else {
        let (rest, value) = dot_atom(rest, &mut domain_comments)?;
        (rest, (value, false))
    };

    let (rest, trailing) = cfws(rest)?;
    domain_comments.extend(trailing);

    Ok((
        rest,
        AddrSpec {
            local_part,
            quoted_string: quoted,
            local_comments,
            domain,
            domain_literal: literal,
            domain_comments,
        },
    ))
}

#[cfg(test)]
mod tests {
    use mailaddr_types::core::CommentTree;

    use super::*;

    fn text(s: &str) -> CommentElement {
        CommentElement::Text(Cow::Borrowed(s))
    }

    #[test]
    fn test_addr_spec() {
        let (rem, spec) = addr_spec("simple@example.com").unwrap();
        assert!(rem.is_empty());
        assert_eq!(spec.local_part, "simple");
        assert!(!spec.quoted_string);
        assert_eq!(spec.domain, "example.com");
        assert!(!spec.domain_literal);
        assert!(spec.local_comments.is_empty());
        assert!(spec.domain_comments.is_empty());
    }

    #[test]
    fn test_addr_spec_quoted_string() {
        let (rem, spec) = addr_spec("\"john..doe\"@example.org").unwrap();
        assert!(rem.is_empty());
        assert_eq!(spec.local_part, "john..doe");
        assert!(spec.quoted_string);

        let (_, spec) = addr_spec("\" \"@example.org").unwrap();
        assert_eq!(spec.local_part, "");
        assert!(spec.quoted_string);
    }

    #[test]
    fn test_addr_spec_domain_literal() {
        let (rem, spec) = addr_spec("jsmith@[IPv6:2001:db8::1]").unwrap();
        assert!(rem.is_empty());
        assert_eq!(spec.domain, "IPv6:2001:db8::1");
        assert!(spec.domain_literal);

        let (_, spec) = addr_spec("jsmith@[192.168.2.1]").unwrap();
        assert_eq!(spec.domain, "192.168.2.1");
        assert!(spec.domain_literal);
    }

    #[test]
    fn test_addr_spec_comments() {
        let (rem, spec) = addr_spec("(1)a(2)@(3)example.com(4)").unwrap();
        assert!(rem.is_empty());
        assert_eq!(spec.local_comments, vec![text("1"), text("2")]);
        assert_eq!(spec.domain_comments, vec![text("3"), text("4")]);

        let (_, spec) = addr_spec("john.smith@(comment)example.com").unwrap();
        assert_eq!(spec.local_part, "john.smith");
        assert_eq!(spec.domain, "example.com");
        assert_eq!(spec.domain_comments, vec![text("comment")]);
    }

    #[test]
    fn test_addr_spec_remainder() {
        // A second "@" is left for the caller to reject.
        let (rem, spec) = addr_spec("A@b@c@example.com").unwrap();
        assert_eq!(spec.local_part, "A");
        assert_eq!(spec.domain, "b");
        assert_eq!(rem, "@c@example.com");

        let (rem, _) = addr_spec("jsmith@example.com>").unwrap();
        assert_eq!(rem, ">");
    }

    #[test]
    fn test_addr_spec_rejects() {
        // No "@" at all.
        assert!(addr_spec("Abc.example.com").is_err());

        assert!(addr_spec("@example.com").is_err());
        assert!(addr_spec("a@").is_err());
        assert!(addr_spec(".a@example.com").is_err());
        assert!(addr_spec("a.@example.com").is_err());
        assert!(addr_spec("a..b@example.com").is_err());
        assert!(addr_spec("a@.example.com").is_err());
        assert!(addr_spec("a@b..com").is_err());
        assert!(addr_spec("just\"not\"right@example.com").is_err());
        assert!(addr_spec("this is\"not\\allowed@example.com").is_err());
        assert!(addr_spec("a(unterminated@example.com").is_err());
        assert!(addr_spec("\"unterminated@example.com").is_err());
    }

    #[test]
    fn test_addr_spec_nested_comment_tree() {
        let (_, spec) = addr_spec("(()a(b)((c)))a@example.com").unwrap();
        assert_eq!(
            spec.local_comments,
            vec![
                CommentElement::Nested(CommentTree::from(vec![text("")])),
                text("a"),
                CommentElement::Nested(CommentTree::from(vec![text("b")])),
                CommentElement::Nested(CommentTree::from(vec![CommentElement::Nested(
                    CommentTree::from(vec![text("c")])
                )])),
            ]
        );
    }
}

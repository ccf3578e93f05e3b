//! The decoding boundary: grammar, classification, policy, assembly.

use std::borrow::Cow;

use mailaddr_types::{
    core::{CommentTree, Domain, DomainType, EmailAddress, LocalPart},
    error::PolicyViolation,
    options::ParseOptions,
};
use nom::error::Error;

use crate::{
    domain::{classify, DomainShape, IPV6_TAG},
    error::{DecodeError, GrammarError},
    rfc5322::{addr_spec, AddrSpec},
    utils::encode_local_part,
};

/// Parse with all rejection flags off. Every failure collapses to `None`.
pub fn parse_email(address: &str) -> Option<EmailAddress<'_>> {
    parse_email_with(address, ParseOptions::default())
}

/// Parse under the given policy. Every failure collapses to `None`.
pub fn parse_email_with(address: &str, options: ParseOptions) -> Option<EmailAddress<'_>> {
    match decode(address, options) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::debug!("rejected address: {err}");

            None
        }
    }
}

/// Parse and classify `address`, keeping the failure cause.
///
/// Policy flags are evaluated only after parsing and classification have
/// fully succeeded.
pub fn decode(address: &str, options: ParseOptions) -> Result<EmailAddress<'_>, DecodeError> {
    let (rest, parsed) = addr_spec(address).map_err(|err| grammar_error(address, err))?;
    if !rest.is_empty() {
        return Err(GrammarError {
            at: address.len() - rest.len(),
        }
        .into());
    }

    let AddrSpec {
        local_part,
        quoted_string,
        local_comments,
        domain,
        domain_comments,
        ..
    } = parsed;

    let rfc6532 = !address.is_ascii();

    let (value, safe_value, kind) = match classify(&domain)? {
        DomainShape::Ipv6 => {
            let value = strip_ipv6_tag(domain);

            (value.clone(), value, DomainType::Ipv6)
        }
        DomainShape::Ipv4 => (domain.clone(), domain, DomainType::Ipv4),
        DomainShape::Hostname { kind, ascii } => {
            let safe_value = match ascii {
                Some(ascii) => Cow::Owned(ascii),
                None => domain.clone(),
            };

            (domain, safe_value, kind)
        }
    };

    let local_part = LocalPart {
        value: local_part,
        quoted_string,
        comments: CommentTree::from(local_comments),
    };
    let domain = Domain {
        value,
        safe_value,
        comments: CommentTree::from(domain_comments),
        kind,
    };

    check_policy(&local_part, &domain, options)?;

    let encoded = encode_local_part(&local_part.value);
    let (address, safe_address) = match domain.kind {
        DomainType::Ipv6 => {
            let address = format!("{encoded}@[IPv6:{}]", domain.value);

            (address.clone(), address)
        }
        _ => (
            format!("{encoded}@{}", domain.value),
            format!("{encoded}@{}", domain.safe_value),
        ),
    };

    Ok(EmailAddress {
        local_part,
        domain,
        address,
        safe_address,
        rfc6532,
    })
}

fn check_policy(
    local_part: &LocalPart<'_>,
    domain: &Domain<'_>,
    options: ParseOptions,
) -> Result<(), PolicyViolation> {
    if options.reject_quoted_string && local_part.quoted_string {
        return Err(PolicyViolation::QuotedString);
    }
    if options.reject_comments && !(local_part.comments.is_empty() && domain.comments.is_empty()) {
        return Err(PolicyViolation::Comments);
    }
    if options.reject_local && domain.kind == DomainType::Local {
        return Err(PolicyViolation::LocalDomain);
    }
    if options.reject_ip && domain.kind.is_ip() {
        return Err(PolicyViolation::IpDomain);
    }

    Ok(())
}

fn strip_ipv6_tag(domain: Cow<'_, str>) -> Cow<'_, str> {
    // classify() already verified the tag is present.
    match domain {
        Cow::Borrowed(value) => Cow::Borrowed(&value[IPV6_TAG.len()..]),
        Cow::Owned(value) => Cow::Owned(value[IPV6_TAG.len()..].to_owned()),
    }
}

fn grammar_error(input: &str, err: nom::Err<Error<&str>>) -> DecodeError {
    let at = match err {
        nom::Err::Error(err) | nom::Err::Failure(err) => input.len() - err.input.len(),
        nom::Err::Incomplete(_) => input.len(),
    };

    GrammarError { at }.into()
}

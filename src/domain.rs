//! Domain classification and normalization.
//!
//! Runs after the grammar, on the bracket-stripped domain text. The four
//! shapes are mutually exclusive and tried in order: IPv6 (tagged
//! literal), IPv4 (dotted quad, bracketed or bare), FQDN, single-label
//! local name. Non-ASCII hostnames are converted with the external IDNA
//! codec first, and the shape tests run against the ASCII form.

use abnf_core::{is_alpha as is_ALPHA, is_digit as is_DIGIT};
use mailaddr_types::core::DomainType;

use crate::error::{DecodeError, DomainError, DomainLiteralError};

/// Mandatory tag of an IPv6 domain literal (RFC 5321), case-sensitive.
pub(crate) const IPV6_TAG: &str = "IPv6:";

/// ACE prefix of an IDNA label.
const ACE_PREFIX: &str = "xn--";

/// Longest hostname, in its ASCII form.
const MAX_DOMAIN_LENGTH: usize = 253;

/// Longest single label of a multi-label hostname.
const MAX_LABEL_LENGTH: usize = 63;

/// The classified shape of a domain. For `Hostname`, `ascii` carries the
/// IDNA-converted form when the raw domain was not pure ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DomainShape {
    Ipv6,
    Ipv4,
    Hostname {
        kind: DomainType,
        ascii: Option<String>,
    },
}

pub(crate) fn classify(raw: &str) -> Result<DomainShape, DecodeError> {
    // Colons can only arrive via a domain literal.
    if raw.contains(':') {
        let addr = raw
            .strip_prefix(IPV6_TAG)
            .ok_or(DomainLiteralError::MissingIpv6Tag)?;
        validate_ipv6(addr)?;

        return Ok(DomainShape::Ipv6);
    }

    if is_dotted_quad(raw) {
        return Ok(DomainShape::Ipv4);
    }

    let ascii = if raw.is_ascii() {
        None
    } else {
        let converted = idna::domain_to_ascii(raw).map_err(|_| DomainError::Idna {
            domain: raw.to_owned(),
        })?;

        Some(converted)
    };
    let candidate = ascii.as_deref().unwrap_or(raw);

    let kind = if is_fqdn(candidate) {
        DomainType::Fqdn
    } else if is_local_name(candidate) {
        DomainType::Local
    } else {
        return Err(DomainError::UnknownShape {
            domain: candidate.to_owned(),
        }
        .into());
    };

    Ok(DomainShape::Hostname { kind, ascii })
}

/// Exactly four `.`-separated decimal octets, each 0-255 without leading
/// zeros.
pub(crate) fn is_dotted_quad(s: &str) -> bool {
    let mut octets = 0;

    for part in s.split('.') {
        octets += 1;
        if octets > 4 || !is_octet(part) {
            return false;
        }
    }

    octets == 4
}

fn is_octet(s: &str) -> bool {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(is_DIGIT) {
        return false;
    }
    if s.len() > 1 && s.starts_with('0') {
        return false;
    }

    // # Safety
    //
    // `unwrap` is safe because `s` is at most three ASCII digits.
    s.parse::<u16>().unwrap() <= 255
}

/// IPv6 textual form: 1-4 hex digit groups, at most one `::` (eight
/// groups without it, at most seven alongside it), an optional dotted-quad
/// tail counting as two groups, and an optional non-empty `%zone` suffix.
fn validate_ipv6(addr: &str) -> Result<(), DomainLiteralError> {
    let ip = match addr.split_once('%') {
        Some((ip, zone)) => {
            if zone.is_empty() {
                return Err(DomainLiteralError::EmptyZone);
            }
            ip
        }
        None => addr,
    };

    match ip.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return Err(DomainLiteralError::ExtraCompression);
            }
            // The "::" stands in for at least one zero group.
            if count_groups(head, false)? + count_groups(tail, true)? > 7 {
                return Err(DomainLiteralError::GroupCount);
            }
        }
        None => {
            if count_groups(ip, true)? != 8 {
                return Err(DomainLiteralError::GroupCount);
            }
        }
    }

    Ok(())
}

fn count_groups(s: &str, quad_tail: bool) -> Result<usize, DomainLiteralError> {
    if s.is_empty() {
        return Ok(0);
    }

    let parts: Vec<&str> = s.split(':').collect();
    let mut groups = 0;

    for (nth, part) in parts.iter().enumerate() {
        let last = nth == parts.len() - 1;

        if last && quad_tail && part.contains('.') {
            if !is_dotted_quad(part) {
                return Err(DomainLiteralError::BadGroup((*part).to_owned()));
            }
            groups += 2;
        } else if !part.is_empty() && part.len() <= 4 && part.bytes().all(|b| b.is_ascii_hexdigit())
        {
            groups += 1;
        } else {
            return Err(DomainLiteralError::BadGroup((*part).to_owned()));
        }
    }

    Ok(groups)
}

/// Two or more labels of `[A-Za-z0-9-]`, each 1-63 chars with no edge
/// hyphens, at most 253 chars in total, and a final label that is not
/// all digits.
fn is_fqdn(domain: &str) -> bool {
    if domain.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|label| is_label(label)) {
        return false;
    }

    // An all-digits TLD would be ambiguous with an address literal.
    //
    // # Safety
    //
    // `unwrap` is safe because `labels` holds at least two entries.
    !labels.last().unwrap().bytes().all(is_DIGIT)
}

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && label
            .bytes()
            .all(|b| is_ALPHA(b) || is_DIGIT(b) || b == b'-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// A single hostname label without a TLD: `[A-Za-z0-9]` then
/// `[A-Za-z0-9-]*` with no trailing hyphen, optionally behind an `xn--`
/// ACE prefix. All-digits names are rejected as ambiguous with a bare
/// IPv4 octet run.
fn is_local_name(domain: &str) -> bool {
    if domain.bytes().all(is_DIGIT) {
        return false;
    }

    let label = domain.strip_prefix(ACE_PREFIX).unwrap_or(domain);
    let bytes = label.as_bytes();

    match bytes.split_first() {
        Some((first, _)) => {
            (is_ALPHA(*first) || is_DIGIT(*first))
                && bytes.iter().all(|&b| is_ALPHA(b) || is_DIGIT(b) || b == b'-')
                && !label.ends_with('-')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(raw: &str) -> Option<DomainType> {
        match classify(raw) {
            Ok(DomainShape::Ipv6) => Some(DomainType::Ipv6),
            Ok(DomainShape::Ipv4) => Some(DomainType::Ipv4),
            Ok(DomainShape::Hostname { kind, .. }) => Some(kind),
            Err(_) => None,
        }
    }

    #[test]
    fn test_ipv4() {
        assert_eq!(kind("192.168.2.1"), Some(DomainType::Ipv4));
        assert_eq!(kind("255.255.255.255"), Some(DomainType::Ipv4));
        assert_eq!(kind("0.0.0.0"), Some(DomainType::Ipv4));

        // Bad quads fall through to the hostname tests and fail there.
        assert_eq!(kind("255.255.255"), None);
        assert_eq!(kind("255.255.255.255.255"), None);
        assert_eq!(kind("255.255.255.256"), None);
        assert_eq!(kind("1.2.3.04"), None);
    }

    #[test]
    fn test_ipv6() {
        assert_eq!(kind("IPv6:2001:db8::1"), Some(DomainType::Ipv6));
        assert_eq!(
            kind("IPv6:1111:2222:3333:4444:5555:6666:7777:8888"),
            Some(DomainType::Ipv6)
        );
        assert_eq!(kind("IPv6:::"), None);
        assert_eq!(kind("IPv6:::1"), Some(DomainType::Ipv6));
        assert_eq!(kind("IPv6:fe80::1%eth0"), Some(DomainType::Ipv6));
        assert_eq!(kind("IPv6:::ffff:192.168.1.1"), Some(DomainType::Ipv6));
        assert_eq!(
            kind("IPv6:1111:2222:3333:4444:5555:6666:192.168.1.1"),
            Some(DomainType::Ipv6)
        );

        // Missing tag.
        assert!(matches!(
            classify("1111:2222:3333:4444:5555:6666:7777:8888"),
            Err(DecodeError::DomainLiteral(
                DomainLiteralError::MissingIpv6Tag
            ))
        ));
        // Tag is case-sensitive.
        assert!(classify("ipv6:2001:db8::1").is_err());

        // Group-count violations.
        assert_eq!(kind("IPv6:1111:2222:3333:4444:5555:6666:7777"), None);
        assert_eq!(
            kind("IPv6:1111:2222:3333:4444:5555:6666:7777:8888:9999"),
            None
        );
        assert_eq!(kind("IPv6:1111:2222:3333:4444:5555:255.255.255.255"), None);
        assert_eq!(
            kind("IPv6:1111:2222:3333:4444:5555:6666:7777:255.255.255.255"),
            None
        );
        assert_eq!(
            kind("IPv6:1111:2222:3333:4444:5555:6666:7777:8888::"),
            None
        );

        // Malformed groups.
        assert_eq!(kind("IPv6:2001:db8::xyzt"), None);
        assert_eq!(kind("IPv6:2001:db8::12345"), None);
        assert_eq!(kind("IPv6::1111:2222:3333:4444:5555:6666:7777:8888"), None);
        assert_eq!(kind("IPv6:1::2::3"), None);
        assert_eq!(kind("IPv6:fe80::1%"), None);
    }

    #[test]
    fn test_fqdn() {
        assert_eq!(kind("example.com"), Some(DomainType::Fqdn));
        assert_eq!(kind("s.example"), Some(DomainType::Fqdn));
        assert_eq!(kind("strange-example.com"), Some(DomainType::Fqdn));
        assert_eq!(kind("EXAMPLE.COM"), Some(DomainType::Fqdn));

        assert_eq!(kind("-example.com"), None);
        assert_eq!(kind("example-.com"), None);
        assert_eq!(kind("example.com-"), None);
        assert_eq!(kind("under_score.example.com"), None);
        assert_eq!(kind("iana.123"), None);

        // Label and total length bounds.
        let label63 = "a".repeat(63);
        let label64 = "a".repeat(64);
        assert_eq!(kind(&format!("{label63}.com")), Some(DomainType::Fqdn));
        assert_eq!(kind(&format!("{label64}.com")), None);

        let domain253 = format!("{}aaa", "a.".repeat(125));
        let domain254 = format!("{}aaaa", "a.".repeat(125));
        assert_eq!(domain253.len(), 253);
        assert_eq!(domain254.len(), 254);
        assert_eq!(kind(&domain253), Some(DomainType::Fqdn));
        assert_eq!(kind(&domain254), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(kind("mailserver1"), Some(DomainType::Local));
        assert_eq!(kind("abcdef"), Some(DomainType::Local));
        assert_eq!(kind("xn--abc"), Some(DomainType::Local));
        assert_eq!(kind("a-b-c"), Some(DomainType::Local));
        // Bracketed non-IP literals end up here with their brackets
        // stripped.
        assert_eq!(kind("RFC-5322-domain-literal"), Some(DomainType::Local));

        assert_eq!(kind("123456"), None);
        assert_eq!(kind("-abc"), None);
        assert_eq!(kind("abc-"), None);
        assert_eq!(kind("ab_c"), None);
        assert_eq!(kind(""), None);
    }

    #[test]
    fn test_idna() {
        match classify("bücher.example") {
            Ok(DomainShape::Hostname { kind, ascii }) => {
                assert_eq!(kind, DomainType::Fqdn);
                assert_eq!(ascii.as_deref(), Some("xn--bcher-kva.example"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }

        // Pure ASCII skips the codec entirely.
        match classify("example.com") {
            Ok(DomainShape::Hostname { ascii, .. }) => assert_eq!(ascii, None),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}

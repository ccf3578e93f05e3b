//! Error-related types.
//!
//! Every variant collapses to "no result" at the [`parse_email`](crate::parse_email)
//! boundary; the discriminated form exists so embedders and tests can
//! tell failure causes apart without re-deriving them from the input.

use mailaddr_types::error::PolicyViolation;
use thiserror::Error;

/// Why an address failed to decode.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum DecodeError {
    /// The input does not parse as `local-part "@" domain`.
    #[error("no addr-spec grammar match: {0}")]
    Grammar(#[from] GrammarError),
    /// IP-literal syntax is present but malformed.
    #[error("malformed domain literal: {0}")]
    DomainLiteral(#[from] DomainLiteralError),
    /// The domain is a syntactically fine dot-atom that matches neither
    /// the FQDN nor the local-name grammar.
    #[error("unrecognized domain shape: {0}")]
    Domain(#[from] DomainError),
    /// The parse succeeded but a caller-supplied rejection flag applies.
    #[error("rejected by policy: {0}")]
    Policy(#[from] PolicyViolation),
}

/// A grammar mismatch, pointing at the first offending byte.
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("cannot continue at byte {at}")]
pub struct GrammarError {
    /// Byte offset into the input at which parsing got stuck.
    pub at: usize,
}

/// A malformed IP address literal.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum DomainLiteralError {
    /// A literal containing `:` must begin with the (case-sensitive)
    /// `IPv6:` tag.
    #[error("literal with colons lacks the `IPv6:` tag")]
    MissingIpv6Tag,
    #[error("invalid IPv6 group `{0}`")]
    BadGroup(String),
    #[error("wrong number of IPv6 groups")]
    GroupCount,
    #[error("more than one `::`")]
    ExtraCompression,
    #[error("empty zone identifier")]
    EmptyZone,
}

/// A hostname that fits no recognized shape.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum DomainError {
    /// The external IDNA codec refused the domain.
    #[error("IDNA conversion failed for `{domain}`")]
    Idna { domain: String },
    /// Matches neither the FQDN nor the single-label local-name grammar
    /// (bad label, length bound exceeded, or an all-digits label).
    #[error("`{domain}` matches neither hostname grammar")]
    UnknownShape { domain: String },
}

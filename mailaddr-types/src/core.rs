//! Core data types
//!
//! This module exposes the decomposed form of a parsed address.
//!
//! # Overview
//!
//! ```text
//! ┌────────────────────────────────┐
//! │          EmailAddress          │
//! │  address / safe_address flags  │
//! └──────┬──────────────────┬──────┘
//!        │                  │
//! ┌──────▼──────┐    ┌──────▼──────┐
//! │  LocalPart  │    │   Domain    │
//! └──────┬──────┘    └──┬───────┬──┘
//!        │              │       │
//!        │  ┌───────────▼─┐ ┌───▼──────┐
//!        └──►  CommentTree│ │DomainType│
//!           └─────────────┘ └──────────┘
//! ```

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fully parsed and classified email address.
///
/// `address` and `safe_address` are always well-formed `local@domain`
/// renderings; they differ only in the domain representation (original
/// Unicode vs. ASCII-safe), never in the local part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress<'a> {
    /// The part left of the `@`.
    pub local_part: LocalPart<'a>,
    /// The part right of the `@`.
    pub domain: Domain<'a>,
    /// Canonical rendering using the original Unicode domain.
    pub address: String,
    /// ASCII-only rendering using the punycode-converted domain.
    pub safe_address: String,
    /// True iff the input contained a code point outside printable ASCII,
    /// i.e., the address was processed in RFC 6532 mode.
    pub rfc6532: bool,
}

impl Display for EmailAddress<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}

/// The local part of an address.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalPart<'a> {
    /// The raw, unescaped value.
    ///
    /// Never re-escaped; escaping is applied only when an address
    /// rendering is composed.
    pub value: Cow<'a, str>,
    /// True iff the grammar matched the quoted-string alternative,
    /// independent of whether quoting is required for re-serialization.
    pub quoted_string: bool,
    /// Comments found in the CFWS around the local part.
    pub comments: CommentTree<'a>,
}

/// The domain of an address.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain<'a> {
    /// The raw domain. Brackets are stripped for literals, as is the
    /// `IPv6:` tag.
    pub value: Cow<'a, str>,
    /// ASCII-safe form; equals `value` unless punycode conversion ran.
    pub safe_value: Cow<'a, str>,
    /// Comments found in the CFWS around the domain.
    pub comments: CommentTree<'a>,
    /// The shape the domain was classified as.
    pub kind: DomainType,
}

/// The shape of a parsed domain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainType {
    /// Multi-label hostname with a non-numeric final label.
    Fqdn,
    /// Single-label hostname lacking a top-level domain.
    Local,
    /// Dotted-quad IPv4 address, bracketed or bare.
    Ipv4,
    /// Bracketed IPv6 address (`[IPv6:...]`).
    Ipv6,
}

impl DomainType {
    /// Whether the domain is an IP address rather than a hostname.
    pub fn is_ip(&self) -> bool {
        matches!(self, Self::Ipv4 | Self::Ipv6)
    }
}

impl Display for DomainType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fqdn => "fqdn",
            Self::Local => "local",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        })
    }
}

/// One element of a comment tree.
///
/// Text between nested comment spans becomes a [`Text`](Self::Text)
/// element; each nested span becomes one [`Nested`](Self::Nested) element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentElement<'a> {
    Text(Cow<'a, str>),
    Nested(CommentTree<'a>),
}

/// A possibly-empty ordered sequence of comment elements.
///
/// Nesting depth is unbounded and mirrors the parenthesization of the
/// input exactly; an empty comment (`()`) contributes the empty string.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommentTree<'a>(Vec<CommentElement<'a>>);

impl<'a> CommentTree<'a> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn elements(&self) -> &[CommentElement<'a>] {
        &self.0
    }

    pub fn into_elements(self) -> Vec<CommentElement<'a>> {
        self.0
    }
}

impl<'a> From<Vec<CommentElement<'a>>> for CommentTree<'a> {
    fn from(elements: Vec<CommentElement<'a>>) -> Self {
        Self(elements)
    }
}

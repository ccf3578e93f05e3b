//! # Strict email address codec
//!
//! mailaddr-codec validates and decomposes email addresses against the
//! `addr-spec` grammar of [RFC 5322](https://www.rfc-editor.org/rfc/rfc5322.html),
//! with the internationalization extensions of
//! [RFC 6532](https://www.rfc-editor.org/rfc/rfc6532.html).
//! It is built on [mailaddr-types] and adds parsing support using [nom].
//!
//! Parsing is strict: nested comments, folding whitespace, quoted-string
//! local parts, IPv4/IPv6 domain literals, and IDNA (punycode) conversion
//! of non-ASCII hostnames are all handled exactly, and everything else is
//! rejected. There are no permissive heuristics, and nothing is
//! normalized beyond what the grammar itself mandates (in particular, no
//! lower-casing).
//!
//! ## Example
//!
//! ```rust
//! use mailaddr_codec::{parse_email, DomainType};
//!
//! let parsed = parse_email("jsmith@[IPv6:2001:db8::1]").unwrap();
//!
//! assert_eq!(parsed.local_part.value, "jsmith");
//! assert_eq!(parsed.domain.value, "2001:db8::1");
//! assert_eq!(parsed.domain.kind, DomainType::Ipv6);
//! assert_eq!(parsed.address, "jsmith@[IPv6:2001:db8::1]");
//! ```
//!
//! ## Policy
//!
//! Callers can reject classes of addresses that parse fine but are
//! unwanted in a given deployment:
//!
//! ```rust
//! use mailaddr_codec::{parse_email_with, ParseOptions};
//!
//! let options = ParseOptions {
//!     reject_ip: true,
//!     ..Default::default()
//! };
//!
//! assert!(parse_email_with("a@192.168.1.1", options).is_none());
//! assert!(parse_email_with("a@[IPv6:2001:db8::1]", options).is_none());
//! assert!(parse_email_with("a@example.com", options).is_some());
//! ```
//!
//! ## Internationalized addresses
//!
//! ```rust
//! use mailaddr_codec::parse_email;
//!
//! let parsed = parse_email("hans@bücher.example").unwrap();
//!
//! assert!(parsed.rfc6532);
//! assert_eq!(parsed.address, "hans@bücher.example");
//! assert_eq!(parsed.safe_address, "hans@xn--bcher-kva.example");
//! ```
//!
//! The public boundary is [`parse_email`]/[`parse_email_with`], which
//! collapse every failure to `None`. [`codec::decode`] keeps the failure
//! cause as a [`DecodeError`](error::DecodeError) for embedders and
//! tests that need to tell causes apart.
//!
//! [mailaddr-types]: mailaddr_types
//! [nom]: https://docs.rs/nom/latest/nom/

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod codec;
mod domain;
pub mod error;
pub mod rfc5322;
pub mod utils;

pub use mailaddr_types::{
    core::{CommentElement, CommentTree, Domain, DomainType, EmailAddress, LocalPart},
    error::PolicyViolation,
    options::ParseOptions,
};

pub use crate::{
    codec::{decode, parse_email, parse_email_with},
    error::DecodeError,
};

//! # Misuse-resistant email address types
//!
//! The central type is [`EmailAddress`](core::EmailAddress), the fully decomposed form of an
//! [RFC 5322](https://www.rfc-editor.org/rfc/rfc5322.html) `addr-spec`
//! (with the internationalization extensions of
//! [RFC 6532](https://www.rfc-editor.org/rfc/rfc6532.html)).
//! It is produced by a parser -- typically `mailaddr-codec` -- and cannot
//! be observed in a half-valid state: when an `EmailAddress` exists, its
//! `address` and `safe_address` renderings are well-formed `local@domain`
//! strings, its domain carries a definite [`DomainType`](core::DomainType),
//! and its comment trees mirror the parenthesization of the input exactly.
//!
//! String fields are [`Cow`](std::borrow::Cow)s borrowing from the parsed
//! input wherever no rewriting (unescaping, whitespace folding, punycode
//! conversion) was necessary.
//!
//! [`ParseOptions`](options::ParseOptions) carries the caller-supplied
//! rejection flags, and [`PolicyViolation`](error::PolicyViolation) names
//! the flag a parsed address tripped over.

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod error;
pub mod options;

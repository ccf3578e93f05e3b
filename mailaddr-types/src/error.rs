//! Error-related types.

use thiserror::Error;

/// A policy violation.
///
/// Returned when an address parses fine but trips one of the rejection
/// flags in [`ParseOptions`](crate::options::ParseOptions).
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub enum PolicyViolation {
    #[error("local part is a quoted string")]
    QuotedString,
    #[error("address contains comments")]
    Comments,
    #[error("domain is a single-label local name")]
    LocalDomain,
    #[error("domain is an IP address")]
    IpDomain,
}

//! Caller-supplied parsing policy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rejection flags applied after an address parsed and classified
/// successfully.
///
/// All flags default to `false` and are evaluated independently of each
/// other.
///
/// ```rust
/// use mailaddr_types::options::ParseOptions;
///
/// let options = ParseOptions {
///     reject_ip: true,
///     ..Default::default()
/// };
/// assert!(!options.reject_comments);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Reject any address whose local part is a quoted string.
    pub reject_quoted_string: bool,
    /// Reject any address whose local part or domain carries comments.
    pub reject_comments: bool,
    /// Reject any address whose domain is a single-label local name.
    pub reject_local: bool,
    /// Reject any address whose domain is an IPv4 or IPv6 address.
    pub reject_ip: bool,
}

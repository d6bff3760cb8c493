//! Server identities on the consistent hash ring.
//!
//! Servers are opaque to the ring: it never interprets the identifier beyond
//! hashing it (together with a replica index) into virtual-node labels.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a physical server participating in the ring.
///
/// Newtype over `String` so server ids and arbitrary keys cannot be mixed up
/// at call sites. Ordered so listings of active servers are stable.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ServerId(String);

impl ServerId {
    /// Construct a server id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&ServerId> for ServerId {
    fn from(id: &ServerId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ServerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ServerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ServerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_server_id_display() {
        let id = ServerId::from("Server1");
        assert_eq!(id.to_string(), "Server1");
        assert_eq!(id, "Server1");
    }

    #[test]
    fn test_server_id_borrow_lookup() {
        let mut set = HashSet::new();
        set.insert(ServerId::from("Server1"));
        assert!(set.contains("Server1"));
        assert!(!set.contains("Server2"));
    }
}

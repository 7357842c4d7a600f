//! Wire-level records returned by the directory API

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod account;
pub mod org;
pub mod user;

pub use account::Account;
pub use org::{OrgKind, OrgRecord};
pub use user::User;

/// Opaque resource identifier.
///
/// The directory API is inconsistent about id types: organizations and users
/// carry integer ids while some deployments use string slugs. Both forms are
/// accepted and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Num(u64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Num(n) => write!(f, "{n}"),
            ResourceId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        ResourceId::Num(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id_from_number() {
        let id: ResourceId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ResourceId::Num(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_resource_id_from_string() {
        let id: ResourceId = serde_json::from_str("\"org-7\"").unwrap();
        assert_eq!(id, ResourceId::Text("org-7".to_string()));
        assert_eq!(id.to_string(), "org-7");
    }

    #[test]
    fn test_resource_id_round_trip() {
        let id = ResourceId::Num(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");

        let id = ResourceId::from("acme");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"acme\"");
    }
}

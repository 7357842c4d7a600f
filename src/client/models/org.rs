//! Organization records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Structural classification of an organization.
///
/// `sole` and `subsidiary` carry hierarchy semantics; every other value the
/// API emits marks a plain intermediate tier and is treated uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgKind {
    Sole,
    Subsidiary,
    #[serde(other)]
    Other,
}

impl fmt::Display for OrgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            OrgKind::Sole => "sole",
            OrgKind::Subsidiary => "subsidiary",
            OrgKind::Other => "other",
        };
        write!(f, "{tag}")
    }
}

/// Organization resource as returned by `/orgs/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgRecord {
    /// Organization ID
    pub id: ResourceId,

    /// Structural type tag
    #[serde(rename = "type")]
    pub kind: OrgKind,

    /// Owning organization, absent for top-level and sole orgs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_kind_known_values() {
        let kind: OrgKind = serde_json::from_str("\"sole\"").unwrap();
        assert_eq!(kind, OrgKind::Sole);

        let kind: OrgKind = serde_json::from_str("\"subsidiary\"").unwrap();
        assert_eq!(kind, OrgKind::Subsidiary);
    }

    #[test]
    fn test_org_kind_unknown_values_collapse_to_other() {
        for raw in ["\"division\"", "\"department\"", "\"other\""] {
            let kind: OrgKind = serde_json::from_str(raw).unwrap();
            assert_eq!(kind, OrgKind::Other);
        }
    }

    #[test]
    fn test_org_record_with_parent() {
        let record: OrgRecord =
            serde_json::from_str(r#"{"id": 3, "type": "subsidiary", "parent_id": 2}"#).unwrap();

        assert_eq!(record.id, ResourceId::Num(3));
        assert_eq!(record.kind, OrgKind::Subsidiary);
        assert_eq!(record.parent_id, Some(ResourceId::Num(2)));
    }

    #[test]
    fn test_org_record_without_parent() {
        let record: OrgRecord = serde_json::from_str(r#"{"id": 1, "type": "sole"}"#).unwrap();

        assert_eq!(record.parent_id, None);
    }

    #[test]
    fn test_org_record_null_parent() {
        let record: OrgRecord =
            serde_json::from_str(r#"{"id": 2, "type": "llc", "parent_id": null}"#).unwrap();

        assert_eq!(record.kind, OrgKind::Other);
        assert_eq!(record.parent_id, None);
    }
}

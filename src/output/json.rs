//! JSON output formatting
//!
//! Besides the generic `{data, meta}` wrapper, this module owns the flat
//! serialized view of an organization forest: one entry per surviving node,
//! children reduced to ids, emitted children-before-parents.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::models::{Account, OrgKind, ResourceId, User};
use crate::org::OrgNode;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

/// One organization in the flat serialized view of a forest.
#[derive(Debug, Clone, Serialize)]
pub struct OrgEntry {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub kind: OrgKind,
    /// Parent org id; null for roots. May reference an org elided by
    /// flattening.
    pub parent: Option<ResourceId>,
    pub children: Vec<ResourceId>,
    pub accounts: Vec<Account>,
    pub users: Vec<User>,
    pub support_score: u64,
}

/// Walk the owned forest into one entry per node, children before parents.
pub fn forest_to_entries(forest: &[OrgNode]) -> Vec<OrgEntry> {
    let mut entries = Vec::new();
    for root in forest {
        push_entries(root, &mut entries);
    }
    entries
}

fn push_entries(node: &OrgNode, entries: &mut Vec<OrgEntry>) {
    for child in node.children() {
        push_entries(child, entries);
    }

    entries.push(OrgEntry {
        id: node.id().clone(),
        kind: node.kind(),
        parent: node.parent().cloned(),
        children: node.children().iter().map(|c| c.id().clone()).collect(),
        accounts: node.accounts().to_vec(),
        users: node.users().to_vec(),
        support_score: node.support_score(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_new() {
        let data = vec!["item1", "item2"];
        let output = JsonOutput::new(data);

        assert_eq!(output.data, vec!["item1", "item2"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_wraps_data_and_meta() {
        let items = vec!["a"];
        let result = format_json(&items).unwrap();

        assert!(result.contains("\"data\""));
        assert!(result.contains("\"meta\""));
        assert!(result.contains("\"timestamp\""));
        assert!(result.contains("\"version\""));
    }

    fn account(org_id: u64, revenue: u64) -> Account {
        Account {
            org_id: ResourceId::Num(org_id),
            revenue,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_forest_to_entries_emits_children_first() {
        let mut root = OrgNode::new(ResourceId::Num(2), OrgKind::Other);
        root.attach_child(
            OrgNode::new(ResourceId::Num(3), OrgKind::Subsidiary)
                .with_accounts(vec![account(3, 100_000)]),
        );
        let sole = OrgNode::new(ResourceId::Num(1), OrgKind::Sole);

        let entries = forest_to_entries(&[sole, root]);

        let ids: Vec<String> = entries.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);

        let root_entry = &entries[2];
        assert_eq!(root_entry.children, vec![ResourceId::Num(3)]);
        assert_eq!(root_entry.parent, None);
        assert_eq!(root_entry.support_score, 2);

        let sub_entry = &entries[1];
        assert_eq!(sub_entry.parent, Some(ResourceId::Num(2)));
        assert_eq!(sub_entry.support_score, 2);
    }

    #[test]
    fn test_entry_serializes_null_parent_and_type_tag() {
        let node = OrgNode::new(ResourceId::Num(1), OrgKind::Sole);
        let entries = forest_to_entries(std::slice::from_ref(&node));

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["type"], "sole");
        assert_eq!(json["parent"], serde_json::Value::Null);
        assert_eq!(json["support_score"], 0);
        assert_eq!(json["children"], serde_json::json!([]));
    }
}

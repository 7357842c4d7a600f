//! User records

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// User resource as returned by `/users/{id}`, carried through to the output
/// without interpretation beyond the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: ResourceId,

    /// Remaining fields, passed through verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

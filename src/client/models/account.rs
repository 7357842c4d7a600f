//! Account records

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Account resource as returned by `/accounts/{id}`.
///
/// Only `org_id` and `revenue` drive any behavior; everything else the API
/// sends is carried through untouched so the serialized output mirrors the
/// source records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Owning organization
    pub org_id: ResourceId,

    /// Annual revenue in whole currency units
    pub revenue: u64,

    /// Remaining fields, passed through verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

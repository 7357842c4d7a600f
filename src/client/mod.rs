//! Directory API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod directory;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use directory::DirectoryClient;
pub use pagination::PaginatedFetcher;

/// The single read verb against the directory API.
///
/// `DirectoryClient` is the only implementation that performs network I/O;
/// everything above this seam is pure assembly over parsed bodies, which is
/// also what lets tests substitute a canned in-memory API.
#[async_trait]
pub trait ApiRead: Send + Sync {
    /// GET `path` with the given query pairs, returning the parsed JSON body.
    async fn read(&self, path: &str, query: &[(String, String)]) -> Result<Value>;
}

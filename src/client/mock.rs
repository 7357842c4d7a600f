//! Canned in-memory API for unit tests

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::ApiRead;
use crate::error::{ApiError, Result};

/// In-memory `ApiRead` serving canned bodies keyed by path, or by
/// `path?page=N` when the query carries a page number. No pacing, no
/// retries; an unknown key is an invalid-response error, which keeps
/// missing fixtures loud in tests.
#[derive(Default)]
pub struct CannedApi {
    responses: HashMap<String, Value>,
}

impl CannedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, body: Value) {
        self.responses.insert(key.to_string(), body);
    }
}

#[async_trait]
impl ApiRead for CannedApi {
    async fn read(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let key = match query.iter().find(|(k, _)| k.as_str() == "page") {
            Some((_, page)) => format!("{path}?page={page}"),
            None => path.to_string(),
        };

        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| ApiError::InvalidResponse(format!("no canned response for {key}")).into())
    }
}

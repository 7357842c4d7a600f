//! Pagination over directory listing endpoints

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ApiRead;
use super::models::ResourceId;
use crate::error::{ApiError, Result};

/// Query parameter carrying the 1-indexed page number
const PAGE_PARAM: &str = "page";

/// One page of a listing endpoint: the resource ids on this page plus the
/// total page count the server reports.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub results: Vec<ResourceId>,
    pub pages: u32,
}

/// Drains paginated listings and resolves id batches, one request at a time.
///
/// Adds no retry logic of its own; transient-failure handling lives entirely
/// in the client underneath, and any failure here aborts the whole batch.
pub struct PaginatedFetcher<C> {
    client: C,
}

impl<C: ApiRead> PaginatedFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Direct access for one-off reads that are not listings.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch every page of `path`, in page order.
    ///
    /// The server states the total page count on every response. Until the
    /// first response arrives a follow-up page is assumed to exist; a
    /// `pages: 1` answer on page 1 still terminates after that single read.
    pub async fn read_all(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<ListingPage>> {
        let mut results = Vec::new();
        let mut page: u32 = 1;
        let mut pages: u32 = 2;

        while page <= pages {
            let mut paged_query = query.to_vec();
            paged_query.push((PAGE_PARAM.to_string(), page.to_string()));

            let body = self.client.read(path, &paged_query).await?;
            let listing: ListingPage = serde_json::from_value(body)
                .map_err(|e| ApiError::InvalidResponse(format!("listing page for {path}: {e}")))?;

            pages = listing.pages;
            results.push(listing);
            page += 1;
        }

        debug!("drained {path}: {} page(s)", results.len());
        Ok(results)
    }

    /// Resolve each id at `path/{id}`, strictly in the order given.
    pub async fn read_all_by_id<T: DeserializeOwned>(
        &self,
        path: &str,
        ids: &[ResourceId],
        query: &[(String, String)],
    ) -> Result<Vec<T>> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let body = self.client.read(&format!("{path}/{id}"), query).await?;
            let parsed = serde_json::from_value(body)
                .map_err(|e| ApiError::InvalidResponse(format!("{path}/{id}: {e}")))?;
            results.push(parsed);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::mock::CannedApi;
    use crate::client::models::User;
    use crate::error::Error;

    #[tokio::test]
    async fn test_read_all_drains_every_page_in_order() {
        let mut api = CannedApi::new();
        api.insert("/orgs?page=1", json!({"results": [1, 2], "pages": 3}));
        api.insert("/orgs?page=2", json!({"results": [3], "pages": 3}));
        api.insert("/orgs?page=3", json!({"results": [4], "pages": 3}));
        let fetcher = PaginatedFetcher::new(api);

        let pages = fetcher.read_all("/orgs", &[]).await.unwrap();

        assert_eq!(pages.len(), 3);
        let ids: Vec<ResourceId> = pages.into_iter().flat_map(|p| p.results).collect();
        assert_eq!(
            ids,
            vec![1u64.into(), 2u64.into(), 3u64.into(), 4u64.into()]
        );
    }

    #[tokio::test]
    async fn test_read_all_single_page_still_terminates() {
        let mut api = CannedApi::new();
        api.insert("/orgs?page=1", json!({"results": [], "pages": 1}));
        let fetcher = PaginatedFetcher::new(api);

        let pages = fetcher.read_all("/orgs", &[]).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert!(pages[0].results.is_empty());
    }

    #[tokio::test]
    async fn test_read_all_missing_pages_field_is_invalid() {
        let mut api = CannedApi::new();
        api.insert("/orgs?page=1", json!({"results": [1]}));
        let fetcher = PaginatedFetcher::new(api);

        let err = fetcher.read_all("/orgs", &[]).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_read_all_by_id_preserves_order() {
        let mut api = CannedApi::new();
        api.insert("/users/7", json!({"id": 7, "name": "Kim"}));
        api.insert("/users/3", json!({"id": 3, "name": "Ada"}));
        let fetcher = PaginatedFetcher::new(api);

        let ids: Vec<ResourceId> = vec![7u64.into(), 3u64.into()];
        let users: Vec<User> = fetcher.read_all_by_id("/users", &ids, &[]).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, ResourceId::Num(7));
        assert_eq!(users[1].id, ResourceId::Num(3));
    }

    #[tokio::test]
    async fn test_read_all_by_id_aborts_on_first_failure() {
        let mut api = CannedApi::new();
        api.insert("/users/7", json!({"id": 7}));
        let fetcher = PaginatedFetcher::new(api);

        let ids: Vec<ResourceId> = vec![7u64.into(), 999u64.into()];
        let result: Result<Vec<User>> = fetcher.read_all_by_id("/users", &ids, &[]).await;

        assert!(result.is_err());
    }
}

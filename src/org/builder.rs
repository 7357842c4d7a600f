//! Forest assembly from directory API data

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::OrgNode;
use crate::client::models::{Account, OrgKind, OrgRecord, ResourceId, User};
use crate::client::{ApiRead, PaginatedFetcher};
use crate::error::{ApiError, Result};

/// Assembles the full organization forest from the directory API.
pub struct OrgTreeBuilder<C> {
    fetcher: PaginatedFetcher<C>,
}

/// Organizations partitioned by structural role.
///
/// Children are keyed by parent id and removed as they are linked, so an
/// org can never be constructed into the forest twice.
struct Partition {
    sole: Vec<OrgRecord>,
    top_level: Vec<OrgRecord>,
    by_parent: HashMap<ResourceId, Vec<OrgRecord>>,
}

impl Partition {
    fn from_records(orgs: Vec<OrgRecord>) -> Self {
        let mut sole = Vec::new();
        let mut top_level = Vec::new();
        let mut by_parent: HashMap<ResourceId, Vec<OrgRecord>> = HashMap::new();

        for org in orgs {
            if org.kind == OrgKind::Sole {
                sole.push(org);
            } else if let Some(parent_id) = org.parent_id.clone() {
                by_parent.entry(parent_id).or_default().push(org);
            } else {
                top_level.push(org);
            }
        }

        Self {
            sole,
            top_level,
            by_parent,
        }
    }
}

impl<C: ApiRead> OrgTreeBuilder<C> {
    pub fn new(client: C) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(client),
        }
    }

    /// Fetch everything and assemble one root per sole org and per
    /// top-level org: sole orgs first, each group in API order, children
    /// linked recursively below the top-level roots.
    pub async fn build(&self) -> Result<Vec<OrgNode>> {
        let orgs: Vec<OrgRecord> = self.load_all("/orgs").await?;
        debug!("loaded {} organization(s)", orgs.len());

        let accounts: Vec<Account> = self.load_all("/accounts").await?;
        debug!("loaded {} account(s)", accounts.len());

        let mut accounts_by_org: HashMap<ResourceId, Vec<Account>> = HashMap::new();
        for account in accounts {
            accounts_by_org
                .entry(account.org_id.clone())
                .or_default()
                .push(account);
        }

        let mut partition = Partition::from_records(orgs);
        let mut roots = Vec::new();

        for org in std::mem::take(&mut partition.sole) {
            roots.push(self.create_node(&org, &mut accounts_by_org).await?);
        }

        for org in std::mem::take(&mut partition.top_level) {
            let node = self.create_node(&org, &mut accounts_by_org).await?;
            let node = self
                .link_children(node, &mut partition.by_parent, &mut accounts_by_org)
                .await?;
            roots.push(node);
        }

        if !partition.by_parent.is_empty() {
            // Data-quality signal only: orgs referencing a parent that was
            // never constructed are dropped from the forest.
            let orphaned: Vec<String> =
                partition.by_parent.keys().map(ToString::to_string).collect();
            warn!(
                "dropped {} organization group(s) whose parent was never constructed: {}",
                orphaned.len(),
                orphaned.join(", ")
            );
        }

        debug!(
            "assembled {} root(s) holding {} account(s) and {} user(s)",
            roots.len(),
            roots
                .iter()
                .map(|root| root.accounts_with_subsidiaries().len())
                .sum::<usize>(),
            roots
                .iter()
                .map(|root| root.users_with_subsidiaries().len())
                .sum::<usize>(),
        );

        Ok(roots)
    }

    /// Drain a listing endpoint and resolve every listed id to its full
    /// record.
    async fn load_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let pages = self.fetcher.read_all(path, &[]).await?;
        let ids: Vec<ResourceId> = pages.into_iter().flat_map(|page| page.results).collect();
        self.fetcher.read_all_by_id(path, &ids, &[]).await
    }

    /// Construct one node: users fetched per org, accounts taken (once)
    /// from the prebuilt grouping.
    async fn create_node(
        &self,
        record: &OrgRecord,
        accounts_by_org: &mut HashMap<ResourceId, Vec<Account>>,
    ) -> Result<OrgNode> {
        let body = self
            .fetcher
            .client()
            .read(&format!("/users/org/{}", record.id), &[])
            .await?;
        let user_ids: Vec<ResourceId> = serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("user ids for org {}: {e}", record.id))
        })?;
        let users: Vec<User> = self.fetcher.read_all_by_id("/users", &user_ids, &[]).await?;

        let accounts = accounts_by_org.remove(&record.id).unwrap_or_default();

        Ok(OrgNode::new(record.id.clone(), record.kind)
            .with_accounts(accounts)
            .with_users(users))
    }

    /// Attach and recurse into every org whose parent is `parent`,
    /// consuming its grouping entry so the subtree is built exactly once.
    fn link_children<'a>(
        &'a self,
        mut parent: OrgNode,
        by_parent: &'a mut HashMap<ResourceId, Vec<OrgRecord>>,
        accounts_by_org: &'a mut HashMap<ResourceId, Vec<Account>>,
    ) -> Pin<Box<dyn Future<Output = Result<OrgNode>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(children) = by_parent.remove(parent.id()) {
                for record in children {
                    let node = self.create_node(&record, accounts_by_org).await?;
                    let node = self.link_children(node, by_parent, accounts_by_org).await?;
                    parent.attach_child(node);
                }
            }
            Ok(parent)
        })
    }
}

//! Organization tree entity
//!
//! `OrgNode` owns its subtree: children are held by value and a node's
//! parent is referenced by id only, never by pointer. Flattening consumes
//! nodes and transfers ownership of surviving subtrees to their adopters.

use crate::client::models::{Account, OrgKind, ResourceId, User};

pub mod builder;

pub use builder::OrgTreeBuilder;

/// Revenue covered by one support point
pub const REVENUE_PER_SUPPORT_POINT: u64 = 50_000;

/// One organizational unit with its accounts, users and owned children.
#[derive(Debug)]
pub struct OrgNode {
    id: ResourceId,
    kind: OrgKind,
    parent: Option<ResourceId>,
    children: Vec<OrgNode>,
    accounts: Vec<Account>,
    users: Vec<User>,
}

/// Streams accumulated while flattening one subtree.
///
/// `top` holds finalized nodes nobody adopts (sole orgs encountered along
/// the way); `accounts`/`users` are records still pending a merge point;
/// `last_subs` are the finalized merge points awaiting adoption by the next
/// merge point above.
#[derive(Default)]
struct FlattenStreams {
    top: Vec<OrgNode>,
    accounts: Vec<Account>,
    users: Vec<User>,
    last_subs: Vec<OrgNode>,
}

impl OrgNode {
    pub fn new(id: ResourceId, kind: OrgKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            children: Vec::new(),
            accounts: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<Account>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn kind(&self) -> OrgKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&ResourceId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[OrgNode] {
        &self.children
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Take ownership of `child`, rewriting its parent reference.
    pub fn attach_child(&mut self, mut child: OrgNode) {
        child.parent = Some(self.id.clone());
        self.children.push(child);
    }

    /// This node's accounts plus every descendant's, through children of
    /// all kinds.
    pub fn accounts_with_subsidiaries(&self) -> Vec<&Account> {
        let mut result: Vec<&Account> = self.accounts.iter().collect();
        for child in &self.children {
            result.extend(child.accounts_with_subsidiaries());
        }
        result
    }

    /// This node's users plus every descendant's.
    pub fn users_with_subsidiaries(&self) -> Vec<&User> {
        let mut result: Vec<&User> = self.users.iter().collect();
        for child in &self.children {
            result.extend(child.users_with_subsidiaries());
        }
        result
    }

    /// Support points warranted by the consolidated subtree revenue, one
    /// point per started 50k of revenue.
    pub fn support_score(&self) -> u64 {
        let total: u64 = self
            .accounts_with_subsidiaries()
            .iter()
            .map(|account| account.revenue)
            .sum();
        total.div_ceil(REVENUE_PER_SUPPORT_POINT)
    }

    /// Collapse this tree into its canonical shallow form.
    ///
    /// Sole orgs and subsidiaries survive; any other tier between the root
    /// and a subsidiary is elided, with its accounts and users promoted to
    /// the nearest surviving node above. Returns the sole orgs found along
    /// the way followed by this root with its flattened subtree; no account
    /// or user record is created or dropped.
    pub fn flatten(self) -> Vec<OrgNode> {
        debug_assert!(self.is_root(), "flatten starts at a root");

        let mut streams = self.flatten_streams();
        let mut result = streams.top;
        result.append(&mut streams.last_subs);
        result
    }

    fn flatten_streams(mut self) -> FlattenStreams {
        let mut streams = FlattenStreams::default();

        // A sole org is terminal: it keeps its own data and is never merged
        // into anything, even when it is the root.
        if self.kind == OrgKind::Sole {
            streams.top.push(self);
            return streams;
        }

        for child in std::mem::take(&mut self.children) {
            let mut sub = child.flatten_streams();
            streams.top.append(&mut sub.top);
            streams.accounts.append(&mut sub.accounts);
            streams.users.append(&mut sub.users);
            streams.last_subs.append(&mut sub.last_subs);
        }

        if self.is_root() || self.kind == OrgKind::Subsidiary {
            // Merge point: consolidate everything pending below this node
            // and adopt the finalized subsidiaries as direct children.
            self.accounts.append(&mut streams.accounts);
            self.users.append(&mut streams.users);
            for adopted in streams.last_subs.drain(..) {
                self.attach_child(adopted);
            }
            streams.last_subs.push(self);
        } else {
            // Plain intermediate tier: elided from the result, its own data
            // promoted upward to the nearest merge point.
            streams.accounts.append(&mut self.accounts);
            streams.users.append(&mut self.users);
        }

        streams
    }
}

/// Flatten every root of a forest, preserving root order.
pub fn flatten_forest(roots: Vec<OrgNode>) -> Vec<OrgNode> {
    roots.into_iter().flat_map(OrgNode::flatten).collect()
}

//! Merge server-confirmed addresses with session-local additions.
//!
//! The reconciled list is a derived view: it is rebuilt from both sources
//! whenever it is needed and never stored.

use std::collections::HashSet;

use crate::address::{Address, AddressId, LocalAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Server,
    Local,
}

/// One row of the reconciled list, borrowing from its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReconciledEntry<'a> {
    Server(&'a Address),
    Local(&'a LocalAddress),
}

impl<'a> ReconciledEntry<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            ReconciledEntry::Server(a) => &a.id,
            ReconciledEntry::Local(l) => &l.id,
        }
    }

    #[must_use]
    pub fn address_id(&self) -> AddressId {
        match self {
            ReconciledEntry::Server(a) => AddressId::Confirmed(a.id.clone()),
            ReconciledEntry::Local(l) => AddressId::Pending(l.id.clone()),
        }
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        match self {
            ReconciledEntry::Server(_) => Origin::Server,
            ReconciledEntry::Local(_) => Origin::Local,
        }
    }

    #[must_use]
    pub fn formatted(&self) -> String {
        match self {
            ReconciledEntry::Server(a) => a.formatted(),
            ReconciledEntry::Local(l) => l.formatted(),
        }
    }
}

/// Builds the reconciled list: server entries first, then local entries.
///
/// Ids are unique in the output. A local entry whose id matches a server
/// entry is dropped (server wins); within each source the first occurrence
/// of an id is kept.
#[must_use]
pub fn reconcile<'a>(server: &'a [Address], local: &'a [LocalAddress]) -> Vec<ReconciledEntry<'a>> {
    let mut seen: HashSet<&'a str> = HashSet::with_capacity(server.len() + local.len());
    let mut merged = Vec::with_capacity(server.len() + local.len());

    for address in server {
        if seen.insert(address.id.as_str()) {
            merged.push(ReconciledEntry::Server(address));
        }
    }

    for address in local {
        if seen.insert(address.id.as_str()) {
            merged.push(ReconciledEntry::Local(address));
        }
    }

    merged
}

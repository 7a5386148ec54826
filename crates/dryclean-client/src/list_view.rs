//! View model for the saved-locations list.
//!
//! Combines the address book's server list with session-local additions,
//! renders one entry per reconciled address, and routes edit/delete intents
//! to the right owner.

use dryclean_core::{reconcile, Address, LocalAddress, Origin, ReconciledEntry};

use crate::address_book::{AddressBook, AddressSource};
use crate::error::ApiError;
use crate::maps::{MapCenter, StaticMapBuilder};
use crate::notify::Notifier;

pub const EMPTY_MESSAGE: &str = "No saved locations yet";

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: String,
    pub origin: Origin,
    pub title: String,
    pub subtitle: String,
    pub map_image_url: String,
    pub is_default: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Empty { message: &'static str },
    Entries(Vec<EntryView>),
}

/// What the edit callback receives.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    Server(Address),
    Local(LocalAddress),
}

pub struct LocationListView {
    maps: StaticMapBuilder,
}

impl LocationListView {
    #[must_use]
    pub fn new(maps: StaticMapBuilder) -> Self {
        Self { maps }
    }

    /// Renders the current state. Rebuilt from both sources on every call.
    #[must_use]
    pub fn render<S, N>(&self, book: &AddressBook<S, N>, locals: &[LocalAddress]) -> ListView
    where
        S: AddressSource,
        N: Notifier,
    {
        if book.is_loading() {
            return ListView::Loading;
        }

        let server = book.addresses();
        let entries: Vec<_> = reconcile(&server, locals)
            .into_iter()
            .map(|entry| self.entry_view(&entry, book.is_deleting(entry.id())))
            .collect();

        if entries.is_empty() {
            ListView::Empty {
                message: EMPTY_MESSAGE,
            }
        } else {
            ListView::Entries(entries)
        }
    }

    fn entry_view(&self, entry: &ReconciledEntry<'_>, deleting: bool) -> EntryView {
        let subtitle = entry.formatted();
        let (title, center, is_default) = match entry {
            ReconciledEntry::Server(a) => {
                let center = a
                    .coordinates
                    .map_or_else(|| MapCenter::Address(subtitle.clone()), MapCenter::Coordinates);
                (capitalize(&a.address_type.to_string()), center, a.is_default)
            }
            ReconciledEntry::Local(_) => (
                "New location".to_string(),
                MapCenter::Address(subtitle.clone()),
                false,
            ),
        };

        EntryView {
            id: entry.id().to_string(),
            origin: entry.origin(),
            title,
            map_image_url: self.maps.url(&center),
            subtitle,
            is_default,
            deleting,
        }
    }

    /// Finds what to hand the edit callback for `id`.
    #[must_use]
    pub fn edit_target<S, N>(
        &self,
        book: &AddressBook<S, N>,
        locals: &[LocalAddress],
        id: &str,
    ) -> Option<EditTarget>
    where
        S: AddressSource,
        N: Notifier,
    {
        let server = book.addresses();
        reconcile(&server, locals)
            .into_iter()
            .find(|entry| entry.id() == id)
            .map(|entry| match entry {
                ReconciledEntry::Server(a) => EditTarget::Server(a.clone()),
                ReconciledEntry::Local(l) => EditTarget::Local(l.clone()),
            })
    }

    /// Routes a delete intent.
    ///
    /// Server addresses go through the book (backend call, toast, re-fetch)
    /// and `on_deleted` runs after the re-fetch. Session-local addresses skip
    /// the backend and `on_deleted` runs immediately. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns the backend error for a failed server delete.
    pub async fn delete<S, N, F>(
        &self,
        book: &AddressBook<S, N>,
        locals: &[LocalAddress],
        id: &str,
        on_deleted: F,
    ) -> Result<(), ApiError>
    where
        S: AddressSource,
        N: Notifier,
        F: FnOnce(&str),
    {
        let server = book.addresses();
        let origin = reconcile(&server, locals)
            .into_iter()
            .find(|entry| entry.id() == id)
            .map(|entry| entry.origin());

        match origin {
            Some(Origin::Server) => book.delete_with(id, || on_deleted(id)).await,
            Some(Origin::Local) => {
                on_deleted(id);
                Ok(())
            }
            None => {
                tracing::warn!(id, "delete requested for unknown location");
                Ok(())
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "list_view_test.rs"]
mod tests;

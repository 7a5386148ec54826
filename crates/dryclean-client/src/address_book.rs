//! Owner of the server-confirmed address list for one user.
//!
//! The book fetches on mount and on every distinct refresh signal, and offers
//! a delete that tracks progress per address id. After a successful delete it
//! re-fetches instead of removing locally, so the list never drifts from the
//! backend.
//!
//! Async results are applied only while the book is mounted and only if no
//! newer fetch has started since (generation check).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dryclean_core::Address;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::notify::{Notifier, TracingNotifier};

pub const DELETE_SUCCESS_MESSAGE: &str = "Address deleted successfully";

/// Backend operations the book depends on.
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn fetch_addresses(&self, user_id: &str) -> Result<Vec<Address>, ApiError>;

    async fn remove_address(&self, address_id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl AddressSource for ApiClient {
    async fn fetch_addresses(&self, user_id: &str) -> Result<Vec<Address>, ApiError> {
        self.list_addresses(user_id).await
    }

    async fn remove_address(&self, address_id: &str) -> Result<(), ApiError> {
        self.delete_address(address_id).await.map(|_| ())
    }
}

#[derive(Debug)]
struct BookState {
    addresses: Vec<Address>,
    loading: bool,
    /// In-flight delete count per address id.
    deleting: HashMap<String, usize>,
    generation: u64,
    mounted: bool,
    refresh_signal: Option<u64>,
}

pub struct AddressBook<S, N = TracingNotifier> {
    source: S,
    notifier: N,
    user_id: Option<String>,
    state: Mutex<BookState>,
}

impl<S: AddressSource> AddressBook<S, TracingNotifier> {
    #[must_use]
    pub fn new(source: S, user_id: Option<String>) -> Self {
        Self::with_notifier(source, user_id, TracingNotifier)
    }
}

impl<S: AddressSource, N: Notifier> AddressBook<S, N> {
    /// Creates an unmounted book for `user_id`. `None` means nobody is
    /// logged in; fetching then yields an empty list.
    pub fn with_notifier(source: S, user_id: Option<String>, notifier: N) -> Self {
        Self {
            source,
            notifier,
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            state: Mutex::new(BookState {
                addresses: Vec::new(),
                loading: true,
                deleting: HashMap::new(),
                generation: 0,
                mounted: false,
                refresh_signal: None,
            }),
        }
    }

    /// Seeds the refresh signal so the first [`set_refresh_signal`] call with
    /// the same value does not fetch again.
    ///
    /// [`set_refresh_signal`]: AddressBook::set_refresh_signal
    #[must_use]
    pub fn with_refresh_signal(self, signal: u64) -> Self {
        self.state().refresh_signal = Some(signal);
        self
    }

    fn state(&self) -> MutexGuard<'_, BookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Snapshot of the current server-confirmed addresses.
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.state().addresses.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    #[must_use]
    pub fn is_deleting(&self, address_id: &str) -> bool {
        self.state().deleting.contains_key(address_id)
    }

    #[must_use]
    pub fn deleting_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.state().deleting.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state().mounted
    }

    /// Marks the book mounted and performs the initial fetch.
    pub async fn mount(&self) {
        self.state().mounted = true;
        self.refresh().await;
    }

    /// Detaches the book. Responses still in flight are discarded on arrival.
    pub fn unmount(&self) {
        let mut state = self.state();
        state.mounted = false;
        state.generation += 1;
        state.loading = false;
    }

    /// Re-fetches once if `signal` differs from the last one seen.
    pub async fn set_refresh_signal(&self, signal: u64) {
        {
            let mut state = self.state();
            if state.refresh_signal == Some(signal) {
                return;
            }
            state.refresh_signal = Some(signal);
        }
        self.refresh().await;
    }

    /// Fetches the list from the backend.
    ///
    /// Failures are logged and leave the current list untouched.
    pub async fn refresh(&self) {
        let generation = {
            let mut state = self.state();
            if !state.mounted {
                tracing::debug!("address book not mounted; skipping fetch");
                return;
            }
            state.generation += 1;
            if self.user_id.is_none() {
                state.addresses.clear();
                state.loading = false;
                return;
            }
            state.loading = true;
            state.generation
        };

        let Some(user_id) = self.user_id.as_deref() else {
            return;
        };
        let result = self.source.fetch_addresses(user_id).await;

        let mut state = self.state();
        if !state.mounted || state.generation != generation {
            tracing::debug!(user_id, generation, "discarding stale address fetch");
            return;
        }
        match result {
            Ok(addresses) => {
                tracing::debug!(user_id, count = addresses.len(), "fetched addresses");
                state.addresses = addresses;
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "failed to fetch addresses");
            }
        }
        state.loading = false;
    }

    /// Deletes an address. See [`AddressBook::delete_with`].
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a toast.
    pub async fn delete(&self, address_id: &str) -> Result<(), ApiError> {
        self.delete_with(address_id, || {}).await
    }

    /// Deletes an address and runs `on_success` once the list has been
    /// re-fetched.
    ///
    /// While the call is pending, `is_deleting(address_id)` is `true`. The
    /// marker is cleared when this future completes or is dropped. Deletes of
    /// different ids proceed independently.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a toast; `on_success`
    /// is not called.
    pub async fn delete_with<F>(&self, address_id: &str, on_success: F) -> Result<(), ApiError>
    where
        F: FnOnce(),
    {
        let _marker = DeletingMarker::new(&self.state, address_id);

        match self.source.remove_address(address_id).await {
            Ok(()) => {
                tracing::info!(address_id, "address deleted");
                self.notifier.success(DELETE_SUCCESS_MESSAGE);
                self.refresh().await;
                on_success();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(address_id, error = %e, "address delete failed");
                self.notifier.error(&e.user_message());
                Err(e)
            }
        }
    }
}

/// Holds one "deleting" mark for an address id until dropped.
struct DeletingMarker<'a> {
    state: &'a Mutex<BookState>,
    address_id: String,
}

impl<'a> DeletingMarker<'a> {
    fn new(state: &'a Mutex<BookState>, address_id: &str) -> Self {
        *state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .deleting
            .entry(address_id.to_string())
            .or_insert(0) += 1;
        Self {
            state,
            address_id: address_id.to_string(),
        }
    }
}

impl Drop for DeletingMarker<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = state.deleting.get_mut(&self.address_id) {
            *count -= 1;
            if *count == 0 {
                state.deleting.remove(&self.address_id);
            }
        }
    }
}

#[cfg(test)]
#[path = "address_book_test.rs"]
mod tests;

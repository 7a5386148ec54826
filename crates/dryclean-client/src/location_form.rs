//! Form model for the "add location" dialog.
//!
//! The form collects one address and hands it to the caller's `on_add`
//! callback. It never persists anything itself: whoever supplies `on_add`
//! decides when (and whether) the record reaches the backend.

use chrono::Utc;
use dryclean_core::{match_state, LocalAddress, StateOption};
use rand::distr::{Alphanumeric, SampleString};

use crate::error::{Field, FormError};
use crate::maps::{Geocoder, PlaceResult};

const ID_SUFFIX_LEN: usize = 9;
const ZIP_LOOKUP_MIN_DIGITS: usize = 5;

/// Availability of the maps script/key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapsStatus {
    /// No key configured.
    Unconfigured,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Autocomplete,
    PlainText,
}

/// Generates a session-local id: `location-<unix millis>-<9 lowercase alphanumerics>`.
#[must_use]
pub fn generate_location_id() -> String {
    let suffix = Alphanumeric
        .sample_string(&mut rand::rng(), ID_SUFFIX_LEN)
        .to_ascii_lowercase();
    format!("location-{}-{suffix}", Utc::now().timestamp_millis())
}

#[derive(Debug, Clone)]
pub struct LocationForm {
    open: bool,
    address: String,
    zip: String,
    state: String,
    state_options: Vec<StateOption>,
    maps: MapsStatus,
}

impl LocationForm {
    #[must_use]
    pub fn new(state_options: Vec<StateOption>, maps: MapsStatus) -> Self {
        Self {
            open: false,
            address: String::new(),
            zip: String::new(),
            state: String::new(),
            state_options,
            maps,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog. Field values are kept until a successful submit.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn zip(&self) -> &str {
        &self.zip
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn state_options(&self) -> &[StateOption] {
        &self.state_options
    }

    #[must_use]
    pub fn maps_status(&self) -> &MapsStatus {
        &self.maps
    }

    /// The maps script finished loading. Ignored when no key is configured.
    pub fn maps_loaded(&mut self) {
        if self.maps != MapsStatus::Unconfigured {
            self.maps = MapsStatus::Ready;
        }
    }

    pub fn maps_failed(&mut self, reason: impl Into<String>) {
        self.maps = MapsStatus::Failed(reason.into());
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.maps == MapsStatus::Ready {
            InputMode::Autocomplete
        } else {
            InputMode::PlainText
        }
    }

    /// Inline text shown when the maps script failed to load.
    #[must_use]
    pub fn maps_notice(&self) -> Option<String> {
        match &self.maps {
            MapsStatus::Failed(reason) => {
                Some(format!("Address suggestions are unavailable: {reason}"))
            }
            _ => None,
        }
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.to_string();
    }

    pub fn set_state(&mut self, state: &str) {
        self.state = state.to_string();
    }

    /// Fills the form from an autocomplete selection.
    pub fn select_place(&mut self, place: &PlaceResult) {
        if let Some(formatted) = place.formatted_address.as_deref() {
            self.address = formatted.to_string();
        }
        if let Some(zip) = place.postal_code() {
            self.zip = zip.to_string();
        }
        if let Some(state) = place.region().and_then(|r| match_state(&self.state_options, r)) {
            self.state = state;
        }
    }

    fn wants_zip_lookup(&self) -> bool {
        self.maps == MapsStatus::Ready
            && self.address.trim().is_empty()
            && self.zip.len() >= ZIP_LOOKUP_MIN_DIGITS
            && self.zip.chars().all(|c| c.is_ascii_digit())
    }

    /// Updates the zip and, when no address is set yet, tries to fill the
    /// address and state from a geocode of the zip.
    ///
    /// Lookup failures are silent. Returns whether a lookup was attempted.
    pub async fn set_zip<G: Geocoder>(&mut self, zip: &str, geocoder: &G) -> bool {
        self.zip = zip.trim().to_string();
        if !self.wants_zip_lookup() {
            return false;
        }

        let lookup = geocoder.geocode_zip(&self.zip).await;
        match lookup {
            Ok(Some(place)) => {
                if let Some(formatted) = place.formatted_address.as_deref() {
                    self.address = formatted.to_string();
                }
                if let Some(state) =
                    place.region().and_then(|r| match_state(&self.state_options, r))
                {
                    self.state = state;
                }
            }
            Ok(None) => tracing::debug!(zip = %self.zip, "zip lookup found nothing"),
            Err(e) => tracing::debug!(zip = %self.zip, error = %e, "zip lookup failed"),
        }
        true
    }

    fn validate(&self) -> Result<(), FormError> {
        if !self.open {
            return Err(FormError::NotOpen);
        }
        for (field, value) in [
            (Field::Address, &self.address),
            (Field::Zip, &self.zip),
            (Field::State, &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Validates, hands a new [`LocalAddress`] to `on_add`, then clears and
    /// closes the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingField`] if address, zip, or state is blank
    /// and [`FormError::NotOpen`] if the dialog is closed. `on_add` is not
    /// called in either case.
    pub fn submit<F>(&mut self, on_add: F) -> Result<(), FormError>
    where
        F: FnOnce(LocalAddress),
    {
        self.validate()?;

        let record = LocalAddress {
            id: generate_location_id(),
            address: self.address.trim().to_string(),
            zip: self.zip.trim().to_string(),
            state: self.state.trim().to_string(),
        };
        tracing::debug!(id = %record.id, "location added");
        on_add(record);

        self.address.clear();
        self.zip.clear();
        self.state.clear();
        self.open = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "location_form_test.rs"]
mod tests;

pub mod address_book;
pub mod client;
pub mod error;
pub mod list_view;
pub mod location_form;
pub mod maps;
pub mod notify;
pub mod session;
pub mod types;

pub use address_book::{AddressBook, AddressSource};
pub use client::ApiClient;
pub use error::{ApiError, Field, FormError, SessionError};
pub use list_view::{EditTarget, EntryView, ListView, LocationListView};
pub use location_form::{generate_location_id, InputMode, LocationForm, MapsStatus};
pub use maps::{Geocoder, MapCenter, MapsClient, PlaceResult, StaticMapBuilder};
pub use notify::{Notifier, TracingNotifier};
pub use session::{Credentials, SessionStore};

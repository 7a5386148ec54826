//! End-to-end address flows against a wiremock backend: the address book
//! fetching and deleting through `ApiClient`, and zip geocoding through
//! `MapsClient`.

use std::sync::{Arc, Mutex};

use dryclean_client::{
    AddressBook, ApiClient, ApiError, Geocoder, ListView, LocationForm, LocationListView,
    MapsClient, MapsStatus, Notifier, StaticMapBuilder,
};
use dryclean_core::{LocalAddress, StateOption};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Toasts {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

fn addresses_body(ids: &[&str]) -> serde_json::Value {
    let addresses: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "_id": id,
                "userId": "user-1",
                "addressType": "home",
                "houseNumber": "1",
                "street": "Main St",
                "city": "New York",
                "state": "NY",
                "zipCode": "10001"
            })
        })
        .collect();
    json!({ "data": { "addresses": addresses } })
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri(), 5, "dryclean-test/0.1")
        .expect("client")
        .with_token("t")
}

fn list_view() -> LocationListView {
    LocationListView::new(StaticMapBuilder::new("https://maps.example.test", None).unwrap())
}

#[tokio::test]
async fn delete_refetches_and_removes_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(addresses_body(&["a", "b"])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(addresses_body(&["b"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/address/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let toasts = Arc::new(Toasts::default());
    let book = AddressBook::with_notifier(
        client(&server),
        Some("user-1".to_string()),
        Arc::clone(&toasts),
    );
    book.mount().await;
    assert_eq!(book.addresses().len(), 2);

    book.delete("a").await.expect("delete should succeed");

    let ids: Vec<_> = book.addresses().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["b"]);
    assert_eq!(
        *toasts.successes.lock().unwrap(),
        vec!["Address deleted successfully".to_string()]
    );
    assert!(!book.is_deleting("a"));
}

#[tokio::test]
async fn failed_delete_keeps_entry_and_toasts_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(addresses_body(&["a"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/address/a"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "Address is used by an active order" })),
        )
        .mount(&server)
        .await;

    let toasts = Arc::new(Toasts::default());
    let book = AddressBook::with_notifier(
        client(&server),
        Some("user-1".to_string()),
        Arc::clone(&toasts),
    );
    book.mount().await;

    let err = book.delete("a").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 409, .. }));
    assert_eq!(book.addresses().len(), 1);
    assert!(!book.is_deleting("a"));
    assert_eq!(
        *toasts.errors.lock().unwrap(),
        vec!["Address is used by an active order".to_string()]
    );
}

#[tokio::test]
async fn fetch_failure_is_swallowed_and_renders_empty_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;

    let toasts = Arc::new(Toasts::default());
    let book = AddressBook::with_notifier(
        client(&server),
        Some("user-1".to_string()),
        Arc::clone(&toasts),
    );
    book.mount().await;

    assert!(!book.is_loading());
    assert!(toasts.errors.lock().unwrap().is_empty());
    assert!(matches!(list_view().render(&book, &[]), ListView::Empty { .. }));
}

#[tokio::test]
async fn refresh_signal_changes_fetch_once_each() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(addresses_body(&["a"])))
        .expect(3)
        .mount(&server)
        .await;

    let book = AddressBook::new(client(&server), Some("user-1".to_string())).with_refresh_signal(1);
    book.mount().await;
    book.set_refresh_signal(1).await;
    book.set_refresh_signal(2).await;
    book.set_refresh_signal(2).await;
    book.set_refresh_signal(3).await;
}

#[tokio::test]
async fn list_merges_server_and_session_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/address/user/user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(addresses_body(&["a"])))
        .mount(&server)
        .await;

    let book = AddressBook::new(client(&server), Some("user-1".to_string()));
    book.mount().await;

    let mut form = LocationForm::new(
        vec![StateOption {
            value: "NY".to_string(),
            label: "New York".to_string(),
        }],
        MapsStatus::Unconfigured,
    );
    form.open();
    form.set_address("221B Baker Street");
    form.set_state("NY");
    let no_maps = MapsClient::with_base_url("https://maps.example.test", None, 5, "ua").unwrap();
    form.set_zip("10001", &no_maps).await;

    let mut locals: Vec<LocalAddress> = Vec::new();
    form.submit(|record| locals.push(record)).unwrap();

    match list_view().render(&book, &locals) {
        ListView::Entries(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].id, "a");
            assert!(entries[1].id.starts_with("location-"));
        }
        other => panic!("expected entries, got {other:?}"),
    }
}

#[tokio::test]
async fn maps_client_geocodes_zip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "10001"))
        .and(query_param("key", "maps-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "New York, NY 10001, USA",
                "address_components": [
                    { "long_name": "10001", "short_name": "10001", "types": ["postal_code"] },
                    { "long_name": "New York", "short_name": "NY", "types": ["administrative_area_level_1"] }
                ],
                "geometry": { "location": { "lat": 40.75, "lng": -73.99 } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let maps =
        MapsClient::with_base_url(&server.uri(), Some("maps-key".to_string()), 5, "ua").unwrap();
    let place = maps
        .geocode_zip("10001")
        .await
        .expect("geocode should succeed")
        .expect("a place");
    assert_eq!(place.postal_code(), Some("10001"));
    assert_eq!(place.region(), Some("New York"));
}

#[tokio::test]
async fn maps_client_zero_results_and_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("address", "00000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("address", "99999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let maps = MapsClient::with_base_url(&server.uri(), Some("k".to_string()), 5, "ua").unwrap();
    assert!(maps.geocode_zip("00000").await.unwrap().is_none());
    let err = maps.geocode_zip("99999").await.unwrap_err();
    assert_eq!(err.user_message(), "The provided API key is invalid.");
}

#[tokio::test]
async fn zip_entry_fills_form_through_maps_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Jersey City, NJ 07302, USA",
                "address_components": [
                    { "long_name": "New Jersey", "short_name": "NJ", "types": ["administrative_area_level_1"] }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let maps = MapsClient::with_base_url(&server.uri(), Some("k".to_string()), 5, "ua").unwrap();
    let mut form = LocationForm::new(
        vec![StateOption {
            value: "NJ".to_string(),
            label: "New Jersey".to_string(),
        }],
        MapsStatus::Ready,
    );
    form.open();
    for partial in ["0", "07", "073", "0730", "07302"] {
        form.set_zip(partial, &maps).await;
    }
    assert_eq!(form.address(), "Jersey City, NJ 07302, USA");
    assert_eq!(form.state(), "NJ");
}

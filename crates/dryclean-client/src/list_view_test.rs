use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dryclean_core::{AddressType, Coordinates};
use async_trait::async_trait;
use tokio::sync::Notify;

use super::*;
use crate::address_book::AddressBook;

fn address(id: &str, coordinates: Option<Coordinates>) -> Address {
    Address {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        address_type: AddressType::Work,
        house_number: Some("5".to_string()),
        street: Some("Broad St".to_string()),
        area: None,
        city: Some("Newark".to_string()),
        state: Some("NJ".to_string()),
        zip: Some("07102".to_string()),
        landmark: None,
        is_default: id == "srv-1",
        coordinates,
        created_at: None,
        updated_at: None,
    }
}

fn local(id: &str) -> LocalAddress {
    LocalAddress {
        id: id.to_string(),
        address: "221B Baker Street".to_string(),
        zip: "10001".to_string(),
        state: "NY".to_string(),
    }
}

#[derive(Default)]
struct FakeSource {
    addresses: Mutex<Vec<Address>>,
    deletes: AtomicUsize,
    fetch_gate: Option<Arc<Notify>>,
    delete_gate: Option<Arc<Notify>>,
}

#[async_trait]
impl AddressSource for FakeSource {
    async fn fetch_addresses(&self, _user_id: &str) -> Result<Vec<Address>, ApiError> {
        if let Some(gate) = &self.fetch_gate {
            gate.notified().await;
        }
        Ok(self.addresses.lock().unwrap().clone())
    }

    async fn remove_address(&self, address_id: &str) -> Result<(), ApiError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.delete_gate {
            gate.notified().await;
        }
        self.addresses.lock().unwrap().retain(|a| a.id != address_id);
        Ok(())
    }
}

fn view() -> LocationListView {
    LocationListView::new(
        StaticMapBuilder::new("https://maps.example.test", Some("k".to_string())).unwrap(),
    )
}

async fn mounted_book(addresses: Vec<Address>) -> AddressBook<FakeSource> {
    let source = FakeSource {
        addresses: Mutex::new(addresses),
        ..FakeSource::default()
    };
    let book = AddressBook::new(source, Some("user-1".to_string()));
    book.mount().await;
    book
}

fn entries(view: ListView) -> Vec<EntryView> {
    match view {
        ListView::Entries(entries) => entries,
        other => panic!("expected entries, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_sources_render_empty_state() {
    let book = mounted_book(vec![]).await;
    assert_eq!(
        view().render(&book, &[]),
        ListView::Empty {
            message: EMPTY_MESSAGE
        }
    );
}

#[tokio::test]
async fn loading_book_renders_loading() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource {
        fetch_gate: Some(Arc::clone(&gate)),
        ..FakeSource::default()
    };
    let book = AddressBook::new(source, Some("user-1".to_string()));
    let v = view();

    tokio::join!(book.mount(), async {
        tokio::task::yield_now().await;
        assert_eq!(v.render(&book, &[local("location-1-a")]), ListView::Loading);
        gate.notify_one();
    });

    assert!(matches!(v.render(&book, &[]), ListView::Empty { .. }));
}

#[tokio::test]
async fn renders_server_then_local_without_duplicates() {
    let book = mounted_book(vec![address("srv-1", None)]).await;
    let locals = vec![local("srv-1"), local("location-1-a")];

    let rendered = entries(view().render(&book, &locals));
    assert_eq!(rendered.len(), 2);

    assert_eq!(rendered[0].id, "srv-1");
    assert_eq!(rendered[0].origin, Origin::Server);
    assert_eq!(rendered[0].title, "Work");
    assert_eq!(rendered[0].subtitle, "5 Broad St, Newark, NJ 07102");
    assert!(rendered[0].is_default);
    assert!(rendered[0].map_image_url.contains("center=5+Broad+St"));

    assert_eq!(rendered[1].id, "location-1-a");
    assert_eq!(rendered[1].origin, Origin::Local);
    assert_eq!(rendered[1].title, "New location");
    assert!(!rendered[1].deleting);
}

#[tokio::test]
async fn map_url_uses_coordinates_when_present() {
    let coords = Coordinates {
        lat: 40.75,
        lng: -74.25,
    };
    let book = mounted_book(vec![address("srv-2", Some(coords))]).await;
    let rendered = entries(view().render(&book, &[]));
    assert!(rendered[0].map_image_url.contains("center=40.75%2C-74.25"));
}

#[tokio::test]
async fn edit_target_reflects_origin() {
    let book = mounted_book(vec![address("srv-1", None)]).await;
    let locals = vec![local("location-1-a")];
    let v = view();

    assert!(matches!(
        v.edit_target(&book, &locals, "srv-1"),
        Some(EditTarget::Server(a)) if a.id == "srv-1"
    ));
    assert!(matches!(
        v.edit_target(&book, &locals, "location-1-a"),
        Some(EditTarget::Local(l)) if l.address == "221B Baker Street"
    ));
    assert!(v.edit_target(&book, &locals, "missing").is_none());
}

#[tokio::test]
async fn deleting_server_entry_goes_through_backend() {
    let book = mounted_book(vec![address("srv-1", None), address("srv-2", None)]).await;
    let v = view();
    let mut deleted = Vec::new();

    v.delete(&book, &[], "srv-1", |id| deleted.push(id.to_string()))
        .await
        .expect("delete should succeed");

    assert_eq!(deleted, vec!["srv-1".to_string()]);
    assert_eq!(book.source().deletes.load(Ordering::SeqCst), 1);
    let rendered = entries(v.render(&book, &[]));
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].id, "srv-2");
}

#[tokio::test]
async fn pending_server_delete_renders_entry_as_deleting() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource {
        addresses: Mutex::new(vec![address("srv-1", None), address("srv-2", None)]),
        delete_gate: Some(Arc::clone(&gate)),
        ..FakeSource::default()
    };
    let book = AddressBook::new(source, Some("user-1".to_string()));
    book.mount().await;
    let v = view();

    let (result, during) = tokio::join!(v.delete(&book, &[], "srv-1", |_| {}), async {
        tokio::task::yield_now().await;
        let rendered = entries(v.render(&book, &[]));
        gate.notify_one();
        rendered
    });

    result.expect("delete should succeed");
    assert_eq!(during.len(), 2);
    assert!(during[0].deleting);
    assert!(!during[1].deleting);

    let after = entries(v.render(&book, &[]));
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, "srv-2");
    assert!(!after[0].deleting);
}

#[tokio::test]
async fn deleting_local_entry_bypasses_backend() {
    let book = mounted_book(vec![address("srv-1", None)]).await;
    let mut locals = vec![local("location-1-a")];
    let v = view();

    let mut deleted = None;
    v.delete(&book, &locals, "location-1-a", |id| deleted = Some(id.to_string()))
        .await
        .unwrap();

    assert_eq!(deleted.as_deref(), Some("location-1-a"));
    assert_eq!(book.source().deletes.load(Ordering::SeqCst), 0);

    locals.retain(|l| l.id != "location-1-a");
    assert_eq!(entries(v.render(&book, &locals)).len(), 1);
}

#[tokio::test]
async fn deleting_unknown_id_is_a_no_op() {
    let book = mounted_book(vec![]).await;
    let mut called = false;
    view()
        .delete(&book, &[], "ghost", |_| called = true)
        .await
        .unwrap();
    assert!(!called);
    assert_eq!(book.source().deletes.load(Ordering::SeqCst), 0);
}

#[test]
fn capitalize_handles_empty_and_words() {
    assert_eq!(capitalize("home"), "Home");
    assert_eq!(capitalize(""), "");
}

// tests/integration/listing_flow.rs
//! The listing view-model end to end: accumulate, search, window,
//! rebind, delete.

use super::named_records;
use carelist::{
    ActionTag, Listing, MemoryStore, RecordId, Resource, ResourceSource, StoreError,
    StoreErrorCode,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn listing_over(
    store: &MemoryStore,
    resource: Resource,
    server_page_size: u32,
    display_page_size: usize,
) -> Listing<ResourceSource<MemoryStore>> {
    Listing::with_page_sizes(
        ResourceSource::new(store.clone(), resource),
        server_page_size,
        display_page_size,
    )
}

fn visible_names(listing: &Listing<ResourceSource<MemoryStore>>) -> Vec<String> {
    listing
        .visible()
        .iter()
        .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn pages_accumulate_across_load_more() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["A", "B", "C"]));

    let mut listing = listing_over(&store, Resource::Medicines, 2, 20);
    listing.load_initial().await;
    assert!(listing.state().has_more());

    listing.fetch_more().await;

    let names: Vec<_> = listing
        .state()
        .items()
        .iter()
        .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(!listing.state().has_more());

    // Exhausted: a further call issues no fetch and changes nothing.
    let fetches_before = store.fetch_log().len();
    listing.fetch_more().await;
    assert_eq!(store.fetch_log().len(), fetches_before);
}

#[tokio::test]
async fn first_page_failure_surfaces_inline() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["A"]));
    store.fail_next(StoreError::service(
        StoreErrorCode::PermissionDenied,
        "permission-denied",
    ));

    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);
    listing.load_initial().await;

    assert!(listing.state().items().is_empty());
    assert!(!listing.state().is_loading());
    assert_eq!(
        listing.state().error().and_then(StoreError::code),
        Some(&StoreErrorCode::PermissionDenied)
    );
}

#[tokio::test]
async fn load_more_failure_keeps_accumulated_pages() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["A", "B", "C"]));

    let mut listing = listing_over(&store, Resource::Medicines, 2, 20);
    listing.load_initial().await;
    assert_eq!(listing.state().items().len(), 2);

    store.fail_next(StoreError::service(StoreErrorCode::Unavailable, "blip"));
    listing.fetch_more().await;

    assert_eq!(listing.state().items().len(), 2);
    assert!(listing.state().error().is_some());
}

#[tokio::test]
async fn search_filters_accumulated_records() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["Paracetamol", "Amoxicillin"]));

    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);
    listing.load_initial().await;

    listing.set_search("para");
    assert_eq!(visible_names(&listing), vec!["Paracetamol"]);

    listing.set_search("");
    assert_eq!(visible_names(&listing), vec!["Paracetamol", "Amoxicillin"]);
}

#[tokio::test]
async fn next_page_fetches_only_when_the_window_outruns_the_data() {
    let store = MemoryStore::new();
    store.seed(
        "medicines",
        named_records(&["A", "B", "C", "D", "E", "F", "G", "H"]),
    );

    // Plenty of unshown fetched data: advancing the window needs no fetch.
    let mut listing = listing_over(&store, Resource::Medicines, 6, 2);
    listing.load_initial().await;
    assert_eq!(store.fetch_log().len(), 1);

    listing.next_page().await;
    assert_eq!(listing.display_page(), 1);
    assert_eq!(store.fetch_log().len(), 1);
    assert_eq!(visible_names(&listing), vec!["C", "D"]);

    listing.next_page().await;
    assert_eq!(listing.display_page(), 2);
    assert_eq!(store.fetch_log().len(), 1);
    assert_eq!(visible_names(&listing), vec!["E", "F"]);

    // The next window would pass the 6 fetched records: one fetch.
    listing.next_page().await;
    assert_eq!(listing.display_page(), 3);
    assert_eq!(store.fetch_log().len(), 2);
    assert_eq!(visible_names(&listing), vec!["G", "H"]);

    // Exhausted: no fetch, window stays put.
    let fetches = store.fetch_log().len();
    listing.next_page().await;
    assert_eq!(listing.display_page(), 3);
    assert_eq!(store.fetch_log().len(), fetches);
}

#[tokio::test]
async fn going_backward_never_fetches() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["A", "B", "C", "D"]));

    let mut listing = listing_over(&store, Resource::Medicines, 4, 2);
    listing.load_initial().await;
    listing.next_page().await;
    let fetches = store.fetch_log().len();

    listing.prev_page();
    assert_eq!(listing.display_page(), 0);
    listing.go_to_page(1);
    assert_eq!(listing.display_page(), 1);
    // Forward past the fetched data is clamped, not fetched.
    listing.go_to_page(9);
    assert_eq!(listing.display_page(), 1);

    assert_eq!(store.fetch_log().len(), fetches);
}

#[tokio::test]
async fn delete_patches_locally_and_preserves_order() {
    let store = MemoryStore::new();
    let mut records = named_records(&["A", "B", "C"]);
    records[1].set("id", json!("42"));
    store.seed("medicines", records);

    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);
    listing.load_initial().await;
    let fetches = store.fetch_log().len();

    let id = RecordId::new("42").unwrap();
    listing.delete(&id).await.unwrap();

    assert_eq!(visible_names(&listing), vec!["A", "C"]);
    assert_eq!(store.collection_len("medicines"), 2);
    // A local patch, not a refetch.
    assert_eq!(store.fetch_log().len(), fetches);
}

#[tokio::test]
async fn failed_delete_leaves_the_row_in_place() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["A", "B"]));

    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);
    listing.load_initial().await;

    let id = RecordId::new("missing").unwrap();
    let err = listing.delete(&id).await.unwrap_err();
    assert_eq!(err.code(), Some(&StoreErrorCode::NotFound));
    assert_eq!(visible_names(&listing), vec!["A", "B"]);
}

#[tokio::test]
async fn rebinding_resets_and_fetches_the_new_resource_once() {
    let store = MemoryStore::new();
    store.seed("medicines", named_records(&["Paracetamol"]));
    store.seed("categories", named_records(&["Antibiotics"]));

    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);
    listing.load_initial().await;
    listing.set_search("para");
    assert_eq!(store.fetch_log(), vec!["medicines"]);

    listing
        .rebind(ResourceSource::new(store.clone(), Resource::Categories))
        .await;

    assert_eq!(store.fetch_log(), vec!["medicines", "categories"]);
    assert_eq!(listing.search(), "");
    assert_eq!(listing.display_page(), 0);
    assert_eq!(visible_names(&listing), vec!["Antibiotics"]);
}

#[tokio::test]
async fn users_tag_participates_in_the_binding() {
    let store = MemoryStore::new();
    let mut users = named_records(&["Asha", "Rahul", "Meera"]);
    users[0].set("action", json!("pending"));
    users[1].set("action", json!("approved"));
    users[2].set("action", json!("pending"));
    store.seed("users", users);

    let mut listing = Listing::with_page_sizes(
        ResourceSource::users(store.clone(), ActionTag::new("pending")),
        20,
        20,
    );
    listing.load_initial().await;
    assert_eq!(visible_names(&listing), vec!["Asha", "Meera"]);

    // A different tag is a different binding; rebind starts over.
    listing
        .rebind(ResourceSource::users(store.clone(), ActionTag::new("approved")))
        .await;
    assert_eq!(visible_names(&listing), vec!["Rahul"]);
}

#[tokio::test]
async fn create_validates_before_touching_the_store() {
    let store = MemoryStore::new();
    let mut listing = listing_over(&store, Resource::Medicines, 20, 20);

    let mut incomplete = carelist::Record::new();
    incomplete.set("price", json!(9.5));
    let err = listing.create(incomplete, &["name", "price"]).await;
    assert!(err.is_err());
    assert_eq!(store.collection_len("medicines"), 0);

    let mut complete = carelist::Record::new();
    complete.set("name", json!("Aspirin"));
    complete.set("price", json!(9.5));
    listing.create(complete, &["name", "price"]).await.unwrap();
    assert_eq!(store.collection_len("medicines"), 1);
}

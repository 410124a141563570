use larder_store::{
    CollectionId, DocumentStore, FieldMap, ListQuery, MemoryDocumentStore, StoreErrorCode,
    StoreOpKind,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn collection(name: &str) -> CollectionId {
    CollectionId::parse(name).expect("collection id")
}

fn named_fields(name: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert(
        "name".to_string(),
        serde_json::Value::String(name.to_string()),
    );
    fields
}

#[test]
fn create_assigns_unique_ids_and_preserves_insertion_order() {
    let store = MemoryDocumentStore::new();
    let menu = collection("menu");

    let names = ["alpha", "bravo", "charlie"];
    for name in names {
        store
            .create_document(&menu, named_fields(name))
            .expect("create");
    }

    let listed = store
        .list_documents(&menu, &ListQuery::default())
        .expect("list");
    let listed_names: Vec<&str> = listed.iter().filter_map(|d| d.field_str("name")).collect();
    assert_eq!(listed_names, names);

    let ids: BTreeSet<_> = listed.iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids.len(), names.len());
}

#[test]
fn delete_of_missing_document_is_not_found() {
    let store = MemoryDocumentStore::new();
    let menu = collection("menu");
    let created = store
        .create_document(&menu, named_fields("alpha"))
        .expect("create");

    store.delete_document(&menu, &created.id).expect("delete");
    let err = store
        .delete_document(&menu, &created.id)
        .expect_err("second delete");
    assert_eq!(err.code, StoreErrorCode::NotFound);
}

#[test]
fn equal_and_search_filters_restrict_listing() {
    let store = MemoryDocumentStore::new();
    let menu = collection("menu");
    for name in ["Margherita", "Diavola", "Vanilla Shake"] {
        let mut fields = named_fields(name);
        fields.insert(
            "category_ref".to_string(),
            serde_json::Value::String(if name == "Vanilla Shake" { "drinks" } else { "pizza" }.to_string()),
        );
        store.create_document(&menu, fields).expect("create");
    }

    let pizzas = store
        .list_documents(&menu, &ListQuery::default().with_equal("category_ref", "pizza"))
        .expect("list");
    assert_eq!(pizzas.len(), 2);

    let shakes = store
        .list_documents(&menu, &ListQuery::default().with_search("name", "shake"))
        .expect("list");
    assert_eq!(shakes.len(), 1);
    assert_eq!(shakes[0].field_str("name"), Some("Vanilla Shake"));

    let limited = store
        .list_documents(&menu, &ListQuery::default().with_limit(1))
        .expect("list");
    assert_eq!(limited.len(), 1);
}

#[test]
fn journal_records_applied_operations_in_order() {
    let store = MemoryDocumentStore::new();
    let menu = collection("menu");
    let created = store
        .create_document(&menu, named_fields("alpha"))
        .expect("create");
    store
        .list_documents(&menu, &ListQuery::default())
        .expect("list");
    store.delete_document(&menu, &created.id).expect("delete");

    let kinds: Vec<StoreOpKind> = store.journal().iter().map(|op| op.kind).collect();
    assert_eq!(
        kinds,
        vec![StoreOpKind::Create, StoreOpKind::List, StoreOpKind::Delete]
    );
}

proptest! {
    #[test]
    fn any_number_of_creates_yields_distinct_ids(count in 1usize..64) {
        let store = MemoryDocumentStore::new();
        let menu = collection("menu");
        let mut ids = BTreeSet::new();
        for i in 0..count {
            let doc = store
                .create_document(&menu, named_fields(&format!("item-{i}")))
                .expect("create");
            prop_assert!(ids.insert(doc.id));
        }
    }
}

// SPDX-License-Identifier: Apache-2.0

use larder_model::{Category, CustomizationOption, MenuDataset, MenuItem};
use larder_seed::{
    seed_catalog, SeedCollections, SeedStage, SeedWarning, FIELD_CATEGORY_REF,
    FIELD_CUSTOMIZATION_REF, FIELD_MENU_REF, FIELD_NAME,
};
use larder_store::{CollectionId, Document, DocumentStore, ListQuery, MemoryDocumentStore};
use std::collections::BTreeSet;

fn collections() -> SeedCollections {
    SeedCollections::parse("categories", "customizations", "menu", "menu_customizations")
        .expect("collections")
}

fn list(store: &MemoryDocumentStore, collection: &CollectionId) -> Vec<Document> {
    store
        .list_documents(collection, &ListQuery::default())
        .expect("list")
}

fn names(documents: &[Document]) -> BTreeSet<String> {
    documents
        .iter()
        .filter_map(|d| d.field_str(FIELD_NAME))
        .map(ToString::to_string)
        .collect()
}

/// The worked example: two categories, one customization, one menu item
/// that lists one resolvable and one unknown customization name.
fn example_dataset() -> MenuDataset {
    MenuDataset {
        categories: vec![
            Category {
                name: "Pizza".to_string(),
                description: "Stone-baked".to_string(),
            },
            Category {
                name: "Drinks".to_string(),
                description: "Cold".to_string(),
            },
        ],
        customizations: vec![CustomizationOption {
            name: "Extra Cheese".to_string(),
            price: 1.5,
            kind: "topping".to_string(),
        }],
        menu: vec![MenuItem {
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella".to_string(),
            image_url: "https://cdn.larder.dev/menu/margherita.png".to_string(),
            price: 9.5,
            rating: 4.6,
            calories: 850,
            protein: 32,
            category_name: "Pizza".to_string(),
            customizations: vec!["Extra Cheese".to_string(), "Sprinkles".to_string()],
        }],
    }
}

#[test]
fn seeding_twice_reproduces_logical_content_with_fresh_ids() {
    let store = MemoryDocumentStore::new();
    let dataset = MenuDataset::builtin();
    let collections = collections();

    seed_catalog(&store, &dataset, &collections).expect("first run");
    let first_categories = list(&store, &collections.categories);
    let first_menu = list(&store, &collections.menu);

    seed_catalog(&store, &dataset, &collections).expect("second run");
    let second_categories = list(&store, &collections.categories);
    let second_menu = list(&store, &collections.menu);

    assert_eq!(names(&first_categories), names(&second_categories));
    assert_eq!(names(&first_menu), names(&second_menu));

    let first_ids: BTreeSet<_> = first_categories.iter().map(|d| d.id.clone()).collect();
    let second_ids: BTreeSet<_> = second_categories.iter().map(|d| d.id.clone()).collect();
    assert!(
        first_ids.is_disjoint(&second_ids),
        "generated ids must differ between runs"
    );
}

#[test]
fn menu_category_ref_matches_generated_category_id() {
    let store = MemoryDocumentStore::new();
    let dataset = MenuDataset::builtin();
    let collections = collections();
    seed_catalog(&store, &dataset, &collections).expect("seed");

    let categories = list(&store, &collections.categories);
    for menu_doc in list(&store, &collections.menu) {
        let item_name = menu_doc.field_str(FIELD_NAME).expect("menu name");
        let item = dataset
            .menu
            .iter()
            .find(|i| i.name == item_name)
            .expect("dataset item");
        let category = categories
            .iter()
            .find(|c| c.field_str(FIELD_NAME) == Some(item.category_name.as_str()))
            .expect("category document");
        assert_eq!(
            menu_doc.field_str(FIELD_CATEGORY_REF),
            Some(category.id.as_str()),
            "menu item '{item_name}' must reference its category's generated id"
        );
    }
}

#[test]
fn fully_resolvable_items_link_every_listed_name() {
    let store = MemoryDocumentStore::new();
    let dataset = MenuDataset::builtin();
    let collections = collections();
    let report = seed_catalog(&store, &dataset, &collections).expect("seed");

    let expected_links: usize = dataset.menu.iter().map(|i| i.customizations.len()).sum();
    assert_eq!(report.links_created, expected_links);
    assert!(report.warnings.is_empty());

    let links = list(&store, &collections.menu_customizations);
    assert_eq!(links.len(), expected_links);
}

#[test]
fn unknown_customization_is_tolerated_with_one_warning() {
    let store = MemoryDocumentStore::new();
    let collections = collections();
    let report = seed_catalog(&store, &example_dataset(), &collections).expect("seed");

    assert_eq!(report.categories_created, 2);
    assert_eq!(report.customizations_created, 1);
    assert_eq!(report.menu_items_created, 1);
    assert_eq!(report.links_created, 1);
    assert_eq!(
        report.warnings,
        vec![SeedWarning {
            menu_item: "Margherita".to_string(),
            customization: "Sprinkles".to_string(),
        }]
    );

    let links = list(&store, &collections.menu_customizations);
    assert_eq!(links.len(), 1);
    let menu = list(&store, &collections.menu);
    let customizations = list(&store, &collections.customizations);
    assert_eq!(
        links[0].field_str(FIELD_MENU_REF),
        Some(menu[0].id.as_str())
    );
    assert_eq!(
        links[0].field_str(FIELD_CUSTOMIZATION_REF),
        Some(customizations[0].id.as_str())
    );
}

#[test]
fn junction_references_point_at_documents_of_the_same_run() {
    let store = MemoryDocumentStore::new();
    let dataset = MenuDataset::builtin();
    let collections = collections();

    seed_catalog(&store, &dataset, &collections).expect("first run");
    seed_catalog(&store, &dataset, &collections).expect("second run");

    let menu_ids: BTreeSet<String> = list(&store, &collections.menu)
        .iter()
        .map(|d| d.id.as_str().to_string())
        .collect();
    let customization_ids: BTreeSet<String> = list(&store, &collections.customizations)
        .iter()
        .map(|d| d.id.as_str().to_string())
        .collect();

    for link in list(&store, &collections.menu_customizations) {
        let menu_ref = link.field_str(FIELD_MENU_REF).expect("menu ref");
        let customization_ref = link
            .field_str(FIELD_CUSTOMIZATION_REF)
            .expect("customization ref");
        assert!(menu_ids.contains(menu_ref));
        assert!(customization_ids.contains(customization_ref));
    }
}

#[test]
fn reset_precedes_load_for_every_collection() {
    let store = MemoryDocumentStore::new();
    let dataset = MenuDataset::builtin();
    let collections = collections();

    seed_catalog(&store, &dataset, &collections).expect("first run");
    let first_run_ops = store.journal().len();
    seed_catalog(&store, &dataset, &collections).expect("second run");

    let journal = store.journal();
    let second_run = &journal[first_run_ops..];
    for collection in collections.all() {
        let last_delete = second_run
            .iter()
            .rposition(|op| {
                op.kind == larder_store::StoreOpKind::Delete
                    && op.collection == collection.as_str()
            })
            .expect("second run must delete prior documents");
        let first_create = second_run
            .iter()
            .position(|op| {
                op.kind == larder_store::StoreOpKind::Create
                    && op.collection == collection.as_str()
            })
            .expect("second run must create documents");
        assert!(
            last_delete < first_create,
            "collection '{collection}' must be emptied before any new document is created"
        );
    }
}

#[test]
fn stage_events_are_emitted_in_pipeline_order() {
    let store = MemoryDocumentStore::new();
    let report = seed_catalog(&store, &MenuDataset::builtin(), &collections()).expect("seed");

    let stage_of = |name: &str| {
        report
            .events
            .iter()
            .position(|e| e.name == name)
            .unwrap_or_else(|| panic!("missing event {name}"))
    };
    let start = stage_of("seed.start");
    let reset = stage_of("seed.reset.complete");
    let categories = stage_of("seed.categories.complete");
    let customizations = stage_of("seed.customizations.complete");
    let complete = stage_of("seed.complete");
    assert!(start < reset && reset < categories);
    assert!(categories < customizations && customizations < complete);

    assert_eq!(report.events.first().map(|e| &e.stage), Some(&SeedStage::Prepare));
    assert_eq!(report.events.last().map(|e| &e.stage), Some(&SeedStage::Finalize));
}

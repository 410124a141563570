#![forbid(unsafe_code)]
//! Catalog synchronization pipeline.
//!
//! A run fully replaces the four catalog collections from a static dataset:
//! reset everything, load categories and customizations while building
//! name-to-id indexes, then load menu items (each item's category resolved
//! through the category index) and link their customizations through the
//! customization index. Re-running against the same dataset yields the same
//! logical content with fresh identifiers, because reset always precedes
//! load.

mod fields;
mod linker;
mod loader;
mod logging;
mod report;
mod reset;

use larder_model::{MenuDataset, ValidationError};
use larder_store::{CollectionId, DocumentStore, StoreError};
use std::fmt::{Display, Formatter};

pub use fields::{
    category_fields, customization_fields, link_fields, menu_item_fields, FIELD_CALORIES,
    FIELD_CATEGORY_REF, FIELD_CUSTOMIZATION_REF, FIELD_DESCRIPTION, FIELD_IMAGE_URL,
    FIELD_MENU_REF, FIELD_NAME, FIELD_PRICE, FIELD_PROTEIN, FIELD_RATING, FIELD_TYPE,
};
pub use linker::link_customizations;
pub use loader::{load_entities, NameIndex};
pub use logging::{SeedEvent, SeedLog, SeedStage};
pub use report::{SeedReport, SeedWarning};
pub use reset::reset_collection;

use logging::event_fields;

pub const CRATE_NAME: &str = "larder-seed";

#[derive(Debug)]
pub enum SeedError {
    /// A collection identifier is missing, malformed, or duplicated.
    /// Raised before any write.
    Config(String),
    /// The dataset fails local validation. Raised before any write.
    Dataset(ValidationError),
    /// A backend call failed; fatal at whichever stage it occurred. There
    /// is no automatic retry and no rollback.
    Storage {
        stage: SeedStage,
        source: StoreError,
    },
    /// A menu item declared a category name with no entry in the category
    /// index. Fatal; documents created earlier in the run stay in place.
    UnknownCategory { item: String, category: String },
}

impl SeedError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Dataset(_) => "dataset_error",
            Self::Storage { .. } => "storage_error",
            Self::UnknownCategory { .. } => "unknown_category",
        }
    }
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "config error: {message}"),
            Self::Dataset(source) => write!(f, "dataset validation failed: {source}"),
            Self::Storage { stage, source } => {
                write!(f, "storage failure during {stage}: {source}")
            }
            Self::UnknownCategory { item, category } => write!(
                f,
                "menu item '{item}' references unknown category '{category}'"
            ),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source),
            Self::Dataset(source) => Some(source),
            _ => None,
        }
    }
}

/// One collection identifier per entity kind. The four collections must be
/// distinct: the pipeline owns them exclusively for the duration of a run
/// and resets each exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCollections {
    pub categories: CollectionId,
    pub customizations: CollectionId,
    pub menu: CollectionId,
    pub menu_customizations: CollectionId,
}

impl SeedCollections {
    pub fn parse(
        categories: &str,
        customizations: &str,
        menu: &str,
        menu_customizations: &str,
    ) -> Result<Self, SeedError> {
        let collections = Self {
            categories: parse_collection("categories", categories)?,
            customizations: parse_collection("customizations", customizations)?,
            menu: parse_collection("menu", menu)?,
            menu_customizations: parse_collection("menu customizations", menu_customizations)?,
        };
        collections.validate()?;
        Ok(collections)
    }

    pub fn validate(&self) -> Result<(), SeedError> {
        let ids = self.all();
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                if a == b {
                    return Err(SeedError::Config(format!(
                        "collection id '{a}' is used for more than one entity kind"
                    )));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn all(&self) -> [&CollectionId; 4] {
        [
            &self.categories,
            &self.customizations,
            &self.menu,
            &self.menu_customizations,
        ]
    }
}

fn parse_collection(label: &str, raw: &str) -> Result<CollectionId, SeedError> {
    CollectionId::parse(raw)
        .map_err(|e| SeedError::Config(format!("{label} collection id invalid: {}", e.message)))
}

/// Run the whole pipeline as one non-reentrant unit of work. The caller
/// must serialize invocations against the same collections.
pub fn seed_catalog(
    store: &dyn DocumentStore,
    dataset: &MenuDataset,
    collections: &SeedCollections,
) -> Result<SeedReport, SeedError> {
    collections.validate()?;
    dataset.validate().map_err(SeedError::Dataset)?;

    let mut log = SeedLog::default();
    log.emit(
        SeedStage::Prepare,
        "seed.start",
        event_fields([
            ("categories", dataset.categories.len().to_string()),
            ("customizations", dataset.customizations.len().to_string()),
            ("menu_items", dataset.menu.len().to_string()),
        ]),
    );
    tracing::info!(
        categories = dataset.categories.len(),
        customizations = dataset.customizations.len(),
        menu_items = dataset.menu.len(),
        "starting catalog seed"
    );

    let mut documents_deleted = 0usize;
    for collection in collections.all() {
        documents_deleted += reset_collection(store, collection).map_err(|source| {
            SeedError::Storage {
                stage: SeedStage::Reset,
                source,
            }
        })?;
    }
    log.emit(
        SeedStage::Reset,
        "seed.reset.complete",
        event_fields([("deleted", documents_deleted.to_string())]),
    );
    tracing::info!(deleted = documents_deleted, "collections reset");

    let categories = load_entities(
        store,
        &collections.categories,
        &dataset.categories,
        |category| category.name.as_str(),
        category_fields,
    )
    .map_err(|source| SeedError::Storage {
        stage: SeedStage::Categories,
        source,
    })?;
    log.emit(
        SeedStage::Categories,
        "seed.categories.complete",
        event_fields([("created", categories.len().to_string())]),
    );
    tracing::info!(created = categories.len(), "categories loaded");

    let customizations = load_entities(
        store,
        &collections.customizations,
        &dataset.customizations,
        |customization| customization.name.as_str(),
        customization_fields,
    )
    .map_err(|source| SeedError::Storage {
        stage: SeedStage::Customizations,
        source,
    })?;
    log.emit(
        SeedStage::Customizations,
        "seed.customizations.complete",
        event_fields([("created", customizations.len().to_string())]),
    );
    tracing::info!(created = customizations.len(), "customizations loaded");

    let mut warnings = Vec::new();
    let mut menu_items_created = 0usize;
    let mut links_created = 0usize;
    for item in &dataset.menu {
        let Some(category_id) = categories.get(&item.category_name) else {
            return Err(SeedError::UnknownCategory {
                item: item.name.clone(),
                category: item.category_name.clone(),
            });
        };
        let document = store
            .create_document(&collections.menu, menu_item_fields(item, category_id))
            .map_err(|source| SeedError::Storage {
                stage: SeedStage::Menu,
                source,
            })?;
        menu_items_created += 1;
        links_created += link_customizations(
            store,
            &collections.menu_customizations,
            &item.name,
            &document.id,
            &item.customizations,
            &customizations,
            &mut warnings,
        )
        .map_err(|source| SeedError::Storage {
            stage: SeedStage::Menu,
            source,
        })?;
        log.emit(
            SeedStage::Menu,
            "seed.menu.created",
            event_fields([
                ("name", item.name.clone()),
                ("id", document.id.to_string()),
            ]),
        );
    }

    for warning in &warnings {
        log.emit(
            SeedStage::Menu,
            "seed.link.skipped",
            event_fields([
                ("menu_item", warning.menu_item.clone()),
                ("customization", warning.customization.clone()),
            ]),
        );
    }
    log.emit(
        SeedStage::Finalize,
        "seed.complete",
        event_fields([
            ("menu_items", menu_items_created.to_string()),
            ("links", links_created.to_string()),
            ("warnings", warnings.len().to_string()),
        ]),
    );
    tracing::info!(
        menu_items = menu_items_created,
        links = links_created,
        warnings = warnings.len(),
        "catalog seed complete"
    );

    Ok(SeedReport {
        documents_deleted,
        categories_created: categories.len(),
        customizations_created: customizations.len(),
        menu_items_created,
        links_created,
        warnings,
        events: log.into_events(),
    })
}

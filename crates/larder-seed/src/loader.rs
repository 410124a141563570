use larder_store::{CollectionId, DocumentId, DocumentStore, FieldMap, StoreError};
use std::collections::BTreeMap;

/// Transient join table from an entity's natural key to its store-assigned
/// identifier, valid for the current run only.
pub type NameIndex = BTreeMap<String, DocumentId>;

/// Persist entities of one kind in source order, recording `name → id` for
/// each created document. The index is returned only once every entity has
/// been persisted; the first creation failure aborts the load, so a partial
/// index is never handed to a downstream stage.
pub fn load_entities<E>(
    store: &dyn DocumentStore,
    collection: &CollectionId,
    entities: &[E],
    name_of: impl Fn(&E) -> &str,
    fields_of: impl Fn(&E) -> FieldMap,
) -> Result<NameIndex, StoreError> {
    let mut index = NameIndex::new();
    for entity in entities {
        let document = store.create_document(collection, fields_of(entity))?;
        tracing::debug!(
            collection = %collection,
            name = name_of(entity),
            id = %document.id,
            "created entity document"
        );
        index.insert(name_of(entity).to_string(), document.id);
    }
    Ok(index)
}

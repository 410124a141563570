use crate::fields::link_fields;
use crate::loader::NameIndex;
use crate::report::SeedWarning;
use larder_store::{CollectionId, DocumentStore, DocumentId, StoreError};

/// Create one junction document per customization name that resolves
/// through the index. Unresolved names are recorded as warnings and
/// skipped; they never abort the menu item or the run. A failed create is
/// still a storage failure and propagates.
///
/// Returns the number of links actually created.
pub fn link_customizations(
    store: &dyn DocumentStore,
    collection: &CollectionId,
    menu_item: &str,
    menu_id: &DocumentId,
    names: &[String],
    customizations: &NameIndex,
    warnings: &mut Vec<SeedWarning>,
) -> Result<usize, StoreError> {
    let mut created = 0usize;
    for name in names {
        match customizations.get(name) {
            Some(customization_id) => {
                store.create_document(collection, link_fields(menu_id, customization_id))?;
                created += 1;
            }
            None => {
                tracing::warn!(
                    menu_item,
                    customization = %name,
                    "customization not found; skipping link"
                );
                warnings.push(SeedWarning {
                    menu_item: menu_item.to_string(),
                    customization: name.clone(),
                });
            }
        }
    }
    Ok(created)
}

use larder_model::{Category, CustomizationOption, MenuItem};
use larder_store::{DocumentId, FieldMap};
use serde_json::Value;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_IMAGE_URL: &str = "image_url";
pub const FIELD_RATING: &str = "rating";
pub const FIELD_CALORIES: &str = "calories";
pub const FIELD_PROTEIN: &str = "protein";
pub const FIELD_CATEGORY_REF: &str = "category_ref";
pub const FIELD_MENU_REF: &str = "menu_ref";
pub const FIELD_CUSTOMIZATION_REF: &str = "customization_ref";

#[must_use]
pub fn category_fields(category: &Category) -> FieldMap {
    let mut fields = FieldMap::new();
    insert_str(&mut fields, FIELD_NAME, &category.name);
    insert_str(&mut fields, FIELD_DESCRIPTION, &category.description);
    fields
}

#[must_use]
pub fn customization_fields(customization: &CustomizationOption) -> FieldMap {
    let mut fields = FieldMap::new();
    insert_str(&mut fields, FIELD_NAME, &customization.name);
    insert_f64(&mut fields, FIELD_PRICE, customization.price);
    insert_str(&mut fields, FIELD_TYPE, &customization.kind);
    fields
}

/// Menu documents persist the resolved category id, never the category
/// name; the natural key stays transient.
#[must_use]
pub fn menu_item_fields(item: &MenuItem, category_ref: &DocumentId) -> FieldMap {
    let mut fields = FieldMap::new();
    insert_str(&mut fields, FIELD_NAME, &item.name);
    insert_str(&mut fields, FIELD_DESCRIPTION, &item.description);
    insert_str(&mut fields, FIELD_IMAGE_URL, &item.image_url);
    insert_f64(&mut fields, FIELD_PRICE, item.price);
    insert_f64(&mut fields, FIELD_RATING, item.rating);
    fields.insert(FIELD_CALORIES.to_string(), Value::from(item.calories));
    fields.insert(FIELD_PROTEIN.to_string(), Value::from(item.protein));
    insert_str(&mut fields, FIELD_CATEGORY_REF, category_ref.as_str());
    fields
}

#[must_use]
pub fn link_fields(menu_ref: &DocumentId, customization_ref: &DocumentId) -> FieldMap {
    let mut fields = FieldMap::new();
    insert_str(&mut fields, FIELD_MENU_REF, menu_ref.as_str());
    insert_str(&mut fields, FIELD_CUSTOMIZATION_REF, customization_ref.as_str());
    fields
}

fn insert_str(fields: &mut FieldMap, key: &str, value: &str) {
    fields.insert(key.to_string(), Value::String(value.to_string()));
}

fn insert_f64(fields: &mut FieldMap, key: &str, value: f64) {
    fields.insert(key.to_string(), Value::from(value));
}

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const NAME_MAX_LEN: usize = 80;
pub const DESCRIPTION_MAX_LEN: usize = 400;
pub const RATING_MAX: f64 = 5.0;

/// One storefront category. Persisted as a single document; the name acts as
/// the natural key while the run is in flight and is never stored as a
/// foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,
    pub description: String,
}

impl Category {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_name("category", &self.name)?;
        validate_description("category", &self.name, &self.description)
    }
}

/// A customization option attached to menu items through junction documents.
/// The wire field for `kind` is `type`, a free-form tag (topping/side/size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomizationOption {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CustomizationOption {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_name("customization", &self.name)?;
        validate_price("customization", &self.name, self.price)?;
        if self.kind.trim().is_empty() {
            return Err(ValidationError(format!(
                "customization '{}' must declare a type tag",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    /// Natural-key reference to a category; resolved to a generated id
    /// before the menu document is persisted.
    pub category_name: String,
    /// Natural-key references to customization options.
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl MenuItem {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_name("menu item", &self.name)?;
        validate_description("menu item", &self.name, &self.description)?;
        validate_price("menu item", &self.name, self.price)?;
        if !self.rating.is_finite() || self.rating < 0.0 || self.rating > RATING_MAX {
            return Err(ValidationError(format!(
                "menu item '{}' rating must be within 0..={RATING_MAX}",
                self.name
            )));
        }
        if self.category_name.trim().is_empty() {
            return Err(ValidationError(format!(
                "menu item '{}' must declare a category name",
                self.name
            )));
        }
        let mut seen = std::collections::BTreeSet::new();
        for customization in &self.customizations {
            if customization.trim().is_empty() {
                return Err(ValidationError(format!(
                    "menu item '{}' lists an empty customization name",
                    self.name
                )));
            }
            if !seen.insert(customization.as_str()) {
                return Err(ValidationError(format!(
                    "menu item '{}' lists customization '{customization}' more than once",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn validate_name(kind: &str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError(format!("{kind} name must not be empty")));
    }
    if name.len() > NAME_MAX_LEN {
        return Err(ValidationError(format!(
            "{kind} name '{name}' exceeds max length {NAME_MAX_LEN}"
        )));
    }
    Ok(())
}

fn validate_description(kind: &str, name: &str, description: &str) -> Result<(), ValidationError> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err(ValidationError(format!(
            "{kind} '{name}' description exceeds max length {DESCRIPTION_MAX_LEN}"
        )));
    }
    Ok(())
}

fn validate_price(kind: &str, name: &str, price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError(format!(
            "{kind} '{name}' price must be a non-negative number"
        )));
    }
    Ok(())
}

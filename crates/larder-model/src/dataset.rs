// SPDX-License-Identifier: Apache-2.0

use crate::catalog::{Category, CustomizationOption, MenuItem, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The static dataset a synchronization run repopulates the catalog from.
///
/// Menu items reference categories and customizations by name only; the
/// pipeline resolves those natural keys to store-assigned identifiers after
/// the referenced documents are persisted. Validation here is local to the
/// dataset shape; cross-entity name resolution is the pipeline's job and
/// carries its own fatal/non-fatal policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuDataset {
    pub categories: Vec<Category>,
    pub customizations: Vec<CustomizationOption>,
    pub menu: Vec<MenuItem>,
}

impl MenuDataset {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut category_names = BTreeSet::new();
        for category in &self.categories {
            category.validate()?;
            if !category_names.insert(category.name.as_str()) {
                return Err(ValidationError(format!(
                    "duplicate category name '{}'",
                    category.name
                )));
            }
        }

        let mut customization_names = BTreeSet::new();
        for customization in &self.customizations {
            customization.validate()?;
            if !customization_names.insert(customization.name.as_str()) {
                return Err(ValidationError(format!(
                    "duplicate customization name '{}'",
                    customization.name
                )));
            }
        }

        let mut menu_names = BTreeSet::new();
        for item in &self.menu {
            item.validate()?;
            if !menu_names.insert(item.name.as_str()) {
                return Err(ValidationError(format!(
                    "duplicate menu item name '{}'",
                    item.name
                )));
            }
        }
        Ok(())
    }

    /// The dataset that ships with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                category("Pizza", "Stone-baked pizzas with house tomato sauce"),
                category("Burgers", "Smashed patties on brioche buns"),
                category("Drinks", "Cold drinks and shakes"),
                category("Desserts", "Baked daily in-house"),
            ],
            customizations: vec![
                customization("Extra Cheese", 1.5, "topping"),
                customization("Jalapenos", 0.9, "topping"),
                customization("Bacon", 1.8, "topping"),
                customization("Garlic Dip", 0.6, "side"),
                customization("Curly Fries", 2.4, "side"),
                customization("Large", 1.2, "size"),
            ],
            menu: vec![
                MenuItem {
                    name: "Margherita".to_string(),
                    description: "Tomato, mozzarella, fresh basil".to_string(),
                    image_url: "https://cdn.larder.dev/menu/margherita.png".to_string(),
                    price: 9.5,
                    rating: 4.6,
                    calories: 850,
                    protein: 32,
                    category_name: "Pizza".to_string(),
                    customizations: vec![
                        "Extra Cheese".to_string(),
                        "Garlic Dip".to_string(),
                        "Large".to_string(),
                    ],
                },
                MenuItem {
                    name: "Diavola".to_string(),
                    description: "Spicy salami, chili oil, mozzarella".to_string(),
                    image_url: "https://cdn.larder.dev/menu/diavola.png".to_string(),
                    price: 11.0,
                    rating: 4.4,
                    calories: 980,
                    protein: 38,
                    category_name: "Pizza".to_string(),
                    customizations: vec!["Extra Cheese".to_string(), "Jalapenos".to_string()],
                },
                MenuItem {
                    name: "Classic Smash".to_string(),
                    description: "Double patty, pickles, burger sauce".to_string(),
                    image_url: "https://cdn.larder.dev/menu/classic-smash.png".to_string(),
                    price: 8.9,
                    rating: 4.7,
                    calories: 1120,
                    protein: 45,
                    category_name: "Burgers".to_string(),
                    customizations: vec!["Bacon".to_string(), "Curly Fries".to_string()],
                },
                MenuItem {
                    name: "Halloumi Stack".to_string(),
                    description: "Grilled halloumi, harissa mayo, rocket".to_string(),
                    image_url: "https://cdn.larder.dev/menu/halloumi-stack.png".to_string(),
                    price: 9.2,
                    rating: 4.3,
                    calories: 860,
                    protein: 29,
                    category_name: "Burgers".to_string(),
                    customizations: vec!["Jalapenos".to_string(), "Curly Fries".to_string()],
                },
                MenuItem {
                    name: "Vanilla Shake".to_string(),
                    description: "Madagascan vanilla, whipped cream".to_string(),
                    image_url: "https://cdn.larder.dev/menu/vanilla-shake.png".to_string(),
                    price: 4.5,
                    rating: 4.2,
                    calories: 520,
                    protein: 12,
                    category_name: "Drinks".to_string(),
                    customizations: vec!["Large".to_string()],
                },
                MenuItem {
                    name: "Basque Cheesecake".to_string(),
                    description: "Burnt top, soft centre".to_string(),
                    image_url: "https://cdn.larder.dev/menu/basque-cheesecake.png".to_string(),
                    price: 5.8,
                    rating: 4.8,
                    calories: 610,
                    protein: 11,
                    category_name: "Desserts".to_string(),
                    customizations: Vec::new(),
                },
            ],
        }
    }
}

fn category(name: &str, description: &str) -> Category {
    Category {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn customization(name: &str, price: f64, kind: &str) -> CustomizationOption {
    CustomizationOption {
        name: name.to_string(),
        price,
        kind: kind.to_string(),
    }
}

#![forbid(unsafe_code)]
//! Larder catalog model SSOT.

mod catalog;
mod dataset;

pub use catalog::{
    Category, CustomizationOption, MenuItem, ValidationError, DESCRIPTION_MAX_LEN, NAME_MAX_LEN,
    RATING_MAX,
};
pub use dataset::MenuDataset;

pub const CRATE_NAME: &str = "larder-model";

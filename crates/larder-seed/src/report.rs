use crate::logging::SeedEvent;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A non-fatal data-integrity finding: a menu item referenced a
/// customization name absent from the customization dataset. The link is
/// skipped; the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedWarning {
    pub menu_item: String,
    pub customization: String,
}

impl Display for SeedWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "menu item '{}' references unknown customization '{}'",
            self.menu_item, self.customization
        )
    }
}

/// Aggregate result of a successful run. Callers needing finer-grained
/// status than the counts inspect `events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub documents_deleted: usize,
    pub categories_created: usize,
    pub customizations_created: usize,
    pub menu_items_created: usize,
    pub links_created: usize,
    pub warnings: Vec<SeedWarning>,
    pub events: Vec<SeedEvent>,
}

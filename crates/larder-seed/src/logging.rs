// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Pipeline stages in execution order. Each stage is a precondition for the
/// next; a failure in any stage is terminal for the run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStage {
    Prepare,
    Reset,
    Categories,
    Customizations,
    Menu,
    Finalize,
}

impl SeedStage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Reset => "reset",
            Self::Categories => "categories",
            Self::Customizations => "customizations",
            Self::Menu => "menu",
            Self::Finalize => "finalize",
        }
    }
}

impl Display for SeedStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEvent {
    pub stage: SeedStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct SeedLog {
    events: Vec<SeedEvent>,
}

impl SeedLog {
    pub fn emit(
        &mut self,
        stage: SeedStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        self.events.push(SeedEvent {
            stage,
            name: name.into(),
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[SeedEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<SeedEvent> {
        self.events
    }
}

pub(crate) fn event_fields<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

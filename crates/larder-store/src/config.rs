use crate::backend::{StoreError, StoreErrorCode};

pub const ENV_LARDER_ENDPOINT: &str = "LARDER_ENDPOINT";
pub const ENV_LARDER_PROJECT: &str = "LARDER_PROJECT";
pub const ENV_LARDER_API_KEY: &str = "LARDER_API_KEY";
pub const ENV_LARDER_DATABASE: &str = "LARDER_DATABASE";
pub const ENV_LARDER_LOG_LEVEL: &str = "LARDER_LOG_LEVEL";

/// Connection identity for the remote document database. Opaque to the
/// pipeline; only the HTTP backend interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    pub endpoint: String,
    pub project: String,
    pub api_key: String,
    pub database: String,
}

impl RemoteStoreConfig {
    pub fn new(
        endpoint: impl Into<String>,
        project: impl Into<String>,
        api_key: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let config = Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project: project.into(),
            api_key: api_key.into(),
            database: database.into(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                format!("endpoint '{}' must be an http(s) url", self.endpoint),
            ));
        }
        for (label, value) in [
            ("project", &self.project),
            ("api key", &self.api_key),
            ("database", &self.database),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::new(
                    StoreErrorCode::Validation,
                    format!("{label} must not be empty"),
                ));
            }
        }
        Ok(())
    }
}

/// Resolve a connection value from an explicit flag, then the environment.
pub fn resolve_setting(explicit: Option<String>, env_name: &str) -> Result<String, StoreError> {
    if let Some(value) = explicit {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    match std::env::var(env_name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("missing required setting; pass a flag or set {env_name}"),
        )),
    }
}

pub mod query_engine;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendArc;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendArc> {
        let url = Config::get(ConfigKey::BackendURL);
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!(format!("Backend URL must be an http(s) URL, got '{url}'"));
        }

        return Ok(Arc::new(query_engine::QueryEngine::default()));
    }
}

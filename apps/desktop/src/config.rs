use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use client_core::{EmbedTemplate, DEFAULT_API_URL, DEFAULT_EMBED_BASE_URL};
use serde::Deserialize;
use shared::domain::FormVariant;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "movie-desk.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub embed_base_url: String,
    pub log_filter: String,
    pub require_streaming_id: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            embed_base_url: DEFAULT_EMBED_BASE_URL.into(),
            log_filter: "info".into(),
            require_streaming_id: false,
        }
    }
}

/// Compiled-in defaults, overlaid by the config file when one exists.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config '{}'", path.display()))
        }
    };

    toml::from_str(&raw).with_context(|| format!("failed to parse config '{}'", path.display()))
}

impl Settings {
    pub fn with_overrides(mut self, api_url: Option<String>, require_streaming_id: bool) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        self.require_streaming_id |= require_streaming_id;
        self
    }

    pub fn api_endpoint(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_url.trim())
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api url '{}' must use http or https", self.api_url);
        }
        Ok(url)
    }

    pub fn embed_template(&self) -> anyhow::Result<EmbedTemplate> {
        EmbedTemplate::parse(self.embed_base_url.trim())
            .with_context(|| format!("invalid embed base url '{}'", self.embed_base_url))
    }

    pub fn form_variant(&self) -> FormVariant {
        if self.require_streaming_id {
            FormVariant::Streaming
        } else {
            FormVariant::Basic
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

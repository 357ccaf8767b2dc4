//! Adapter Configuration
//!
//! Defaults target a local development backend. Environment variables
//! (optionally loaded from a `.env` file) override individual settings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::store::WireSchema;

/// Which artwork store adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Rest,
    Qdrant,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Rest => write!(f, "rest"),
            StoreBackend::Qdrant => write!(f, "qdrant"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(StoreBackend::Rest),
            "qdrant" => Ok(StoreBackend::Qdrant),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Which image embedder adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    #[default]
    Remote,
    Clip,
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedderKind::Remote => write!(f, "remote"),
            EmbedderKind::Clip => write!(f, "clip"),
        }
    }
}

impl FromStr for EmbedderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(EmbedderKind::Remote),
            "clip" | "local" => Ok(EmbedderKind::Clip),
            _ => Err(format!("Unknown embedder: {}", s)),
        }
    }
}

/// Artwork store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the REST backend
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub schema: WireSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qdrant_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qdrant_api_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Matches per search (Qdrant only; the REST backend picks its own)
    #[serde(default = "default_search_limit")]
    pub search_limit: u64,
}

/// Image embedder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default)]
    pub kind: EmbedderKind,
    /// Base URL of the inference service (remote embedder)
    #[serde(default = "default_embedder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Expected vector length; pinned by the first call when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Complete adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtDecoConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub embedder: EmbedderConfig,
}

fn default_store_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_collection() -> String {
    "artworks".to_string()
}

fn default_search_limit() -> u64 {
    5
}

fn default_embedder_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_model() -> String {
    "clip-vit-base-patch32".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            endpoint: default_store_endpoint(),
            schema: WireSchema::default(),
            timeout_secs: None,
            qdrant_url: None,
            qdrant_api_key: None,
            collection: default_collection(),
            search_limit: default_search_limit(),
        }
    }
}

impl StoreConfig {
    /// Per-call limit; unset or zero means none
    pub fn timeout(&self) -> Option<Duration> {
        positive_secs(self.timeout_secs)
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            kind: EmbedderKind::default(),
            endpoint: default_embedder_endpoint(),
            model: default_model(),
            api_key: None,
            dimensions: None,
            timeout_secs: None,
        }
    }
}

impl EmbedderConfig {
    /// Per-call limit; unset or zero means none
    pub fn timeout(&self) -> Option<Duration> {
        positive_secs(self.timeout_secs)
    }
}

fn positive_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|s| *s > 0).map(Duration::from_secs)
}

impl ArtDecoConfig {
    /// Apply overrides from the process environment and `.env`
    pub fn with_env_overrides(self) -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded .env file");
        }
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = &mut self.store;
        override_parsed(&lookup, "ART_DECO_STORE", &mut store.backend);
        override_string(&lookup, "ART_DECO_STORE_ENDPOINT", &mut store.endpoint);
        override_parsed(&lookup, "ART_DECO_STORE_SCHEMA", &mut store.schema);
        override_optional(&lookup, "ART_DECO_STORE_TIMEOUT_SECS", &mut store.timeout_secs);
        override_optional(&lookup, "QDRANT_URL", &mut store.qdrant_url);
        override_optional(&lookup, "QDRANT_API_KEY", &mut store.qdrant_api_key);
        override_string(&lookup, "ART_DECO_QDRANT_COLLECTION", &mut store.collection);
        override_parsed(&lookup, "ART_DECO_SEARCH_LIMIT", &mut store.search_limit);

        let embedder = &mut self.embedder;
        override_parsed(&lookup, "ART_DECO_EMBEDDER", &mut embedder.kind);
        override_string(&lookup, "ART_DECO_EMBEDDER_ENDPOINT", &mut embedder.endpoint);
        override_string(&lookup, "ART_DECO_EMBEDDER_MODEL", &mut embedder.model);
        override_optional(&lookup, "ART_DECO_EMBEDDER_API_KEY", &mut embedder.api_key);
        override_optional(&lookup, "ART_DECO_EMBEDDER_DIMENSIONS", &mut embedder.dimensions);
        override_optional(&lookup, "ART_DECO_EMBEDDER_TIMEOUT_SECS", &mut embedder.timeout_secs);

        self
    }
}

fn override_string<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, target: &mut String) {
    if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
        *target = value;
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return;
    };

    match value.trim().parse() {
        Ok(parsed) => *target = parsed,
        Err(e) => tracing::warn!(key, %value, "Ignoring invalid setting: {}", e),
    }
}

fn override_optional<F, T>(lookup: &F, key: &str, target: &mut Option<T>)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return;
    };

    match value.trim().parse() {
        Ok(parsed) => *target = Some(parsed),
        Err(e) => tracing::warn!(key, %value, "Ignoring invalid setting: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ArtDecoConfig::default();

        assert_eq!(config.store.backend, StoreBackend::Rest);
        assert_eq!(config.store.endpoint, "http://localhost:8000");
        assert_eq!(config.store.schema, WireSchema::V1);
        assert_eq!(config.store.timeout(), None);
        assert_eq!(config.embedder.kind, EmbedderKind::Remote);
        assert_eq!(config.embedder.model, "clip-vit-base-patch32");
    }

    #[test]
    fn test_overrides() {
        let config = ArtDecoConfig::default().with_overrides(lookup(&[
            ("ART_DECO_STORE_ENDPOINT", "https://art.example.com"),
            ("ART_DECO_STORE_SCHEMA", "artist"),
            ("ART_DECO_STORE_TIMEOUT_SECS", "3"),
            ("ART_DECO_EMBEDDER", "clip"),
            ("ART_DECO_EMBEDDER_API_KEY", "secret"),
        ]));

        assert_eq!(config.store.endpoint, "https://art.example.com");
        assert_eq!(config.store.schema, WireSchema::V2);
        assert_eq!(config.store.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.embedder.kind, EmbedderKind::Clip);
        assert_eq!(config.embedder.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = ArtDecoConfig::default().with_overrides(lookup(&[
            ("ART_DECO_STORE", "postgres"),
            ("ART_DECO_EMBEDDER_TIMEOUT_SECS", "soon"),
            ("ART_DECO_STORE_ENDPOINT", "  "),
        ]));

        assert_eq!(config, ArtDecoConfig::default());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = ArtDecoConfig::default().with_overrides(lookup(&[
            ("ART_DECO_STORE_TIMEOUT_SECS", "0"),
            ("ART_DECO_EMBEDDER_TIMEOUT_SECS", "0"),
        ]));

        assert_eq!(config.store.timeout(), None);
        assert_eq!(config.embedder.timeout(), None);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: ArtDecoConfig = serde_json::from_value(serde_json::json!({
            "store": { "schema": "v2" },
            "embedder": { "kind": "clip", "dimensions": 512 }
        }))
        .unwrap();

        assert_eq!(config.store.endpoint, "http://localhost:8000");
        assert_eq!(config.store.schema, WireSchema::V2);
        assert_eq!(config.embedder.kind, EmbedderKind::Clip);
        assert_eq!(config.embedder.dimensions, Some(512));
    }
}

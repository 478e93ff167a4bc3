use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

pub const REST_COUNTRIES_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=name";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("country lookup failed: {0}")]
    Backend(String),
}

/// Read-side port for the country catalog behind the target-audience step.
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    async fn countries(&self) -> Result<Vec<String>, LookupError>;
}

/// REST Countries adapter: common names, sorted ascending.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    #[serde(default)]
    name: Option<CountryName>,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    #[serde(default)]
    common: Option<String>,
}

impl RestCountriesClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_endpoint(REST_COUNTRIES_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| LookupError::Backend(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn countries(&self) -> Result<Vec<String>, LookupError> {
        let entries: Vec<CountryEntry> = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| LookupError::Backend(err.to_string()))?
            .json()
            .await
            .map_err(|err| LookupError::Backend(err.to_string()))?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter_map(|entry| entry.name.and_then(|name| name.common))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Token handed out when a query (re)starts its quiet period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken(u64);

/// Reset-and-restart debounce discipline for as-you-type lookups. Each new
/// keystroke begins a fresh generation; a result is only accepted while its
/// token is still the latest, so a superseded in-flight lookup is ignored
/// rather than cancelled (last-query-wins).
#[derive(Debug, Default)]
pub struct QueryDebouncer {
    latest: AtomicU64,
}

impl QueryDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryToken {
        QueryToken(self.latest.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_current(&self, token: QueryToken) -> bool {
        self.latest.load(Ordering::Relaxed) == token.0
    }

    pub fn accept<T>(&self, token: QueryToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}

/// As-you-type country search over the directory, debounced.
pub struct LocationSearch<D> {
    directory: D,
    debouncer: QueryDebouncer,
}

impl<D: CountryDirectory> LocationSearch<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            debouncer: QueryDebouncer::new(),
        }
    }

    pub fn begin(&self) -> QueryToken {
        self.debouncer.begin()
    }

    /// Resolve one query. Returns `None` when a newer query superseded this
    /// one while the catalog fetch was in flight. A failed fetch degrades to
    /// an empty match list, mirroring the form's empty-catalog fallback.
    pub async fn search(&self, token: QueryToken, query: &str) -> Option<Vec<String>> {
        let catalog = match self.directory.countries().await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(%err, "country catalog unavailable");
                Vec::new()
            }
        };

        let needle = query.trim().to_lowercase();
        let matches = catalog
            .into_iter()
            .filter(|country| needle.is_empty() || country.to_lowercase().contains(&needle))
            .collect();
        self.debouncer.accept(token, matches)
    }
}

//! Deterministic in-memory gateway implementations.
//!
//! Used by the crate's own tests, the workspace integration tests, and as a
//! reference for what a real transport-backed gateway must do. Lookups and
//! learns are plain map operations; failures and artificial latency can be
//! injected per catalog code to exercise the degradation paths.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ingest::AcquisitionItem;

use crate::gateway::{CatalogGateway, ExistingItemsProvider, ExternalDescription, GatewayError};
use crate::resolver::LearnedEntry;

/// In-memory catalog backed by two maps: external descriptions and local
/// short descriptions. `learn_entry` writes into the local map, so a learned
/// code resolves on subsequent lookups.
#[derive(Default)]
pub struct StubCatalog {
    external: HashMap<String, ExternalDescription>,
    local: Mutex<HashMap<String, String>>,
    learned: Mutex<Vec<LearnedEntry>>,
    fail_external: HashSet<String>,
    fail_local: HashSet<String>,
    fail_learn: HashSet<String>,
    latency: Option<Duration>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an external-catalog description for a code.
    pub fn with_external(
        mut self,
        catalog_code: &str,
        full_description: &str,
        category_name: Option<&str>,
    ) -> Self {
        self.external.insert(
            catalog_code.to_string(),
            ExternalDescription {
                full_description: Some(full_description.to_string()),
                category_name: category_name.map(str::to_string),
            },
        );
        self
    }

    /// Registers a local short description for a code.
    pub fn with_local(self, catalog_code: &str, short_description: &str) -> Self {
        self.local
            .lock()
            .expect("stub catalog lock poisoned")
            .insert(catalog_code.to_string(), short_description.to_string());
        self
    }

    /// Makes external-description lookups fail for a code.
    pub fn failing_external(mut self, catalog_code: &str) -> Self {
        self.fail_external.insert(catalog_code.to_string());
        self
    }

    /// Makes local short-description lookups fail for a code.
    pub fn failing_local(mut self, catalog_code: &str) -> Self {
        self.fail_local.insert(catalog_code.to_string());
        self
    }

    /// Makes learn-entry calls fail for a code.
    pub fn failing_learn(mut self, catalog_code: &str) -> Self {
        self.fail_learn.insert(catalog_code.to_string());
        self
    }

    /// Adds artificial latency to every gateway call, for concurrency tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Snapshot of every entry learned so far, in call-completion order.
    pub fn learned_entries(&self) -> Vec<LearnedEntry> {
        self.learned
            .lock()
            .expect("stub catalog lock poisoned")
            .clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CatalogGateway for StubCatalog {
    async fn fetch_external_description(
        &self,
        catalog_code: &str,
    ) -> Result<ExternalDescription, GatewayError> {
        self.simulate_latency().await;
        if self.fail_external.contains(catalog_code) {
            return Err(GatewayError::Lookup(format!(
                "stub external lookup failure for {catalog_code}"
            )));
        }
        Ok(self.external.get(catalog_code).cloned().unwrap_or_default())
    }

    async fn fetch_local_short_description(
        &self,
        catalog_code: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.simulate_latency().await;
        if self.fail_local.contains(catalog_code) {
            return Err(GatewayError::Lookup(format!(
                "stub local lookup failure for {catalog_code}"
            )));
        }
        Ok(self
            .local
            .lock()
            .expect("stub catalog lock poisoned")
            .get(catalog_code)
            .cloned())
    }

    async fn learn_entry(
        &self,
        catalog_code: &str,
        _full_description: &str,
        short_description: &str,
    ) -> Result<(), GatewayError> {
        self.simulate_latency().await;
        if self.fail_learn.contains(catalog_code) {
            return Err(GatewayError::Persistence(format!(
                "stub learn failure for {catalog_code}"
            )));
        }
        self.local
            .lock()
            .expect("stub catalog lock poisoned")
            .insert(catalog_code.to_string(), short_description.to_string());
        self.learned
            .lock()
            .expect("stub catalog lock poisoned")
            .push(LearnedEntry {
                catalog_code: catalog_code.to_string(),
                short_description: short_description.to_string(),
            });
        Ok(())
    }
}

/// Existing-items provider backed by a fixed vector. The stub ignores the
/// reference year and owner; filtering is the real store's concern.
#[derive(Default)]
pub struct StaticExistingItems {
    items: Vec<AcquisitionItem>,
    fail: bool,
}

impl StaticExistingItems {
    pub fn new(items: Vec<AcquisitionItem>) -> Self {
        Self { items, fail: false }
    }

    /// A provider whose fetch always fails.
    pub fn failing() -> Self {
        Self {
            items: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ExistingItemsProvider for StaticExistingItems {
    async fn fetch_all_existing(
        &self,
        _reference_year: i32,
        _owner_id: &str,
    ) -> Result<Vec<AcquisitionItem>, GatewayError> {
        if self.fail {
            return Err(GatewayError::ExistingItems("stub fetch failure".into()));
        }
        Ok(self.items.clone())
    }
}

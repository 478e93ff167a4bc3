use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::workflows::onboarding::persistence::{SnapshotError, SnapshotStore};

use super::domain::{BusinessDetail, BusinessId, BusinessStatus, BusinessSummary};
use super::gateway::{DirectoryGateway, GatewayError};

/// Staff-facing view over the submitted businesses.
///
/// Deleting only hides: the id goes into a ledger persisted through the
/// snapshot port and the backend record is left untouched. Status toggles
/// are equally local, kept in memory for the lifetime of the directory.
pub struct AdminDirectory<G, L> {
    gateway: Arc<G>,
    ledger: Arc<L>,
    status_overrides: Mutex<BTreeMap<BusinessId, BusinessStatus>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Ledger(#[from] SnapshotError),
    #[error("business not found")]
    NotFound,
}

impl<G, L> AdminDirectory<G, L>
where
    G: DirectoryGateway,
    L: SnapshotStore,
{
    pub fn new(gateway: Arc<G>, ledger: Arc<L>) -> Self {
        Self {
            gateway,
            ledger,
            status_overrides: Mutex::new(BTreeMap::new()),
        }
    }

    /// All visible businesses, local status overrides applied.
    pub async fn list(&self) -> Result<Vec<BusinessSummary>, DirectoryError> {
        let hidden = self.hidden_ids();
        let overrides = self
            .status_overrides
            .lock()
            .expect("status mutex poisoned")
            .clone();

        let summaries = self
            .gateway
            .list_businesses()
            .await?
            .into_iter()
            .filter(|summary| !hidden.contains(&summary.id))
            .map(|mut summary| {
                if let Some(status) = overrides.get(&summary.id) {
                    summary.status = *status;
                }
                summary
            })
            .collect();
        Ok(summaries)
    }

    /// Case-insensitive name search over the visible listing.
    pub async fn search(&self, term: &str) -> Result<Vec<BusinessSummary>, DirectoryError> {
        let needle = term.trim().to_lowercase();
        let summaries = self
            .list()
            .await?
            .into_iter()
            .filter(|summary| {
                needle.is_empty() || summary.business_name.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(summaries)
    }

    pub async fn detail(&self, id: &BusinessId) -> Result<BusinessDetail, DirectoryError> {
        if self.hidden_ids().contains(id) {
            return Err(DirectoryError::NotFound);
        }
        self.gateway
            .fetch_business(id)
            .await?
            .ok_or(DirectoryError::NotFound)
    }

    /// Hide a business from every future listing. The backend record is not
    /// touched.
    pub fn delete(&self, id: &BusinessId) -> Result<(), DirectoryError> {
        let mut hidden = self.hidden_ids();
        if hidden.insert(id.clone()) {
            let raw = serde_json::to_string(&hidden)
                .map_err(|err| SnapshotError::Unavailable(err.to_string()))?;
            self.ledger.save(&raw)?;
        }
        Ok(())
    }

    /// Local-only status change; the backend never learns about it.
    pub fn set_status(&self, id: &BusinessId, status: BusinessStatus) {
        self.status_overrides
            .lock()
            .expect("status mutex poisoned")
            .insert(id.clone(), status);
    }

    fn hidden_ids(&self) -> BTreeSet<BusinessId> {
        match self.ledger.load() {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!(%err, "discarding malformed deletion ledger");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(err) => {
                warn!(%err, "deletion ledger unreadable");
                BTreeSet::new()
            }
        }
    }
}

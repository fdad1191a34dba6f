//! Delayed account-name resolution for the recipient wizard.
//!
//! Each submission bumps a generation counter. A pending lookup only writes
//! its result if no newer submission (or cancellation) happened meanwhile.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_LOOKUP_DELAY_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountQuery {
    pub bank_id: String,
    pub account_number: String,
}

impl AccountQuery {
    pub fn new(bank_id: &str, account_number: &str) -> Self {
        Self {
            bank_id: bank_id.to_lowercase(),
            account_number: account_number.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound,
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn lookup(&self, query: &AccountQuery) -> Result<Option<String>>;
}

/// Directory backed by a fixed table.
#[derive(Debug, Clone, Default)]
pub struct MockAccountDirectory {
    accounts: HashMap<AccountQuery, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockAccount {
    pub bank_id: String,
    pub account_number: String,
    pub name: String,
}

impl MockAccountDirectory {
    pub fn new(accounts: &[MockAccount]) -> Self {
        Self {
            accounts: accounts
                .iter()
                .map(|a| (AccountQuery::new(&a.bank_id, &a.account_number), a.name.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl AccountDirectory for MockAccountDirectory {
    async fn lookup(&self, query: &AccountQuery) -> Result<Option<String>> {
        Ok(self.accounts.get(query).cloned())
    }
}

pub fn default_accounts() -> Vec<MockAccount> {
    [
        ("access", "0123456789", "Adaeze Okafor"),
        ("gtb", "0234567891", "Tunde Bakare"),
        ("uba", "1029384756", "Chiamaka Eze"),
        ("zenith", "2233445566", "Ibrahim Musa"),
        ("fidelity", "9988776655", "Funke Adeyemi"),
    ]
    .into_iter()
    .map(|(bank_id, account_number, name)| MockAccount {
        bank_id: bank_id.to_string(),
        account_number: account_number.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    resolved: Option<(AccountQuery, Resolution)>,
}

pub struct AccountNameResolver<D: AccountDirectory + 'static> {
    directory: Arc<D>,
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl<D: AccountDirectory + 'static> AccountNameResolver<D> {
    pub fn new(directory: D, delay: Duration) -> Self {
        Self {
            directory: Arc::new(directory),
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Schedules a lookup, invalidating every earlier one.
    ///
    /// The returned handle yields the resolution if it was still current when
    /// it completed, `None` if it was superseded.
    pub async fn submit(&self, query: AccountQuery) -> JoinHandle<Option<Resolution>> {
        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.resolved = None;
            slot.generation
        };
        debug!(generation, bank = %query.bank_id, "Scheduled account lookup");

        let directory = Arc::clone(&self.directory);
        let slot = Arc::clone(&self.slot);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if slot.lock().await.generation != generation {
                debug!(generation, "Account lookup superseded before it started");
                return None;
            }

            let resolution = match directory.lookup(&query).await {
                Ok(Some(name)) => Resolution::Found(name),
                Ok(None) => Resolution::NotFound,
                Err(e) => {
                    debug!(error = %e, "Account lookup failed");
                    Resolution::NotFound
                }
            };

            let mut slot = slot.lock().await;
            if slot.generation != generation {
                debug!(generation, "Dropping stale account lookup");
                return None;
            }
            slot.resolved = Some((query, resolution.clone()));
            Some(resolution)
        })
    }

    /// Invalidates any pending lookup and clears the current result.
    pub async fn cancel(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.resolved = None;
        debug!(generation = slot.generation, "Cancelled account lookup");
    }

    pub async fn current(&self) -> Option<(AccountQuery, Resolution)> {
        self.slot.lock().await.resolved.clone()
    }
}

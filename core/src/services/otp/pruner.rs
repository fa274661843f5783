//! Pruning of expired codes
//!
//! Runs once per call (the `otp prune` command) or as a background task on a
//! fixed interval.

use chrono::Utc;
use otp_shared::PruneConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::OtpRepository;

/// Removes codes whose expiry has passed
pub struct OtpPruner<R: OtpRepository + 'static> {
    repository: Arc<R>,
    config: PruneConfig,
}

impl<R: OtpRepository> OtpPruner<R> {
    pub fn new(repository: Arc<R>, config: PruneConfig) -> Self {
        Self { repository, config }
    }

    /// Delete every record with `expires_at <= now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of deleted records (zero is success)
    /// * `Err(DomainError::Storage)` - The delete failed
    pub async fn prune_expired(&self) -> DomainResult<u64> {
        let deleted = self.repository.delete_expired(Utc::now()).await?;
        info!(deleted = deleted, event = "otp_pruned", "Pruned expired codes");
        Ok(deleted)
    }

    /// Run a single pruning cycle, capturing failures in the result
    pub async fn run_cycle(&self) -> PruneResult {
        match self.prune_expired().await {
            Ok(deleted) => PruneResult {
                deleted,
                error: None,
            },
            Err(e) => {
                error!(error = %e, event = "otp_prune_failed", "Failed to prune expired codes");
                PruneResult {
                    deleted: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Start pruning on the configured interval
    ///
    /// Returns `None` when pruning is disabled. Failed cycles are logged and
    /// the loop keeps running.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP pruning is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "OTP pruner started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_cycle().await;
            }
        }))
    }
}

/// Outcome of one pruning cycle
#[derive(Debug, Default, Clone)]
pub struct PruneResult {
    /// Number of expired records deleted
    pub deleted: u64,
    /// Error message if the cycle failed
    pub error: Option<String>,
}

impl PruneResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

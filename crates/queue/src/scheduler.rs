//! Scheduled jobs for periodic maintenance tasks.

#![allow(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval for the photo import sweep (default: weekly).
    pub photo_import_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            photo_import_interval: Duration::from_secs(7 * 24 * 3600),
        }
    }
}

/// Job executor trait for scheduled jobs.
#[async_trait::async_trait]
pub trait JobExecutor: Send + Sync {
    /// Top up photos for sites that are short on images.
    ///
    /// Returns the number of photos added across the sweep.
    async fn import_missing_photos(&self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;
}

/// Run the scheduler with the given configuration and executor.
pub async fn run_scheduler<E: JobExecutor + 'static>(config: SchedulerConfig, executor: Arc<E>) {
    let photo_import_interval = config.photo_import_interval;

    // Spawn photo import task
    tokio::spawn(async move {
        let mut interval = interval(photo_import_interval);
        loop {
            interval.tick().await;
            match executor.import_missing_photos().await {
                Ok(count) => {
                    if count > 0 {
                        tracing::info!(count, "Imported photos for under-illustrated sites");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Photo import sweep failed");
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingExecutor {
        runs: AtomicU64,
    }

    #[async_trait::async_trait]
    impl JobExecutor for CountingExecutor {
        async fn import_missing_photos(
            &self,
        ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_scheduler_fires_on_interval() {
        let executor = Arc::new(CountingExecutor {
            runs: AtomicU64::new(0),
        });

        run_scheduler(
            SchedulerConfig {
                photo_import_interval: Duration::from_millis(10),
            },
            executor.clone(),
        )
        .await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(executor.runs.load(Ordering::SeqCst) >= 2);
    }
}

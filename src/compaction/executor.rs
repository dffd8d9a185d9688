//! One-round compaction execution.
//!
//! [`CompactionExecutor`] is plain configuration and can be shipped to another
//! worker. Opening an [`ExecutionContext`] re-acquires a live write client
//! through a factory; the context then runs rounds with
//! [`ExecutionContext::execute`]: compact, validate every partition, and commit
//! only when none failed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{instrument::WithSubscriber, Dispatch};
use ulid::Ulid;

use crate::{
    client::{WriteClient, WriteClientFactory},
    compaction::{error::CompactionError, metrics::CompactionMetrics},
    observability::{log_debug, log_error, log_info, log_warn},
    option::{CompactorOptions, StorageConfig},
    timeline::Instant,
    write::CompactionOutput,
};

/// Transferable description of how compaction rounds are executed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompactionExecutor {
    storage: StorageConfig,
    #[serde(default)]
    options: CompactorOptions,
}

impl CompactionExecutor {
    /// Executor whose clients connect with `storage`.
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage,
            options: CompactorOptions::default(),
        }
    }

    /// Replace the reporting options.
    pub fn with_options(self, options: CompactorOptions) -> Self {
        Self { options, ..self }
    }

    /// Storage settings handed to the client factory.
    pub fn storage_config(&self) -> &StorageConfig {
        &self.storage
    }

    /// Reporting options.
    pub fn options(&self) -> CompactorOptions {
        self.options
    }

    /// Build a write client for this executor's storage settings and wrap it in
    /// an execution context.
    pub fn attach<F>(&self, factory: &F) -> Result<ExecutionContext<F::Client>, CompactionError>
    where
        F: WriteClientFactory,
    {
        let client = self.connect(factory)?;
        Ok(ExecutionContext::new(client).with_options(self.options))
    }

    /// Like [`attach`](Self::attach), but the attach event and every round of
    /// the returned context log into `dispatch`.
    pub fn attach_with_dispatch<F>(
        &self,
        factory: &F,
        dispatch: Dispatch,
    ) -> Result<ExecutionContext<F::Client>, CompactionError>
    where
        F: WriteClientFactory,
    {
        let client = tracing::dispatcher::with_default(&dispatch, || self.connect(factory))?;
        Ok(ExecutionContext::new(client)
            .with_options(self.options)
            .with_dispatch(dispatch))
    }

    fn connect<F>(&self, factory: &F) -> Result<F::Client, CompactionError>
    where
        F: WriteClientFactory,
    {
        let client = factory
            .create(&self.storage)
            .map_err(CompactionError::Client)?;
        log_debug!(
            component = "compaction",
            event = "write_client_attached",
            base_path = ?self.storage.base_path(),
        );
        Ok(client)
    }
}

/// Summary of a committed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionCommit {
    /// Instant that was committed.
    pub instant: Instant,
    /// Attempt id used to correlate the round's log events.
    pub attempt: Ulid,
    /// Partitions recorded by the commit.
    pub partitions: usize,
    /// Records written across those partitions.
    pub records: u64,
}

/// Live handle for running compaction rounds against one write client.
///
/// Holds no per-round state, so a single context may execute different
/// instants concurrently if the client supports it.
pub struct ExecutionContext<C> {
    client: C,
    options: CompactorOptions,
    dispatch: Option<Dispatch>,
    metrics: Option<Arc<CompactionMetrics>>,
}

impl<C> ExecutionContext<C>
where
    C: WriteClient,
{
    /// Context over an already connected client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: CompactorOptions::default(),
            dispatch: None,
            metrics: None,
        }
    }

    /// Replace the reporting options.
    pub fn with_options(self, options: CompactorOptions) -> Self {
        Self { options, ..self }
    }

    /// Route this context's log events to `dispatch` instead of the default
    /// subscriber.
    pub fn with_dispatch(self, dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
            ..self
        }
    }

    /// Count round outcomes into `metrics`.
    pub fn with_metrics(self, metrics: Arc<CompactionMetrics>) -> Self {
        Self {
            metrics: Some(metrics),
            ..self
        }
    }

    /// The write client rounds are executed against.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one compaction round for `instant`.
    ///
    /// Commits only if no partition reported errors. An I/O failure from the
    /// compaction call is returned as [`CompactionError::Io`] without a commit;
    /// failing partitions are returned as [`CompactionError::WriteErrors`].
    pub async fn execute(&self, instant: &Instant) -> Result<CompactionCommit, CompactionError> {
        match &self.dispatch {
            Some(dispatch) => self.run_round(instant).with_subscriber(dispatch.clone()).await,
            None => self.run_round(instant).await,
        }
    }

    async fn run_round(&self, instant: &Instant) -> Result<CompactionCommit, CompactionError> {
        let attempt = Ulid::new();
        log_info!(
            component = "compaction",
            event = "compaction_started",
            instant = %instant,
            attempt = %attempt,
        );

        let output = match self.client.compact(instant.timestamp()).await {
            Ok(output) => output,
            Err(err) => {
                log_warn!(
                    component = "compaction",
                    event = "compaction_io_failed",
                    instant = %instant,
                    attempt = %attempt,
                    error = %err,
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_io_failure();
                }
                return Err(CompactionError::Io(err));
            }
        };

        let result = output.result();
        if !result.is_clean() {
            // A single failing partition voids the whole round.
            log_error!(
                component = "compaction",
                event = "compaction_write_errors",
                instant = %instant,
                attempt = %attempt,
                errors = result.failing_partitions,
                error_records = result.total_error_records,
                partitions = result.total_partitions,
            );
            self.log_failing_partitions(instant, attempt, &output);
            if let Some(metrics) = &self.metrics {
                metrics.record_aborted(result.failing_partitions);
            }
            return Err(CompactionError::WriteErrors {
                instant: instant.clone(),
                errors: result.failing_partitions,
            });
        }

        if let Err(source) = self
            .client
            .commit_compaction(instant.timestamp(), output, None)
            .await
        {
            log_warn!(
                component = "compaction",
                event = "compaction_commit_failed",
                instant = %instant,
                attempt = %attempt,
                error = %source,
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_commit_failure();
            }
            return Err(CompactionError::Commit {
                instant: instant.clone(),
                source,
            });
        }

        log_info!(
            component = "compaction",
            event = "compaction_committed",
            instant = %instant,
            attempt = %attempt,
            partitions = result.total_partitions,
            records = result.total_records,
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_committed(result.total_partitions);
        }
        Ok(CompactionCommit {
            instant: instant.clone(),
            attempt,
            partitions: result.total_partitions,
            records: result.total_records,
        })
    }

    fn log_failing_partitions(&self, instant: &Instant, attempt: Ulid, output: &CompactionOutput) {
        for status in output
            .failing_statuses()
            .take(self.options.error_sample_limit)
        {
            log_error!(
                component = "compaction",
                event = "compaction_failed_partition",
                instant = %instant,
                attempt = %attempt,
                partition = status.partition_path(),
                file_id = ?status.file_id(),
                error_records = status.total_error_records(),
                global_error = ?status.global_error(),
            );
        }
    }
}

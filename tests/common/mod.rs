//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    io,
    sync::{Arc, Mutex},
};

use tonbo_compactor::{
    BoxedError, ClientFuture, CompactionOutput, ExtraMetadata, Instant, InstantTime,
    StorageConfig, WriteClient, WriteClientFactory, WriteStatus,
};

/// What the table's write path produces for a planned instant.
#[derive(Debug, Clone)]
pub enum Plan {
    /// Rewrite succeeds at the storage level and yields these statuses.
    Statuses(Vec<WriteStatus>),
    /// Rewrite fails with an I/O error of this kind.
    Io(io::ErrorKind),
}

/// A committed round as seen by the table.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub instant: InstantTime,
    pub output: CompactionOutput,
    pub extra_metadata: Option<ExtraMetadata>,
}

/// In-memory table that plays the write path and the commit timeline.
#[derive(Debug, Default)]
pub struct MemoryTable {
    plans: Mutex<HashMap<InstantTime, Plan>>,
    compacted: Mutex<Vec<InstantTime>>,
    commits: Mutex<Vec<CommitRecord>>,
}

impl MemoryTable {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn plan(&self, instant: &Instant, plan: Plan) {
        self.plans
            .lock()
            .expect("plans mutex")
            .insert(instant.timestamp().clone(), plan);
    }

    pub fn compacted(&self) -> Vec<InstantTime> {
        self.compacted.lock().expect("compacted mutex").clone()
    }

    pub fn commits(&self) -> Vec<CommitRecord> {
        self.commits.lock().expect("commits mutex").clone()
    }

    pub fn is_committed(&self, instant: &Instant) -> bool {
        self.commits()
            .iter()
            .any(|record| &record.instant == instant.timestamp())
    }
}

/// Write client bound to a [`MemoryTable`].
#[derive(Debug, Clone)]
pub struct MemoryClient {
    table: Arc<MemoryTable>,
}

impl MemoryClient {
    pub fn new(table: Arc<MemoryTable>) -> Self {
        Self { table }
    }
}

impl WriteClient for MemoryClient {
    fn compact<'a>(&'a self, instant: &'a InstantTime) -> ClientFuture<'a, CompactionOutput> {
        Box::pin(async move {
            self.table
                .compacted
                .lock()
                .expect("compacted mutex")
                .push(instant.clone());
            let plan = self
                .table
                .plans
                .lock()
                .expect("plans mutex")
                .get(instant)
                .cloned();
            match plan {
                Some(Plan::Statuses(statuses)) => Ok(CompactionOutput::new(statuses)
                    .with_metadata("compacted.instant", instant.as_str())),
                Some(Plan::Io(kind)) => Err(io::Error::new(kind, "simulated storage failure")),
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no compaction plan for {instant}"),
                )),
            }
        })
    }

    fn commit_compaction<'a>(
        &'a self,
        instant: &'a InstantTime,
        output: CompactionOutput,
        extra_metadata: Option<ExtraMetadata>,
    ) -> ClientFuture<'a, ()> {
        Box::pin(async move {
            let mut commits = self.table.commits.lock().expect("commits mutex");
            if commits.iter().any(|record| &record.instant == instant) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("instant {instant} already committed"),
                ));
            }
            commits.push(CommitRecord {
                instant: instant.clone(),
                output,
                extra_metadata,
            });
            Ok(())
        })
    }
}

/// Factory that connects [`MemoryClient`]s and remembers the configs it saw.
#[derive(Debug, Clone)]
pub struct MemoryClientFactory {
    table: Arc<MemoryTable>,
    seen: Arc<Mutex<Vec<StorageConfig>>>,
}

impl MemoryClientFactory {
    pub fn new(table: Arc<MemoryTable>) -> Self {
        Self {
            table,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<StorageConfig> {
        self.seen.lock().expect("seen mutex").clone()
    }
}

impl WriteClientFactory for MemoryClientFactory {
    type Client = MemoryClient;

    fn create(&self, config: &StorageConfig) -> Result<Self::Client, BoxedError> {
        if config.base_path().is_none() {
            return Err("memory table requires a base path".into());
        }
        self.seen.lock().expect("seen mutex").push(config.clone());
        Ok(MemoryClient::new(Arc::clone(&self.table)))
    }
}

/// Inflight compaction instant for `ts`.
pub fn inflight(ts: &str) -> Instant {
    Instant::inflight(ts.parse().expect("valid instant timestamp"))
}

/// Healthy status for `partition` with `records` written records.
pub fn clean(partition: &str, records: u64) -> WriteStatus {
    WriteStatus::new(partition)
        .with_file_id(format!("{partition}-fg"))
        .record_success(records)
}

/// Status for `partition` where each key in `keys` failed.
pub fn failing(partition: &str, keys: &[&str]) -> WriteStatus {
    keys.iter().fold(WriteStatus::new(partition), |status, key| {
        status.record_failure(*key, "write rejected")
    })
}

/// In-memory log sink usable as a `tracing_subscriber` writer.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn dispatch(&self) -> tracing::Dispatch {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::Dispatch::new(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().expect("log mutex")).into_owned()
    }

    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().expect("log mutex").extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

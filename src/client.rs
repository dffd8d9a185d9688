//! Contracts for the collaborator that performs compaction I/O.
//!
//! The executor decides commit or abort; a [`WriteClient`] does the actual
//! file-group rewrite and the durable commit. Clients are never serialized
//! with the executor. A [`WriteClientFactory`] rebuilds one from the
//! [`StorageConfig`] in each execution context instead.

use std::{collections::BTreeMap, future::Future, io, pin::Pin, sync::Arc};

use crate::{option::StorageConfig, timeline::InstantTime, write::CompactionOutput};

/// Extra commit metadata. The executor always passes `None`.
pub type ExtraMetadata = BTreeMap<String, String>;

/// Boxed future returned by [`WriteClient`] operations.
pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = io::Result<T>> + Send + 'a>>;

/// Error returned by a [`WriteClientFactory`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Performs compaction I/O for scheduled instants.
///
/// Implementations may be called repeatedly and, for distinct instants,
/// concurrently.
pub trait WriteClient: Send + Sync {
    /// Rewrite the file groups planned for `instant` and report per-partition
    /// outcomes.
    fn compact<'a>(&'a self, instant: &'a InstantTime) -> ClientFuture<'a, CompactionOutput>;

    /// Durably record the round for `instant`.
    fn commit_compaction<'a>(
        &'a self,
        instant: &'a InstantTime,
        output: CompactionOutput,
        extra_metadata: Option<ExtraMetadata>,
    ) -> ClientFuture<'a, ()>;
}

impl<C> WriteClient for Arc<C>
where
    C: WriteClient + ?Sized,
{
    fn compact<'a>(&'a self, instant: &'a InstantTime) -> ClientFuture<'a, CompactionOutput> {
        (**self).compact(instant)
    }

    fn commit_compaction<'a>(
        &'a self,
        instant: &'a InstantTime,
        output: CompactionOutput,
        extra_metadata: Option<ExtraMetadata>,
    ) -> ClientFuture<'a, ()> {
        (**self).commit_compaction(instant, output, extra_metadata)
    }
}

/// Builds a live [`WriteClient`] from storage settings.
pub trait WriteClientFactory {
    /// Client type produced by this factory.
    type Client: WriteClient;

    /// Connect a client for `config`.
    fn create(&self, config: &StorageConfig) -> Result<Self::Client, BoxedError>;
}

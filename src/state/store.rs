use std::collections::BTreeMap;

use displaydoc::Display;

/// The persistence surface the aggregator needs: a key-value map from nullifiers
/// to serialized ballots, written in batches.
///
/// Writes made between [`start_batch`](Self::start_batch) and [`commit`](Self::commit)
/// must be visible to [`get`](Self::get) immediately, and become durable only on commit.
pub trait BallotStore {
    /// The error type of the backing store.
    type Error: core::fmt::Display;

    /// Opens a new write batch.
    fn start_batch(&mut self) -> Result<(), Self::Error>;

    /// Returns the ballot stored for `nullifier`, including writes pending in the open batch.
    fn get(&self, nullifier: &[u8]) -> Result<Option<Box<[u8]>>, Self::Error>;

    /// Stores `ballot` under `nullifier` in the open batch.
    fn put(&mut self, nullifier: &[u8], ballot: &[u8]) -> Result<(), Self::Error>;

    /// Makes the writes of the open batch durable and closes it.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Drops the writes of the open batch (if any) and closes it.
    fn discard(&mut self);
}

/// Errors of [`MemoryStore`].
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// No write batch is open
    NoOpenBatch,
    /// A write batch is already open
    BatchAlreadyOpen,
}

/// An in-memory [`BallotStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: BTreeMap<Box<[u8]>, Box<[u8]>>,
    pending: Option<BTreeMap<Box<[u8]>, Box<[u8]>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a ballot directly into the committed state, bypassing batches.
    pub fn insert_committed(&mut self, nullifier: &[u8], ballot: &[u8]) {
        self.committed.insert(nullifier.into(), ballot.into());
    }

    /// The number of committed entries.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns `true` if no ballot has been committed.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

impl BallotStore for MemoryStore {
    type Error = MemoryStoreError;

    fn start_batch(&mut self) -> Result<(), Self::Error> {
        if self.pending.is_some() {
            return Err(MemoryStoreError::BatchAlreadyOpen);
        }
        self.pending = Some(BTreeMap::new());
        Ok(())
    }

    fn get(&self, nullifier: &[u8]) -> Result<Option<Box<[u8]>>, Self::Error> {
        let pending = self.pending.as_ref().and_then(|pending| pending.get(nullifier));
        Ok(pending.or_else(|| self.committed.get(nullifier)).cloned())
    }

    fn put(&mut self, nullifier: &[u8], ballot: &[u8]) -> Result<(), Self::Error> {
        let pending = self.pending.as_mut().ok_or(MemoryStoreError::NoOpenBatch)?;
        pending.insert(nullifier.into(), ballot.into());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        let pending = self.pending.take().ok_or(MemoryStoreError::NoOpenBatch)?;
        self.committed.extend(pending);
        Ok(())
    }

    fn discard(&mut self) {
        self.pending = None;
    }
}

//! Homomorphic aggregation of votes into batches.

mod store;
mod vote;

use derive_where::derive_where;
use tracing::{debug, warn};

use crate::{config::TallyConfig, elgamal::Ciphertext, error::Error, params::SchemeParams};

pub use store::{BallotStore, MemoryStore, MemoryStoreError};
pub use vote::Vote;

/// The votes accepted into one batch, with their running homomorphic sums.
#[derive_where(Clone, Debug)]
pub struct Batch<P: SchemeParams> {
    votes: Vec<Vote<P>>,
    ballot_sum: Ciphertext<P>,
    ballot_count: usize,
    overwrite_sum: Ciphertext<P>,
    overwrite_count: usize,
}

impl<P: SchemeParams> Batch<P> {
    fn new() -> Self {
        Self {
            votes: Vec::new(),
            ballot_sum: Ciphertext::zero(),
            ballot_count: 0,
            overwrite_sum: Ciphertext::zero(),
            overwrite_count: 0,
        }
    }

    /// The accepted votes, in the order they were added.
    pub fn votes(&self) -> &[Vote<P>] {
        &self.votes
    }

    /// The sum of all ballots accepted into the batch.
    pub fn ballot_sum(&self) -> &Ciphertext<P> {
        &self.ballot_sum
    }

    /// The number of ballots added to the batch.
    pub fn ballot_count(&self) -> usize {
        self.ballot_count
    }

    /// The sum of the previously stored ballots that votes in this batch replaced.
    /// It has to be subtracted from the final results during reconciliation.
    pub fn overwrite_sum(&self) -> &Ciphertext<P> {
        &self.overwrite_sum
    }

    /// The number of previously stored ballots that were replaced.
    pub fn overwrite_count(&self) -> usize {
        self.overwrite_count
    }
}

/// Owns the ballot store and at most one open batch.
///
/// Mutation goes through `&mut self`, so a batch has exactly one writer;
/// sharing a `State` between threads requires external synchronization.
#[derive(Debug)]
pub struct State<P: SchemeParams, S: BallotStore> {
    store: S,
    vote_batch_size: usize,
    batch: Option<Batch<P>>,
}

fn store_error(err: impl core::fmt::Display) -> Error {
    Error::Store(err.to_string())
}

impl<P: SchemeParams, S: BallotStore> State<P, S> {
    /// Creates a state with no open batch.
    pub fn new(store: S, vote_batch_size: usize) -> Self {
        Self {
            store,
            vote_batch_size,
            batch: None,
        }
    }

    /// Creates a state using the batch size from a validated configuration.
    pub fn from_config(store: S, config: &TallyConfig) -> Result<Self, Error> {
        config.validate::<P>()?;
        Ok(Self::new(store, config.vote_batch_size))
    }

    /// The underlying ballot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The maximum number of votes per batch.
    pub fn vote_batch_size(&self) -> usize {
        self.vote_batch_size
    }

    /// The currently open batch, if any.
    pub fn batch(&self) -> Option<&Batch<P>> {
        self.batch.as_ref()
    }

    /// Opens a new batch (and the corresponding store write batch).
    pub fn start_batch(&mut self) -> Result<(), Error> {
        if self.batch.is_some() {
            return Err(Error::BatchAlreadyOpen);
        }
        self.store.start_batch().map_err(store_error)?;
        self.batch = Some(Batch::new());
        Ok(())
    }

    /// Adds a vote to the open batch.
    ///
    /// If the nullifier already has a stored ballot, the vote is an overwrite:
    /// the old ballot is added to the overwrite sum so it can be removed from the results later.
    /// On error the batch is left exactly as it was before the call.
    pub fn add_vote(&mut self, vote: Vote<P>) -> Result<(), Error> {
        let batch = self.batch.as_mut().ok_or(Error::BatchNotOpen)?;
        if batch.votes.len() >= self.vote_batch_size {
            return Err(Error::BatchFull {
                capacity: self.vote_batch_size,
            });
        }

        let overwritten = match self.store.get(&vote.nullifier).map_err(store_error)? {
            Some(stored) => Some(
                Ciphertext::<P>::try_from_bytes(&stored)
                    .map_err(|err| Error::CorruptStoredBallot(err.to_string()))?,
            ),
            None => None,
        };

        self.store
            .put(&vote.nullifier, &vote.ballot.to_bytes())
            .map_err(store_error)?;

        if let Some(old_ballot) = overwritten {
            warn!("Vote overwrite for nullifier {}", hex::encode(&vote.nullifier));
            batch.overwrite_sum += &old_ballot;
            batch.overwrite_count += 1;
        }

        batch.ballot_sum += &vote.ballot;
        batch.ballot_count += 1;
        batch.votes.push(vote);

        debug!(
            "Batch now holds {} votes ({} overwrites)",
            batch.ballot_count, batch.overwrite_count
        );
        Ok(())
    }

    /// Commits the store write batch and returns the closed batch.
    pub fn commit_batch(&mut self) -> Result<Batch<P>, Error> {
        if self.batch.is_none() {
            return Err(Error::BatchNotOpen);
        }
        self.store.commit().map_err(store_error)?;
        self.batch.take().ok_or(Error::BatchNotOpen)
    }

    /// Discards the store write batch and returns the abandoned batch.
    pub fn abort_batch(&mut self) -> Result<Batch<P>, Error> {
        let batch = self.batch.take().ok_or(Error::BatchNotOpen)?;
        self.store.discard();
        Ok(batch)
    }
}

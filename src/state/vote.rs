use crypto_bigint::U256;
use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

use crate::{elgamal::Ciphertext, params::SchemeParams};

/// A validated vote carrying a homomorphic ballot.
///
/// The proofs of ballot validity and census membership are checked before a vote
/// reaches this crate; here it is only aggregated.
#[derive_where(Clone, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Vote<P: SchemeParams> {
    /// Unique per voter and process. A repeated nullifier replaces the earlier vote.
    #[serde(with = "SliceLike::<Hex>")]
    pub nullifier: Box<[u8]>,
    /// The encrypted ballot.
    pub ballot: Ciphertext<P>,
    /// The voter's address.
    #[serde(with = "SliceLike::<Hex>")]
    pub address: Box<[u8]>,
    /// The vote commitment.
    pub commitment: U256,
}

impl<P: SchemeParams> Vote<P> {
    /// Creates a vote with a zero commitment.
    pub fn new(nullifier: impl Into<Box<[u8]>>, ballot: Ciphertext<P>, address: impl Into<Box<[u8]>>) -> Self {
        Self {
            nullifier: nullifier.into(),
            ballot,
            address: address.into(),
            commitment: U256::ZERO,
        }
    }

    /// Sets the vote commitment.
    pub fn with_commitment(self, commitment: U256) -> Self {
        Self { commitment, ..self }
    }
}

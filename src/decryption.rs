//! Threshold decryption of an aggregated ballot.
//!
//! Each participant holds a Shamir share of the election secret key and publishes
//! a partial decryption `share * C1`. Any quorum of partial decryptions is combined with
//! Lagrange coefficients at `x = 0` to strip the mask from `C2`, leaving `M = message * G`,
//! from which the message is recovered with a [`crate::dlog`] search.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    curve::{Point, Scalar},
    dlog::{self, DiscreteLogConfig},
    elgamal::Ciphertext,
    error::Error,
    params::SchemeParams,
    tools::Secret,
};

/// The Shamir evaluation point of a participant. Always non-zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ShareId(u64);

impl ShareId {
    /// Creates a share ID. Zero is rejected since the secret lives at `x = 0`.
    pub fn new(id: u64) -> Result<Self, Error> {
        if id == 0 {
            return Err(Error::ZeroShareId);
        }
        Ok(Self(id))
    }

    /// Returns the evaluation point as an integer.
    pub fn get(&self) -> u64 {
        self.0
    }

    fn to_scalar<P: SchemeParams>(self) -> Scalar<P> {
        Scalar::from(self.0)
    }
}

impl TryFrom<u64> for ShareId {
    type Error = Error;
    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ShareId> for u64 {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

impl core::fmt::Display for ShareId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decryption participant holding a share of the election secret key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "Secret<Scalar<P>>: Serialize"))]
#[serde(bound(deserialize = "Secret<Scalar<P>>: for<'x> Deserialize<'x>"))]
pub struct Participant<P: SchemeParams> {
    id: ShareId,
    private_share: Secret<Scalar<P>>,
}

impl<P: SchemeParams> Participant<P> {
    /// Creates a participant from its ID and secret key share.
    pub fn new(id: ShareId, private_share: Scalar<P>) -> Self {
        Self {
            id,
            private_share: Secret::init_with(|| private_share),
        }
    }

    pub(crate) fn from_secret(id: ShareId, private_share: Secret<Scalar<P>>) -> Self {
        Self { id, private_share }
    }

    /// The participant's evaluation point.
    pub fn id(&self) -> ShareId {
        self.id
    }

    /// Returns `share * G`, the public counterpart of the key share.
    pub fn public_share(&self) -> Point<P> {
        self.private_share.mul_by_generator()
    }

    /// Returns `share * C1`.
    pub fn compute_partial_decryption(&self, c1: &Point<P>) -> Point<P> {
        let partial = c1 * &self.private_share;
        debug!("Participant {} computed partial decryption {}", self.id, partial);
        partial
    }
}

/// Computes the Lagrange coefficients at `x = 0` for the given evaluation points:
/// `lambda_i = prod_{j != i} (-j) * (prod_{j != i} (i - j))^{-1} mod N`.
///
/// The positions in `ids` are compared, not their values, so a repeated ID produces
/// a zero denominator and fails with [`Error::NoModularInverse`].
pub fn lagrange_coefficients<P: SchemeParams>(ids: &[ShareId]) -> Result<BTreeMap<ShareId, Scalar<P>>, Error> {
    if ids.is_empty() {
        return Err(Error::EmptyParticipantSet);
    }

    let mut coefficients = BTreeMap::new();
    for (position, id) in ids.iter().enumerate() {
        let xi = id.to_scalar::<P>();
        let mut numerator = Scalar::<P>::ONE;
        let mut denominator = Scalar::<P>::ONE;
        for (other_position, other) in ids.iter().enumerate() {
            if position == other_position {
                continue;
            }
            let xj = other.to_scalar::<P>();
            numerator = numerator * -xj;
            denominator = denominator * (xi - xj);
        }
        let inverse = denominator.invert().ok_or(Error::NoModularInverse)?;
        coefficients.insert(*id, numerator * inverse);
    }

    Ok(coefficients)
}

/// Removes the key mask from `c2`, returning the message point `M = C2 - sum(lambda_i * s_i)`.
///
/// `partials` must contain a partial decryption for every ID in `ids`; extra entries are ignored.
pub fn combine_partial_decryptions<P: SchemeParams>(
    c2: &Point<P>,
    partials: &BTreeMap<ShareId, Point<P>>,
    ids: &[ShareId],
) -> Result<Point<P>, Error> {
    let coefficients = lagrange_coefficients::<P>(ids)?;

    let mut mask = Point::identity();
    for (id, coefficient) in coefficients.iter() {
        let partial = partials
            .get(id)
            .ok_or(Error::MissingPartialDecryption(id.get()))?;
        let weighted = partial * coefficient;
        debug!("Participant {id}: coefficient {coefficient:?}, weighted partial decryption {weighted}");
        mask += &weighted;
    }

    let message = *c2 - mask;
    debug!("Combined {} partial decryptions into {}", ids.len(), message);
    Ok(message)
}

/// Combines the partial decryptions and recovers the plaintext with a discrete log search.
pub fn combine<P: SchemeParams>(
    c2: &Point<P>,
    partials: &BTreeMap<ShareId, Point<P>>,
    ids: &[ShareId],
    config: &DiscreteLogConfig,
) -> Result<u64, Error> {
    let message = combine_partial_decryptions(c2, partials, ids)?;
    dlog::solve(&message, config)
}

/// Decrypts a whole ciphertext given partial decryptions of its `c1` component.
pub fn decrypt<P: SchemeParams>(
    ciphertext: &Ciphertext<P>,
    partials: &BTreeMap<ShareId, Point<P>>,
    ids: &[ShareId],
    config: &DiscreteLogConfig,
) -> Result<u64, Error> {
    combine(&ciphertext.c2, partials, ids, config)
}

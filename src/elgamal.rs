//! Additive (exponential) ElGamal over the curve group.
//!
//! A message `m` is encoded as the point `m * G`, so adding ciphertexts adds the plaintexts.
//! Decryption therefore yields `m * G`, and recovering `m` itself requires a discrete log
//! (see [`crate::dlog`]).

use core::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use derive_where::derive_where;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::{
    curve::{Point, Scalar},
    error::Error,
    params::SchemeParams,
};

/// The combined public key the ballots are encrypted to.
#[derive_where(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKey<P: SchemeParams>(Point<P>);

impl<P: SchemeParams> PublicKey<P> {
    /// Wraps the election public key `sk * G`.
    pub fn new(point: Point<P>) -> Self {
        Self(point)
    }

    /// Encrypts `message` with fresh randomness.
    pub fn encrypt(&self, rng: &mut impl CryptoRngCore, message: u64) -> Ciphertext<P> {
        let r = Scalar::random(rng);
        self.encrypt_with_randomness(message, &r)
    }

    /// Encrypts `message` with the given randomness `r`: `(r * G, m * G + r * PK)`.
    pub fn encrypt_with_randomness(&self, message: u64, r: &Scalar<P>) -> Ciphertext<P> {
        Ciphertext {
            c1: r.mul_by_generator(),
            c2: Scalar::from(message).mul_by_generator() + &self.0 * r,
        }
    }
}

/// An additive ElGamal ciphertext `(C1, C2)`.
#[derive_where(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Ciphertext<P: SchemeParams> {
    /// `r * G`
    pub c1: Point<P>,
    /// `m * G + r * PK`
    pub c2: Point<P>,
}

impl<P: SchemeParams> Ciphertext<P> {
    /// Creates a ciphertext from its components.
    pub fn new(c1: Point<P>, c2: Point<P>) -> Self {
        Self { c1, c2 }
    }

    /// The neutral ciphertext (an encryption of zero with zero randomness).
    pub fn zero() -> Self {
        Self::new(Point::identity(), Point::identity())
    }

    /// Encodes the ciphertext as `len(C1) || C1 || len(C2) || C2`,
    /// with both points in compressed form.
    pub fn to_bytes(&self) -> Box<[u8]> {
        let c1 = self.c1.to_compressed_bytes();
        let c2 = self.c2.to_compressed_bytes();
        let mut bytes = Vec::with_capacity(c1.len() + c2.len() + 2);
        for point in [c1, c2] {
            // A compressed point is at most one tag byte plus the field size,
            // which is far below 256 for any supported curve.
            bytes.push(point.len() as u8);
            bytes.extend_from_slice(&point);
        }
        bytes.into()
    }

    /// Inverse of [`to_bytes`](Self::to_bytes).
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let (c1, rest) = split_point::<P>(bytes)?;
        let (c2, rest) = split_point::<P>(rest)?;
        if !rest.is_empty() {
            return Err(Error::InvalidEncoding(format!(
                "{} trailing bytes after the ciphertext",
                rest.len()
            )));
        }
        Ok(Self::new(c1, c2))
    }
}

fn split_point<P: SchemeParams>(bytes: &[u8]) -> Result<(Point<P>, &[u8]), Error> {
    let (len, rest) = bytes
        .split_first()
        .ok_or_else(|| Error::InvalidEncoding("unexpected end of ciphertext".into()))?;
    let len = usize::from(*len);
    if rest.len() < len {
        return Err(Error::InvalidEncoding(format!(
            "point length {len} exceeds the remaining {} bytes",
            rest.len()
        )));
    }
    let (point, rest) = rest.split_at(len);
    let point = Point::try_from_compressed_bytes(point).map_err(Error::InvalidEncoding)?;
    Ok((point, rest))
}

impl<P: SchemeParams> Default for Ciphertext<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: SchemeParams> Add<Ciphertext<P>> for Ciphertext<P> {
    type Output = Ciphertext<P>;

    fn add(self, other: Ciphertext<P>) -> Ciphertext<P> {
        Ciphertext {
            c1: self.c1 + other.c1,
            c2: self.c2 + other.c2,
        }
    }
}

impl<P: SchemeParams> Add<&Ciphertext<P>> for &Ciphertext<P> {
    type Output = Ciphertext<P>;

    fn add(self, other: &Ciphertext<P>) -> Ciphertext<P> {
        *self + *other
    }
}

impl<P: SchemeParams> AddAssign<&Ciphertext<P>> for Ciphertext<P> {
    fn add_assign(&mut self, other: &Ciphertext<P>) {
        self.c1 += &other.c1;
        self.c2 += &other.c2;
    }
}

impl<P: SchemeParams> Sum for Ciphertext<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or_else(Self::zero)
    }
}

impl<'a, P: SchemeParams> Sum<&'a Self> for Ciphertext<P> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

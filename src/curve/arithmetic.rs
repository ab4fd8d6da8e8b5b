use core::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use derive_where::derive_where;
use elliptic_curve::{
    ff::{Field, PrimeField},
    group::Group,
    ops::MulByGenerator,
    NonZeroScalar, ProjectivePoint,
};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_encoded_bytes::{Hex, SliceLike};
use zeroize::Zeroize;

use crate::params::SchemeParams;

pub(crate) type BackendScalar<P> = elliptic_curve::Scalar<<P as SchemeParams>::Curve>;
pub(crate) type BackendPoint<P> = ProjectivePoint<<P as SchemeParams>::Curve>;

/// An element of the scalar field of the curve, that is an integer modulo the group order `N`.
#[derive_where(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Scalar<P: SchemeParams>(BackendScalar<P>);

impl<P: SchemeParams> Scalar<P> {
    /// The additive identity.
    pub const ZERO: Self = Self(<BackendScalar<P> as Field>::ZERO);
    /// The multiplicative identity.
    pub const ONE: Self = Self(<BackendScalar<P> as Field>::ONE);

    /// Returns a uniformly random scalar.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self(BackendScalar::<P>::random(&mut *rng))
    }

    /// Returns a uniformly random non-zero scalar.
    pub fn random_nonzero(rng: &mut impl CryptoRngCore) -> Self {
        Self(*NonZeroScalar::<P::Curve>::random(&mut *rng).as_ref())
    }

    /// Returns `self * G`, where `G` is the curve generator.
    pub fn mul_by_generator(&self) -> Point<P> {
        Point(BackendPoint::<P>::mul_by_generator(&self.0))
    }

    /// Invert the [`Scalar`]. Returns [`None`] if the scalar is zero.
    pub fn invert(&self) -> Option<Self> {
        // Unwrap CtOption into Option
        Option::from(self.0.invert()).map(Self)
    }

    /// The canonical byte representation of the scalar (as defined by the backend).
    pub fn to_bytes(&self) -> Box<[u8]> {
        self.0.to_repr().as_ref().into()
    }

    /// Deserializes a scalar from its big-endian representation.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let mut repr = <BackendScalar<P> as PrimeField>::Repr::default();
        if repr.as_ref().len() != bytes.len() {
            return Err(format!(
                "Invalid length of a curve scalar: expected {}, got {}",
                repr.as_ref().len(),
                bytes.len()
            ));
        }
        repr.as_mut().copy_from_slice(bytes);
        Option::from(BackendScalar::<P>::from_repr(repr))
            .map(Self)
            .ok_or_else(|| "Invalid curve scalar representation".into())
    }

}

impl<P: SchemeParams> From<u64> for Scalar<P> {
    fn from(val: u64) -> Self {
        Self(BackendScalar::<P>::from(val))
    }
}

impl<P: SchemeParams> Zeroize for Scalar<P> {
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}

impl<'a, P: SchemeParams> TryFrom<&'a [u8]> for Scalar<P> {
    type Error = String;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_bytes(val)
    }
}

impl<P: SchemeParams> Serialize for Scalar<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.to_bytes(), serializer)
    }
}

impl<'de, P: SchemeParams> Deserialize<'de> for Scalar<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

impl<P: SchemeParams> Neg for Scalar<P> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<P: SchemeParams> Add<Scalar<P>> for Scalar<P> {
    type Output = Scalar<P>;

    fn add(self, other: Scalar<P>) -> Scalar<P> {
        Scalar(self.0 + other.0)
    }
}

impl<P: SchemeParams> Add<&Scalar<P>> for &Scalar<P> {
    type Output = Scalar<P>;

    fn add(self, other: &Scalar<P>) -> Scalar<P> {
        Scalar(self.0 + other.0)
    }
}

impl<P: SchemeParams> Sub<Scalar<P>> for Scalar<P> {
    type Output = Scalar<P>;

    fn sub(self, other: Scalar<P>) -> Scalar<P> {
        Scalar(self.0 - other.0)
    }
}

impl<P: SchemeParams> Sub<&Scalar<P>> for &Scalar<P> {
    type Output = Scalar<P>;

    fn sub(self, other: &Scalar<P>) -> Scalar<P> {
        Scalar(self.0 - other.0)
    }
}

impl<P: SchemeParams> Mul<Scalar<P>> for Scalar<P> {
    type Output = Scalar<P>;

    fn mul(self, other: Scalar<P>) -> Scalar<P> {
        Scalar(self.0 * other.0)
    }
}

impl<P: SchemeParams> Mul<&Scalar<P>> for &Scalar<P> {
    type Output = Scalar<P>;

    fn mul(self, other: &Scalar<P>) -> Scalar<P> {
        Scalar(self.0 * other.0)
    }
}

impl<P: SchemeParams> Sum for Scalar<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or(Self::ZERO)
    }
}

/// A point on the curve.
///
/// Equality compares the normalized (affine) coordinates,
/// so two differently represented copies of the same point are always equal.
#[derive_where(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point<P: SchemeParams>(BackendPoint<P>);

impl<P: SchemeParams> Point<P> {
    /// The neutral element of the group.
    pub fn identity() -> Self {
        Self(BackendPoint::<P>::identity())
    }

    /// The fixed base point of the group.
    pub fn generator() -> Self {
        Self(BackendPoint::<P>::generator())
    }

    /// Returns `true` if this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    /// Canonical SEC1 compressed encoding.
    ///
    /// Note that the identity encodes into a single zero byte,
    /// so the length of the encoding is not constant.
    pub fn to_compressed_bytes(&self) -> Box<[u8]> {
        P::compress_point(&self.0)
    }

    /// Deserializes a point from its SEC1 compressed encoding.
    pub fn try_from_compressed_bytes(bytes: &[u8]) -> Result<Self, String> {
        P::decompress_point(bytes)
            .map(Self)
            .ok_or_else(|| "Invalid curve point representation".into())
    }

    /// A deterministic string representation, distinct for distinct points.
    /// Suitable as a hash map key.
    pub fn to_canonical_string(&self) -> String {
        hex::encode(self.to_compressed_bytes())
    }
}

impl<P: SchemeParams> Default for Point<P> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: SchemeParams> fmt::Display for Point<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl<'a, P: SchemeParams> TryFrom<&'a [u8]> for Point<P> {
    type Error = String;
    fn try_from(val: &'a [u8]) -> Result<Self, Self::Error> {
        Self::try_from_compressed_bytes(val)
    }
}

impl<P: SchemeParams> Serialize for Point<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SliceLike::<Hex>::serialize(&self.to_compressed_bytes(), serializer)
    }
}

impl<'de, P: SchemeParams> Deserialize<'de> for Point<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SliceLike::<Hex>::deserialize(deserializer)
    }
}

impl<P: SchemeParams> Neg for Point<P> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl<P: SchemeParams> Add<Point<P>> for Point<P> {
    type Output = Point<P>;

    fn add(self, other: Point<P>) -> Point<P> {
        Point(self.0 + other.0)
    }
}

impl<P: SchemeParams> Add<&Point<P>> for &Point<P> {
    type Output = Point<P>;

    fn add(self, other: &Point<P>) -> Point<P> {
        Point(self.0 + other.0)
    }
}

impl<P: SchemeParams> AddAssign<&Point<P>> for Point<P> {
    fn add_assign(&mut self, other: &Point<P>) {
        self.0 += other.0;
    }
}

impl<P: SchemeParams> Sub<Point<P>> for Point<P> {
    type Output = Point<P>;

    fn sub(self, other: Point<P>) -> Point<P> {
        Point(self.0 - other.0)
    }
}

impl<P: SchemeParams> SubAssign<&Point<P>> for Point<P> {
    fn sub_assign(&mut self, other: &Point<P>) {
        self.0 -= other.0;
    }
}

impl<P: SchemeParams> Mul<Scalar<P>> for Point<P> {
    type Output = Point<P>;

    fn mul(self, other: Scalar<P>) -> Point<P> {
        Point(self.0 * other.0)
    }
}

impl<P: SchemeParams> Mul<&Scalar<P>> for &Point<P> {
    type Output = Point<P>;

    fn mul(self, other: &Scalar<P>) -> Point<P> {
        Point(self.0 * other.0)
    }
}

impl<P: SchemeParams> Sum for Point<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or_else(Self::identity)
    }
}

impl<'a, P: SchemeParams> Sum<&'a Self> for Point<P> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

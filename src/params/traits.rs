use core::fmt::Debug;

use elliptic_curve::{
    group::Curve as _,
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, PrimeCurve, ProjectivePoint,
};

/// Selects the prime-order curve backend everything else in the crate is generic over.
///
/// The point encoding is routed through the trait (rather than expressed as bounds on it)
/// so that generic code only ever needs `P: SchemeParams`.
pub trait SchemeParams: 'static + Debug + Clone + Copy + Send + Sync + PartialEq + Eq {
    /// The elliptic curve (of prime order) used.
    type Curve: CurveArithmetic + PrimeCurve;

    /// Human-readable curve name, used in logs.
    const CURVE_NAME: &'static str;

    /// Canonical SEC1 compressed encoding of an (affine-normalized) point.
    fn compress_point(point: &ProjectivePoint<Self::Curve>) -> Box<[u8]>;

    /// Inverse of [`compress_point`](Self::compress_point).
    /// Returns `None` if the bytes do not encode a point on the curve.
    fn decompress_point(bytes: &[u8]) -> Option<ProjectivePoint<Self::Curve>>;
}

pub(crate) fn sec1_compress<C>(point: &ProjectivePoint<C>) -> Box<[u8]>
where
    C: CurveArithmetic,
    AffinePoint<C>: ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    point.to_affine().to_encoded_point(true).as_bytes().into()
}

pub(crate) fn sec1_decompress<C>(bytes: &[u8]) -> Option<ProjectivePoint<C>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = EncodedPoint::<C>::from_bytes(bytes).ok()?;
    // Unwrap CtOption into Option
    let affine: Option<AffinePoint<C>> = AffinePoint::<C>::from_encoded_point(&encoded).into();
    affine.map(ProjectivePoint::<C>::from)
}

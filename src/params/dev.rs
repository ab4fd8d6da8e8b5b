//! Parameters intended for testing, scaled down to a small curve order.

use elliptic_curve::ProjectivePoint;
use serde::{Deserialize, Serialize};
use tiny_curve::TinyCurve32;

use super::traits::{sec1_compress, sec1_decompress, SchemeParams};

/// Scheme parameters **for testing purposes only**.
/// Security is weakened to allow for faster execution.
///
/// Note that the group order is around `2^32`, so the discrete log search bound
/// has to stay small (see [`DiscreteLogConfig::validate`](crate::DiscreteLogConfig::validate)).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TestParams;

impl SchemeParams for TestParams {
    type Curve = TinyCurve32;

    const CURVE_NAME: &'static str = "tiny-curve-32";

    fn compress_point(point: &ProjectivePoint<Self::Curve>) -> Box<[u8]> {
        sec1_compress::<Self::Curve>(point)
    }

    fn decompress_point(bytes: &[u8]) -> Option<ProjectivePoint<Self::Curve>> {
        sec1_decompress::<Self::Curve>(bytes)
    }
}

//! Scheme parameters for the Secp256k1 curve (as implemented by [`k256`](::k256)).

use elliptic_curve::ProjectivePoint;
use serde::{Deserialize, Serialize};

use super::traits::{sec1_compress, sec1_decompress, SchemeParams};

/// Production parameters over Secp256k1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ProductionParams;

impl SchemeParams for ProductionParams {
    type Curve = ::k256::Secp256k1;

    const CURVE_NAME: &'static str = "secp256k1";

    fn compress_point(point: &ProjectivePoint<Self::Curve>) -> Box<[u8]> {
        sec1_compress::<Self::Curve>(point)
    }

    fn decompress_point(bytes: &[u8]) -> Option<ProjectivePoint<Self::Curve>> {
        sec1_decompress::<Self::Curve>(bytes)
    }
}

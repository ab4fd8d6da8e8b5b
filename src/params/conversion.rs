use crypto_bigint::U1024;
use elliptic_curve::{bigint::Encoding, Curve};

use super::traits::SchemeParams;

const ORDER_REPR_BYTES: usize = 128;

/// The curve order as a `crypto-bigint` integer.
pub(crate) fn curve_order<P: SchemeParams>() -> U1024 {
    // The current version of `elliptic_curve` uses `crypto-bigint` 0.5,
    // and the rest of the crate uses 0.6. This function converts the integer between the two.
    let order_repr = P::Curve::ORDER.to_be_bytes();
    let order_repr = order_repr.as_ref();
    let mut uint_repr = [0u8; ORDER_REPR_BYTES];
    let offset = ORDER_REPR_BYTES.saturating_sub(order_repr.len());
    for (dst, src) in uint_repr.iter_mut().skip(offset).zip(order_repr.iter()) {
        *dst = *src;
    }
    U1024::from_be_slice(&uint_repr)
}

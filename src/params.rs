mod conversion;
mod traits;

#[cfg(feature = "k256")]
pub mod k256;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

pub use traits::SchemeParams;

pub(crate) use conversion::curve_order;

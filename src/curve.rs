//! This module is an adapter to the ECC backend.
//! `elliptic_curves` has a somewhat unstable API,
//! and we isolate all the related logic here.
//!
//! Points are kept in projective coordinates internally;
//! everything observable from outside (equality, encodings, canonical strings)
//! goes through the affine normalization.

mod arithmetic;
mod shared;

pub use arithmetic::{Point, Scalar};
pub use shared::SharedPoint;

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

/*!
## Features

`k256`: Secp256k1 parameters using [`k256`](`::k256`) crate. See the [`k256`] module. Enabled by default.

`dev`: Non-secure development parameters using [`tiny-curve`](`::tiny_curve`) crate. See the [`dev`] module.
*/

mod config;
mod curve;
mod dealer;
mod decryption;
mod dlog;
mod elgamal;
mod error;
mod params;
mod state;
mod tools;

#[cfg(feature = "k256")]
pub use params::k256;

#[cfg(any(test, feature = "dev"))]
pub use params::dev;

pub use config::{TallyConfig, DEFAULT_VOTE_BATCH_SIZE};
pub use curve::{Point, Scalar, SharedPoint};
pub use dealer::{make_key_shares, split_secret};
pub use decryption::{
    combine, combine_partial_decryptions, decrypt, lagrange_coefficients, Participant, ShareId,
};
pub use dlog::{
    solve as solve_discrete_log, solve_brute_force, BruteForceOutcome, DiscreteLogConfig, DiscreteLogStrategy,
    DEFAULT_WORKERS, WORLD_SCALE_MAX_MESSAGE,
};
pub use elgamal::{Ciphertext, PublicKey};
pub use error::Error;
pub use params::SchemeParams;
pub use state::{Batch, BallotStore, MemoryStore, MemoryStoreError, State, Vote};

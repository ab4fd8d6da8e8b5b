use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    curve::{Point, Scalar},
    error::Error,
    params::SchemeParams,
};

/// Returns `ceil(sqrt(n))`.
fn ceil_sqrt(n: u64) -> u64 {
    // The float estimate is off by at most one in either direction for 64-bit inputs.
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |square| square > n) && root > 0 {
        root -= 1;
    }
    while root.checked_mul(root).map_or(false, |square| square < n) {
        root += 1;
    }
    root
}

/// The number of baby steps (and the giant step size) for a given search bound.
pub(crate) fn step_count(max_message: u64) -> u64 {
    ceil_sqrt(max_message) + 1
}

/// Builds the table mapping `j * G` to `j` for `j` in `[0, m)`.
fn baby_steps<P: SchemeParams>(m: u64) -> Result<HashMap<String, u64>, Error> {
    let capacity = usize::try_from(m)
        .map_err(|_| Error::InvalidConfig(format!("{m} baby steps do not fit in memory")))?;
    let mut table = HashMap::with_capacity(capacity);

    let generator = Point::<P>::generator();
    let mut current = Point::<P>::identity();
    for j in 0..m {
        if let Some(first) = table.insert(current.to_canonical_string(), j) {
            return Err(Error::BabyStepCollision { first, second: j });
        }
        current += &generator;
    }
    Ok(table)
}

pub(crate) fn solve<P: SchemeParams>(target: &Point<P>, max_message: u64) -> Result<u64, Error> {
    let m = step_count(max_message);
    debug!("Baby-step giant-step search on {} with {m} steps", P::CURVE_NAME);

    let table = baby_steps::<P>(m)?;
    let giant_step = -Scalar::<P>::from(m).mul_by_generator();

    let mut current = *target;
    for i in 0..=m {
        if let Some(&j) = table.get(&current.to_canonical_string()) {
            trace!("Giant step {i} matched baby step {j}");
            // Multiples of `G` below the group order are distinct, so a hit past the bound
            // means the target is out of range rather than a second candidate.
            return i
                .checked_mul(m)
                .and_then(|giant| giant.checked_add(j))
                .filter(|&value| value <= max_message)
                .ok_or(Error::DiscreteLogUnsolved);
        }
        current += &giant_step;
    }

    Err(Error::DiscreteLogUnsolved)
}

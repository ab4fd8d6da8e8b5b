use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::{prelude::*, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::{
    curve::{Point, Scalar},
    error::Error,
    params::SchemeParams,
};

/// The result of a successful brute-force search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BruteForceOutcome {
    /// The recovered message.
    pub value: u64,
    /// The number of candidates compared against the target, summed over all workers.
    pub scanned: u64,
}

/// Splits `[0, max_message]` into at most `workers` contiguous inclusive ranges.
/// The last range absorbs the remainder.
fn partition(max_message: u64, workers: usize) -> Vec<(u64, u64)> {
    let total = u128::from(max_message) + 1;
    let count = u128::try_from(workers).unwrap_or(u128::MAX).clamp(1, total);
    let width = total / count;

    (0..count)
        .map(|index| {
            let start = index * width;
            let end = if index + 1 == count {
                total - 1
            } else {
                start + width - 1
            };
            // Both bounds are at most `max_message`, so they fit in `u64`.
            (start as u64, end as u64)
        })
        .collect()
}

/// Scans `[start, end]` until the target is found, the range is exhausted,
/// or another worker signals cancellation. Adds the number of candidates compared to `scanned`.
fn scan<P: SchemeParams>(
    target: &Point<P>,
    (start, end): (u64, u64),
    cancel: &AtomicBool,
    scanned: &AtomicU64,
) -> Option<u64> {
    let generator = Point::<P>::generator();
    let mut current = Scalar::<P>::from(start).mul_by_generator();
    let mut candidate = start;
    let mut steps = 0;
    trace!("Worker for [{start}, {end}] started");

    let found = loop {
        if cancel.load(Ordering::Relaxed) {
            trace!("Worker for [{start}, {end}] cancelled after {steps} steps");
            break None;
        }

        steps += 1;
        if current == *target {
            cancel.store(true, Ordering::Relaxed);
            break Some(candidate);
        }
        if candidate == end {
            trace!("Worker for [{start}, {end}] exhausted its range");
            break None;
        }

        current += &generator;
        candidate += 1;
    };

    scanned.fetch_add(steps, Ordering::Relaxed);
    found
}

pub(crate) fn solve<P: SchemeParams>(
    target: &Point<P>,
    max_message: u64,
    workers: usize,
) -> Result<BruteForceOutcome, Error> {
    let ranges = partition(max_message, workers);
    debug!("Brute-force search of [0, {max_message}] with {} workers", ranges.len());

    // One thread per range, so that every range is scanned concurrently
    // and a match in any of them cancels the rest.
    let pool = ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .thread_name(|index| format!("dlog-worker-{index}"))
        .build()
        .map_err(|err| Error::WorkerPool(err.to_string()))?;

    let cancel = AtomicBool::new(false);
    let scanned = AtomicU64::new(0);
    let found = pool.install(|| {
        ranges
            .into_par_iter()
            .with_max_len(1)
            .find_map_any(|range| scan(target, range, &cancel, &scanned))
    });

    let scanned = scanned.into_inner();
    debug!("Brute-force search compared {scanned} candidates");
    let value = found.ok_or(Error::DiscreteLogUnsolved)?;
    Ok(BruteForceOutcome { value, scanned })
}

use std::cmp;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::bit_vec::BitVec;
use crate::error::SieveError;
use crate::flags::CompositeFlags;
use crate::sieve::{floor_sqrt, try_primes_vec, Sieve};

/// 2^18 numbers per segment: 32 KiB of packed flags, which sits comfortably in L1/L2.
pub const DEFAULT_SEGMENT_LEN: usize = 1 << 18;

/// Segments struck per rayon thread before their primes are drained into the result.
const SEGMENTS_PER_THREAD: usize = 4;

/// All primes <= n, marking segments of the range on the rayon thread pool.
///
/// The origin [0, sqrt(n)] is sieved serially. Its primes are enough to strike every composite
/// in (sqrt(n), n], which is partitioned into contiguous segments of segment_len numbers. Each
/// segment owns its own flags, so no cell is ever written by two threads and marking needs no
/// synchronization. Segments are struck a batch at a time and drained in order into a single
/// result reserved up front, giving exactly the output of compute_primes(n).
///
///     use eratosthenes::{compute_primes, compute_primes_parallel};
///
///     assert_eq!(compute_primes(1000).unwrap(), compute_primes_parallel(1000, 64).unwrap());
pub fn compute_primes_parallel(n: i64, segment_len: usize) -> Result<Vec<u64>, SieveError> {
    if segment_len == 0 {
        return Err(SieveError::InvalidSegmentLength);
    }
    if n < 2 {
        return Ok(Vec::new());
    }
    let too_large = SieveError::BoundTooLarge { bound: n };
    let end = usize::try_from(n).map_err(|_| too_large.clone())?;
    let len = end.checked_add(1).ok_or(too_large)?;
    let mut primes = try_primes_vec(n, len)?;

    let origin_end = floor_sqrt(end);
    let origin_primes = Sieve::<BitVec>::new(origin_end as i64)?
        .primes()
        .map(|p| p as usize)
        .collect::<Vec<_>>();
    primes.extend(origin_primes.iter().map(|&p| p as u64));

    // end >= 2, so origin_end < end and there is at least one segment.
    let first_start = origin_end + 1;
    let segment_count = (end - first_start) / segment_len + 1;
    let batch_len = rayon::current_num_threads().max(1) * SEGMENTS_PER_THREAD;
    debug!(
        bound = n,
        origin_end,
        origin_primes = origin_primes.len(),
        segment_len,
        segment_count,
        "sieved origin"
    );

    let mut batch_start = 0;
    while batch_start < segment_count {
        let batch_end = cmp::min(batch_start.saturating_add(batch_len), segment_count);
        let segments = (batch_start..batch_end)
            .into_par_iter()
            .map(|index| {
                // index < segment_count, so this stays within [first_start, end].
                let segment_start = first_start + index * segment_len;
                let segment_end = cmp::min(segment_start.saturating_add(segment_len - 1), end);
                Segment::new(&origin_primes, segment_start, segment_end)
                    .map_err(|bytes| SieveError::Allocation { bound: n, bytes })
            })
            .collect::<Result<Vec<_>, _>>()?;
        for segment in &segments {
            segment.extend_primes(&mut primes);
        }
        batch_start = batch_end;
    }
    Ok(primes)
}

/// Flags for the numbers [segment_start, segment_end], struck by every origin prime.
struct Segment {
    segment_start: usize,
    sieve: BitVec,
}

impl Segment {
    /// Sieve a segment. On allocation failure, returns the number of bytes requested.
    fn new(
        origin_primes: &[usize],
        segment_start: usize,
        segment_end: usize,
    ) -> Result<Segment, usize> {
        let segment_length = segment_end - segment_start + 1;
        let sieve = BitVec::try_with_len(segment_length).map_err(|_| {
            let bytes = BitVec::bytes_for(segment_length);
            warn!(segment_start, segment_end, bytes, "segment allocation failed");
            bytes
        })?;
        trace!(segment_start, segment_end, "sieving segment");

        let mut segment = Segment {
            segment_start,
            sieve,
        };
        for &p in origin_primes {
            segment.strike_prime(p, segment_end);
        }
        Ok(segment)
    }

    /// Strike multiples of p in this segment, starting at p^2 or the first multiple inside it.
    fn strike_prime(&mut self, p: usize, segment_end: usize) {
        let first_multiple = match Segment::first_multiple(p, self.segment_start) {
            Some(first_multiple) => first_multiple,
            None => return,
        };
        // p <= sqrt(n), so p * p never overflows.
        let mut multiple = cmp::max(p * p, first_multiple);
        while multiple <= segment_end {
            self.sieve.mark_composite(multiple - self.segment_start);
            multiple = match multiple.checked_add(p) {
                Some(next) => next,
                None => break,
            };
        }
    }

    /// Smallest multiple of p that is >= n.
    fn first_multiple(p: usize, n: usize) -> Option<usize> {
        (n / p + (n % p != 0) as usize).checked_mul(p)
    }

    /// Every unstruck number in a segment is prime: segments lie above sqrt(n), and any even
    /// number there has already been struck by 2 unless the whole range is just [2, 3].
    fn extend_primes(&self, primes: &mut Vec<u64>) {
        let mut index = 0;
        while let Some(found) = self.sieve.find_clear(index) {
            primes.push((found + self.segment_start) as u64);
            index = found + 1;
        }
    }
}

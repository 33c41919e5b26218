use tracing::{debug, warn};

use crate::bit_vec::BitVec;
use crate::byte_vec::ByteVec;
use crate::error::SieveError;
use crate::flags::CompositeFlags;

/// Memory layout of the composite-flag array.
///
/// This is purely a performance trade-off: both layouts produce identical primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One bit per number. The default, and the only practical choice for bounds in the
    /// hundreds of millions.
    #[default]
    Packed,
    /// One byte per number. Simpler access, eight times the memory.
    Bytes,
}

/// All primes <= n, in ascending order, using packed composite flags.
///
/// Bounds below 2 (including negative bounds) have no primes and return an empty vector.
///
///     use eratosthenes::compute_primes;
///
///     assert_eq!(vec![2, 3, 5, 7], compute_primes(10).unwrap());
///     assert!(compute_primes(-5).unwrap().is_empty());
pub fn compute_primes(n: i64) -> Result<Vec<u64>, SieveError> {
    compute_primes_with(n, Layout::Packed)
}

/// All primes <= n, in ascending order, with the composite flags stored in the given layout.
pub fn compute_primes_with(n: i64, layout: Layout) -> Result<Vec<u64>, SieveError> {
    match layout {
        Layout::Packed => Sieve::<BitVec>::new(n)?.into_vec(),
        Layout::Bytes => Sieve::<ByteVec>::new(n)?.into_vec(),
    }
}

/// A completed sieve of Eratosthenes over [0, bound].
///
/// Construction does all the striking; afterwards the flags are read-only and the primes can be
/// walked with primes() or collected with into_vec().
pub struct Sieve<F: CompositeFlags> {
    bound: i64,
    flags: F,
}

impl<F: CompositeFlags> Sieve<F> {
    pub fn new(bound: i64) -> Result<Sieve<F>, SieveError> {
        let len = Sieve::<F>::flags_len(bound)?;
        let flags = F::try_with_len(len).map_err(|_| {
            let bytes = F::bytes_for(len);
            warn!(bound, bytes, "composite flag allocation failed");
            SieveError::Allocation { bound, bytes }
        })?;
        debug!(bound, bytes = F::bytes_for(len), "sieving");

        let mut sieve = Sieve { bound, flags };
        sieve.strike_composites();
        Ok(sieve)
    }

    pub fn bound(&self) -> i64 {
        self.bound
    }

    pub fn is_prime(&self, k: u64) -> bool {
        match usize::try_from(k) {
            Ok(k) => k >= 2 && k < self.flags.len() && !self.flags.is_composite(k),
            Err(_) => false,
        }
    }

    /// Iterate the primes in ascending order.
    pub fn primes(&self) -> Primes<'_, F> {
        Primes {
            flags: &self.flags,
            two_pending: self.bound >= 2,
            candidate: 3,
        }
    }

    /// Collect the primes, reporting allocation failure of the result rather than aborting.
    pub fn into_vec(self) -> Result<Vec<u64>, SieveError> {
        let mut primes = try_primes_vec(self.bound, self.flags.len())?;
        primes.extend(self.primes());
        Ok(primes)
    }

    /// Number of flags needed for [0, bound], or 0 when there is nothing to sieve.
    fn flags_len(bound: i64) -> Result<usize, SieveError> {
        if bound < 2 {
            return Ok(0);
        }
        usize::try_from(bound)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(SieveError::BoundTooLarge { bound })
    }

    /// For each i <= sqrt(n) still unstruck, strike i * j for j = i, i + 1, ... while i * j <= n.
    ///
    /// Starting j at i skips multiples already struck by smaller primes. The product is checked
    /// against n before it is used as an index, so no index ever exceeds n.
    fn strike_composites(&mut self) {
        let n = match self.flags.len().checked_sub(1) {
            Some(n) => n,
            None => return,
        };
        for i in 2..=floor_sqrt(n) {
            if self.flags.is_composite(i) {
                continue;
            }
            let mut j = i;
            while let Some(multiple) = i.checked_mul(j).filter(|&multiple| multiple <= n) {
                self.flags.mark_composite(multiple);
                j += 1;
            }
        }
    }
}

/// Ascending primes of a finished Sieve.
///
/// 2 is emitted first as an explicit special case; after that only odd candidates 3, 5, 7, ...
/// are ever reported.
pub struct Primes<'a, F: CompositeFlags> {
    flags: &'a F,
    two_pending: bool,
    candidate: usize,
}

impl<'a, F: CompositeFlags> Iterator for Primes<'a, F> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.two_pending {
            self.two_pending = false;
            return Some(2);
        }
        loop {
            let k = self.flags.find_clear(self.candidate)?;
            if k % 2 == 1 {
                self.candidate = k + 2;
                return Some(k as u64);
            }
            // Even numbers past 2 are never prime; resume from the next odd.
            self.candidate = k + 1;
        }
    }
}

/// floor(sqrt(n)), exact for every usize.
pub(crate) fn floor_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |square| square <= n) {
        root += 1;
    }
    root
}

/// An empty vector with room for every prime below len, so filling it never reallocates.
pub(crate) fn try_primes_vec(bound: i64, len: usize) -> Result<Vec<u64>, SieveError> {
    let capacity = prime_count_upper_bound(len);
    let mut primes = Vec::new();
    primes.try_reserve_exact(capacity).map_err(|_| {
        let bytes = capacity.saturating_mul(std::mem::size_of::<u64>());
        warn!(bound, bytes, "result allocation failed");
        SieveError::Allocation { bound, bytes }
    })?;
    Ok(primes)
}

/// Rosser and Schoenfeld: pi(x) < 1.25506 x / ln(x) for x > 1.
fn prime_count_upper_bound(len: usize) -> usize {
    if len < 3 {
        return len;
    }
    let x = (len - 1) as f64;
    (1.25506 * x / x.ln()) as usize + 1
}

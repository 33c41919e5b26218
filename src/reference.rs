//! Known prime counts, used to check sieve output.
//!
//! Values of pi(N) from https://oeis.org/A006880 plus the bound of the 500th prime.

/// The 500th prime. Sieving up to it yields exactly the first 500 primes.
pub const DEFAULT_BOUND: i64 = 3571;

/// (N, pi(N)) pairs in ascending order of N.
pub const PRIME_COUNTS: &[(i64, usize)] = &[
    (1, 0),
    (2, 1),
    (10, 4),
    (19, 8),
    (100, 25),
    (1_000, 168),
    (DEFAULT_BOUND, 500),
    (10_000, 1_229),
    (100_000, 9_592),
    (1_000_000, 78_498),
    (10_000_000, 664_579),
    (100_000_000, 5_761_455),
];

/// pi(n) if n appears in PRIME_COUNTS.
pub fn prime_count(n: i64) -> Option<usize> {
    PRIME_COUNTS
        .binary_search_by_key(&n, |&(bound, _)| bound)
        .ok()
        .map(|index| PRIME_COUNTS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_counts_sorted() {
        assert!(PRIME_COUNTS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn prime_count_lookup() {
        assert_eq!(Some(500), prime_count(DEFAULT_BOUND));
        assert_eq!(Some(9_592), prime_count(100_000));
        assert_eq!(None, prime_count(11));
    }
}

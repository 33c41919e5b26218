//! Property-based tests for the sieve
//!
//! Every result is checked against trial division, so these stay on modest bounds.

use eratosthenes::{compute_primes, compute_primes_parallel, compute_primes_with, Layout};
use proptest::prelude::*;

fn is_prime(k: u64) -> bool {
    k >= 2 && (2..).take_while(|d| d * d <= k).all(|d| k % d != 0)
}

fn prime_count(n: i64) -> usize {
    (2..=n.max(0) as u64).filter(|&k| is_prime(k)).count()
}

proptest! {
    #[test]
    fn every_element_is_prime_and_bounded(n in -100i64..5_000) {
        for p in compute_primes(n).unwrap() {
            prop_assert!(is_prime(p), "{} is not prime", p);
            prop_assert!(p as i64 <= n);
        }
    }

    #[test]
    fn strictly_ascending(n in -100i64..20_000) {
        let primes = compute_primes(n).unwrap();
        prop_assert!(primes.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn length_is_prime_count(n in -100i64..5_000) {
        prop_assert_eq!(prime_count(n), compute_primes(n).unwrap().len());
    }

    #[test]
    fn idempotent(n in -100i64..20_000) {
        prop_assert_eq!(compute_primes(n).unwrap(), compute_primes(n).unwrap());
    }

    #[test]
    fn monotonic_containment(n in -100i64..10_000, extra in 0i64..10_000) {
        let smaller = compute_primes(n).unwrap();
        let larger = compute_primes(n + extra).unwrap();
        prop_assert!(smaller.len() <= larger.len());
        prop_assert_eq!(&smaller[..], &larger[..smaller.len()]);
    }

    #[test]
    fn layouts_agree(n in -100i64..20_000) {
        prop_assert_eq!(
            compute_primes_with(n, Layout::Packed).unwrap(),
            compute_primes_with(n, Layout::Bytes).unwrap()
        );
    }

    #[test]
    fn parallel_agrees(n in -100i64..50_000, segment_len in 1usize..5_000) {
        prop_assert_eq!(
            compute_primes(n).unwrap(),
            compute_primes_parallel(n, segment_len).unwrap()
        );
    }
}

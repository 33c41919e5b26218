//! Sieve of Eratosthenes: every prime up to an inclusive bound N.
//!
//! Flags for 0..=N start cleared. For each i <= sqrt(N) still unstruck, every multiple i * j with
//! j >= i is struck as composite; multiples below i * i were already struck by a smaller prime.
//! 2 is reported first, then every unstruck odd number from 3 to N.
//!
//! In Rust a bool is represented with a single byte. Keeping a vector of bits saves eight times
//! the memory compared to a vector of bools representing the same flags, although access costs
//! a couple extra CPU cycles due to bit operations. BitVec is the default layout; ByteVec is
//! available through Layout::Bytes when memory is not a concern.
//!
//! compute_primes_parallel additionally segments the range above sqrt(N) and strikes the segments
//! on rayon's thread pool, with the same output.
//!
//! Usage:
//!
//!     use eratosthenes::{compute_primes, compute_primes_with, Layout};
//!
//!     assert_eq!(vec![2, 3, 5, 7, 11, 13, 17, 19], compute_primes(20).unwrap());
//!     assert_eq!(vec![2], compute_primes_with(2, Layout::Bytes).unwrap());
//!
//! Segmented sieve after Kim Walisch's primesieve:
//! - https://github.com/kimwalisch/primesieve/wiki/Segmented-sieve-of-Eratosthenes

// Internal modules
mod bit_vec;
mod byte_vec;
mod error;
mod flags;
mod segment;
mod sieve;

pub mod cli;
pub mod reference;

pub use bit_vec::BitVec;
pub use byte_vec::ByteVec;
pub use error::SieveError;
pub use flags::CompositeFlags;
pub use segment::{compute_primes_parallel, DEFAULT_SEGMENT_LEN};
pub use sieve::{compute_primes, compute_primes_with, Layout, Primes, Sieve};

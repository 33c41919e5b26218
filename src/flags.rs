use std::collections::TryReserveError;

/// Storage for the sieve's "is composite" flags, indexed 0..len.
///
/// Every flag starts cleared (not known composite). Implementations differ only in memory
/// layout: results of a sieve run never depend on which one is used.
pub trait CompositeFlags: Sized {
    /// Allocate `len` cleared flags, reporting allocation failure instead of aborting.
    fn try_with_len(len: usize) -> Result<Self, TryReserveError>;

    /// Bytes of flag storage needed for `len` flags.
    fn bytes_for(len: usize) -> usize;

    fn len(&self) -> usize;

    fn is_composite(&self, index: usize) -> bool;

    fn mark_composite(&mut self, index: usize);

    /// Find the first cleared flag at or after index.
    fn find_clear(&self, index: usize) -> Option<usize> {
        (index..self.len()).find(|&i| !self.is_composite(i))
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reserve exactly `len` elements up front so that running out of memory surfaces as an error.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)?;
    vec.resize(len, value);
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_filled_correct() {
        assert_eq!(vec![false; 5], try_filled(5, false).unwrap());
        assert_eq!(Vec::<u64>::new(), try_filled(0, 0u64).unwrap());
    }

    #[test]
    fn try_filled_reports_capacity_overflow() {
        assert!(try_filled(usize::MAX, 0u64).is_err());
    }
}

use std::collections::TryReserveError;

use crate::flags::{try_filled, CompositeFlags};

/// One bool per number. Eight times the memory of a BitVec, but each access is a single load
/// or store with no bit arithmetic, which wins while the whole array still fits in cache.
pub struct ByteVec {
    flags: Vec<bool>,
}

impl CompositeFlags for ByteVec {
    fn try_with_len(len: usize) -> Result<ByteVec, TryReserveError> {
        let flags = try_filled(len, false)?;
        Ok(ByteVec { flags })
    }

    fn bytes_for(len: usize) -> usize {
        len
    }

    fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    fn is_composite(&self, index: usize) -> bool {
        self.flags[index]
    }

    #[inline]
    fn mark_composite(&mut self, index: usize) {
        self.flags[index] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_vec_correct() {
        let mut byte_vec = ByteVec::try_with_len(10).unwrap();
        byte_vec.mark_composite(4);
        byte_vec.mark_composite(6);

        assert_eq!(10, byte_vec.len());
        assert!(byte_vec.is_composite(4));
        assert!(!byte_vec.is_composite(5));
        assert_eq!(Some(5), byte_vec.find_clear(4));
        assert_eq!(None, byte_vec.find_clear(10));
    }
}

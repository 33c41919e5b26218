use std::collections::TryReserveError;

use crate::flags::{try_filled, CompositeFlags};

/// Packed composite flags: one bit per number, 64 numbers per word.
///
/// A set bit means composite. Bits past len in the last word are set at construction, so a
/// scan for cleared bits never walks off the end of the logical array.
pub struct BitVec {
    bit_vec: Vec<u64>,
    len: usize,
}

impl BitVec {
    const WORD_BITS: usize = 64;
    const SHIFT: usize = 6;
    const MASK: usize = 0b11_1111;
    const ONES: u64 = u64::MAX;

    fn words_for(len: usize) -> usize {
        len / BitVec::WORD_BITS + (len % BitVec::WORD_BITS != 0) as usize
    }

    /// Mask selecting bits at or above bit_index within a word.
    #[inline]
    fn greater_or_equal_bits(bit_index: usize) -> u64 {
        BitVec::ONES << bit_index
    }

    /// Find the first set bit in word. This index is equal to the number of word's trailing zeros.
    fn find_first_set(word: u64) -> Option<usize> {
        if word == 0 {
            return None;
        }
        Some(word.trailing_zeros() as usize)
    }
}

impl CompositeFlags for BitVec {
    fn try_with_len(len: usize) -> Result<BitVec, TryReserveError> {
        let mut bit_vec = try_filled(BitVec::words_for(len), 0)?;
        if len & BitVec::MASK != 0 {
            if let Some(end) = bit_vec.last_mut() {
                *end |= BitVec::greater_or_equal_bits(len & BitVec::MASK);
            }
        }

        Ok(BitVec { bit_vec, len })
    }

    fn bytes_for(len: usize) -> usize {
        BitVec::words_for(len) * std::mem::size_of::<u64>()
    }

    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_composite(&self, index: usize) -> bool {
        self.bit_vec[index >> BitVec::SHIFT] & (1 << (index & BitVec::MASK)) != 0
    }

    #[inline]
    fn mark_composite(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.bit_vec[index >> BitVec::SHIFT] |= 1 << (index & BitVec::MASK)
    }

    /// Skip whole words of composites by searching the inverted word for its first set bit.
    fn find_clear(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let first_word_index = index >> BitVec::SHIFT;
        for (word_index, &word) in self.bit_vec[first_word_index..].iter().enumerate() {
            let clear = if word_index == 0 {
                !word & BitVec::greater_or_equal_bits(index & BitVec::MASK)
            } else {
                !word
            };
            if let Some(bit_index) = BitVec::find_first_set(clear) {
                return Some(((first_word_index + word_index) << BitVec::SHIFT) + bit_index);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_vec_correct() {
        let mut bit_vec = BitVec::try_with_len(12).unwrap();

        bit_vec.mark_composite(0);
        bit_vec.mark_composite(1);
        bit_vec.mark_composite(4);
        bit_vec.mark_composite(6);
        bit_vec.mark_composite(8);
        bit_vec.mark_composite(9);
        bit_vec.mark_composite(10);

        let clear = (0..12).filter(|&i| !bit_vec.is_composite(i)).collect::<Vec<_>>();
        assert_eq!(vec![2, 3, 5, 7, 11], clear);
    }

    #[test]
    fn bit_vec_find_clear() {
        let mut bit_vec = BitVec::try_with_len(130).unwrap();
        for i in 0..129 {
            if i != 70 {
                bit_vec.mark_composite(i);
            }
        }

        assert_eq!(Some(70), bit_vec.find_clear(0));
        assert_eq!(Some(70), bit_vec.find_clear(70));
        assert_eq!(Some(129), bit_vec.find_clear(71));
        assert_eq!(Some(129), bit_vec.find_clear(129));
        assert_eq!(None, bit_vec.find_clear(130));
    }

    #[test]
    fn bit_vec_bounds() {
        // Padding bits in the last word must never be reported as cleared.
        let mut bit_vec = BitVec::try_with_len(65).unwrap();
        bit_vec.mark_composite(64);
        assert_eq!(None, bit_vec.find_clear(64));

        let bit_vec = BitVec::try_with_len(0).unwrap();
        assert!(bit_vec.is_empty());
        assert_eq!(None, bit_vec.find_clear(0));
    }

    #[test]
    fn bit_vec_bytes_for() {
        assert_eq!(0, BitVec::bytes_for(0));
        assert_eq!(8, BitVec::bytes_for(1));
        assert_eq!(8, BitVec::bytes_for(64));
        assert_eq!(16, BitVec::bytes_for(65));
    }

    #[test]
    fn bit_vec_find_first_set() {
        assert_eq!(None, BitVec::find_first_set(0b00000000));
        assert_eq!(Some(0), BitVec::find_first_set(0b00000001));
        assert_eq!(Some(1), BitVec::find_first_set(0b00000010));
        assert_eq!(Some(7), BitVec::find_first_set(0b10000000));

        assert_eq!(Some(3), BitVec::find_first_set(0b10101000));
        assert_eq!(Some(4), BitVec::find_first_set(0b01010000));
    }
}

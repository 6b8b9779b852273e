use std::iter::FusedIterator;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::alphabet::{Alphabet, LengthRange};

/// Number of strings over `radix` symbols with lengths in `lengths`: `sum(radix^L)`.
pub fn exhaustive_total(radix: usize, lengths: LengthRange) -> BigUint {
    let radix = BigUint::from(radix);
    let mut term = BigUint::one();
    for _ in 0..lengths.min() {
        term *= &radix;
    }

    let mut total = BigUint::zero();
    for _ in lengths.lengths() {
        total += &term;
        term *= &radix;
    }
    total
}

/// Lazily yields every string over an alphabet for each length in a range.
///
/// Lengths are visited in increasing order. Within a length the rightmost
/// position changes fastest and carries left on overflow, so `"ab"` at length 2
/// yields `aa, ab, ba, bb`. State is one digit per position of the current length.
#[derive(Debug, Clone)]
pub struct Enumerator {
    chars: Vec<char>,
    lengths: LengthRange,
    /// Digit per position for the next string to yield.
    digits: Vec<usize>,
    done: bool,
}

impl Enumerator {
    pub fn new(alphabet: &Alphabet, lengths: LengthRange) -> Self {
        Self {
            chars: alphabet.chars().to_vec(),
            lengths,
            digits: vec![0; lengths.min()],
            done: false,
        }
    }

    /// Total strings this enumerator yields from the start.
    pub fn total(&self) -> BigUint {
        exhaustive_total(self.chars.len(), self.lengths)
    }

    /// Strings not yet yielded.
    pub fn remaining(&self) -> BigUint {
        if self.done {
            return BigUint::zero();
        }
        let radix = self.chars.len();
        let rest = match LengthRange::new(self.digits.len(), self.lengths.max()) {
            Ok(rest) => exhaustive_total(radix, rest),
            Err(_) => return BigUint::zero(),
        };

        // Strings of the current length already yielded.
        let rank = self.digits.iter().fold(BigUint::zero(), |acc, &d| acc * radix + d);
        rest - rank
    }

    /// Steps the odometer. Returns false once the last length has wrapped.
    fn advance(&mut self) -> bool {
        let radix = self.chars.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < radix {
                return true;
            }
            *digit = 0;
        }

        // Every position carried: move on to the next length.
        let next_len = self.digits.len() + 1;
        if next_len > self.lengths.max() {
            return false;
        }
        self.digits.clear();
        self.digits.resize(next_len, 0);
        true
    }
}

impl Iterator for Enumerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let candidate: String = self.digits.iter().map(|&d| self.chars[d]).collect();
        self.done = !self.advance();
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().to_usize() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Enumerator {}

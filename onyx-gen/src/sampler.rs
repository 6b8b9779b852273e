use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alphabet::{Alphabet, LengthRange};

/// Endless stream of independent random candidates.
///
/// Each draw picks a length uniformly from the range, then every character
/// uniformly from the alphabet. Draws may repeat.
#[derive(Debug, Clone)]
pub struct Sampler<R = StdRng> {
    chars: Vec<char>,
    lengths: LengthRange,
    rng: R,
}

impl Sampler<StdRng> {
    /// Seeds a fresh generator from the operating system.
    pub fn new(alphabet: &Alphabet, lengths: LengthRange) -> Self {
        Self::with_rng(alphabet, lengths, StdRng::from_os_rng())
    }
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(alphabet: &Alphabet, lengths: LengthRange, rng: R) -> Self {
        Self { chars: alphabet.chars().to_vec(), lengths, rng }
    }

    pub fn draw(&mut self) -> String {
        let len = self.rng.random_range(self.lengths.lengths());
        (0..len).map(|_| self.chars[self.rng.random_range(0..self.chars.len())]).collect()
    }
}

impl<R: Rng> Iterator for Sampler<R> {
    type Item = String;

    #[inline]
    fn next(&mut self) -> Option<String> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

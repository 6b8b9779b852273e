use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ConfigError;

/// Symbol characters selected by the `s` class code.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Separator between codes in `-a l/u/d` style arguments.
pub const CODE_SEPARATOR: char = '/';

/// A named group of characters that can be combined into an alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lower,
    Upper,
    Digits,
    Symbols,
}

impl CharClass {
    pub const ALL: [CharClass; 4] =
        [CharClass::Lower, CharClass::Upper, CharClass::Digits, CharClass::Symbols];

    pub fn code(self) -> char {
        match self {
            CharClass::Lower => 'l',
            CharClass::Upper => 'u',
            CharClass::Digits => 'd',
            CharClass::Symbols => 's',
        }
    }

    pub fn chars(self) -> &'static str {
        match self {
            CharClass::Lower => "abcdefghijklmnopqrstuvwxyz",
            CharClass::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharClass::Digits => "0123456789",
            CharClass::Symbols => SYMBOLS,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| code.len() == 1 && code.starts_with(class.code()))
    }

    /// Parses a `/`-separated code list. Unknown codes are skipped.
    pub fn parse_codes(codes: &str) -> Vec<CharClass> {
        codes
            .split(CODE_SEPARATOR)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .filter_map(|code| {
                let class = Self::from_code(code);
                if class.is_none() {
                    tracing::warn!(code, "ignoring unknown character class code");
                }
                class
            })
            .collect()
    }
}

/// Ordered set of unique characters. Index order is enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet, keeping the first occurrence of every repeated character.
    pub fn new<I>(chars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = HashSet::new();
        let chars: Vec<char> = chars.into_iter().filter(|c| seen.insert(*c)).collect();
        if chars.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    /// Concatenates the given classes in order, followed by any literal extra characters.
    pub fn from_classes(classes: &[CharClass], extra: &str) -> Result<Self, ConfigError> {
        Self::new(classes.iter().flat_map(|class| class.chars().chars()).chain(extra.chars()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; an alphabet holds at least one character.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline]
    pub fn get(&self, index: usize) -> char {
        self.chars[index]
    }
}

impl FromStr for Alphabet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars())
    }
}

/// Inclusive candidate length bounds, `1 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || min > max {
            return Err(ConfigError::InvalidLengthRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn single(len: usize) -> Result<Self, ConfigError> {
        Self::new(len, len)
    }

    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl FromStr for LengthRange {
    type Err = ConfigError;

    /// Accepts `N` or `MIN-MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || ConfigError::UnparsableLength { input: s.to_string() };
        let parse = |part: &str| part.trim().parse::<usize>().map_err(|_| unparsable());

        match s.split_once('-') {
            Some((min, max)) => Self::new(parse(min)?, parse(max)?),
            None => Self::single(parse(s)?),
        }
    }
}

//! Weak-pattern exclusion rules.
//!
//! A candidate is classified once into its [`Shape`] (which character kinds it
//! contains) and every enabled rule is tested against that shape. The same
//! classification drives [`ExclusionSet::admits_any`], which decides up front
//! whether an alphabet can produce any acceptable candidate at all.

use std::fmt;

use crate::alphabet::{Alphabet, CODE_SEPARATOR};

/// A named predicate marking a candidate shape as undesirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExclusionRule {
    /// Has a lowercase letter and no uppercase letter.
    AllLower,
    /// Has an uppercase letter and no lowercase letter.
    AllUpper,
    /// Only decimal digits.
    AllDigits,
    /// Only alphanumeric characters.
    NoSymbols,
}

impl ExclusionRule {
    pub const ALL: [ExclusionRule; 4] = [
        ExclusionRule::AllLower,
        ExclusionRule::AllUpper,
        ExclusionRule::AllDigits,
        ExclusionRule::NoSymbols,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExclusionRule::AllLower => "all-lower",
            ExclusionRule::AllUpper => "all-upper",
            ExclusionRule::AllDigits => "all-digits",
            ExclusionRule::NoSymbols => "no-symbols",
        }
    }

    pub fn code(self) -> char {
        match self {
            ExclusionRule::AllLower => 'x',
            ExclusionRule::AllUpper => 'y',
            ExclusionRule::AllDigits => 'z',
            ExclusionRule::NoSymbols => 'w',
        }
    }

    /// Accepts either the single-letter code or the rule name.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| {
            code == rule.name() || (code.len() == 1 && code.starts_with(rule.code()))
        })
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }

    fn matches(self, shape: Shape) -> bool {
        match self {
            ExclusionRule::AllLower => shape.has(Kind::Lower) && !shape.has(Kind::Upper),
            ExclusionRule::AllUpper => shape.has(Kind::Upper) && !shape.has(Kind::Lower),
            ExclusionRule::AllDigits => shape.0 == Kind::Digit.bit(),
            ExclusionRule::NoSymbols => shape.0 != 0 && !shape.has(Kind::Symbol),
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of enabled exclusion rules. Empty by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExclusionSet(u8);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `/`-separated list of codes or rule names. Unknown entries are skipped.
    pub fn parse_codes(codes: &str) -> Self {
        codes
            .split(CODE_SEPARATOR)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .filter_map(|code| {
                let rule = ExclusionRule::from_code(code);
                if rule.is_none() {
                    tracing::warn!(code, "ignoring unknown exclusion code");
                }
                rule
            })
            .collect()
    }

    pub fn insert(&mut self, rule: ExclusionRule) {
        self.0 |= rule.bit();
    }

    pub fn contains(&self, rule: ExclusionRule) -> bool {
        self.0 & rule.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ExclusionRule> + '_ {
        ExclusionRule::ALL.into_iter().filter(|rule| self.contains(*rule))
    }

    /// Returns true if any enabled rule matches the candidate.
    pub fn is_excluded(&self, candidate: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        self.rejects(Shape::of(candidate))
    }

    /// Whether at least one candidate of length `<= max_len` over `alphabet` passes.
    ///
    /// A candidate's verdict depends only on which character kinds it contains,
    /// so it is enough to try every non-empty combination of the kinds present
    /// in the alphabet that fits in `max_len` positions.
    pub fn admits_any(&self, alphabet: &Alphabet, max_len: usize) -> bool {
        let available = alphabet.chars().iter().fold(0u8, |mask, c| mask | Kind::of(*c).bit());

        (1..=available).filter(|subset| subset & !available == 0).any(|subset: u8| {
            subset.count_ones() as usize <= max_len && !self.rejects(Shape(subset))
        })
    }

    fn rejects(&self, shape: Shape) -> bool {
        self.iter().any(|rule| rule.matches(shape))
    }
}

impl FromIterator<ExclusionRule> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = ExclusionRule>>(iter: T) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter().map(ExclusionRule::name).collect();
        f.write_str(&names.join(","))
    }
}

/// Disjoint character kinds a candidate is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Lower,
    Upper,
    Digit,
    /// Alphanumeric but neither cased nor an ASCII digit (e.g. `ß` is Lower, `中` is here).
    OtherAlnum,
    Symbol,
}

impl Kind {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            Kind::Lower
        } else if c.is_uppercase() {
            Kind::Upper
        } else if c.is_ascii_digit() {
            Kind::Digit
        } else if c.is_alphanumeric() {
            Kind::OtherAlnum
        } else {
            Kind::Symbol
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Bitmask of the kinds present in a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape(u8);

impl Shape {
    fn of(candidate: &str) -> Self {
        Shape(candidate.chars().fold(0, |mask, c| mask | Kind::of(c).bit()))
    }

    #[inline]
    fn has(self, kind: Kind) -> bool {
        self.0 & kind.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::alphabet::CharClass;

    fn only(rule: ExclusionRule) -> ExclusionSet {
        [rule].into_iter().collect()
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExclusionSet::new();
        for candidate in ["abc", "ABC", "123", "a1B", "!!", ""] {
            assert!(!set.is_excluded(candidate));
        }
    }

    #[test]
    fn test_all_lower() {
        let set = only(ExclusionRule::AllLower);
        assert!(set.is_excluded("abc"));
        assert!(set.is_excluded("abc123!"));
        assert!(!set.is_excluded("abC"));
        assert!(!set.is_excluded("123"));
        assert!(!set.is_excluded("!@#"));
    }

    #[test]
    fn test_all_upper() {
        let set = only(ExclusionRule::AllUpper);
        assert!(set.is_excluded("ABC"));
        assert!(set.is_excluded("A1-"));
        assert!(!set.is_excluded("AbC"));
        assert!(!set.is_excluded("42"));
    }

    #[test]
    fn test_all_digits() {
        let set = only(ExclusionRule::AllDigits);
        assert!(set.is_excluded("0"));
        assert!(set.is_excluded("0123456789"));
        assert!(!set.is_excluded("12a"));
        assert!(!set.is_excluded(""));
        // Non-ASCII digits are not decimal digits for this rule.
        assert!(!set.is_excluded("١٢٣"));
    }

    #[test]
    fn test_no_symbols() {
        let set = only(ExclusionRule::NoSymbols);
        assert!(set.is_excluded("abc123XYZ"));
        assert!(set.is_excluded("7"));
        assert!(!set.is_excluded("abc!"));
        assert!(!set.is_excluded("-"));
        assert!(!set.is_excluded(""));
    }

    #[test]
    fn test_rules_are_or_combined() {
        let set: ExclusionSet = [ExclusionRule::AllLower, ExclusionRule::AllDigits].into_iter().collect();
        assert!(set.is_excluded("abc"));
        assert!(set.is_excluded("999"));
        assert!(!set.is_excluded("aB9"));
        assert!(!set.is_excluded("9!"));
    }

    #[test]
    fn test_unicode_case() {
        let set = only(ExclusionRule::AllLower);
        assert!(set.is_excluded("straße"));
        assert!(!set.is_excluded("中文"));
        let set = only(ExclusionRule::NoSymbols);
        assert!(set.is_excluded("中文"));
    }

    #[test]
    fn test_parse_codes() {
        let set = ExclusionSet::parse_codes("x/z/bogus/no-symbols");
        assert!(set.contains(ExclusionRule::AllLower));
        assert!(set.contains(ExclusionRule::AllDigits));
        assert!(set.contains(ExclusionRule::NoSymbols));
        assert!(!set.contains(ExclusionRule::AllUpper));
        assert_eq!(set.to_string(), "all-lower,all-digits,no-symbols");
        assert_eq!(ExclusionSet::parse_codes("").to_string(), "none");
    }

    #[test]
    fn test_admits_any_digits_only() {
        let digits = Alphabet::from_classes(&[CharClass::Digits], "").unwrap();
        assert!(!only(ExclusionRule::AllDigits).admits_any(&digits, 8));
        assert!(!only(ExclusionRule::NoSymbols).admits_any(&digits, 8));
        assert!(only(ExclusionRule::AllLower).admits_any(&digits, 8));
        assert!(ExclusionSet::new().admits_any(&digits, 1));
    }

    #[test]
    fn test_admits_any_respects_length() {
        // Passing both case rules needs a lowercase and an uppercase character together.
        let alphabet: Alphabet = "aB".parse().unwrap();
        let set: ExclusionSet = [ExclusionRule::AllLower, ExclusionRule::AllUpper].into_iter().collect();
        assert!(!set.admits_any(&alphabet, 1));
        assert!(set.admits_any(&alphabet, 2));
    }

    #[test]
    fn test_admits_any_all_rules() {
        let full = Alphabet::from_classes(&CharClass::ALL, "").unwrap();
        let every: ExclusionSet = ExclusionRule::ALL.into_iter().collect();
        // A lone symbol matches none of the rules.
        assert!(every.admits_any(&full, 1));
        assert!(!every.is_excluded("!"));

        let letters = Alphabet::from_classes(&[CharClass::Lower, CharClass::Upper], "").unwrap();
        assert!(!every.admits_any(&letters, 16));
    }

    proptest! {
        // If admits_any says nothing passes, no short candidate over the alphabet may pass.
        #[test]
        fn test_admits_any_agrees_with_filter(
            chars in proptest::sample::subsequence(vec!['a', 'Z', '7', '!', 'ß', '中'], 1..=6),
            rules in proptest::sample::subsequence(ExclusionRule::ALL.to_vec(), 0..=4),
            max_len in 1usize..=3,
        ) {
            let alphabet = Alphabet::new(chars.clone()).unwrap();
            let set: ExclusionSet = rules.into_iter().collect();
            let any_passes = crate::enumerator::Enumerator::new(
                &alphabet,
                crate::alphabet::LengthRange::new(1, max_len).unwrap(),
            )
            .any(|candidate| !set.is_excluded(&candidate));
            prop_assert_eq!(set.admits_any(&alphabet, max_len), any_passes);
        }
    }
}

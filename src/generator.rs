use std::fmt::{self, Display, Formatter};

use rand::{thread_rng, Rng};
use tracing::{debug, instrument, trace};

use crate::err::{Error, Result};

// Consts

pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
// 29 characters, backslash included
pub const SYMBOLS: &str = "!@#$%^&*()_+=[]{}|;:',.<>?~`\\";

// Traits

#[cfg_attr(test, mockall::automock)]
pub trait PasswordGenerator {
    fn generate(&self, constraints: &Constraints) -> String;
}

// Length

/// Password length, always within `MIN..=MAX`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Length(u8);

impl Length {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 24;
    pub const DEFAULT: Self = Self(12);

    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN as u32..=Self::MAX as u32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::LengthOutOfRange(value))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Length {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Constraints

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Constraints {
    pub length: Length,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl Constraints {
    /// Applies every field of `update` at once. Returns `true` if anything changed.
    pub fn apply(&mut self, update: ConstraintUpdate) -> bool {
        let before = *self;
        if let Some(length) = update.length {
            self.length = length;
        }
        if let Some(digits) = update.include_digits {
            self.include_digits = digits;
        }
        if let Some(symbols) = update.include_symbols {
            self.include_symbols = symbols;
        }
        before != *self
    }
}

impl Display for Constraints {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        write!(
            f,
            "length {}, digits {}, symbols {}",
            self.length,
            on_off(self.include_digits),
            on_off(self.include_symbols)
        )
    }
}

// ConstraintUpdate

/// One logical change to the constraints. Unset fields are left alone.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConstraintUpdate {
    pub length: Option<Length>,
    pub include_digits: Option<bool>,
    pub include_symbols: Option<bool>,
}

impl ConstraintUpdate {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.include_digits.is_none() && self.include_symbols.is_none()
    }
}

// CharacterPool

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharacterPool(Vec<char>);

impl CharacterPool {
    pub fn new(constraints: &Constraints) -> Self {
        let mut chars: Vec<char> = LETTERS.chars().collect();
        if constraints.include_digits {
            chars.extend(DIGITS.chars());
        }
        if constraints.include_symbols {
            chars.extend(SYMBOLS.chars());
        }
        Self(chars)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        // Letters are always in the pool so it is never empty.
        self.0[rng.gen_range(0..self.0.len())]
    }
}

// Functions

pub fn generate_with<R: Rng + ?Sized>(constraints: &Constraints, rng: &mut R) -> String {
    let pool = CharacterPool::new(constraints);
    trace!(pool = pool.len(), "sampling");
    let password: String = (0..constraints.length.get())
        .map(|_| pool.sample(rng))
        .collect();
    debug_assert!(password.chars().all(|ch| pool.contains(ch)));
    password
}

// RandomPasswordGenerator

pub struct RandomPasswordGenerator;

impl PasswordGenerator for RandomPasswordGenerator {
    #[instrument(skip(self))]
    fn generate(&self, constraints: &Constraints) -> String {
        debug!("generating password");
        generate_with(constraints, &mut thread_rng())
    }
}

// Tests

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn constraints(length: u32, include_digits: bool, include_symbols: bool) -> Constraints {
        Constraints {
            length: Length::new(length).expect("valid length"),
            include_digits,
            include_symbols,
        }
    }

    // Mods

    mod length {
        use super::*;

        #[test]
        fn bounds() {
            assert!(Length::new(5).is_err());
            assert!(Length::new(25).is_err());
            assert_eq!(Length::new(6).unwrap().get(), 6);
            assert_eq!(Length::new(24).unwrap().get(), 24);
        }

        #[test]
        fn default_is_twelve() {
            assert_eq!(Length::default().get(), 12);
            assert_eq!(Constraints::default(), constraints(12, false, false));
        }
    }

    mod constraints_apply {
        use super::*;

        #[test]
        fn combined() {
            let mut c = Constraints::default();
            let changed = c.apply(ConstraintUpdate {
                length: Some(Length::new(20).unwrap()),
                include_digits: Some(true),
                include_symbols: None,
            });
            assert!(changed);
            assert_eq!(c, constraints(20, true, false));
        }

        #[test]
        fn same_values_is_not_a_change() {
            let mut c = constraints(12, true, false);
            let changed = c.apply(ConstraintUpdate {
                length: Some(Length::DEFAULT),
                include_digits: Some(true),
                include_symbols: Some(false),
            });
            assert!(!changed);
        }
    }

    mod pool {
        use super::*;

        #[test]
        fn sizes() {
            assert_eq!(CharacterPool::new(&constraints(12, false, false)).len(), 52);
            assert_eq!(CharacterPool::new(&constraints(12, true, false)).len(), 62);
            assert_eq!(CharacterPool::new(&constraints(12, false, true)).len(), 81);
            assert_eq!(CharacterPool::new(&constraints(12, true, true)).len(), 91);
        }

        #[test]
        fn no_duplicates() {
            let pool = CharacterPool::new(&constraints(12, true, true));
            let unique: HashSet<char> = pool.0.iter().copied().collect();
            assert_eq!(unique.len(), pool.len());
        }

        #[test]
        fn contains_follows_flags() {
            let letters = CharacterPool::new(&constraints(12, false, false));
            assert!(letters.contains('a') && letters.contains('Z'));
            assert!(!letters.contains('7'));
            assert!(!letters.contains('\\'));
            let full = CharacterPool::new(&constraints(12, true, true));
            assert!(full.contains('7'));
            assert!(full.contains('\\'));
            assert!(full.contains('`'));
            assert!(!full.contains(' '));
            assert!(!full.contains('-'));
        }
    }

    mod generate {
        use super::*;

        #[test]
        fn letters_and_digits_only() {
            let mut rng = StdRng::seed_from_u64(8);
            for _ in 0..200 {
                let pwd = generate_with(&constraints(8, true, false), &mut rng);
                assert_eq!(pwd.chars().count(), 8);
                assert!(pwd.chars().all(|c| c.is_ascii_alphanumeric()));
            }
        }

        #[test]
        fn full_pool() {
            let c = constraints(24, true, true);
            let pool = CharacterPool::new(&c);
            let mut seen = HashSet::new();
            let mut rng = StdRng::seed_from_u64(24);
            for _ in 0..500 {
                let pwd = generate_with(&c, &mut rng);
                assert_eq!(pwd.chars().count(), 24);
                assert!(pwd.chars().all(|ch| pool.contains(ch)));
                seen.extend(pwd.chars());
            }
            // 12000 draws over 91 characters
            assert_eq!(seen.len(), 91);
        }

        #[test]
        fn not_constant() {
            let gen = RandomPasswordGenerator;
            let c = Constraints::default();
            let outputs: HashSet<String> = (0..50).map(|_| gen.generate(&c)).collect();
            assert!(outputs.len() > 1);
        }
    }

    proptest! {
        #[test]
        fn length_matches(
            len in 6u32..=24,
            digits in any::<bool>(),
            symbols in any::<bool>(),
            seed in any::<u64>()
        ) {
            let c = constraints(len, digits, symbols);
            let pwd = generate_with(&c, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(pwd.chars().count(), len as usize);
        }

        #[test]
        fn chars_come_from_pool(
            len in 6u32..=24,
            digits in any::<bool>(),
            symbols in any::<bool>(),
            seed in any::<u64>()
        ) {
            let c = constraints(len, digits, symbols);
            let pool = CharacterPool::new(&c);
            let pwd = generate_with(&c, &mut StdRng::seed_from_u64(seed));
            for ch in pwd.chars() {
                let allowed = LETTERS.contains(ch)
                    || (digits && DIGITS.contains(ch))
                    || (symbols && SYMBOLS.contains(ch));
                prop_assert!(allowed, "unexpected character {:?}", ch);
                prop_assert!(pool.contains(ch));
            }
        }

        #[test]
        fn letters_only_by_default(len in 6u32..=24, seed in any::<u64>()) {
            let c = constraints(len, false, false);
            let pwd = generate_with(&c, &mut StdRng::seed_from_u64(seed));
            prop_assert!(pwd.chars().all(|ch| ch.is_ascii_alphabetic()));
        }
    }
}

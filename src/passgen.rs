//! Random password generation.
//!
//! Lowercase letters are always part of the pool; uppercase letters, digits
//! and symbols are opt-in. Every character is drawn independently and
//! uniformly from the combined pool.

use rand::rngs::OsRng;
use rand::Rng;

use crate::error::PasswordError;

/// Shortest accepted password.
pub const MIN_LENGTH: usize = 10;
/// Longest accepted password.
pub const MAX_LENGTH: usize = 32;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>/?";

/// Which characters a password may contain, and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            digits: true,
            symbols: false,
        }
    }
}

impl PasswordPolicy {
    /// Lowercase-only policy of the given length.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            uppercase: false,
            digits: false,
            symbols: false,
        }
    }

    pub fn with_uppercase(mut self, enabled: bool) -> Self {
        self.uppercase = enabled;
        self
    }

    pub fn with_digits(mut self, enabled: bool) -> Self {
        self.digits = enabled;
        self
    }

    pub fn with_symbols(mut self, enabled: bool) -> Self {
        self.symbols = enabled;
        self
    }

    /// Check the length bounds.
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.length < MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_LENGTH,
                requested: self.length,
            });
        }
        if self.length > MAX_LENGTH {
            return Err(PasswordError::TooLong {
                max: MAX_LENGTH,
                requested: self.length,
            });
        }
        Ok(())
    }

    /// The characters a password may be drawn from.
    pub fn pool(&self) -> Vec<char> {
        let mut pool: Vec<char> = LOWERCASE.chars().collect();
        if self.uppercase {
            pool.extend(UPPERCASE.chars());
        }
        if self.digits {
            pool.extend(DIGITS.chars());
        }
        if self.symbols {
            pool.extend(SYMBOLS.chars());
        }
        pool
    }

    /// Generate a password with the operating system's random source.
    pub fn generate(&self) -> Result<String, PasswordError> {
        self.generate_with(&mut OsRng)
    }

    /// Generate a password with a caller-supplied random source.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, PasswordError> {
        self.validate()?;
        // Lowercase is always present, so the pool is never empty and every
        // position gets exactly one character.
        let pool = self.pool();
        let password: String = (0..self.length)
            .map(|_| pool[rng.gen_range(0..pool.len())])
            .collect();
        debug_assert_eq!(password.chars().count(), self.length);
        Ok(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            PasswordPolicy::new(9).validate(),
            Err(PasswordError::TooShort {
                min: 10,
                requested: 9
            })
        );
        assert_eq!(
            PasswordPolicy::new(33).validate(),
            Err(PasswordError::TooLong {
                max: 32,
                requested: 33
            })
        );
        assert!(PasswordPolicy::new(10).validate().is_ok());
        assert!(PasswordPolicy::new(32).validate().is_ok());
    }

    #[test]
    fn test_generate_rejects_bad_length() {
        assert!(PasswordPolicy::new(4).generate().is_err());
    }

    #[test]
    fn test_lowercase_only() {
        let mut rng = StdRng::seed_from_u64(7);
        let password = PasswordPolicy::new(20).generate_with(&mut rng).unwrap();
        assert_eq!(password.chars().count(), 20);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_enabled_classes_only() {
        let policy = PasswordPolicy::new(32).with_digits(true).with_symbols(true);
        let pool = policy.pool();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let password = policy.generate_with(&mut rng).unwrap();
            assert_eq!(password.len(), 32);
            assert!(password.chars().all(|c| pool.contains(&c)));
            assert!(!password.chars().any(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_pool_composition() {
        assert_eq!(PasswordPolicy::new(10).pool().len(), 26);
        let all = PasswordPolicy::new(10)
            .with_uppercase(true)
            .with_digits(true)
            .with_symbols(true);
        assert_eq!(all.pool().len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let policy = PasswordPolicy::default();
        let a = policy.generate_with(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = policy.generate_with(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_allowed_length_is_exact() {
        let mut rng = StdRng::seed_from_u64(11);
        for length in MIN_LENGTH..=MAX_LENGTH {
            let policy = PasswordPolicy::new(length).with_symbols(true);
            assert!(!policy.pool().is_empty());
            let password = policy.generate_with(&mut rng).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn test_os_rng_generation() {
        let password = PasswordPolicy::default().generate().unwrap();
        assert_eq!(password.len(), 16);
    }
}

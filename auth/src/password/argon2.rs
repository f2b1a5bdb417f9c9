use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// One-way password hashing (Argon2id).
///
/// The cost factor is the Argon2 time cost (number of passes). Memory and
/// parallelism stay at the algorithm defaults.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Default time cost.
    pub const DEFAULT_COST: u32 = Params::DEFAULT_T_COST;

    /// Create a new password hasher with the given cost factor.
    ///
    /// The cost is only checked when hashing, so a bad value surfaces as
    /// `InvalidCost` from [`PasswordHasher::hash`].
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// Output is a PHC string (algorithm, parameters, random salt and hash),
    /// so hashing the same password twice yields different strings.
    ///
    /// # Errors
    /// * `InvalidCost` - The cost factor is rejected by Argon2
    /// * `HashingFailed` - Salt generation or hashing failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidCost {
            cost: self.cost,
            reason: e.to_string(),
        })?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// Parameters are read back from the PHC string, so hashes made with a
    /// different cost still verify.
    ///
    /// # Errors
    /// * `Mismatch` - Wrong password, or the stored hash is malformed
    pub fn verify(&self, hashed_password: &str, candidate: &str) -> Result<(), PasswordError> {
        let parsed_hash = PasswordHash::new(hashed_password).map_err(|_| PasswordError::Mismatch)?;

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::Mismatch)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(1);
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert_eq!(hasher.verify(&hash, password), Ok(()));
        assert_eq!(
            hasher.verify(&hash, "wrong_password"),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new(1);

        let first = hasher.hash("pw1").unwrap();
        let second = hasher.hash("pw1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "pw1").is_ok());
        assert!(hasher.verify(&second, "pw1").is_ok());
    }

    #[test]
    fn test_verify_with_other_cost() {
        let hash = PasswordHasher::new(3).hash("password").unwrap();

        assert!(PasswordHasher::new(1).verify(&hash, "password").is_ok());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::default();

        assert_eq!(
            hasher.verify("invalid_hash", "password"),
            Err(PasswordError::Mismatch)
        );
        assert_eq!(hasher.verify("", ""), Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_zero_cost_is_rejected() {
        let result = PasswordHasher::new(0).hash("password");

        assert!(matches!(
            result,
            Err(PasswordError::InvalidCost { cost: 0, .. })
        ));
    }
}

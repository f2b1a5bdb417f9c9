use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing cost {cost}: {reason}")]
    InvalidCost { cost: u32, reason: String },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Wrong password or unreadable hash. Both look the same to callers.
    #[error("Password does not match")]
    Mismatch,
}

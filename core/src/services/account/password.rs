//! Password hashing and verification with bcrypt
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// bcrypt hasher with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        check_length(password)?;

        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    /// `Ok(false)` on mismatch, `Err` only when the stored hash is unusable
    pub async fn verify(&self, password: &str, hashed: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hashed = hashed.to_string();
        tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("password verification failed: {}", e)))
    }
}

fn check_length(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(DomainError::validation(format!(
            "password must be between {} and {} characters",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

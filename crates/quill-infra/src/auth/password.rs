//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{AuthError, PasswordService};

/// Hash algorithm and cost, taken from configuration.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub algorithm: Algorithm,
    /// Iteration count (Argon2 `t_cost`).
    pub iterations: u32,
    /// Memory cost in KiB (Argon2 `m_cost`).
    pub memory_kib: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Argon2id,
            iterations: 3,
            memory_kib: Params::DEFAULT_M_COST,
            parallelism: 1,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let number = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(fallback)
        };

        let algorithm = match std::env::var("PASSWORD_ALGORITHM") {
            Ok(name) => Algorithm::new(&name.to_lowercase()).unwrap_or_else(|_| {
                tracing::warn!(algorithm = %name, "Unknown password algorithm, using argon2id");
                Algorithm::Argon2id
            }),
            Err(_) => defaults.algorithm,
        };

        Self {
            algorithm,
            iterations: number("PASSWORD_ITERATIONS", defaults.iterations),
            memory_kib: number("PASSWORD_MEMORY_KIB", defaults.memory_kib),
            parallelism: number("PASSWORD_PARALLELISM", defaults.parallelism),
        }
    }
}

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new(config: &PasswordConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::HashingError(format!("Invalid parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(config.algorithm, Version::V0x13, params),
        })
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    // Parameters are read back from the PHC string, so older hashes still verify.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

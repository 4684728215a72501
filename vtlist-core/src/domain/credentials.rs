use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
};
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use zeroize::Zeroizing;

use crate::error::CatalogError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_LISTENER_NAME_LENGTH: usize = 64;

/// Argon2id password hashing with a server-side pepper.
pub struct PasswordCrypto {
    argon2: Argon2<'static>,
    password_pepper: Zeroizing<Vec<u8>>,
}

impl fmt::Debug for PasswordCrypto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCrypto")
            .field("params", self.argon2.params())
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl From<PasswordHashError> for CatalogError {
    fn from(err: PasswordHashError) -> Self {
        CatalogError::Crypto(err.to_string())
    }
}

impl PasswordCrypto {
    const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
    const DEFAULT_ITERATIONS: u32 = 2;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    pub fn new(password_pepper: impl AsRef<[u8]>) -> Result<Self, CatalogError> {
        let params = ParamsBuilder::new()
            .m_cost(Self::DEFAULT_MEMORY_KIB)
            .t_cost(Self::DEFAULT_ITERATIONS)
            .p_cost(Self::DEFAULT_PARALLELISM)
            .output_len(32)
            .build()
            .map_err(|err| CatalogError::Crypto(err.to_string()))?;
        Self::with_params(password_pepper, params)
    }

    /// Caller-specified Argon2 parameters, mostly for tests where the default
    /// memory cost is needlessly slow.
    pub fn with_params(
        password_pepper: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, CatalogError> {
        let pepper = password_pepper.as_ref();
        if pepper.is_empty() {
            return Err(CatalogError::Crypto(
                "password pepper must not be empty".into(),
            ));
        }

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
            password_pepper: Zeroizing::new(pepper.to_vec()),
        })
    }

    /// Hash a password into a PHC string suitable for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, CatalogError> {
        let material = self.peppered(password);

        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CatalogError::Crypto(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;

        Ok(self.argon2.hash_password(&material, &salt)?.to_string())
    }

    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, CatalogError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material = Zeroizing::new(Vec::with_capacity(
            password.len() + self.password_pepper.len(),
        ));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.password_pepper);
        material
    }
}

pub fn validate_listener_name(name: &str) -> Result<(), CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput(
            "listener name must not be empty".into(),
        ));
    }
    if trimmed.len() != name.len() {
        return Err(CatalogError::InvalidInput(
            "listener name must not start or end with whitespace".into(),
        ));
    }
    if name.chars().count() > MAX_LISTENER_NAME_LENGTH {
        return Err(CatalogError::InvalidInput(format!(
            "listener name must be at most {MAX_LISTENER_NAME_LENGTH} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(CatalogError::InvalidInput(
            "listener name must not contain control characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CatalogError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CatalogError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

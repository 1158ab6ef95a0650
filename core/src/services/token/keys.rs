//! Signing key material for identity and refresh tokens

use std::fs;
use std::path::{Path, PathBuf};

use acct_shared::config::JwtConfig;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Keys loaded once at startup and shared read-only by every request
///
/// Identity tokens are signed with the RSA private key and verified with the
/// public key. Refresh tokens are signed and verified with the shared secret.
#[derive(Clone)]
pub struct SigningKeys {
    id_encoding: EncodingKey,
    id_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    /// Where the RSA keys came from, for diagnostics only
    source: PathBuf,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("source", &self.source)
            .field("keys", &"<redacted>")
            .finish()
    }
}

impl SigningKeys {
    /// Load the RSA key pair from PEM files and derive the refresh key from `refresh_secret`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use acct_core::services::token::SigningKeys;
    ///
    /// let keys = SigningKeys::from_files(
    ///     "keys/rsa_private.pem",
    ///     "keys/rsa_public.pem",
    ///     "refresh-secret",
    /// ).expect("Failed to load keys");
    /// ```
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
        refresh_secret: &str,
    ) -> Result<Self, TokenError> {
        let private_key_path = private_key_path.as_ref();
        let public_key_path = public_key_path.as_ref();

        let private_pem = fs::read_to_string(private_key_path).map_err(|e| TokenError::KeyLoad {
            message: format!("Failed to read private key {}: {}", private_key_path.display(), e),
        })?;
        let public_pem = fs::read_to_string(public_key_path).map_err(|e| TokenError::KeyLoad {
            message: format!("Failed to read public key {}: {}", public_key_path.display(), e),
        })?;

        let mut keys = Self::from_pem_strings(&private_pem, &public_pem, refresh_secret)?;
        keys.source = private_key_path.to_path_buf();
        Ok(keys)
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, TokenError> {
        Self::from_files(
            &config.private_key_path,
            &config.public_key_path,
            &config.refresh_secret,
        )
    }

    /// Build keys from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
        refresh_secret: &str,
    ) -> Result<Self, TokenError> {
        if refresh_secret.is_empty() {
            return Err(TokenError::KeyLoad {
                message: "refresh secret is empty".to_string(),
            });
        }

        let id_encoding = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
            TokenError::KeyLoad {
                message: format!("Invalid private key format: {}", e),
            }
        })?;
        let id_decoding = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            TokenError::KeyLoad {
                message: format!("Invalid public key format: {}", e),
            }
        })?;

        Ok(Self {
            id_encoding,
            id_decoding,
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            source: PathBuf::from("memory"),
        })
    }

    pub fn id_encoding_key(&self) -> &EncodingKey {
        &self.id_encoding
    }

    pub fn id_decoding_key(&self) -> &DecodingKey {
        &self.id_decoding
    }

    pub fn refresh_encoding_key(&self) -> &EncodingKey {
        &self.refresh_encoding
    }

    pub fn refresh_decoding_key(&self) -> &DecodingKey {
        &self.refresh_decoding
    }
}

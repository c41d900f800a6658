use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::task;
use tracing::error;

use crate::auth::domain::{CredentialError, CredentialResult};
use crate::auth::ports::PasswordHashingPort;
use crate::config::HashingConfig;

/// Argon2id によるパスワードハッシュ。計算はブロッキングスレッドで実行する
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new(config: &HashingConfig) -> CredentialResult<Self> {
        let defaults = Params::default();
        let params = Params::new(
            config.memory_cost_kib.unwrap_or(defaults.m_cost()),
            config.time_cost.unwrap_or(defaults.t_cost()),
            config.parallelism.unwrap_or(defaults.p_cost()),
            None,
        )
        .map_err(|e| CredentialError::ConfigError(format!("argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    fn hash_blocking(argon2: &Argon2<'static>, password: &str) -> CredentialResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify_blocking(
        argon2: &Argon2<'static>,
        hash: &str,
        password: &str,
    ) -> CredentialResult<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| CredentialError::Hashing(e.to_string()))?;
        match argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::Hashing(e.to_string())),
        }
    }
}

fn join_error(e: task::JoinError) -> CredentialError {
    error!("Hashing task failed: {}", e);
    CredentialError::Hashing(e.to_string())
}

#[async_trait]
impl PasswordHashingPort for Argon2Hasher {
    async fn hash(&self, password: &str) -> CredentialResult<String> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        task::spawn_blocking(move || Self::hash_blocking(&argon2, &password))
            .await
            .map_err(join_error)?
    }

    async fn verify(&self, hash: &str, password: &str) -> CredentialResult<bool> {
        let argon2 = self.argon2.clone();
        let hash = hash.to_owned();
        let password = password.to_owned();
        task::spawn_blocking(move || Self::verify_blocking(&argon2, &hash, &password))
            .await
            .map_err(join_error)?
    }
}

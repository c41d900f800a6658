pub mod argon2id;
pub mod grpc;
pub mod memory;
pub mod sanity;

use std::sync::Arc;

use crate::auth::domain::{CredentialError, CredentialResult};
use crate::auth::ports::{PasswordHashingPort, UserStorePort};
use crate::config::{HashingConfig, ProviderType, StoreConfig};

/// 設定に応じてユーザーストアを生成
pub fn store_from_settings(config: &StoreConfig) -> CredentialResult<Arc<dyn UserStorePort>> {
    match config.provider_type {
        ProviderType::Memory => Ok(Arc::new(memory::MemoryUserStore::new())),
        ProviderType::Sanity => {
            let sanity = config.sanity.clone().ok_or_else(|| {
                CredentialError::ConfigError("Sanity configuration is missing".to_string())
            })?;
            Ok(Arc::new(sanity::SanityUserStore::new(sanity)?))
        }
    }
}

pub fn hasher_from_settings(
    config: &HashingConfig,
) -> CredentialResult<Arc<dyn PasswordHashingPort>> {
    Ok(Arc::new(argon2id::Argon2Hasher::new(config)?))
}

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use grpc_credentials::auth::adapters::argon2id::Argon2Hasher;
use grpc_credentials::auth::adapters::memory::MemoryUserStore;
use grpc_credentials::auth::domain::{NewUser, StoreError, StoreResult, UserDocument};
use grpc_credentials::auth::ports::UserStorePort;
use grpc_credentials::config::HashingConfig;
use grpc_credentials::CredentialService;
use parking_lot::RwLock;

/// 呼び出しを記録するユーザーストア
#[derive(Default)]
pub struct RecordingUserStore {
    inner: MemoryUserStore,
    pub lookups: RwLock<Vec<String>>,
    pub created: RwLock<Vec<NewUser>>,
    failure: RwLock<Option<StoreError>>,
}

impl RecordingUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: StoreError) {
        *self.failure.write() = Some(error);
    }

    pub fn create_calls(&self) -> usize {
        self.created.read().len()
    }

    fn check_failure(&self) -> StoreResult<()> {
        match self.failure.read().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserStorePort for RecordingUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserDocument>> {
        self.lookups.write().push(email.to_string());
        self.check_failure()?;
        self.inner.find_by_email(email).await
    }

    async fn create(&self, user: NewUser) -> StoreResult<UserDocument> {
        self.created.write().push(user.clone());
        self.check_failure()?;
        self.inner.create(user).await
    }
}

/// テスト用の軽量な Argon2 パラメータ
pub fn fast_hashing() -> HashingConfig {
    HashingConfig {
        memory_cost_kib: Some(8),
        time_cost: Some(1),
        parallelism: Some(1),
    }
}

pub fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::new(&fast_hashing()).unwrap()
}

pub fn service_with(store: Arc<RecordingUserStore>) -> CredentialService {
    CredentialService::new(store, Arc::new(fast_hasher()))
}

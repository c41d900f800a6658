use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::auth::domain::{NewUser, StoreError, StoreResult, UserDocument};
use crate::auth::ports::UserStorePort;

/// プロセス内のドキュメントストア。メールアドレスの一意性は作成時に保証する
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserDocument>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStorePort for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserDocument>> {
        Ok(self.users.read().get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> StoreResult<UserDocument> {
        let mut users = self.users.write();
        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }

        let document = UserDocument {
            id: Uuid::new_v4().to_string(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            image: user.image,
        };
        users.insert(document.email.clone(), document.clone());
        Ok(document)
    }
}

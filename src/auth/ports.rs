use crate::auth::domain::{
    CredentialForm, CredentialResult, Credentials, Identity, NewUser, Registration,
    RegistrationOutcome, StoreResult, UserDocument,
};
use async_trait::async_trait;

#[async_trait]
pub trait CredentialPort: Send + Sync {
    /// 新規ユーザー登録。既存メールの場合は `Rejected` を返す
    async fn register(&self, registration: Registration) -> CredentialResult<RegistrationOutcome>;
    /// メールアドレスとパスワードの検証
    async fn authorize(&self, credentials: Credentials) -> CredentialResult<Identity>;
    /// 認証フレームワークに公開するフォーム定義
    fn credential_form(&self) -> CredentialForm {
        CredentialForm::default()
    }
}

#[async_trait]
pub trait UserStorePort: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserDocument>>;
    async fn create(&self, user: NewUser) -> StoreResult<UserDocument>;
}

#[async_trait]
pub trait PasswordHashingPort: Send + Sync {
    async fn hash(&self, password: &str) -> CredentialResult<String>;
    async fn verify(&self, hash: &str, password: &str) -> CredentialResult<bool>;
}

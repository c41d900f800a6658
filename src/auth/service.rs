use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::auth::domain::{
    CredentialError, CredentialResult, Credentials, Identity, NewUser, Registration,
    RegistrationOutcome, PASSWORD_INVALID, UNKNOWN_EMAIL,
};
use crate::auth::ports::{CredentialPort, PasswordHashingPort, UserStorePort};

/// 登録と認証のロジック。セッション管理は外部の認証フレームワークに任せる
pub struct CredentialService {
    store: Arc<dyn UserStorePort>,
    hasher: Arc<dyn PasswordHashingPort>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStorePort>, hasher: Arc<dyn PasswordHashingPort>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl CredentialPort for CredentialService {
    async fn register(&self, registration: Registration) -> CredentialResult<RegistrationOutcome> {
        info!("Registering user");

        if self.store.find_by_email(&registration.email).await?.is_some() {
            warn!("Registration rejected: email already registered");
            return Ok(RegistrationOutcome::duplicate());
        }

        let password_hash = self
            .hasher
            .hash(registration.password.expose_secret())
            .await?;

        let user = self
            .store
            .create(NewUser {
                email: registration.email,
                password_hash,
                name: registration.name,
                image: registration.image,
            })
            .await?;

        info!("Registered user {}", user.id);
        Ok(RegistrationOutcome::Registered(user.into()))
    }

    async fn authorize(&self, credentials: Credentials) -> CredentialResult<Identity> {
        info!("Verifying credentials");

        let user = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                warn!("Authorization failed: unknown email");
                CredentialError::InvalidCredentials(UNKNOWN_EMAIL.to_string())
            })?;

        if !self
            .hasher
            .verify(&user.password_hash, credentials.password.expose_secret())
            .await?
        {
            warn!("Authorization failed: password mismatch for user {}", user.id);
            return Err(CredentialError::InvalidCredentials(
                PASSWORD_INVALID.to_string(),
            ));
        }

        info!("Authorized user {}", user.id);
        Ok(user.into())
    }
}

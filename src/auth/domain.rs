use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DUPLICATE_USER: &str = "User already exists";
pub const UNKNOWN_EMAIL: &str = "Email does not exist";
pub const PASSWORD_INVALID: &str = "Password Invalid";

/// ドキュメントストアに保存されたユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDocument {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// 作成前のユーザー（idはストアが割り当てる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// 認証フレームワークがセッションを確立するための最小限の識別情報
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub id: String,
}

impl From<UserDocument> for Identity {
    fn from(user: UserDocument) -> Self {
        Self {
            email: user.email,
            name: user.name,
            image: user.image,
            id: user.id,
        }
    }
}

impl From<UserDocument> for RegisteredUser {
    fn from(user: UserDocument) -> Self {
        Self {
            email: user.email,
            name: user.name,
            image: user.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RegistrationOutcome {
    Registered(RegisteredUser),
    Rejected { error: String },
}

impl RegistrationOutcome {
    pub fn duplicate() -> Self {
        RegistrationOutcome::Rejected {
            error: DUPLICATE_USER.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Password,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialForm {
    pub name: String,
    pub fields: Vec<CredentialField>,
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self {
            name: "Credentials".to_string(),
            fields: vec![
                CredentialField {
                    key: "email".to_string(),
                    label: "Email".to_string(),
                    kind: FieldKind::Text,
                },
                CredentialField {
                    key: "password".to_string(),
                    label: "Password".to_string(),
                    kind: FieldKind::Password,
                },
            ],
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("malformed store response: {0}")]
    Malformed(String),

    #[error("store configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;
pub type StoreResult<T> = Result<T, StoreError>;

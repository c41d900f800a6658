pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{CredentialError, CredentialResult};
pub use ports::{CredentialPort, PasswordHashingPort, UserStorePort};
pub use service::CredentialService;

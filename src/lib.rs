pub mod auth;
pub mod config;
pub mod generated;

pub use auth::{CredentialPort, CredentialService};
pub use config::Settings;

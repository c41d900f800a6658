use std::sync::Arc;

use secrecy::SecretString;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::{error, info};

use crate::auth::adapters::{hasher_from_settings, store_from_settings};
use crate::auth::domain::{
    CredentialError, Credentials, Registration, RegistrationOutcome, StoreError,
};
use crate::auth::ports::CredentialPort;
use crate::auth::service::CredentialService;
use crate::config::Settings;
use crate::generated::auth::auth_service_server::{AuthService, AuthServiceServer};
use crate::generated::auth::{
    register_response, AuthorizeRequest, AuthorizeResponse, CredentialField,
    DescribeCredentialsRequest, DescribeCredentialsResponse, RegisterRequest, RegisterResponse,
    RegisteredUser,
};

pub struct GrpcCredentialService<T: CredentialPort> {
    credential_service: Arc<T>,
}

impl From<CredentialError> for Status {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials(msg) => Status::unauthenticated(msg),
            CredentialError::InvalidInput(msg) => Status::invalid_argument(msg),
            CredentialError::Store(StoreError::Conflict(_)) => {
                Status::already_exists("User already exists")
            }
            CredentialError::Store(StoreError::Unavailable(msg)) => {
                error!("User store unavailable: {}", msg);
                Status::unavailable("User store unavailable")
            }
            // ハッシュや設定のエラーは詳細をクライアントに返さない
            _ => {
                error!("Internal error during credential handling: {:?}", err);
                Status::internal("Internal server error")
            }
        }
    }
}

fn required_email(value: String) -> Result<String, CredentialError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(CredentialError::InvalidInput("email is required".to_string()));
    }
    Ok(email.to_string())
}

// パスワードはそのままハッシュに渡すため trim しない
fn required_password(value: String) -> Result<SecretString, CredentialError> {
    if value.is_empty() {
        return Err(CredentialError::InvalidInput("password is required".to_string()));
    }
    Ok(value.into())
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Registration {
            email: required_email(req.email)?,
            password: required_password(req.password)?,
            name: optional(req.name),
            image: optional(req.image),
        })
    }
}

impl TryFrom<AuthorizeRequest> for Credentials {
    type Error = CredentialError;

    fn try_from(req: AuthorizeRequest) -> Result<Self, Self::Error> {
        Ok(Credentials {
            email: required_email(req.email)?,
            password: required_password(req.password)?,
        })
    }
}

impl From<RegistrationOutcome> for RegisterResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        let result = match outcome {
            RegistrationOutcome::Registered(user) => {
                register_response::Result::User(RegisteredUser {
                    email: user.email,
                    name: user.name,
                    image: user.image,
                })
            }
            RegistrationOutcome::Rejected { error } => register_response::Result::Error(error),
        };
        RegisterResponse {
            result: Some(result),
        }
    }
}

impl<T: CredentialPort> GrpcCredentialService<T> {
    pub fn new(credential_service: Arc<T>) -> Self {
        Self { credential_service }
    }
}

#[tonic::async_trait]
impl<T: CredentialPort + Send + Sync + 'static> AuthService for GrpcCredentialService<T> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let registration = Registration::try_from(request.into_inner())?;

        let outcome = self
            .credential_service
            .register(registration)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(outcome.into()))
    }

    async fn authorize(
        &self,
        request: Request<AuthorizeRequest>,
    ) -> Result<Response<AuthorizeResponse>, Status> {
        let credentials = Credentials::try_from(request.into_inner())?;

        let identity = self
            .credential_service
            .authorize(credentials)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(AuthorizeResponse {
            id: identity.id,
            email: identity.email,
            name: identity.name,
            image: identity.image,
        }))
    }

    async fn describe_credentials(
        &self,
        _request: Request<DescribeCredentialsRequest>,
    ) -> Result<Response<DescribeCredentialsResponse>, Status> {
        let form = self.credential_service.credential_form();

        Ok(Response::new(DescribeCredentialsResponse {
            name: form.name,
            fields: form
                .fields
                .into_iter()
                .map(|field| CredentialField {
                    key: field.key,
                    label: field.label,
                    kind: field.kind.as_str().to_string(),
                })
                .collect(),
        }))
    }
}

pub fn build_service(settings: &Settings) -> Result<CredentialService, CredentialError> {
    let store = store_from_settings(&settings.store)?;
    let hasher = hasher_from_settings(&settings.hashing)?;
    Ok(CredentialService::new(store, hasher))
}

pub async fn start_server(
    config: &Settings,
    shutdown: impl std::future::Future<Output = ()> + Send,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let credential_service = GrpcCredentialService::new(Arc::new(build_service(config)?));

    info!("gRPC server listening on {}", addr);

    Server::builder()
        .add_service(AuthServiceServer::new(credential_service))
        .serve_with_shutdown(addr, shutdown)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use grpc_credentials::auth::adapters::grpc::GrpcCredentialService;
    use grpc_credentials::auth::domain::{
        CredentialError, CredentialResult, Credentials, Identity, RegisteredUser, Registration,
        RegistrationOutcome, StoreError,
    };
    use grpc_credentials::auth::ports::CredentialPort;
    use grpc_credentials::generated::auth::auth_service_server::AuthService;
    use grpc_credentials::generated::auth::{
        register_response, AuthorizeRequest, DescribeCredentialsRequest, RegisterRequest,
    };
    use secrecy::ExposeSecret;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tonic::{Request, Status};

    struct MockCredentialService {
        register_response: Arc<Mutex<Option<CredentialResult<RegistrationOutcome>>>>,
        authorize_response: Arc<Mutex<Option<CredentialResult<Identity>>>>,
        received: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockCredentialService {
        fn new() -> Self {
            Self {
                register_response: Arc::new(Mutex::new(None)),
                authorize_response: Arc::new(Mutex::new(None)),
                received: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn set_register_response(&self, response: CredentialResult<RegistrationOutcome>) {
            *self.register_response.lock().await = Some(response);
        }

        async fn set_authorize_response(&self, response: CredentialResult<Identity>) {
            *self.authorize_response.lock().await = Some(response);
        }
    }

    #[tonic::async_trait]
    impl CredentialPort for MockCredentialService {
        async fn register(
            &self,
            registration: Registration,
        ) -> CredentialResult<RegistrationOutcome> {
            self.received.lock().await.push((
                registration.email,
                registration.password.expose_secret().to_string(),
            ));
            self.register_response
                .lock()
                .await
                .clone()
                .unwrap_or(Err(CredentialError::Hashing("No response set".to_string())))
        }

        async fn authorize(&self, credentials: Credentials) -> CredentialResult<Identity> {
            self.received.lock().await.push((
                credentials.email,
                credentials.password.expose_secret().to_string(),
            ));
            self.authorize_response
                .lock()
                .await
                .clone()
                .unwrap_or(Err(CredentialError::Hashing("No response set".to_string())))
        }
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: Some("A".to_string()),
            image: Some("".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        mock_service
            .set_register_response(Ok(RegistrationOutcome::Registered(RegisteredUser {
                email: "a@x.com".to_string(),
                name: Some("A".to_string()),
                image: None,
            })))
            .await;

        let response = grpc_service
            .register(Request::new(register_request(" a@x.com ", "secret")))
            .await
            .unwrap()
            .into_inner();

        match response.result {
            Some(register_response::Result::User(user)) => {
                assert_eq!(user.email, "a@x.com");
                assert_eq!(user.name.as_deref(), Some("A"));
                assert_eq!(user.image, None);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(
            *mock_service.received.lock().await,
            vec![("a@x.com".to_string(), "secret".to_string())]
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_is_error_payload() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        mock_service
            .set_register_response(Ok(RegistrationOutcome::duplicate()))
            .await;

        let response = grpc_service
            .register(Request::new(register_request("a@x.com", "secret")))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(
            response.result,
            Some(register_response::Result::Error(
                "User already exists".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        let missing_email = grpc_service
            .register(Request::new(register_request("  ", "secret")))
            .await;
        let missing_password = grpc_service
            .register(Request::new(register_request("a@x.com", "")))
            .await;

        assert_eq!(
            missing_email.unwrap_err().code(),
            tonic::Code::InvalidArgument
        );
        assert_eq!(
            missing_password.unwrap_err().code(),
            tonic::Code::InvalidArgument
        );
        assert!(mock_service.received.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_password_passed_through_untrimmed() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        mock_service
            .set_register_response(Ok(RegistrationOutcome::Registered(RegisteredUser {
                email: "a@x.com".to_string(),
                name: Some("A".to_string()),
                image: None,
            })))
            .await;
        mock_service
            .set_authorize_response(Err(CredentialError::InvalidCredentials(
                "Password Invalid".to_string(),
            )))
            .await;

        let registered = grpc_service
            .register(Request::new(register_request("a@x.com", "   ")))
            .await;
        let authorized = grpc_service
            .authorize(Request::new(AuthorizeRequest {
                email: "a@x.com".to_string(),
                password: " secret ".to_string(),
            }))
            .await;

        assert!(registered.is_ok());
        assert_eq!(
            authorized.unwrap_err().code(),
            tonic::Code::Unauthenticated
        );
        assert_eq!(
            *mock_service.received.lock().await,
            vec![
                ("a@x.com".to_string(), "   ".to_string()),
                ("a@x.com".to_string(), " secret ".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_authorize_success() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        mock_service
            .set_authorize_response(Ok(Identity {
                email: "a@x.com".to_string(),
                name: Some("A".to_string()),
                image: None,
                id: "user-1".to_string(),
            }))
            .await;

        let response = grpc_service
            .authorize(Request::new(AuthorizeRequest {
                email: "a@x.com".to_string(),
                password: "secret".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.id, "user-1");
        assert_eq!(response.email, "a@x.com");
        assert_eq!(response.name.as_deref(), Some("A"));
        assert_eq!(response.image, None);
    }

    #[tokio::test]
    async fn test_authorize_invalid_credentials() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service.clone());

        mock_service
            .set_authorize_response(Err(CredentialError::InvalidCredentials(
                "Password Invalid".to_string(),
            )))
            .await;

        let status = grpc_service
            .authorize(Request::new(AuthorizeRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), "Password Invalid");
    }

    #[tokio::test]
    async fn test_describe_credentials() {
        let mock_service = Arc::new(MockCredentialService::new());
        let grpc_service = GrpcCredentialService::new(mock_service);

        let response = grpc_service
            .describe_credentials(Request::new(DescribeCredentialsRequest {}))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.name, "Credentials");
        let fields: Vec<(&str, &str, &str)> = response
            .fields
            .iter()
            .map(|f| (f.key.as_str(), f.label.as_str(), f.kind.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![("email", "Email", "text"), ("password", "Password", "password")]
        );
    }

    #[test]
    fn test_credential_error_to_status_conversion() {
        assert_eq!(
            Status::from(CredentialError::InvalidCredentials("Email does not exist".to_string()))
                .code(),
            tonic::Code::Unauthenticated
        );
        assert_eq!(
            Status::from(CredentialError::InvalidInput("email is required".to_string())).code(),
            tonic::Code::InvalidArgument
        );
        assert_eq!(
            Status::from(CredentialError::Store(StoreError::Conflict("dup".to_string()))).code(),
            tonic::Code::AlreadyExists
        );
        assert_eq!(
            Status::from(CredentialError::Store(StoreError::Unavailable("down".to_string())))
                .code(),
            tonic::Code::Unavailable
        );

        // 内部エラーの詳細は返さない
        let status = Status::from(CredentialError::Hashing("argon2 failure".to_string()));
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "Internal server error");
    }
}

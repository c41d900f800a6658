use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::domain::{NewUser, StoreError, StoreResult, UserDocument};
use crate::auth::ports::UserStorePort;
use crate::config::SanityConfig;

const USER_BY_EMAIL_QUERY: &str = r#"*[_type == "user" && email == $email][0]"#;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Sanity の HTTP API を使うユーザーストア
pub struct SanityUserStore {
    http_client: HttpClient,
    config: SanityConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SanityUser {
    #[serde(rename = "_id")]
    id: String,
    email: String,
    password: String,
    name: Option<String>,
    image: Option<String>,
}

impl From<SanityUser> for UserDocument {
    fn from(user: SanityUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password_hash: user.password,
            name: user.name,
            image: user.image,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateUser<'a> {
    #[serde(rename = "_type")]
    doc_type: &'static str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Mutation<'a> {
    create: CreateUser<'a>,
}

#[derive(Debug, Serialize)]
struct MutateRequest<'a> {
    mutations: Vec<Mutation<'a>>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Option<SanityUser>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    document: Option<SanityUser>,
}

/// `returnDocuments=true` の場合、作成されたドキュメントは `results[].document` に入る
#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

impl SanityUserStore {
    pub fn new(config: SanityConfig) -> StoreResult<Self> {
        if config.project_id.is_empty() || config.dataset.is_empty() {
            return Err(StoreError::Config(
                "project_id and dataset are required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            base_url: Self::base_url(&config),
            http_client,
            config,
        })
    }

    fn base_url(config: &SanityConfig) -> String {
        let origin = match &config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", config.project_id),
        };
        format!("{}/v{}", origin, config.api_version)
    }

    fn query_url(&self) -> String {
        format!("{}/data/query/{}", self.base_url, self.config.dataset)
    }

    fn mutate_url(&self) -> String {
        format!("{}/data/mutate/{}", self.base_url, self.config.dataset)
    }

    async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Sanity request failed: {} {}", status, body);
        if status == reqwest::StatusCode::CONFLICT {
            Err(StoreError::Conflict(body))
        } else {
            Err(StoreError::Unavailable(format!("{}: {}", status, body)))
        }
    }
}

#[async_trait]
impl UserStorePort for SanityUserStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserDocument>> {
        // GROQ のパラメータは JSON 値として渡す
        let email_param =
            serde_json::to_string(email).map_err(|e| StoreError::Malformed(e.to_string()))?;

        let response = self
            .http_client
            .get(self.query_url())
            .bearer_auth(&self.config.token)
            .query(&[("query", USER_BY_EMAIL_QUERY), ("$email", email_param.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let body: QueryResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        Ok(body.result.map(UserDocument::from))
    }

    async fn create(&self, user: NewUser) -> StoreResult<UserDocument> {
        info!("Creating user document in dataset {}", self.config.dataset);

        let request = MutateRequest {
            mutations: vec![Mutation {
                create: CreateUser {
                    doc_type: "user",
                    email: &user.email,
                    password: &user.password_hash,
                    name: user.name.as_deref(),
                    image: user.image.as_deref(),
                },
            }],
        };

        let response = self
            .http_client
            .post(self.mutate_url())
            .bearer_auth(&self.config.token)
            .query(&[("returnDocuments", "true")])
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let body: MutateResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        body.results
            .into_iter()
            .next()
            .and_then(|result| result.document)
            .map(UserDocument::from)
            .ok_or_else(|| StoreError::Malformed("mutation returned no document".to_string()))
    }
}

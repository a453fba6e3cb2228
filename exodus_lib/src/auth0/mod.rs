use serde::{Deserialize, Serialize};

use crate::config::Config;

mod error;
pub use error::Error;

/// One record of the bulk import payload, shaped the way Auth0's
/// users-import job expects it.
#[derive(Debug, Clone, Serialize)]
pub struct ImportUser {
    pub username: String,
    pub email: String,
    pub custom_password_hash: CustomPasswordHash,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomPasswordHash {
    pub algorithm: &'static str,
    pub hash: HashValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct HashValue {
    pub value: String,
    pub encoding: &'static str,
}

impl ImportUser {
    #[must_use]
    pub fn new(username: String, email: String, phc: String) -> Self {
        Self {
            username,
            email,
            custom_password_hash: CustomPasswordHash {
                algorithm: "pbkdf2",
                hash: HashValue {
                    value: phc,
                    encoding: "utf8",
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Management API client for one tenant, holding the token obtained on
/// construction. The tenant domain is threaded through explicitly.
pub struct Client {
    http: reqwest::Client,
    domain: String,
    token: String,
}

impl Client {
    /// Exchanges the client credentials for a management API token.
    pub async fn authenticate(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::new();

        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: &config.client_id,
            client_secret: &config.client_secret,
            audience: &config.audience,
        };

        let response = http
            .post(format!("https://{}/oauth/token", config.domain))
            .json(&request)
            .send()
            .await?;

        let token: TokenResponse = success(response).await?.json().await?;

        log::info!("Authenticated against tenant {}", config.domain);

        Ok(Self {
            http,
            domain: config.domain.clone(),
            token: token.access_token,
        })
    }

    /// Submits all users as a single bulk import job.
    pub async fn import_users(
        &self,
        connection_id: &str,
        users: &[ImportUser],
    ) -> Result<Job, Error> {
        let payload = serde_json::to_vec(users)?;

        let file = reqwest::multipart::Part::bytes(payload)
            .file_name("users.json")
            .mime_str("application/json")?;

        let form = reqwest::multipart::Form::new()
            .text("connection_id", connection_id.to_owned())
            .part("users", file);

        let response = self
            .http
            .post(format!("https://{}/api/v2/jobs/users-imports", self.domain))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        Ok(success(response).await?.json().await?)
    }

    /// Creates one role. Calls are issued sequentially by the caller.
    pub async fn create_role(&self, name: &str, description: &str) -> Result<Role, Error> {
        let body = serde_json::json!({
            "name": name,
            "description": description,
        });

        let response = self
            .http
            .post(format!("https://{}/api/v2/roles", self.domain))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        Ok(success(response).await?.json().await?)
    }
}

async fn success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(Error::Api { status, body })
}

use bytes::Bytes;
use kiln_config::DropboxConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::http::{API_ARG_HEADER, api_arg, check_response};

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Authenticated handle to the Dropbox API.
#[derive(Debug, Clone)]
pub struct DropboxClient {
    http: reqwest::Client,
    access_token: String,
    api_url: String,
    content_url: String,
}

impl DropboxClient {
    /// Exchange the configured refresh token for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Auth`] if Dropbox rejects the credentials, or
    /// [`StorageError::Http`] on transport failure.
    pub async fn connect(
        config: &DropboxConfig,
        http: reqwest::Client,
    ) -> Result<Self, StorageError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", config.refresh_token.as_str()),
            ("client_id", config.app_key.as_str()),
            ("client_secret", config.app_secret.as_str()),
        ];
        let resp = http.post(&config.oauth_url).form(&params).send().await?;
        if resp.status().is_client_error() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Auth(format!(
                "token exchange: HTTP {status}: {body}"
            )));
        }
        let token: TokenResponse = check_response(resp).await?.json().await?;
        tracing::debug!(expires_in = ?token.expires_in, "obtained dropbox access token");

        Ok(Self::with_access_token(
            http,
            token.access_token,
            &config.api_url,
            &config.content_url,
        ))
    }

    /// Build a client around an already-minted access token.
    #[must_use]
    pub fn with_access_token(
        http: reqwest::Client,
        access_token: String,
        api_url: &str,
        content_url: &str,
    ) -> Self {
        Self {
            http,
            access_token,
            api_url: api_url.trim_end_matches('/').to_string(),
            content_url: content_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a JSON argument to an RPC endpoint and decode the JSON result.
    pub(crate) async fn rpc<A, R>(&self, endpoint: &str, arg: &A) -> Result<R, StorageError>
    where
        A: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.api_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(arg)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| StorageError::Parse(format!("{endpoint}: {e}")))
    }

    /// POST raw bytes to a content-upload endpoint.
    pub(crate) async fn content_upload<A, R>(
        &self,
        endpoint: &str,
        arg: &A,
        body: Bytes,
    ) -> Result<R, StorageError>
    where
        A: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.content_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(API_ARG_HEADER, api_arg(arg)?)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let text = resp.text().await?;
        // append_v2 answers with an empty body
        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|e| StorageError::Parse(format!("{endpoint}: {e}")))
    }

    /// POST to a content-download endpoint and return the body bytes.
    pub(crate) async fn content_download<A>(
        &self,
        endpoint: &str,
        arg: &A,
    ) -> Result<Bytes, StorageError>
    where
        A: Serialize + Sync,
    {
        let url = format!("{}/{endpoint}", self.content_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(API_ARG_HEADER, api_arg(arg)?)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.bytes().await?)
    }
}

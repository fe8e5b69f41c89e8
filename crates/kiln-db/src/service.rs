//! Backend handle shared by the table modules.
//!
//! `KilnDb` wraps the PostgREST base URL, the project API key, and an
//! optional user access token. All table methods are implemented as
//! `impl KilnDb` blocks under `repos`.

use kiln_config::SupabaseConfig;

/// Asks PostgREST to echo inserted or updated rows.
pub(crate) const RETURN_REPRESENTATION: &str = "return=representation";

/// Handle to the Supabase REST API.
#[derive(Debug, Clone)]
pub struct KilnDb {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl KilnDb {
    #[must_use]
    pub fn new(project_url: &str, api_key: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            access_token: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &SupabaseConfig, http: reqwest::Client) -> Self {
        Self::new(config.base_url(), &config.key, http)
    }

    /// Run subsequent requests as the signed-in user instead of the project key.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub(crate) fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    /// Start a request against `table` with the auth headers applied.
    pub(crate) fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }
}

use tracing::debug;

use super::{ApiResponse, ClientConfig, ListParams};

/// Oomnitza doesn't use the standard `Authorization` header.
/// Instead, the API key is passed as-is within this one.
pub const AUTHORIZATION_HEADER: &str = "Authorization2";

#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The API root every request is made relative to.
    base_url: String,
    /// The API key sent alongside every request.
    api_key: String,
    /// The shared HTTP client, reused across requests.
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a new API client for the given organization.
    ///
    /// This can only fail if the underlying HTTP client cannot be created.
    pub fn new(
        organization_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::from_config(ClientConfig::new(organization_name, api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let base_url = config.base_url();
        Self::with_base_url(base_url, config.api_key)
    }

    /// Creates a client against an arbitrary API root, such as `http://localhost:8080/api/v3`.
    /// The root is used as given: it should not carry a trailing slash.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL used by [`ApiClient::list_assets`].
    pub fn assets_url(&self, params: &ListParams) -> String {
        format!("{}/assets/?{}", self.base_url, params.to_query_string())
    }

    /// The URL used by [`ApiClient::get_asset`].
    ///
    /// Note that this is relative to the API root, and not `/assets/`.
    /// Oomnitza's own documentation places single assets under `/assets/{id}`;
    /// callers that need that path can pass `assets/{id}` as the ID.
    pub fn asset_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Lists a single page of assets.
    pub async fn list_assets(&self, params: &ListParams) -> Result<ApiResponse, reqwest::Error> {
        self.get(&self.assets_url(params)).await
    }

    /// Retrieves a single asset by its ID (the `equipment_id` field).
    pub async fn get_asset(&self, id: &str) -> Result<ApiResponse, reqwest::Error> {
        self.get(&self.asset_url(id)).await
    }

    /// Makes an authenticated GET request, expecting a JSON body in return.
    ///
    /// Any non-2xx status is turned into an error by reqwest itself,
    /// as is a body that fails to parse as JSON.
    async fn get(&self, url: &str) -> Result<ApiResponse, reqwest::Error> {
        debug!(url = %url, "GET request");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %response.status(), "GET response");

        ApiResponse::from_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> ApiClient {
        ApiClient::new("acme", "key123").unwrap()
    }

    #[test]
    fn new_derives_base_url() {
        assert_eq!(acme().base_url(), "https://acme.oomnitza.com/api/v3");
    }

    #[test]
    fn assets_url_matches_documented_example() {
        let params = ListParams {
            fields: "name".to_string(),
            skip: 0,
            limit: 200,
            sort_by: "name".to_string(),
        };
        assert_eq!(
            acme().assets_url(&params),
            "https://acme.oomnitza.com/api/v3/assets/?fields=name&skip=0&limit=200&sortby=name"
        );
    }

    #[test]
    fn asset_url_skips_assets_segment() {
        assert_eq!(acme().asset_url("42"), "https://acme.oomnitza.com/api/v3/42");
    }

    #[test]
    fn with_base_url_is_used_verbatim() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9000/api/v3", "key").unwrap();
        assert_eq!(client.asset_url("abc"), "http://127.0.0.1:9000/api/v3/abc");
    }
}

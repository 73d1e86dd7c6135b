use reqwest::{header::HeaderMap, StatusCode};
use url::Url;

/// A successful response from the Oomnitza API.
///
/// The body is kept as raw JSON; its shape is up to Oomnitza.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// The final URL, after any redirects were followed.
    pub url: Url,
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Reads the status, headers and JSON body off of a response.
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.json().await?;

        Ok(Self {
            status,
            headers,
            url,
            body,
        })
    }
}

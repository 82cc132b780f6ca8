use crate::config::ResolvedContext;
use crate::error::ApiError;
use anyhow::Result;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};

const USER_AGENT: &str = concat!("cloudctl/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the cloud API.
///
/// One instance is built per invocation and handed to the command handlers.
/// Every method issues exactly one request and never retries.
pub struct CloudClient {
    pub base_url: String,
    client: Client,
}

impl CloudClient {
    pub fn new(ctx: &ResolvedContext) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &ctx.token {
            let mut hv = HeaderValue::from_str(&format!("Bearer {token}"))?;
            hv.set_sensitive(true);
            headers.insert(AUTHORIZATION, hv);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(CloudClient {
            base_url: ctx.url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let req = self.client.request(Method::GET, &url);
        self.execute(Method::GET, url, req).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let req = self.client.request(Method::DELETE, &url);
        self.execute(Method::DELETE, url, req).await
    }

    /// Send `body` as JSON with the given method.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let req = self.client.request(method.clone(), &url).json(body);
        self.execute(method, url, req).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(%method, %url, "sending request");
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };
        tracing::debug!(%status, bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

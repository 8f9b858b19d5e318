//! REST client for the student and course collections
//!
//! Every call maps onto one request against `{base}/{collection}` or
//! `{base}/{collection}/{id}`. No retries, no caching, no timeouts: failures
//! are returned to the caller as [`ApiError`].

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::{Entity, RecordId};
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the API rooted at `base_url` (trailing slash optional).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/{collection}`
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, ApiError> {
        let body = self
            .send(Method::GET, self.collection_url::<E>(), None::<&()>)
            .await?;
        decode(&body)
    }

    /// `GET {base}/{collection}/{id}`
    pub async fn get<E: Entity>(&self, id: &RecordId) -> Result<E, ApiError> {
        let body = self
            .send(Method::GET, self.record_url::<E>(id), None::<&()>)
            .await?;
        decode(&body)
    }

    /// `POST {base}/{collection}` with the business fields as JSON.
    pub async fn create<E: Entity>(&self, fields: &E::Fields) -> Result<E, ApiError> {
        let body = self
            .send(Method::POST, self.collection_url::<E>(), Some(fields))
            .await?;
        decode(&body)
    }

    /// `PUT {base}/{collection}/{id}`; the id travels in the path only.
    pub async fn update<E: Entity>(
        &self,
        id: &RecordId,
        fields: &E::Fields,
    ) -> Result<E, ApiError> {
        let body = self
            .send(Method::PUT, self.record_url::<E>(id), Some(fields))
            .await?;
        decode(&body)
    }

    /// `DELETE {base}/{collection}/{id}`. Any success body is ignored.
    pub async fn delete<E: Entity>(&self, id: &RecordId) -> Result<(), ApiError> {
        self.send(Method::DELETE, self.record_url::<E>(id), None::<&()>)
            .await
            .map(drop)
    }

    fn collection_url<E: Entity>(&self) -> String {
        format!("{}/{}", self.base_url, E::KIND.collection())
    }

    fn record_url<E: Entity>(&self, id: &RecordId) -> String {
        format!(
            "{}/{}",
            self.collection_url::<E>(),
            urlencoding::encode(id.as_str())
        )
    }

    /// Send one request and return the body text of a 2xx response.
    async fn send<B>(&self, method: Method, url: String, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(ApiError::Request {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::trace!(status = status.as_u16(), bytes = text.len(), "api response");
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

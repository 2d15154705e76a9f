use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, ApiResult, ClientService};
use crate::config::Config;
use crate::models::{Client, NewClient};

const CLIENTS_PATH: &str = "/api/clients";

/// `ClientService` backed by a reqwest connection pool.
#[derive(Clone)]
pub struct HttpClientService {
    http: reqwest::Client,
    clients_url: String,
}

impl HttpClientService {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            clients_url: format!("{}{}", base_url.trim_end_matches('/'), CLIENTS_PATH),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn clients_url(&self) -> &str {
        &self.clients_url
    }

    fn client_url(&self, id: i32) -> String {
        format!("{}/{}", self.clients_url, id)
    }

    /// Send one request and return the status and body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<(StatusCode, String)> {
        let request = request.build().map_err(ApiError::Network)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.http.execute(request).await.map_err(|err| {
            warn!(%method, %url, error = %err, "request failed");
            ApiError::Network(err)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;
        debug!(%method, %url, %status, bytes = body.len(), "received response");

        if !status.is_success() {
            let err = ApiError::from_status(status, &body);
            warn!(%method, %url, %status, error = %err, "backend rejected request");
            return Err(err);
        }

        Ok((status, body))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl ClientService for HttpClientService {
    async fn list_clients(&self) -> ApiResult<Vec<Client>> {
        let (_, body) = self.execute(self.http.get(&self.clients_url)).await?;
        decode(&body)
    }

    async fn get_client(&self, id: i32) -> ApiResult<Client> {
        let (_, body) = self.execute(self.http.get(self.client_url(id))).await?;
        decode(&body)
    }

    async fn create_client(&self, client: &NewClient) -> ApiResult<Client> {
        let (_, body) = self
            .execute(self.http.post(&self.clients_url).json(client))
            .await?;
        decode(&body)
    }

    async fn update_client(&self, id: i32, client: &Client) -> ApiResult<Client> {
        let (status, body) = self
            .execute(self.http.put(self.client_url(id)).json(client))
            .await?;

        // Some backends answer a PUT with 204 and no body.
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(client.clone());
        }
        decode(&body)
    }

    async fn delete_client(&self, id: i32) -> ApiResult<()> {
        self.execute(self.http.delete(self.client_url(id))).await?;
        Ok(())
    }
}

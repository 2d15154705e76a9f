//! REST client for the `/api/clients` resource.

mod error;
mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{Client, NewClient};

pub use error::ApiError;
pub use http::HttpClientService;

pub type ApiResult<T> = Result<T, ApiError>;

/// The five client operations the screens depend on.
///
/// Each call is a single round trip: no retries, caching or deduplication.
#[async_trait]
pub trait ClientService: Send + Sync {
    async fn list_clients(&self) -> ApiResult<Vec<Client>>;

    async fn get_client(&self, id: i32) -> ApiResult<Client>;

    async fn create_client(&self, client: &NewClient) -> ApiResult<Client>;

    async fn update_client(&self, id: i32, client: &Client) -> ApiResult<Client>;

    async fn delete_client(&self, id: i32) -> ApiResult<()>;
}

pub type DynClientService = Arc<dyn ClientService>;

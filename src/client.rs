//! HTTP client for the rental backend
//!
//! Wraps a `reqwest::Client` with the base URL of the backend and exposes one
//! method per endpoint. Every method returns [`ApiError`] on failure; none of
//! them retry.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{
    Customer, CustomerPayload, Page, PageRequest, RecordId, RentalPayload, RentalRecord,
    RentalStatus, StatusChange,
};

pub const CUSTOMERS: &str = "clientes";
pub const CUSTOMER_SEARCH: &str = "clientes/buscarNome";
pub const RENTALS: &str = "fliperamas";
pub const RENTED: &str = "fliperamas/alugados";
pub const CANCELLED: &str = "fliperamas/cancelados";

/// Client for the `/clientes` and `/fliperamas` endpoints
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of a collection
    ///
    /// Sends `GET {base}/{resource_path}?page=..&size=..` followed by any
    /// `extra_query` pairs (e.g. `nome` for the name search).
    pub async fn load_page<T>(
        &self,
        resource_path: &str,
        request: PageRequest,
        extra_query: &[(String, String)],
    ) -> Result<Page<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut query = vec![
            ("page".to_string(), request.page.to_string()),
            ("size".to_string(), request.size.to_string()),
        ];
        query.extend(extra_query.iter().cloned());

        let builder = self.request(Method::GET, resource_path).query(&query);
        let response = send(builder).await?;

        Ok(response.json::<Page<T>>().await?)
    }

    /// Checks whether the backend answers at all
    ///
    /// Asks for the smallest possible customer page and reports success only
    /// for a 2xx answer.
    pub async fn ping(&self) -> bool {
        let builder = self
            .request(Method::GET, CUSTOMERS)
            .query(&[("page", "0"), ("size", "1")]);

        match builder.send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::warn!("backend is not responding: {}", err);
                false
            }
        }
    }

    pub async fn get_customer(&self, id: RecordId) -> Result<Customer, ApiError> {
        let builder = self.request(Method::GET, &format!("{}/{}", CUSTOMERS, id));
        let response = send(builder).await?;

        Ok(response.json().await?)
    }

    /// Customers whose name contains `name`
    pub async fn search_customers(
        &self,
        name: &str,
        request: PageRequest,
    ) -> Result<Page<Customer>, ApiError> {
        let filter = [("nome".to_string(), name.to_string())];
        self.load_page(CUSTOMER_SEARCH, request, &filter).await
    }

    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        self.send_json(Method::POST, CUSTOMERS, payload).await
    }

    pub async fn update_customer(
        &self,
        id: RecordId,
        payload: &CustomerPayload,
    ) -> Result<Customer, ApiError> {
        self.send_json(Method::PUT, &format!("{}/{}", CUSTOMERS, id), payload)
            .await
    }

    pub async fn delete_customer(&self, id: RecordId) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("{}/{}", CUSTOMERS, id));
        send(builder).await?;

        Ok(())
    }

    /// Registers a new cabinet rental owned by `customer_id`
    pub async fn create_rental(
        &self,
        customer_id: RecordId,
        payload: &RentalPayload,
    ) -> Result<RentalRecord, ApiError> {
        self.send_json(Method::POST, &format!("{}/{}", RENTALS, customer_id), payload)
            .await
    }

    /// Asks the backend to move a record to `LOCADO`
    pub async fn rent(&self, id: RecordId) -> Result<(), ApiError> {
        self.change_status("locar", id, RentalStatus::Rented).await
    }

    /// Asks the backend to move a record to `CANCELADO`
    pub async fn cancel(&self, id: RecordId) -> Result<(), ApiError> {
        self.change_status("cancelar", id, RentalStatus::Cancelled)
            .await
    }

    async fn change_status(
        &self,
        action: &str,
        id: RecordId,
        target: RentalStatus,
    ) -> Result<(), ApiError> {
        let body = StatusChange {
            id,
            status: target.wire_name(),
        };
        let builder = self
            .request(Method::PUT, &format!("{}/{}/{}", RENTALS, action, id))
            .json(&body);

        // The updated record may or may not come back; only the status matters.
        send(builder).await?;

        Ok(())
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).json(body);
        let response = send(builder).await?;

        Ok(response.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http.request(method, url)
    }
}

/// Sends the request and turns non-success statuses into [`ApiError::Server`]
async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(ApiError::from)?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    tracing::debug!("backend answered {}: {}", status, err);

    Err(err)
}

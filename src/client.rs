// Lygos HTTP client

use crate::errors::LygosError;
use crate::models::{
    generate_order_id, CreateGateway, Gateway, GatewayField, GatewayUpdate, PayinStatus,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Lygos API endpoint
pub const DEFAULT_API_URL: &str = "https://api.lygosapp.com/v1/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Bodyless request marker for the generic `send` helper.
const NO_BODY: Option<&()> = None;

/// Client for the Lygos payment gateway API.
///
/// Holds the API key and base URL, both immutable after construction.
/// Every operation performs one HTTP round trip (batch variants loop
/// sequentially over the single-item operation) and is attempted
/// exactly once: no retries, no backoff. The client can be shared
/// across tasks; the underlying `reqwest::Client` is cheap to clone.
///
/// # Example
/// ```no_run
/// # use lygos_client::{LygosClient, CreateGateway};
/// # async fn run() -> Result<(), lygos_client::LygosError> {
/// let lygos = LygosClient::new("your_api_key")?;
/// let gateway = lygos
///     .create_gateway(CreateGateway::new(1000, "Mon Shop"))
///     .await?;
/// println!("{:?}", gateway.link);
/// # Ok(())
/// # }
/// ```
pub struct LygosClient {
    http: reqwest::Client,
    base_url: String,
    order_id_gen: fn() -> String,
}

/// Builder for [`LygosClient`] with a custom API URL, request timeout
/// or order-id generator.
pub struct ClientBuilder {
    api_key: String,
    api_url: String,
    timeout: Duration,
    order_id_gen: fn() -> String,
}

impl ClientBuilder {
    /// Override the base API URL (e.g. a staging endpoint).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the per-request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Substitute the order-id generator used when a create request
    /// carries no `order_id`. Defaults to [`generate_order_id`].
    /// Mainly useful for deterministic tests.
    pub fn order_id_generator(mut self, generator: fn() -> String) -> Self {
        self.order_id_gen = generator;
        self
    }

    pub fn build(self) -> Result<LygosClient, LygosError> {
        if self.api_key.trim().is_empty() {
            return Err(LygosError::Config(
                "an api key is required to initialize the client".to_string(),
            ));
        }

        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            LygosError::Config("api key contains characters not allowed in a header".to_string())
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("api-key", api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("lygos-client-rs/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|err| LygosError::Config(err.to_string()))?;

        Ok(LygosClient {
            http,
            base_url: self.api_url,
            order_id_gen: self.order_id_gen,
        })
    }
}

impl LygosClient {
    /// Create a client for the default API endpoint.
    ///
    /// Fails with [`LygosError::Config`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LygosError> {
        Self::builder(api_key).build()
    }

    /// Start building a client with non-default settings.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            order_id_gen: generate_order_id,
        }
    }

    /// The base API URL this client talks to.
    pub fn api_url(&self) -> &str {
        &self.base_url
    }

    // --- Gateway operations ---

    /// List all payment gateways.
    pub async fn list_gateways(&self) -> Result<Vec<Gateway>, LygosError> {
        let response = self.send(Method::GET, "gateway", NO_BODY).await?;
        decode(response).await
    }

    /// Create a single payment gateway.
    ///
    /// If `request.order_id` is unset, a client-side order id is
    /// generated before sending, so the request body always carries one.
    pub async fn create_gateway(&self, mut request: CreateGateway) -> Result<Gateway, LygosError> {
        if request.order_id.is_none() {
            request.order_id = Some((self.order_id_gen)());
        }
        let response = self.send(Method::POST, "gateway", Some(&request)).await?;
        decode(response).await
    }

    /// Create several gateways with sequential POST calls.
    ///
    /// Fail-fast: the first error aborts the remaining items; gateways
    /// already created stay created.
    pub async fn create_gateways_batch(
        &self,
        requests: Vec<CreateGateway>,
    ) -> Result<Vec<Gateway>, LygosError> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(self.create_gateway(request).await?);
        }
        Ok(created)
    }

    /// Fetch a single gateway by id (`gw_...`).
    pub async fn get_gateway(&self, gateway_id: &str) -> Result<Gateway, LygosError> {
        let response = self
            .send(Method::GET, &format!("gateway/{}", gateway_id), NO_BODY)
            .await?;
        decode(response).await
    }

    /// Fetch several gateways with sequential GET calls, fail-fast.
    pub async fn get_gateways_batch(
        &self,
        gateway_ids: &[impl AsRef<str>],
    ) -> Result<Vec<Gateway>, LygosError> {
        let mut gateways = Vec::with_capacity(gateway_ids.len());
        for gateway_id in gateway_ids {
            gateways.push(self.get_gateway(gateway_id.as_ref()).await?);
        }
        Ok(gateways)
    }

    /// Update a gateway, sending only the fields set on `update`.
    ///
    /// Rejected client-side with [`LygosError::EmptyUpdate`] when no
    /// field is set.
    pub async fn update_gateway(
        &self,
        gateway_id: &str,
        update: GatewayUpdate,
    ) -> Result<Gateway, LygosError> {
        if update.is_empty() {
            return Err(LygosError::EmptyUpdate);
        }
        let response = self
            .send(Method::PUT, &format!("gateway/{}", gateway_id), Some(&update))
            .await?;
        decode(response).await
    }

    /// Update several gateways with sequential PUT calls, fail-fast.
    /// Results come back in input order.
    pub async fn update_gateways_batch(
        &self,
        updates: Vec<(String, GatewayUpdate)>,
    ) -> Result<Vec<Gateway>, LygosError> {
        let mut updated = Vec::with_capacity(updates.len());
        for (gateway_id, update) in updates {
            updated.push(self.update_gateway(&gateway_id, update).await?);
        }
        Ok(updated)
    }

    /// Delete a gateway. The API answers 204 No Content on success.
    pub async fn delete_gateway(&self, gateway_id: &str) -> Result<(), LygosError> {
        self.send(Method::DELETE, &format!("gateway/{}", gateway_id), NO_BODY)
            .await?;
        Ok(())
    }

    /// Delete several gateways with sequential DELETE calls, fail-fast.
    pub async fn delete_gateways_batch(
        &self,
        gateway_ids: &[impl AsRef<str>],
    ) -> Result<(), LygosError> {
        for gateway_id in gateway_ids {
            self.delete_gateway(gateway_id.as_ref()).await?;
        }
        Ok(())
    }

    // --- Payin operations ---

    /// Fetch the completion status of a payin transaction by order id.
    pub async fn get_payin_status(&self, order_id: &str) -> Result<PayinStatus, LygosError> {
        let response = self
            .send(Method::GET, &format!("gateway/payin/{}", order_id), NO_BODY)
            .await?;
        decode(response).await
    }

    // --- Field accessors ---

    /// Fetch a gateway and project a single field as `{field: value}`.
    ///
    /// There is no dedicated endpoint; this fetches the full resource
    /// and projects one field. A field absent from the response
    /// projects as JSON null.
    pub async fn get_field(
        &self,
        gateway_id: &str,
        field: GatewayField,
    ) -> Result<Value, LygosError> {
        let gateway = self.get_gateway(gateway_id).await?;
        let mut projection = Map::new();
        projection.insert(field.as_str().to_string(), gateway.field_value(field));
        Ok(Value::Object(projection))
    }

    /// `{"link": ...}` for the given gateway.
    pub async fn get_link(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::Link).await
    }

    /// `{"amount": ...}` for the given gateway.
    pub async fn get_amount(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::Amount).await
    }

    /// `{"shop_name": ...}` for the given gateway.
    pub async fn get_shop_name(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::ShopName).await
    }

    /// `{"message": ...}` for the given gateway.
    pub async fn get_message(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::Message).await
    }

    /// `{"user_country": ...}` for the given gateway.
    pub async fn get_user_country(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::UserCountry).await
    }

    /// `{"creation_date": ...}` for the given gateway.
    pub async fn get_creation_date(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::CreationDate).await
    }

    /// `{"order_id": ...}` for the given gateway.
    pub async fn get_order_id(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::OrderId).await
    }

    /// `{"success_url": ...}` for the given gateway.
    pub async fn get_success_url(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::SuccessUrl).await
    }

    /// `{"failure_url": ...}` for the given gateway.
    pub async fn get_failure_url(&self, gateway_id: &str) -> Result<Value, LygosError> {
        self.get_field(gateway_id, GatewayField::FailureUrl).await
    }

    // --- Internals ---

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Central request method: sends one HTTP request and maps any
    /// non-2xx response to the matching [`LygosError`] variant.
    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, LygosError> {
        let url = self.endpoint(path);
        debug!(%method, %url, "lygos api request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        warn!(status = status.as_u16(), %url, %message, "lygos api error");
        Err(LygosError::from_status(status.as_u16(), message))
    }
}

/// Decode a 2xx response body as JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LygosError> {
    response
        .json()
        .await
        .map_err(|err| LygosError::Decode(err.to_string()))
}

/// Extract a human-readable message from an error response body.
///
/// Prefers the JSON shape `{"message": .., "details": ..}` the API
/// documents, falls back to the raw body, then to the status reason.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<Value>(&raw) {
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            return match body.get("details").and_then(Value::as_str) {
                Some(details) => format!("{}: {}", message, details),
                None => message.to_string(),
            };
        }
    }

    if raw.is_empty() {
        canonical_reason(status)
    } else {
        raw
    }
}

fn canonical_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LygosClient::new("test_api_key");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_client_creation_requires_api_key() {
        assert!(matches!(
            LygosClient::new(""),
            Err(LygosError::Config(_))
        ));
        assert!(matches!(
            LygosClient::new("   "),
            Err(LygosError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_join_is_trailing_slash_tolerant() {
        let with_slash = LygosClient::builder("key")
            .api_url("https://api.lygosapp.com/v1/")
            .build()
            .unwrap();
        let without_slash = LygosClient::builder("key")
            .api_url("https://api.lygosapp.com/v1")
            .build()
            .unwrap();

        assert_eq!(
            with_slash.endpoint("gateway"),
            "https://api.lygosapp.com/v1/gateway"
        );
        assert_eq!(
            without_slash.endpoint("gateway/gw_123"),
            "https://api.lygosapp.com/v1/gateway/gw_123"
        );
    }
}

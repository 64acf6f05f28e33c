//! Indodax REST API client implementation.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::auth::{
    CredentialsProvider, next_nonce, nonce_storage_key, parse_server_nonce_hint, sign_form,
    unix_millis,
};
use crate::error::{ApiError, IndodaxError};
use crate::rest::endpoints::{INDODAX_BASE_URL, PUBLIC_API_PATH, TAPI_PATH};
use crate::rest::payload::Payload;
use crate::store::{KeyValueStore, MemoryStore};

/// Number of automatic resends allowed after an `invalid_nonce` rejection.
pub const DEFAULT_NONCE_RETRY_BUDGET: u32 = 5;

/// The Indodax REST API client.
///
/// Public market-data endpoints work on a freshly built client; private
/// (`tapi`) endpoints additionally need credentials and use a persisted,
/// strictly increasing nonce that survives process restarts when a durable
/// [`KeyValueStore`] is configured.
///
/// # Example
///
/// ```rust,no_run
/// use indodax_api_client::rest::IndodaxRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = IndodaxRestClient::new();
///     let ticker = client.ticker("btc_idr").await?;
///     println!("last: {}", ticker.last);
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials (and usually a file store):
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use indodax_api_client::auth::StaticCredentials;
/// use indodax_api_client::rest::IndodaxRestClient;
/// use indodax_api_client::store::FileStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStore::open("/tmp/indodax-state").await?;
///     let client = IndodaxRestClient::builder()
///         .credentials(Arc::new(StaticCredentials::new("api_key", "api_secret")))
///         .store(Arc::new(store))
///         .build();
///
///     let info = client.get_info().await?;
///     println!("balances: {:?}", info.balance);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct IndodaxRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-nonce -> send -> persist so concurrent calls on the
    /// same client cannot spend the same counter value.
    nonce_gate: Arc<Mutex<()>>,
    nonce_retry_budget: u32,
}

impl IndodaxRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`IndodaxRestClient::builder()`] to configure credentials and a
    /// durable store for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> IndodaxRestClientBuilder {
        IndodaxRestClientBuilder::new()
    }

    /// Issue an authenticated `tapi` call and return its unwrapped
    /// `return` payload.
    ///
    /// Drives the full nonce cycle: acquire the next nonce from the store,
    /// append it to the payload, sign, send, and interpret the response.
    /// On success the spent nonce (plus one) is persisted before the
    /// result is returned. An `invalid_nonce` rejection resynchronizes
    /// from the server's reported watermark and retries within a bounded
    /// budget; every other failure is surfaced immediately.
    pub async fn private_request<T>(&self, payload: &Payload) -> Result<T, IndodaxError>
    where
        T: DeserializeOwned,
    {
        payload.ensure_valid()?;
        let provider = self
            .credentials
            .as_ref()
            .ok_or(IndodaxError::MissingCredentials)?;
        let creds = provider.get_credentials();
        let nonce_key = nonce_storage_key(&creds.api_key);
        let url = format!("{}{}", self.base_url, TAPI_PATH);

        let _gate = self.nonce_gate.lock().await;

        let stored = self
            .store
            .get(&nonce_key)
            .await?
            .and_then(|raw| raw.parse::<u64>().ok());
        let mut nonce = next_nonce(stored, unix_millis());

        let attempts = self.nonce_retry_budget.saturating_add(1);
        for attempt in 1..=attempts {
            let form = payload.form_with_nonce(nonce);
            let signature = sign_form(&form, creds.expose_secret())?;

            tracing::debug!(%form, attempt, "sending private request");

            let response = self
                .http_client
                .post(&url)
                .header("Key", &creds.api_key)
                .header("Sign", signature)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form)
                .send()
                .await?;
            let body = response.text().await?;

            let envelope: TapiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
                IndodaxError::MalformedResponse(format!(
                    "failed to parse tapi response: {e}. Body: {body}"
                ))
            })?;

            if envelope.success == 1 {
                let result = envelope.result.ok_or_else(|| {
                    IndodaxError::MalformedResponse(
                        "success response missing return field".to_string(),
                    )
                })?;
                // The spent nonce must become the floor for the next call
                // before the caller can observe success.
                self.store.set(&nonce_key, &nonce.saturating_add(1).to_string()).await?;
                return Ok(result);
            }

            let error = ApiError::new(
                envelope.error_code,
                envelope
                    .error
                    .unwrap_or_else(|| "unspecified tapi error".to_string()),
            );
            if !error.is_invalid_nonce() {
                return Err(IndodaxError::Api(error));
            }
            let Some(hint) = parse_server_nonce_hint(&error.message) else {
                // Without a watermark a blind retry cannot be shown to
                // make progress, so surface the rejection as-is.
                return Err(IndodaxError::Api(error));
            };
            nonce = hint.saturating_add(1);
            self.store.set(&nonce_key, &nonce.to_string()).await?;
            tracing::debug!(corrected = nonce, attempt, "nonce rejected, resynchronized from server hint");
        }

        Err(IndodaxError::NonceRetriesExhausted { attempts })
    }

    /// Issue an unauthenticated public call to `/api/{pair}/{path}`.
    ///
    /// No signing, no nonce, no retries. The body is parsed as JSON,
    /// normalizing the single-quoted pseudo-JSON some public endpoints
    /// emit; a response carrying an `error` field becomes an
    /// [`IndodaxError::Api`] failure.
    pub async fn public_request(&self, pair: &str, path: &str) -> Result<Value, IndodaxError> {
        let url = format!("{}{}/{}/{}", self.base_url, PUBLIC_API_PATH, pair, path);
        tracing::debug!(pair, path, "sending public request");

        let response = self.http_client.post(&url).send().await?;
        let body = response.text().await?;

        let value = parse_public_body(&body)?;
        if let Some(error) = api_error_in(&value) {
            return Err(IndodaxError::Api(error));
        }
        Ok(value)
    }
}

impl Default for IndodaxRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IndodaxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndodaxRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("nonce_retry_budget", &self.nonce_retry_budget)
            .finish()
    }
}

/// Parse a public response body, tolerating single-quoted pseudo-JSON.
fn parse_public_body(body: &str) -> Result<Value, IndodaxError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(first_error) => serde_json::from_str(&body.replace('\'', "\"")).map_err(|_| {
            IndodaxError::MalformedResponse(format!(
                "failed to parse public response: {first_error}. Body: {body}"
            ))
        }),
    }
}

/// Extract an API error from a parsed public response, if it carries one.
fn api_error_in(value: &Value) -> Option<ApiError> {
    let error = value.get("error")?;
    if error.is_null() {
        return None;
    }
    let message = match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    };
    let code = value
        .get("error_code")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(ApiError::new(code, message))
}

/// Builder for [`IndodaxRestClient`].
pub struct IndodaxRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    store: Option<Arc<dyn KeyValueStore>>,
    user_agent: Option<String>,
    nonce_retry_budget: u32,
    transport_retries: u32,
}

impl IndodaxRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: INDODAX_BASE_URL.to_string(),
            credentials: None,
            store: None,
            user_agent: None,
            nonce_retry_budget: DEFAULT_NONCE_RETRY_BUDGET,
            transport_retries: 0,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the key-value store holding the nonce counter.
    ///
    /// Defaults to an in-memory store; use a [`crate::store::FileStore`]
    /// to keep the nonce watermark across process restarts.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set how many times an `invalid_nonce` rejection may be retried
    /// before the call fails with
    /// [`IndodaxError::NonceRetriesExhausted`].
    pub fn nonce_retry_budget(mut self, budget: u32) -> Self {
        self.nonce_retry_budget = budget;
        self
    }

    /// Set the number of transport-level retries for transient failures.
    ///
    /// Defaults to 0: transport errors surface to the caller immediately,
    /// and only nonce mismatches are ever retried by the client itself.
    pub fn transport_retries(mut self, retries: u32) -> Self {
        self.transport_retries = retries;
        self
    }

    /// Build the client.
    pub fn build(self) -> IndodaxRestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("indodax-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("indodax-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(self.transport_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        IndodaxRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
            nonce_gate: Arc::new(Mutex::new(())),
            nonce_retry_budget: self.nonce_retry_budget,
        }
    }
}

impl Default for IndodaxRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal response wrapper for `tapi` responses.
#[derive(Debug, serde::Deserialize)]
struct TapiEnvelope<T> {
    #[serde(default, with = "crate::types::serde_helpers::stringly_int")]
    success: i64,
    #[serde(rename = "return")]
    result: Option<T>,
    error: Option<String>,
    error_code: Option<String>,
}

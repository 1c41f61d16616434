//! API client: one generic [`ApiClient::call`] plus typed wrappers for every
//! server function (see [`operations`]) and the login flow (see [`login`]).
//!
//! # Call pipeline
//!
//! `call(function, data)` → encode envelope → retry loop → HTTPS POST →
//! decode envelope → `CallResult<T>`.
//!
//! # Sharing
//!
//! `ApiClient` is a cheap handle: clones share one transport, one
//! credential store and one endpoint. Credentials and endpoint are
//! snapshotted when a call starts, so changing them affects later calls
//! only.
//!
//! # Lifecycle
//!
//! [`ApiClient::dispose`] releases the transport once for every clone,
//! resolves in-flight calls as [`ApiError::Disposed`], and makes every later
//! call fail the same way without touching the network.

pub mod login;
pub mod operations;

use crate::auth::{AuthContext, Credential};
use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{ApiError, CallResult};
use crate::retry::RetryPolicy;
use crate::transport::{self, DEFAULT_TIMEOUT_DURATION, RequestBody, Transport};

use common::ErrorLocation;
use models::{ApiFunction, Endpoint};

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::{debug, info, trace, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

struct ClientShared {
    endpoint: RwLock<Endpoint>,
    auth: RwLock<AuthContext>,
    transport: Transport,
    retry: RetryPolicy,
    /// Cancelled by `dispose`; every in-flight call races it.
    lifetime: CancellationToken,
}

impl Drop for ClientShared {
    fn drop(&mut self) {
        self.lifetime.cancel();
        if self.transport.release() {
            debug!("API client transport released on drop");
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    shared: Arc<ClientShared>,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client using the default timeout and retry policy.
    pub fn new(endpoint: Endpoint) -> Result<Self, ApiError> {
        Self::builder().endpoint(endpoint).build()
    }

    /// Wire endpoint, timeout, retry policy and application token from config.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder()
            .endpoint(config.endpoint()?)
            .timeout(config.timeout())
            .retry_policy(config.retry_policy());

        if let Some(token) = &config.connection.application_token {
            builder = builder.application_token(token.clone());
        }

        builder.build()
    }

    /// A handle sharing this client's transport and credentials whose calls
    /// (named operations included) are cancelled when `token` fires.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            cancel: Some(token),
        }
    }

    // ============================================
    // COLLABORATOR-FACING STATE
    // ============================================

    pub fn endpoint(&self) -> Endpoint {
        self.shared
            .endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_endpoint(&self, endpoint: Endpoint) {
        info!("API endpoint set to {endpoint}");
        *self
            .shared
            .endpoint
            .write()
            .unwrap_or_else(PoisonError::into_inner) = endpoint;
    }

    /// The credential the next call will carry.
    pub fn credential(&self) -> Credential {
        self.auth_snapshot().credential()
    }

    pub fn set_application_token(&self, token: Option<String>) {
        self.with_auth(|auth| auth.set_application_token(token));
    }

    pub fn set_session_token(&self, token: Option<String>) {
        self.with_auth(|auth| auth.set_session_token(token));
    }

    pub fn has_application_token(&self) -> bool {
        self.auth_snapshot().has_application_token()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.shared.retry
    }

    fn auth_snapshot(&self) -> AuthContext {
        self.shared
            .auth
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_auth(&self, update: impl FnOnce(&mut AuthContext)) {
        let mut guard = self
            .shared
            .auth
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut guard);
    }

    // ============================================
    // LIFECYCLE
    // ============================================

    /// Release the transport and abort in-flight calls.
    ///
    /// Returns `true` for the call that performed the release and `false`
    /// for every later one.
    pub fn dispose(&self) -> bool {
        self.shared.lifetime.cancel();
        let released = self.shared.transport.release();
        if released {
            info!("API client disposed");
        }
        released
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.transport.is_released()
    }

    // ============================================
    // GENERIC CALL
    // ============================================

    /// Call `function` with `data` and decode the reply into `T`.
    ///
    /// Cancelled only by the token given to [`ApiClient::with_cancellation`],
    /// if any, and by disposal.
    pub async fn call<T, D>(&self, function: ApiFunction, data: &D) -> CallResult<T>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        match &self.cancel {
            Some(token) => self.call_cancellable(function, data, token).await,
            None => {
                self.call_cancellable(function, data, &CancellationToken::new())
                    .await
            }
        }
    }

    /// [`ApiClient::call`] under an explicit cancellation token.
    pub async fn call_cancellable<T, D>(
        &self,
        function: ApiFunction,
        data: &D,
        cancel: &CancellationToken,
    ) -> CallResult<T>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = envelope::encode(function, data)?;
        let reply = self
            .execute(function, RequestBody::Json(body), cancel)
            .await?;
        envelope::decode(&reply)
    }

    /// Call returning the raw 2xx body, for functions that answer with a file.
    pub(crate) async fn call_raw<D>(&self, function: ApiFunction, data: &D) -> CallResult<Vec<u8>>
    where
        D: Serialize + ?Sized,
    {
        let body = envelope::encode(function, data)?;
        self.execute_with_own_token(function, RequestBody::Json(body))
            .await
    }

    /// Multipart call: the envelope plus one file part.
    pub(crate) async fn call_multipart<T, D>(
        &self,
        function: ApiFunction,
        data: &D,
        file_name: String,
        file: Vec<u8>,
    ) -> CallResult<T>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let encoded = envelope::encode(function, data)?;
        let body = RequestBody::Multipart {
            envelope: encoded,
            file_name,
            file,
        };
        let reply = self.execute_with_own_token(function, body).await?;
        envelope::decode(&reply)
    }

    async fn execute_with_own_token(
        &self,
        function: ApiFunction,
        body: RequestBody,
    ) -> CallResult<Vec<u8>> {
        match &self.cancel {
            Some(token) => self.execute(function, body, token).await,
            None => self.execute(function, body, &CancellationToken::new()).await,
        }
    }

    async fn execute(
        &self,
        function: ApiFunction,
        body: RequestBody,
        cancel: &CancellationToken,
    ) -> CallResult<Vec<u8>> {
        if self.is_disposed() {
            debug!("Rejecting {function}: client disposed");
            return Err(ApiError::disposed());
        }

        let call_id = Uuid::new_v4();
        let url = self.endpoint().base_url().clone();
        let credential = self.credential();
        let authorization = credential.authorization_header();

        debug!(
            "Call {call_id}: {function} -> {url} (credential: {})",
            credential.kind()
        );

        let url_ref = &url;
        let authorization_ref = authorization.as_deref();
        let body_ref = &body;
        let retry = self.shared.retry;

        let result = tokio::select! {
            biased;
            () = self.shared.lifetime.cancelled() => Err(ApiError::disposed()),
            result = retry.execute(cancel, move |attempt| {
                self.attempt(call_id, attempt, url_ref, authorization_ref, body_ref)
            }) => result,
        };

        match &result {
            Ok(reply) => debug!("Call {call_id}: {function} succeeded ({} bytes)", reply.len()),
            Err(e) if e.is_cancelled() => info!("Call {call_id}: {function} cancelled"),
            Err(e) => warn!(
                "Call {call_id}: {function} failed [{}]: {e}",
                e.error_category()
            ),
        }

        result
    }

    async fn attempt(
        &self,
        call_id: Uuid,
        attempt: u32,
        url: &Url,
        authorization: Option<&str>,
        body: &RequestBody,
    ) -> CallResult<Vec<u8>> {
        let client = self.shared.transport.handle()?;
        trace!("Call {call_id}: attempt {attempt}");
        transport::send(&client, url, authorization, body).await
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    endpoint: Option<Endpoint>,
    timeout: Duration,
    retry: RetryPolicy,
    application_token: Option<String>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: DEFAULT_TIMEOUT_DURATION,
            retry: RetryPolicy::default(),
            application_token: None,
        }
    }
}

impl ApiClientBuilder {
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Per-attempt deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn application_token(mut self, token: impl Into<String>) -> Self {
        self.application_token = Some(token.into());
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let endpoint = self.endpoint.ok_or_else(|| ApiError::Endpoint {
            message: String::from("Endpoint is required"),
            location: ErrorLocation::caller(),
        })?;

        let mut auth = AuthContext::new();
        auth.set_application_token(self.application_token);

        let transport = Transport::new(self.timeout)?;

        debug!(
            "API client for {endpoint}: timeout {:?}, {} attempts, base delay {:?}",
            self.timeout,
            self.retry.max_attempts(),
            self.retry.base_delay()
        );

        Ok(ApiClient {
            shared: Arc::new(ClientShared {
                endpoint: RwLock::new(endpoint),
                auth: RwLock::new(auth),
                transport,
                retry: self.retry,
                lifetime: CancellationToken::new(),
            }),
            cancel: None,
        })
    }
}

use std::time::Duration;

use crate::{
    data::{
        datasources::iaphub_api_datasource::IaphubApiDatasource,
        repositories::iaphub_repository_impl::IaphubRepositoryImpl,
    },
    domain::{
        entities::{
            common::Environment,
            purchase::{Purchase, PurchaseList, Subscription},
            receipt::{Receipt, ReceiptUpdate},
            user::{LatestUser, User},
        },
        repositories::iaphub_repository::{
            GetPurchaseRequest, GetPurchasesRequest, GetReceiptRequest, GetSubscriptionRequest,
            GetUserMigrateRequest, GetUserRequest, IaphubRepository, UpdateReceiptRequest,
            UpdateUserRequest,
        },
    },
    errors::IaphubError,
    transport::{HttpTransport, ReqwestTransport},
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Named construction options for [`IaphubClient`].
///
/// Defaults: production environment, 3 second request timeout.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    environment: Environment,
    request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment every call is scoped to unless a request overrides it.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Timeout enforced by the default transport on each outgoing call.
    /// Caller-supplied transports own their own timeout policy.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Stateless façade over the IAPHUB REST API.
///
/// Holds nothing but its construction-time configuration, so one client can
/// be shared freely across tasks; concurrent operations are independent
/// exchanges with no ordering guarantee between them. Each operation awaits a
/// single request/response round trip and never retries; callers own any
/// retry policy.
pub struct IaphubClient<T: HttpTransport = ReqwestTransport> {
    repository: IaphubRepositoryImpl<T>,
}

impl<T: HttpTransport> std::fmt::Debug for IaphubClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IaphubClient").finish_non_exhaustive()
    }
}

impl IaphubClient<ReqwestTransport> {
    /// Builds a client with the default transport and default options.
    pub fn new(
        api_key: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Result<Self, IaphubError> {
        Self::with_options(api_key, app_id, ClientOptions::default())
    }

    /// Builds a client with the default transport, bounded by the configured
    /// request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        app_id: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, IaphubError> {
        let transport = ReqwestTransport::new(options.request_timeout).map_err(|e| {
            IaphubError::Configuration(format!("failed to build default transport: {e}"))
        })?;
        Self::with_transport(api_key, app_id, transport, options)
    }
}

impl<T: HttpTransport> IaphubClient<T> {
    /// Builds a client sending every request through a caller-supplied
    /// transport. The API key and app id are required, non-empty and
    /// immutable for the client's lifetime.
    pub fn with_transport(
        api_key: impl Into<String>,
        app_id: impl Into<String>,
        transport: T,
        options: ClientOptions,
    ) -> Result<Self, IaphubError> {
        let api_key = api_key.into();
        let app_id = app_id.into();
        if api_key.is_empty() {
            return Err(IaphubError::Configuration("api key is empty".to_owned()));
        }
        if app_id.is_empty() {
            return Err(IaphubError::Configuration("app id is empty".to_owned()));
        }

        let datasource = IaphubApiDatasource::new(api_key, options.environment, transport);
        Ok(Self {
            repository: IaphubRepositoryImpl::new(datasource, app_id),
        })
    }

    /// Fetches a user's purchase state. See
    /// [`IaphubRepository::get_user`].
    pub async fn get_user(&self, request: GetUserRequest) -> Result<User, IaphubError> {
        self.repository.get_user(request).await
    }

    /// Resolves a user identifier to the canonical latest one. See
    /// [`IaphubRepository::get_user_migrate`].
    pub async fn get_user_migrate(
        &self,
        request: GetUserMigrateRequest,
    ) -> Result<LatestUser, IaphubError> {
        self.repository.get_user_migrate(request).await
    }

    /// Updates a user's country and tags. See
    /// [`IaphubRepository::update_user`].
    pub async fn update_user(&self, request: UpdateUserRequest) -> Result<(), IaphubError> {
        self.repository.update_user(request).await
    }

    /// Fetches a receipt by id. See [`IaphubRepository::get_receipt`].
    pub async fn get_receipt(&self, request: GetReceiptRequest) -> Result<Receipt, IaphubError> {
        self.repository.get_receipt(request).await
    }

    /// Submits a store receipt for validation. See
    /// [`IaphubRepository::update_receipt`].
    pub async fn update_receipt(
        &self,
        request: UpdateReceiptRequest,
    ) -> Result<ReceiptUpdate, IaphubError> {
        self.repository.update_receipt(request).await
    }

    /// Fetches a purchase by id. See [`IaphubRepository::get_purchase`].
    pub async fn get_purchase(
        &self,
        request: GetPurchaseRequest,
    ) -> Result<Purchase, IaphubError> {
        self.repository.get_purchase(request).await
    }

    /// Lists purchases with optional filters. See
    /// [`IaphubRepository::get_purchases`].
    pub async fn get_purchases(
        &self,
        request: GetPurchasesRequest,
    ) -> Result<PurchaseList, IaphubError> {
        self.repository.get_purchases(request).await
    }

    /// Looks a subscription up by its original purchase. See
    /// [`IaphubRepository::get_subscription`].
    pub async fn get_subscription(
        &self,
        request: GetSubscriptionRequest,
    ) -> Result<Subscription, IaphubError> {
        self.repository.get_subscription(request).await
    }
}

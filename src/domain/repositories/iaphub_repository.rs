use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    domain::entities::{
        common::{Environment, Platform, SortOrder},
        purchase::{ProrationMode, Purchase, PurchaseList, Subscription},
        receipt::{Receipt, ReceiptContext, ReceiptUpdate},
        user::{LatestUser, User},
    },
    errors::IaphubError,
};

/// One method per IAPHUB endpoint. Implementations validate required inputs
/// before touching the network, perform exactly one exchange per call, and
/// never retry.
#[async_trait]
pub trait IaphubRepository: Send + Sync {
    /// Get User:
    /// `GET /app/{appId}/user/{userId}`
    ///
    /// Fetches the purchase state of a user: the products currently for sale
    /// to them and the products they actively own. With `upsert`, the user is
    /// created if it does not exist yet.
    async fn get_user(&self, request: GetUserRequest) -> Result<User, IaphubError>;

    /// Get User Migrate:
    /// `GET /app/{appId}/user/{userId}/migrate`
    ///
    /// Resolves a possibly-outdated user identifier to the canonical latest
    /// one.
    async fn get_user_migrate(
        &self,
        request: GetUserMigrateRequest,
    ) -> Result<LatestUser, IaphubError>;

    /// Update User:
    /// `POST /app/{appId}/user/{userId}`
    ///
    /// Updates the user's country and tags. The environment defaults to the
    /// client's configured one.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<(), IaphubError>;

    /// Get Receipt:
    /// `GET /app/{appId}/receipt/{receiptId}`
    async fn get_receipt(&self, request: GetReceiptRequest) -> Result<Receipt, IaphubError>;

    /// Update Receipt:
    /// `POST /app/{appId}/user/{userId}/receipt`
    ///
    /// Submits a store receipt for validation. Android submissions must also
    /// carry the SKU and a proration mode.
    async fn update_receipt(
        &self,
        request: UpdateReceiptRequest,
    ) -> Result<ReceiptUpdate, IaphubError>;

    /// Get Purchase:
    /// `GET /app/{appId}/purchase/{purchaseId}`
    async fn get_purchase(&self, request: GetPurchaseRequest) -> Result<Purchase, IaphubError>;

    /// Get Purchases:
    /// `GET /app/{appId}/purchases`
    ///
    /// Lists purchases page by page. Every filter is optional and the server
    /// applies its own defaults, so this operation never fails validation.
    async fn get_purchases(
        &self,
        request: GetPurchasesRequest,
    ) -> Result<PurchaseList, IaphubError>;

    /// Get Subscription:
    /// `GET /app/{appId}/subscription/{originalPurchaseId}`
    ///
    /// Looks a subscription up by the original purchase of its renewal
    /// lineage. The record decodes exactly like a purchase.
    async fn get_subscription(
        &self,
        request: GetSubscriptionRequest,
    ) -> Result<Subscription, IaphubError>;
}

#[derive(Debug, Clone, Default)]
pub struct GetUserRequest {
    pub user_id: String,
    pub platform: Option<Platform>,
    /// Create the user if it does not exist yet.
    pub upsert: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GetUserMigrateRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub user_id: String,
    pub country: String,
    pub upsert: bool,
    /// Overrides the client's configured environment for this call.
    pub environment: Option<Environment>,
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetReceiptRequest {
    pub receipt_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReceiptRequest {
    pub user_id: String,
    /// Overrides the client's configured environment for this call.
    pub environment: Option<Environment>,
    pub platform: Option<Platform>,
    /// Raw store token of the receipt.
    pub token: String,
    /// Required when the platform is android.
    pub sku: String,
    pub context: Option<ReceiptContext>,
    /// Required when the platform is android.
    pub proration_mode: Option<ProrationMode>,
    pub upsert: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GetPurchaseRequest {
    pub purchase_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetPurchasesRequest {
    pub page: Option<u32>,
    /// Page size; forwarded only when within 1..=100, otherwise the server
    /// default applies.
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    /// Internal identifier of the owning user.
    pub user: Option<String>,
    /// App-side identifier of the owning user.
    pub user_id: Option<String>,
    /// Restrict to one subscription lineage by its original purchase.
    pub original_purchase: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetSubscriptionRequest {
    pub original_purchase_id: String,
}

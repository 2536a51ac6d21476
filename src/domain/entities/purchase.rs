use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Platform;

/// Product type of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Consumable,
    NonConsumable,
    RenewableSubscription,
    Subscription,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Reason a purchase was refunded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundReason {
    SubscriptionReplaced,
    Other,
    Issue,
    Remorse,
    NotReceived,
    Defective,
    AccidentalPurchase,
    Fraud,
    FriendlyFraud,
    Chargeback,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Current state of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    Active,
    GracePeriod,
    RetryPeriod,
    Paused,
    Expired,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Period type of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPeriodType {
    Normal,
    Intro,
    Trial,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Reason a renewable subscription was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionCancelReason {
    Refunded,
    CustomerCanceled,
    DeveloperCanceled,
    SubscriptionReplaced,
    RejectPriceIncrease,
    BillingError,
    ProductNotAvailable,
    /// The service's own literal "unknown" reason, distinct from a value this
    /// client version does not recognize.
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Billing adjustment strategy applied when replacing a subscription plan
/// mid-cycle. Only meaningful on Android.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationMode {
    ImmediateWithTimeProration,
    ImmediateAndChargeProratedPrice,
    ImmediateWithoutProration,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A subscription is a purchase reached through a different lookup key (the
/// original purchase of its renewal lineage); the record shape is identical.
pub type Subscription = Purchase;

/// A validated purchase as returned by the service. Exchanged verbatim;
/// fields absent from the response decode to their default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Purchase {
    pub id: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub quantity: u32,
    pub platform: Option<Platform>,
    pub country: String,
    /// Free-form key/value tags attached to the purchase.
    pub tags: HashMap<String, String>,
    /// Store order identifier.
    pub order_id: String,
    /// Owning app identifier.
    pub app: String,
    /// Internal identifier of the owning user.
    pub user: String,
    /// App-side identifier of the owning user.
    pub user_id: String,
    /// Alternate app-side identifiers that have been attached to the user.
    pub user_ids: Vec<String>,
    /// Identifier of the receipt this purchase was validated from.
    pub receipt: String,
    /// Android purchase token backing the receipt.
    pub android_token: String,
    pub product: String,
    pub product_sku: String,
    pub product_type: Option<ProductType>,
    pub product_group_name: String,
    pub listing: String,
    pub store: String,
    pub store_segment_index: u32,
    /// Currency of the purchase, with the price in that currency.
    pub currency: String,
    pub price: f64,
    /// Currency the price was converted to for reporting, with the converted
    /// amount.
    pub converted_currency: String,
    pub converted_price: f64,
    pub is_sandbox: bool,
    pub is_family_share: bool,
    pub is_promo: bool,
    pub is_refunded: bool,
    pub refund_date: Option<DateTime<Utc>>,
    pub refund_reason: Option<RefundReason>,
    pub refund_amount: f64,
    pub converted_refund_amount: f64,
    pub is_subscription: bool,
    pub is_subscription_active: bool,
    pub is_subscription_renewable: bool,
    pub is_subscription_retry_period: bool,
    pub is_subscription_grace_period: bool,
    /// Whether this purchase converted a trial into a paid period.
    pub is_trial_conversion: bool,
    pub subscription_state: Option<SubscriptionState>,
    pub subscription_period_type: Option<SubscriptionPeriodType>,
    pub subscription_cancel_reason: Option<SubscriptionCancelReason>,
    pub subscription_proration_mode: Option<ProrationMode>,
    /// Product the subscription will renew into, if a plan change is pending.
    pub subscription_renewal_product: String,
    pub subscription_renewal_product_sku: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub auto_resume_date: Option<DateTime<Utc>>,
    /// Next purchase in the renewal chain. Together with `linked_purchase`
    /// this forms a forward chain; `original_purchase` is stable across all
    /// renewals of one lineage. The chain is acyclic by contract of the
    /// service and is not verified client-side.
    pub next_purchase: String,
    pub linked_purchase: String,
    pub original_purchase: String,
}

/// One page of purchases, in an offset/page-based pagination envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseList {
    pub has_next_page: bool,
    pub list: Vec<Purchase>,
}

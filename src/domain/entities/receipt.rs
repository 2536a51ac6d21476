use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Platform;
use super::purchase::SubscriptionPeriodType;

/// Context a receipt was submitted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptContext {
    Refresh,
    Purchase,
    Restore,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Processing status of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Processed,
    Processing,
    Deferred,
    Failed,
    Invalid,
    Stale,
    Success,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Delivery status of the webhook fired for a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    Success,
    Failed,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A store-issued proof of purchase as tracked by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub id: String,
    pub created_date: Option<DateTime<Utc>>,
    /// How many times the service has processed this receipt.
    pub process_count: u32,
    pub processed_date: Option<DateTime<Utc>>,
    pub refresh_date: Option<DateTime<Utc>>,
    /// App-side identifier of the owning user.
    pub user: String,
    pub platform: Option<Platform>,
    pub status: Option<ReceiptStatus>,
    /// Raw store token the receipt was submitted with.
    pub token: String,
    pub sku: String,
}

/// Outcome of a receipt submission: the resulting status plus the
/// transactions the submission created and the ones it superseded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptUpdate {
    pub status: Option<ReceiptStatus>,
    pub new_transactions: Vec<Transaction>,
    pub old_transactions: Vec<Transaction>,
}

/// A validated purchase/renewal event produced by submitting a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: String,
    pub sku: String,
    /// Identifier of the purchase this transaction belongs to.
    pub purchase: String,
    pub purchase_date: Option<DateTime<Utc>>,
    /// Product group identifier and display name.
    pub group: String,
    pub group_name: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub auto_resume_date: Option<DateTime<Utc>>,
    pub is_subscription_renewable: bool,
    pub is_subscription_retry_period: bool,
    pub subscription_period_type: Option<SubscriptionPeriodType>,
    pub webhook_status: Option<WebhookStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_update_decodes_transactions() {
        let update: ReceiptUpdate = serde_json::from_str(
            r#"{
                "status": "success",
                "newTransactions": [{
                    "id": "5e517bdd0613c16f11e7fae0",
                    "sku": "pack30_tier20",
                    "purchase": "2e517bdd0613c16f11e7faz2",
                    "purchaseDate": "2019-10-12T17:34:33.256Z",
                    "group": "3e517bdd0613c16f41e7fae2",
                    "groupName": "pack",
                    "webhookStatus": "success"
                }],
                "oldTransactions": []
            }"#,
        )
        .unwrap();

        assert_eq!(update.status, Some(ReceiptStatus::Success));
        assert_eq!(update.new_transactions.len(), 1);
        assert!(update.old_transactions.is_empty());

        let transaction = &update.new_transactions[0];
        assert_eq!(transaction.sku, "pack30_tier20");
        assert_eq!(transaction.group_name, "pack");
        assert_eq!(transaction.webhook_status, Some(WebhookStatus::Success));
        assert_eq!(transaction.expiration_date, None);
        assert!(!transaction.is_subscription_renewable);
    }

    #[test]
    fn unknown_receipt_status_decodes_to_unrecognized() {
        let receipt: Receipt =
            serde_json::from_str(r#"{"id":"receipt-1","status":"quarantined"}"#).unwrap();
        assert_eq!(
            receipt.status,
            Some(ReceiptStatus::Unrecognized("quarantined".to_owned()))
        );
    }
}

mod common;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use iaphub::domain::entities::common::{Environment, Platform};
use iaphub::domain::entities::purchase::ProrationMode;
use iaphub::domain::entities::receipt::{ReceiptContext, ReceiptStatus, WebhookStatus};
use iaphub::domain::repositories::iaphub_repository::{GetReceiptRequest, UpdateReceiptRequest};
use iaphub::errors::IaphubError;
use iaphub::transport::HttpMethod;

use common::{sandbox_client, MockTransport};

const RECEIPT_JSON: &str = r#"{
    "id": "receipt-1",
    "createdDate": "2019-10-12T17:34:33.256Z",
    "processCount": 1,
    "processedDate": "2019-10-12T17:34:34.256Z",
    "refreshDate": "2019-10-13T17:34:34.256Z",
    "user": "user-id-1",
    "platform": "android",
    "status": "processed",
    "token": "token-1",
    "sku": "subscription_1"
}"#;

const RECEIPT_UPDATE_JSON: &str = r#"{
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
}"#;

fn date(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

fn android_request() -> UpdateReceiptRequest {
    UpdateReceiptRequest {
        user_id: "user-id-1".to_owned(),
        environment: None,
        platform: Some(Platform::Android),
        token: "token-1".to_owned(),
        sku: "sku-1".to_owned(),
        context: Some(ReceiptContext::Refresh),
        proration_mode: Some(ProrationMode::ImmediateAndChargeProratedPrice),
        upsert: true,
    }
}

#[tokio::test]
async fn get_receipt_issues_expected_request_and_decodes() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_JSON));
    let client = sandbox_client(&transport);

    let receipt = client
        .get_receipt(GetReceiptRequest {
            receipt_id: "receipt-1".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(
        transport.recorded()[0].url,
        "https://api.iaphub.com/v1/app/app-id-1/receipt/receipt-1?environment=sandbox"
    );
    assert_eq!(receipt.id, "receipt-1");
    assert_eq!(receipt.process_count, 1);
    assert_eq!(receipt.processed_date, Some(date("2019-10-12T17:34:34.256Z")));
    assert_eq!(receipt.user, "user-id-1");
    assert_eq!(receipt.platform, Some(Platform::Android));
    assert_eq!(receipt.status, Some(ReceiptStatus::Processed));
    assert_eq!(receipt.token, "token-1");
    assert_eq!(receipt.sku, "subscription_1");
}

#[tokio::test]
async fn get_receipt_requires_an_id() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_JSON));
    let client = sandbox_client(&transport);

    let err = client
        .get_receipt(GetReceiptRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IaphubError::MissingParameter(_)));
    assert!(err.to_string().contains(r#""receiptId""#));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn update_receipt_submits_an_android_receipt() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_UPDATE_JSON));
    let client = sandbox_client(&transport);

    let update = client.update_receipt(android_request()).await.unwrap();

    let requests = transport.recorded();
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(
        request.url,
        "https://api.iaphub.com/v1/app/app-id-1/user/user-id-1/receipt?environment=sandbox"
    );

    let body: serde_json::Value =
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "userId": "user-id-1",
            "environment": "sandbox",
            "platform": "android",
            "token": "token-1",
            "sku": "sku-1",
            "context": "refresh",
            "prorationMode": "immediate_and_charge_prorated_price",
            "upsert": true
        })
    );

    assert_eq!(update.status, Some(ReceiptStatus::Success));
    assert_eq!(update.new_transactions.len(), 1);
    let transaction = &update.new_transactions[0];
    assert_eq!(transaction.sku, "pack30_tier20");
    assert_eq!(transaction.purchase_date, Some(date("2019-10-12T17:34:33.256Z")));
    assert_eq!(transaction.webhook_status, Some(WebhookStatus::Success));
    assert!(update.old_transactions.is_empty());
}

#[tokio::test]
async fn update_receipt_lists_every_missing_parameter() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_UPDATE_JSON));
    let client = sandbox_client(&transport);

    let err = client
        .update_receipt(UpdateReceiptRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, IaphubError::MissingParameter(_)));
    let message = err.to_string();
    assert!(message.contains(r#""userId""#));
    assert!(message.contains(r#""platform""#));
    assert!(message.contains(r#""token""#));
    assert!(message.contains(r#""context""#));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn update_receipt_requires_android_specific_inputs() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_UPDATE_JSON));
    let client = sandbox_client(&transport);

    let err = client
        .update_receipt(UpdateReceiptRequest {
            sku: String::new(),
            proration_mode: None,
            ..android_request()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, IaphubError::MissingAndroidParameter(_)));
    let message = err.to_string();
    assert!(message.contains(r#""sku""#));
    assert!(message.contains(r#""prorationMode""#));

    let err = client
        .update_receipt(UpdateReceiptRequest {
            proration_mode: None,
            ..android_request()
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains(r#""prorationMode""#));
    assert!(!err.to_string().contains(r#""sku""#));

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn update_receipt_on_ios_skips_android_requirements() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_UPDATE_JSON));
    let client = sandbox_client(&transport);

    client
        .update_receipt(UpdateReceiptRequest {
            platform: Some(Platform::Ios),
            sku: String::new(),
            proration_mode: None,
            ..android_request()
        })
        .await
        .unwrap();

    let requests = transport.recorded();
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["platform"], "ios");
    assert!(body.get("sku").is_none());
    assert!(body.get("prorationMode").is_none());
}

#[tokio::test]
async fn update_receipt_honors_a_per_call_environment() {
    let transport = Arc::new(MockTransport::replying(200, RECEIPT_UPDATE_JSON));
    let client = sandbox_client(&transport);

    client
        .update_receipt(UpdateReceiptRequest {
            environment: Some(Environment::Production),
            ..android_request()
        })
        .await
        .unwrap();

    let requests = transport.recorded();
    assert!(requests[0].url.contains("environment=production"));
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["environment"], "production");
}

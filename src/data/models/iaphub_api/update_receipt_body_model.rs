use serde::Serialize;

use crate::domain::entities::{
    common::{Environment, Platform},
    purchase::ProrationMode,
    receipt::ReceiptContext,
};

/// JSON payload posted by `POST /app/{appId}/user/{userId}/receipt`. The
/// android-only fields are left out entirely when not supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateReceiptBodyModel {
    pub(crate) user_id: String,
    pub(crate) environment: Environment,
    pub(crate) platform: Platform,
    pub(crate) token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sku: Option<String>,
    pub(crate) context: ReceiptContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) proration_mode: Option<ProrationMode>,
    pub(crate) upsert: bool,
}

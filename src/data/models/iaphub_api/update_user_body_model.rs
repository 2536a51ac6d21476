use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::common::Environment;

/// JSON payload posted by `POST /app/{appId}/user/{userId}`. The environment
/// is always the resolved one (per-call override or the client's).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserBodyModel {
    pub(crate) user_id: String,
    pub(crate) country: String,
    pub(crate) upsert: bool,
    pub(crate) environment: Environment,
    pub(crate) tags: HashMap<String, String>,
}

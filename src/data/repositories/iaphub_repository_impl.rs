use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::SecondsFormat;

use crate::{
    data::{
        datasources::iaphub_api_datasource::IaphubApiDatasource,
        models::iaphub_api::{
            update_receipt_body_model::UpdateReceiptBodyModel,
            update_user_body_model::UpdateUserBodyModel,
        },
    },
    domain::{
        entities::{
            common::Platform,
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
    transport::HttpTransport,
};

pub(crate) struct IaphubRepositoryImpl<T: HttpTransport> {
    datasource: IaphubApiDatasource<T>,
    app_id: String,
}

impl<T: HttpTransport> IaphubRepositoryImpl<T> {
    pub(crate) fn new(datasource: IaphubApiDatasource<T>, app_id: String) -> Self {
        Self { datasource, app_id }
    }
}

#[async_trait]
impl<T: HttpTransport> IaphubRepository for IaphubRepositoryImpl<T> {
    async fn get_user(&self, request: GetUserRequest) -> Result<User, IaphubError> {
        let platform = match &request.platform {
            Some(platform) if !request.user_id.is_empty() => platform,
            _ => {
                let mut missing = Vec::new();
                if request.user_id.is_empty() {
                    missing.push(r#""userId""#);
                }
                if request.platform.is_none() {
                    missing.push(r#""platform""#);
                }
                return Err(IaphubError::MissingParameter(missing.join(", ")));
            }
        };

        let mut params = BTreeMap::new();
        params.insert("platform", platform.as_str().to_owned());
        if request.upsert {
            params.insert("upsert", "true".to_owned());
        }

        let path = format!("/app/{}/user/{}", self.app_id, request.user_id);
        let response = self.datasource.get(&path, params, None).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn get_user_migrate(
        &self,
        request: GetUserMigrateRequest,
    ) -> Result<LatestUser, IaphubError> {
        if request.user_id.is_empty() {
            return Err(IaphubError::MissingParameter(r#""userId""#.to_owned()));
        }

        let path = format!("/app/{}/user/{}/migrate", self.app_id, request.user_id);
        let response = self.datasource.get(&path, BTreeMap::new(), None).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<(), IaphubError> {
        let mut missing = Vec::new();
        if request.user_id.is_empty() {
            missing.push(r#""userId""#);
        }
        if request.country.is_empty() {
            missing.push(r#""country""#);
        }
        if !missing.is_empty() {
            return Err(IaphubError::MissingParameter(missing.join(", ")));
        }

        let environment = request
            .environment
            .unwrap_or_else(|| self.datasource.environment().clone());
        let body = UpdateUserBodyModel {
            user_id: request.user_id.clone(),
            country: request.country,
            upsert: request.upsert,
            environment: environment.clone(),
            tags: request.tags,
        };

        let path = format!("/app/{}/user/{}", self.app_id, request.user_id);
        self.datasource
            .post(&path, BTreeMap::new(), Some(&environment), &body)
            .await?;
        Ok(())
    }

    async fn get_receipt(&self, request: GetReceiptRequest) -> Result<Receipt, IaphubError> {
        if request.receipt_id.is_empty() {
            return Err(IaphubError::MissingParameter(r#""receiptId""#.to_owned()));
        }

        let path = format!("/app/{}/receipt/{}", self.app_id, request.receipt_id);
        let response = self.datasource.get(&path, BTreeMap::new(), None).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn update_receipt(
        &self,
        request: UpdateReceiptRequest,
    ) -> Result<ReceiptUpdate, IaphubError> {
        let (platform, context) = match (&request.platform, &request.context) {
            (Some(platform), Some(context))
                if !request.user_id.is_empty() && !request.token.is_empty() =>
            {
                (platform, context)
            }
            (platform, context) => {
                let mut missing = Vec::new();
                if request.user_id.is_empty() {
                    missing.push(r#""userId""#);
                }
                if platform.is_none() {
                    missing.push(r#""platform""#);
                }
                if request.token.is_empty() {
                    missing.push(r#""token""#);
                }
                if context.is_none() {
                    missing.push(r#""context""#);
                }
                return Err(IaphubError::MissingParameter(missing.join(", ")));
            }
        };

        if *platform == Platform::Android {
            let mut missing = Vec::new();
            if request.sku.is_empty() {
                missing.push(r#""sku""#);
            }
            if request.proration_mode.is_none() {
                missing.push(r#""prorationMode""#);
            }
            if !missing.is_empty() {
                return Err(IaphubError::MissingAndroidParameter(missing.join(", ")));
            }
        }

        let environment = request
            .environment
            .clone()
            .unwrap_or_else(|| self.datasource.environment().clone());
        let body = UpdateReceiptBodyModel {
            user_id: request.user_id.clone(),
            environment: environment.clone(),
            platform: platform.clone(),
            token: request.token.clone(),
            sku: (!request.sku.is_empty()).then(|| request.sku.clone()),
            context: context.clone(),
            proration_mode: request.proration_mode.clone(),
            upsert: request.upsert,
        };

        let path = format!("/app/{}/user/{}/receipt", self.app_id, request.user_id);
        let response = self
            .datasource
            .post(&path, BTreeMap::new(), Some(&environment), &body)
            .await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn get_purchase(&self, request: GetPurchaseRequest) -> Result<Purchase, IaphubError> {
        if request.purchase_id.is_empty() {
            return Err(IaphubError::MissingParameter(r#""purchaseId""#.to_owned()));
        }

        let path = format!("/app/{}/purchase/{}", self.app_id, request.purchase_id);
        let response = self.datasource.get(&path, BTreeMap::new(), None).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn get_purchases(
        &self,
        request: GetPurchasesRequest,
    ) -> Result<PurchaseList, IaphubError> {
        let mut params = BTreeMap::new();
        if let Some(page) = request.page {
            params.insert("page", page.to_string());
        }
        // Out-of-range page sizes fall back to the server default instead of
        // failing the call.
        if let Some(limit) = request.limit.filter(|limit| (1..=100).contains(limit)) {
            params.insert("limit", limit.to_string());
        }
        if let Some(order) = &request.order {
            params.insert("order", order.as_str().to_owned());
        }
        if let Some(from_date) = &request.from_date {
            params.insert(
                "fromDate",
                from_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        if let Some(to_date) = &request.to_date {
            params.insert(
                "toDate",
                to_date.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        if let Some(user) = request.user.as_deref().filter(|user| !user.is_empty()) {
            params.insert("user", user.to_owned());
        }
        if let Some(user_id) = request.user_id.as_deref().filter(|id| !id.is_empty()) {
            params.insert("userId", user_id.to_owned());
        }
        if let Some(original) = request
            .original_purchase
            .as_deref()
            .filter(|id| !id.is_empty())
        {
            params.insert("originalPurchase", original.to_owned());
        }

        let path = format!("/app/{}/purchases", self.app_id);
        let response = self.datasource.get(&path, params, None).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    async fn get_subscription(
        &self,
        request: GetSubscriptionRequest,
    ) -> Result<Subscription, IaphubError> {
        if request.original_purchase_id.is_empty() {
            return Err(IaphubError::MissingParameter(
                r#""originalPurchaseId""#.to_owned(),
            ));
        }

        let path = format!(
            "/app/{}/subscription/{}",
            self.app_id, request.original_purchase_id
        );
        let response = self.datasource.get(&path, BTreeMap::new(), None).await?;
        Ok(serde_json::from_slice(&response)?)
    }
}

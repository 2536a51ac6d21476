use serde::{Deserialize, Serialize};

/// Purchase state of an app user: the products currently offered to them and
/// the products they actively own. The user carries no identity of its own
/// beyond what is embedded in the product entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub products_for_sale: Vec<Product>,
    pub active_products: Vec<Product>,
}

/// A purchasable or owned product entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: String,
    /// Product type tag, following the service's own taxonomy.
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    /// Identifier of the purchase that created this product entry.
    pub purchase: String,
}

/// Canonical user identifier returned by a migration lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LatestUser {
    pub user_id: String,
}

//! Wallet and checkout models

use serde::{Deserialize, Serialize};

use super::ListingKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub balance: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "VND".to_string()
}

/// Result of a deposit request. Deposits through a payment gateway
/// come back with a URL to complete payment instead of a new balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub transaction_id: Option<String>,
    pub balance: Option<f64>,
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub listing_id: String,
    pub listing_type: ListingKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    #[serde(alias = "id")]
    pub order_id: String,
    pub status: String,
    pub amount: Option<f64>,
}

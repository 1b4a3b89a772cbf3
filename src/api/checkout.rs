//! Checkout

use anyhow::Result;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use crate::app::App;
use crate::models::{CheckoutReceipt, CheckoutRequest, ListingKind};

pub async fn checkout(
    client: &ApiClient,
    token: &str,
    request: &CheckoutRequest,
) -> Result<ServiceResponse<CheckoutReceipt>, ApiError> {
    if request.listing_id.trim().is_empty() {
        return Err(ApiError::InvalidInput("listing id is empty".into()));
    }
    client.post("/checkout", request, Some(token)).await
}

/// Buy a listing with the wallet balance.
pub async fn buy(app: &App, listing_id: &str, kind: ListingKind) -> Result<()> {
    let token = app.require(&format!("/checkout/{}", listing_id)).await?;
    let request = CheckoutRequest {
        listing_id: listing_id.to_string(),
        listing_type: kind,
    };
    let receipt = checkout(&app.client, &token, &request).await?.into_data()?;

    println!("Order {}: {}", receipt.order_id, receipt.status);
    if let Some(amount) = receipt.amount {
        println!("Charged: {:.2}", amount);
    }
    Ok(())
}

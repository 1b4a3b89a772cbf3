//! Wallet balance and deposits

use anyhow::Result;
use serde::Serialize;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use crate::app::App;
use crate::models::{Deposit, WalletBalance};

#[derive(Serialize)]
struct DepositRequest {
    amount: f64,
}

pub async fn balance(
    client: &ApiClient,
    token: &str,
) -> Result<ServiceResponse<WalletBalance>, ApiError> {
    client.get("/wallet/balance", Some(token)).await
}

pub async fn deposit(
    client: &ApiClient,
    token: &str,
    amount: f64,
) -> Result<ServiceResponse<Deposit>, ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "deposit amount must be positive, got {}",
            amount
        )));
    }
    client
        .post("/wallet/deposit", &DepositRequest { amount }, Some(token))
        .await
}

pub async fn show_balance(app: &App) -> Result<()> {
    let token = app.require("/wallet").await?;
    let wallet = balance(&app.client, &token).await?.into_data()?;
    println!("Balance: {:.2} {}", wallet.balance, wallet.currency);
    Ok(())
}

pub async fn make_deposit(app: &App, amount: f64) -> Result<()> {
    let token = app.require("/wallet/deposit").await?;
    let resp = deposit(&app.client, &token, amount).await?;
    let message = resp.message.clone();
    let receipt = resp.into_data()?;

    if !message.is_empty() {
        println!("{}", message);
    }
    if let Some(url) = &receipt.payment_url {
        println!("Complete payment at: {}", url);
    }
    if let Some(balance) = receipt.balance {
        println!("New balance: {:.2}", balance);
    }
    if let Some(id) = &receipt.transaction_id {
        println!("Transaction: {}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_deposit_rejects_non_positive_amount() {
        let client = ApiClient::new(&Config::default()).unwrap();
        for amount in [0.0, -5.0, f64::NAN] {
            let err = deposit(&client, "token", amount).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)));
        }
    }
}

//! User profile endpoints

use anyhow::{bail, Result};

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use crate::app::App;
use crate::models::{ProfileUpdate, User};

pub async fn profile(client: &ApiClient, token: &str) -> Result<ServiceResponse<User>, ApiError> {
    client.get("/users/profile", Some(token)).await
}

pub async fn update_profile(
    client: &ApiClient,
    token: &str,
    update: &ProfileUpdate,
) -> Result<ServiceResponse<User>, ApiError> {
    client.put("/users/profile", update, Some(token)).await
}

fn print_user(user: &User) {
    println!();
    println!("Name:    {}", user.full_name.as_deref().unwrap_or("(none)"));
    println!("Email:   {}", user.email);
    println!("Phone:   {}", user.phone.as_deref().unwrap_or("(none)"));
    println!("Address: {}", user.address.as_deref().unwrap_or("(none)"));
    if let Some(role) = &user.role {
        println!("Role:    {}", role);
    }
    println!("ID:      {}", user.id);
}

/// Fetch and display the logged-in user's profile.
pub async fn whoami(app: &App) -> Result<()> {
    let token = app.require("/profile").await?;
    let user = profile(&app.client, &token).await?.into_data()?;
    print_user(&user);
    Ok(())
}

pub async fn edit_profile(app: &App, update: &ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update. Pass --name, --phone or --address.");
    }
    let token = app.require("/profile").await?;
    let resp = update_profile(&app.client, &token, update).await?;
    let message = resp.message.clone();
    let user = resp.into_data()?;
    if !message.is_empty() {
        println!("{}", message);
    }
    print_user(&user);
    Ok(())
}

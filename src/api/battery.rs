//! Battery listings

use anyhow::Result;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use super::listing;
use super::vehicle::truncate;
use crate::app::App;
use crate::models::{Battery, ListingFilter, Page};

pub async fn list(
    client: &ApiClient,
    filter: &ListingFilter,
) -> Result<ServiceResponse<Page<Battery>>, ApiError> {
    listing::list(client, "/batteries", filter).await
}

pub async fn detail(client: &ApiClient, id: &str) -> Result<ServiceResponse<Battery>, ApiError> {
    listing::detail(client, "/batteries", id).await
}

pub async fn list_batteries(app: &App, filter: &ListingFilter) -> Result<()> {
    let page = list(&app.client, filter).await?.into_data()?;

    if page.items.is_empty() {
        println!("No batteries found.");
        return Ok(());
    }

    println!();
    for b in &page.items {
        let capacity = b
            .capacity
            .map(|c| format!("{} kWh", c))
            .unwrap_or_default();
        let health = b.health.map(|h| format!("{}%", h)).unwrap_or_default();
        println!(
            "  {:<26} {:<36} {:>14.2}  {:>9} {:>6}",
            b.id,
            truncate(&b.title, 36),
            b.price,
            capacity,
            health
        );
    }
    super::print_page_footer(&page, filter);
    Ok(())
}

pub async fn show_battery(app: &App, id: &str) -> Result<()> {
    let b = detail(&app.client, id).await?.into_data()?;

    println!();
    println!("Title:    {}", b.title);
    println!("ID:       {}", b.id);
    println!("Price:    {:.2}", b.price);
    println!("Brand:    {}", b.brand.as_deref().unwrap_or("(none)"));
    if let Some(kwh) = b.capacity {
        println!("Capacity: {} kWh", kwh);
    }
    if let Some(health) = b.health {
        println!("Health:   {}%", health);
    }
    println!("Status:   {}", b.status.as_deref().unwrap_or("(unknown)"));
    if let Some(desc) = &b.description {
        println!();
        println!("{}", desc);
    }
    Ok(())
}

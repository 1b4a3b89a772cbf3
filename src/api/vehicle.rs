//! Vehicle listings

use anyhow::Result;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use super::listing;
use crate::app::App;
use crate::models::{ListingFilter, Page, Vehicle};

pub async fn list(
    client: &ApiClient,
    filter: &ListingFilter,
) -> Result<ServiceResponse<Page<Vehicle>>, ApiError> {
    listing::list(client, "/vehicles", filter).await
}

pub async fn detail(client: &ApiClient, id: &str) -> Result<ServiceResponse<Vehicle>, ApiError> {
    listing::detail(client, "/vehicles", id).await
}

/// Print one page of vehicle listings.
pub async fn list_vehicles(app: &App, filter: &ListingFilter) -> Result<()> {
    let page = list(&app.client, filter).await?.into_data()?;

    if page.items.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    println!();
    for v in &page.items {
        let make = [v.brand.as_deref(), v.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:<26} {:<36} {:>14.2}  {}",
            v.id,
            truncate(&v.title, 36),
            v.price,
            make
        );
    }
    super::print_page_footer(&page, filter);
    Ok(())
}

/// Print a single vehicle.
pub async fn show_vehicle(app: &App, id: &str) -> Result<()> {
    let v = detail(&app.client, id).await?.into_data()?;

    println!();
    println!("Title:    {}", v.title);
    println!("ID:       {}", v.id);
    println!("Price:    {:.2}", v.price);
    println!("Brand:    {}", v.brand.as_deref().unwrap_or("(none)"));
    println!("Model:    {}", v.model.as_deref().unwrap_or("(none)"));
    if let Some(year) = v.year {
        println!("Year:     {}", year);
    }
    if let Some(km) = v.mileage {
        println!("Mileage:  {} km", km);
    }
    if let Some(kwh) = v.battery_capacity {
        println!("Battery:  {} kWh", kwh);
    }
    println!("Status:   {}", v.status.as_deref().unwrap_or("(unknown)"));
    if let Some(desc) = &v.description {
        println!();
        println!("{}", desc);
    }
    Ok(())
}

pub(super) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

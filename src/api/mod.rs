//! Service layer for the marketplace REST API
//!
//! One module per resource. Every call returns a normalized
//! `ServiceResponse`.

pub mod auth;
pub mod battery;
pub mod checkout;
pub mod client;
mod envelope;
mod error;
mod listing;
pub mod user;
pub mod vehicle;
pub mod wallet;

pub use client::ApiClient;
pub use error::ApiError;

use crate::models::{ListingFilter, Page};

fn print_page_footer<T>(page: &Page<T>, filter: &ListingFilter) {
    let current = page.page.unwrap_or(filter.page);
    match (page.total, page.total_pages) {
        (Some(total), Some(pages)) => {
            println!("\nPage {}/{} ({} listings)", current, pages, total)
        }
        (Some(total), None) => println!("\nPage {} ({} listings)", current, total),
        _ => println!("\nPage {}", current),
    }
}

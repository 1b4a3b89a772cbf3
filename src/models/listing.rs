//! Vehicle and battery listings

use serde::{Deserialize, Serialize};

/// Kind of item a listing sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Vehicle,
    Battery,
}

/// Electric vehicle listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub price: f64,
    pub mileage: Option<u64>,
    pub battery_capacity: Option<f64>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Battery listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battery {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub capacity: Option<f64>,
    pub health: Option<f64>,
    pub price: f64,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Query parameters accepted by the listing endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            brand: None,
            min_price: None,
            max_price: None,
        }
    }
}

/// One page of listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "data", alias = "results")]
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub total_pages: Option<u32>,
}

/// Listing endpoints answer with either a bare array or a paged object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            Listing::Paged(page) => page,
            Listing::Bare(items) => Page {
                total: Some(items.len() as u64),
                items,
                page: None,
                total_pages: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_bare_array() {
        let json = r#"[{"_id":"v1","title":"VF 8","price":1200.0}]"#;
        let page = serde_json::from_str::<Listing<Vehicle>>(json)
            .unwrap()
            .into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "v1");
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn test_listing_accepts_paged_object() {
        let json = r#"{"items":[{"id":"b1","title":"LFP 60kWh","price":300,"health":92.5}],"total":41,"page":2,"totalPages":3}"#;
        let page = serde_json::from_str::<Listing<Battery>>(json)
            .unwrap()
            .into_page();
        assert_eq!(page.items[0].health, Some(92.5));
        assert_eq!(page.total, Some(41));
        assert_eq!(page.total_pages, Some(3));
    }

    #[test]
    fn test_filter_query_skips_unset() {
        let filter = ListingFilter {
            brand: Some("VinFast".into()),
            min_price: Some(500.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["brand"], "VinFast");
        assert_eq!(value["minPrice"], 500.0);
        assert!(value.get("maxPrice").is_none());
    }
}

//! Shared listing queries for vehicles and batteries

use serde::de::DeserializeOwned;

use super::client::ApiClient;
use super::envelope::ServiceResponse;
use super::error::ApiError;
use crate::models::{Listing, ListingFilter, Page};

pub(super) async fn list<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    filter: &ListingFilter,
) -> Result<ServiceResponse<Page<T>>, ApiError> {
    validate(filter)?;
    let resp: ServiceResponse<Listing<T>> = client.get_query(path, filter, None).await?;
    Ok(ServiceResponse {
        success: resp.success,
        message: resp.message,
        data: resp.data.map(Listing::into_page),
    })
}

pub(super) async fn detail<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    id: &str,
) -> Result<ServiceResponse<T>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput("listing id is empty".into()));
    }
    client.get_segment(path, id, None).await
}

fn validate(filter: &ListingFilter) -> Result<(), ApiError> {
    if filter.page == 0 || filter.limit == 0 {
        return Err(ApiError::InvalidInput(
            "page and limit start at 1".into(),
        ));
    }
    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
        if min > max {
            return Err(ApiError::InvalidInput(format!(
                "min price {} is above max price {}",
                min, max
            )));
        }
    }
    Ok(())
}

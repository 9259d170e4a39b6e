//! HTTP client for the BiteCast forecast gateway.
//!
//! Every operation is a single request returning a typed response or an
//! [`ApiError`]. Paths are built by small helper functions so the exact
//! request shape stays unit-testable without a server.

use chrono::NaiveDate;
use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::{ApiError, UNKNOWN_ERROR_DETAIL};
use crate::forecast::types::{
    AddCustomFishRequest, AddCustomFishResponse, AllFishTypesResponse, AvailableDatesResponse,
    CustomFishListResponse, DaySummary, ForecastResponse, Region, RegionsResponse,
    RemoveCustomFishResponse,
};
use crate::forecast::view;

/// Day summaries are fetched in a batch per region; keep the fan-out polite.
static DAY_SUMMARY_LIMIT: Lazy<DefaultDirectRateLimiter> =
    Lazy::new(|| RateLimiter::direct(Quota::per_second(nonzero!(5u32))));

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full region list, active and inactive, with the total count.
    pub async fn get_regions(&self) -> Result<RegionsResponse, ApiError> {
        self.get_json(regions_url(&self.base_url), None).await
    }

    /// Forecast for a region. Omitting the date asks the server for its
    /// default day (today).
    pub async fn get_forecast(
        &self,
        region_id: &str,
        forecast_date: Option<NaiveDate>,
    ) -> Result<ForecastResponse, ApiError> {
        self.get_json(forecast_url(&self.base_url, region_id, forecast_date), None)
            .await
    }

    /// Dates for which a forecast exists, used to drive calendar enablement.
    pub async fn get_available_dates(
        &self,
        region_id: &str,
    ) -> Result<AvailableDatesResponse, ApiError> {
        self.get_json(available_dates_url(&self.base_url, region_id), None)
            .await
    }

    /// Per-date weather snapshot. Meant to be called for a bounded prefix of
    /// the available dates, not the full range.
    pub async fn get_day_summary(
        &self,
        region_id: &str,
        date: NaiveDate,
    ) -> Result<DaySummary, ApiError> {
        DAY_SUMMARY_LIMIT
            .until_ready_with_jitter(Jitter::new(
                Duration::from_millis(10),
                Duration::from_millis(50),
            ))
            .await;
        self.get_json(day_summary_url(&self.base_url, region_id, date), None)
            .await
    }

    /// The signed-in user's custom fish list for a region. Omitting the
    /// token sends the request unauthenticated; the server rejects it.
    pub async fn get_custom_fish(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<CustomFishListResponse, ApiError> {
        self.get_json(custom_fish_url(&self.base_url, region_id), token)
            .await
    }

    pub async fn add_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<AddCustomFishResponse, ApiError> {
        let mut request = self
            .client
            .post(custom_fish_url(&self.base_url, region_id))
            .json(&AddCustomFishRequest {
                fish_type_id: fish_type_id.to_string(),
            });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::decode(request.send().await?).await
    }

    pub async fn remove_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<RemoveCustomFishResponse, ApiError> {
        let mut request = self
            .client
            .delete(custom_fish_item_url(&self.base_url, region_id, fish_type_id));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::decode(request.send().await?).await
    }

    /// Every fish type selectable for a region, typical and otherwise.
    pub async fn get_all_fish_types(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<AllFishTypesResponse, ApiError> {
        self.get_json(all_fish_types_url(&self.base_url, region_id), token)
            .await
    }

    /// Best-effort default selection: the region closest to the coordinate,
    /// or `None` when the list is empty or the fetch fails. Never errors.
    pub async fn find_nearest_region(&self, latitude: f64, longitude: f64) -> Option<Region> {
        view::find_nearest_region(self, latitude, longitude).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::decode(request.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extracts the `detail` field from an error body, falling back to the
/// generic message when the body is not JSON or carries no detail.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string())
}

fn regions_url(base: &str) -> String {
    format!("{base}/api/v1/regions")
}

fn forecast_url(base: &str, region_id: &str, forecast_date: Option<NaiveDate>) -> String {
    match forecast_date {
        Some(date) => format!("{base}/api/v1/forecast/{region_id}?forecast_date={date}"),
        None => format!("{base}/api/v1/forecast/{region_id}"),
    }
}

fn available_dates_url(base: &str, region_id: &str) -> String {
    format!("{base}/api/v1/forecast/{region_id}/available-dates")
}

fn day_summary_url(base: &str, region_id: &str, date: NaiveDate) -> String {
    format!("{base}/api/v1/forecast/{region_id}/day-summary?forecast_date={date}")
}

fn custom_fish_url(base: &str, region_id: &str) -> String {
    format!("{base}/api/v1/forecast/{region_id}/custom-fish")
}

fn custom_fish_item_url(base: &str, region_id: &str, fish_type_id: &str) -> String {
    format!("{base}/api/v1/forecast/{region_id}/custom-fish/{fish_type_id}")
}

fn all_fish_types_url(base: &str, region_id: &str) -> String {
    format!("{base}/api/v1/forecast/{region_id}/all-fish-types")
}

//! Composition of the forecast screen.
//!
//! [`ForecastView`] holds everything the forecast display needs for one
//! region and date: the region list, the selected forecast, the calendar of
//! available dates with their weather previews, and the signed-in user's
//! fish lists. Each load step degrades independently; only the initial
//! region fetch can fail the whole view.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::StreamExt;

use crate::errors::ApiError;
use crate::forecast::client::ForecastClient;
use crate::forecast::nearest::nearest_region;
use crate::forecast::types::{
    AddCustomFishResponse, AllFishTypesResponse, AvailableDatesResponse, CustomFishListResponse,
    DaySummary, FishTypeBrief, ForecastResponse, Region, RegionsResponse, RemoveCustomFishResponse,
};

/// Region code selected when neither an explicit id nor a usable
/// coordinate is given.
pub const DEFAULT_REGION_CODE: &str = "MOW";

/// Weather previews are fetched for this many leading calendar dates.
pub const DAY_SUMMARY_PREFIX: usize = 10;

const DAY_SUMMARY_CONCURRENCY: usize = 4;

/// The forecast operations the view composes. [`ForecastClient`] is the
/// production implementation; tests substitute their own.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    async fn regions(&self) -> Result<RegionsResponse, ApiError>;
    async fn forecast(
        &self,
        region_id: &str,
        forecast_date: Option<NaiveDate>,
    ) -> Result<ForecastResponse, ApiError>;
    async fn available_dates(&self, region_id: &str) -> Result<AvailableDatesResponse, ApiError>;
    async fn day_summary(&self, region_id: &str, date: NaiveDate) -> Result<DaySummary, ApiError>;
    async fn custom_fish(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<CustomFishListResponse, ApiError>;
    async fn add_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<AddCustomFishResponse, ApiError>;
    async fn remove_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<RemoveCustomFishResponse, ApiError>;
    async fn all_fish_types(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<AllFishTypesResponse, ApiError>;
}

#[async_trait]
impl ForecastApi for ForecastClient {
    async fn regions(&self) -> Result<RegionsResponse, ApiError> {
        self.get_regions().await
    }

    async fn forecast(
        &self,
        region_id: &str,
        forecast_date: Option<NaiveDate>,
    ) -> Result<ForecastResponse, ApiError> {
        self.get_forecast(region_id, forecast_date).await
    }

    async fn available_dates(&self, region_id: &str) -> Result<AvailableDatesResponse, ApiError> {
        self.get_available_dates(region_id).await
    }

    async fn day_summary(&self, region_id: &str, date: NaiveDate) -> Result<DaySummary, ApiError> {
        self.get_day_summary(region_id, date).await
    }

    async fn custom_fish(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<CustomFishListResponse, ApiError> {
        self.get_custom_fish(region_id, token).await
    }

    async fn add_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<AddCustomFishResponse, ApiError> {
        ForecastClient::add_custom_fish(self, region_id, fish_type_id, token).await
    }

    async fn remove_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        token: Option<&str>,
    ) -> Result<RemoveCustomFishResponse, ApiError> {
        ForecastClient::remove_custom_fish(self, region_id, fish_type_id, token).await
    }

    async fn all_fish_types(
        &self,
        region_id: &str,
        token: Option<&str>,
    ) -> Result<AllFishTypesResponse, ApiError> {
        self.get_all_fish_types(region_id, token).await
    }
}

/// Fetches the region list and resolves the nearest region to a coordinate.
/// Any failure resolves to `None`; the caller falls back to its default.
pub async fn find_nearest_region<A: ForecastApi>(
    api: &A,
    latitude: f64,
    longitude: f64,
) -> Option<Region> {
    match api.regions().await {
        Ok(response) => nearest_region(&response.regions, latitude, longitude).cloned(),
        Err(error) => {
            tracing::warn!(%error, "could not fetch regions for nearest-region lookup");
            None
        }
    }
}

/// How the initial region selection is made.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionChoice {
    /// A region id known in advance.
    Id(String),
    /// Resolve to the region nearest this coordinate.
    Coordinate { latitude: f64, longitude: f64 },
}

/// The forecast panel's state for the selected date.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ForecastState {
    /// Nothing requested yet, or a request is outstanding.
    #[default]
    Pending,
    Loaded(Box<ForecastResponse>),
    /// The server has no forecast for the requested date.
    Unavailable { date: NaiveDate },
    /// The default-date forecast could not be loaded at all.
    Failed { message: String },
}

impl ForecastState {
    pub fn response(&self) -> Option<&ForecastResponse> {
        match self {
            ForecastState::Loaded(response) => Some(response),
            _ => None,
        }
    }
}

/// All data behind the forecast screen. Mutation methods take `&mut self`,
/// so loads for a previous region can never land on top of a newer one.
#[derive(Debug)]
pub struct ForecastView<A> {
    api: A,
    token: Option<String>,
    pub regions: Vec<Region>,
    pub selected: Option<Region>,
    /// `None` means the server's default day, i.e. today in region time.
    pub selected_date: Option<NaiveDate>,
    pub forecast: ForecastState,
    pub available_dates: Vec<NaiveDate>,
    pub day_summaries: BTreeMap<NaiveDate, DaySummary>,
    pub custom_fish_ids: Vec<String>,
    pub all_fish_types: Vec<FishTypeBrief>,
}

impl<A: ForecastApi> ForecastView<A> {
    pub fn new(api: A, token: Option<String>) -> Self {
        Self {
            api,
            token,
            regions: Vec::new(),
            selected: None,
            selected_date: None,
            forecast: ForecastState::default(),
            available_dates: Vec::new(),
            day_summaries: BTreeMap::new(),
            custom_fish_ids: Vec::new(),
            all_fish_types: Vec::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Loads the region list and selects the starting region.
    ///
    /// The list is fetched exactly once; a coordinate choice is resolved
    /// against the already-loaded list. Selection precedence: explicit id,
    /// then nearest to the coordinate, then the `MOW` region, then the
    /// first region in the list. An id that matches no region leaves the
    /// view without a selection.
    pub async fn initialize(&mut self, choice: Option<RegionChoice>) -> Result<(), ApiError> {
        let response = self.api.regions().await?;
        self.regions = response.regions;

        let region = match choice {
            Some(RegionChoice::Id(id)) => {
                let found = self.regions.iter().find(|r| r.id == id).cloned();
                if found.is_none() {
                    tracing::warn!(%id, "requested region id is not in the region list");
                    return Ok(());
                }
                found
            }
            Some(RegionChoice::Coordinate {
                latitude,
                longitude,
            }) => nearest_region(&self.regions, latitude, longitude).cloned(),
            None => self.default_region(),
        };

        if let Some(region) = region {
            self.select_region(region).await;
        }
        Ok(())
    }

    fn default_region(&self) -> Option<Region> {
        self.regions
            .iter()
            .find(|r| r.code == DEFAULT_REGION_CODE)
            .or_else(|| self.regions.first())
            .cloned()
    }

    /// Switches to `region` and reloads everything scoped to it: the
    /// forecast for the server's default day, the calendar, and (when
    /// signed in) the fish lists. Every step degrades into view state
    /// rather than failing the switch.
    pub async fn select_region(&mut self, region: Region) {
        self.selected = Some(region);
        self.selected_date = None;
        self.forecast = ForecastState::Pending;
        self.available_dates = Vec::new();
        self.day_summaries = BTreeMap::new();

        self.load_forecast(None).await;
        self.load_calendar().await;
        self.load_fish_lists().await;
    }

    /// Re-runs the forecast for one calendar date. The rest of the view,
    /// calendar and fish lists included, is left untouched.
    pub async fn select_date(&mut self, date: NaiveDate) {
        if self.selected.is_none() {
            return;
        }
        self.selected_date = Some(date);
        self.forecast = ForecastState::Pending;
        self.load_forecast(Some(date)).await;
    }

    /// Adds a fish to the custom list, then refreshes the forecast for the
    /// currently selected date so the new fish appears in it.
    pub async fn add_custom_fish(&mut self, fish_type_id: &str) -> Result<(), ApiError> {
        let Some(region_id) = self.selected.as_ref().map(|r| r.id.clone()) else {
            return Ok(());
        };
        if self.custom_fish_ids.iter().any(|id| id == fish_type_id) {
            return Ok(());
        }

        self.api
            .add_custom_fish(&region_id, fish_type_id, self.token.as_deref())
            .await?;
        self.custom_fish_ids.push(fish_type_id.to_string());
        self.load_forecast(self.selected_date).await;
        Ok(())
    }

    /// Removes a fish from the custom list and refreshes the forecast.
    pub async fn remove_custom_fish(&mut self, fish_type_id: &str) -> Result<(), ApiError> {
        let Some(region_id) = self.selected.as_ref().map(|r| r.id.clone()) else {
            return Ok(());
        };

        self.api
            .remove_custom_fish(&region_id, fish_type_id, self.token.as_deref())
            .await?;
        self.custom_fish_ids.retain(|id| id != fish_type_id);
        self.load_forecast(self.selected_date).await;
        Ok(())
    }

    async fn load_forecast(&mut self, date: Option<NaiveDate>) {
        let Some(region_id) = self.selected.as_ref().map(|r| r.id.clone()) else {
            return;
        };

        self.forecast = match self.api.forecast(&region_id, date).await {
            Ok(response) => ForecastState::Loaded(Box::new(response)),
            Err(error) => {
                tracing::debug!(%error, %region_id, "forecast request failed");
                match date {
                    Some(date) => ForecastState::Unavailable { date },
                    None => ForecastState::Failed {
                        message: error.to_string(),
                    },
                }
            }
        };
    }

    async fn load_calendar(&mut self) {
        let Some(region_id) = self.selected.as_ref().map(|r| r.id.clone()) else {
            return;
        };

        match self.api.available_dates(&region_id).await {
            Ok(response) => self.available_dates = response.dates,
            Err(error) => {
                tracing::debug!(%error, %region_id, "available dates request failed");
                self.available_dates = Vec::new();
                self.day_summaries = BTreeMap::new();
                return;
            }
        }

        let api = &self.api;
        let dates: Vec<NaiveDate> = self
            .available_dates
            .iter()
            .take(DAY_SUMMARY_PREFIX)
            .copied()
            .collect();

        // Dates whose summary fails are simply absent from the map.
        let summaries: BTreeMap<NaiveDate, DaySummary> = futures::stream::iter(dates)
            .map(|date| {
                let region_id = region_id.clone();
                async move { api.day_summary(&region_id, date).await.ok() }
            })
            .buffer_unordered(DAY_SUMMARY_CONCURRENCY)
            .filter_map(|summary| async move { summary.map(|s| (s.date, s)) })
            .collect()
            .await;
        self.day_summaries = summaries;
    }

    async fn load_fish_lists(&mut self) {
        self.custom_fish_ids = Vec::new();
        self.all_fish_types = Vec::new();

        if self.token.is_none() {
            return;
        }
        let Some(region_id) = self.selected.as_ref().map(|r| r.id.clone()) else {
            return;
        };

        let token = self.token.as_deref();
        let (custom, all) = futures::future::join(
            self.api.custom_fish(&region_id, token),
            self.api.all_fish_types(&region_id, token),
        )
        .await;

        self.custom_fish_ids = match custom {
            Ok(response) => response
                .fish_types
                .into_iter()
                .map(|entry| entry.fish_type.id)
                .collect(),
            Err(error) => {
                tracing::debug!(%error, "custom fish list request failed");
                Vec::new()
            }
        };
        self.all_fish_types = match all {
            Ok(response) => response.fish_types,
            Err(error) => {
                tracing::debug!(%error, "all fish types request failed");
                Vec::new()
            }
        };
    }
}

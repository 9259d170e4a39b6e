//! Behavioral tests for the forecast view against a scripted in-memory API.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use bitecast_toolbox::errors::ApiError;
use bitecast_toolbox::forecast::types::{
    AddCustomFishResponse, AllFishTypesResponse, AvailableDatesResponse, CustomFishEntry,
    CustomFishListResponse, DaySummary, FishTypeBrief, ForecastResponse, Region, RegionsResponse,
    RemoveCustomFishResponse, WeatherSummary,
};
use bitecast_toolbox::forecast::view::{
    ForecastApi, ForecastState, ForecastView, RegionChoice, DAY_SUMMARY_PREFIX,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
}

fn region(id: &str, code: &str, latitude: f64, longitude: f64) -> Region {
    Region {
        id: id.to_string(),
        name: format!("{code} Region"),
        code: code.to_string(),
        latitude,
        longitude,
        timezone: "Europe/Moscow".to_string(),
        is_active: true,
    }
}

fn fish(id: &str, name: &str) -> FishTypeBrief {
    FishTypeBrief {
        id: id.to_string(),
        name: name.to_string(),
        icon: None,
        category: None,
        is_typical_for_region: Some(true),
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        detail: "No weather data available".to_string(),
    }
}

/// Scripted API that records every call it receives.
#[derive(Default)]
struct StubApi {
    calls: Mutex<Vec<String>>,
    regions: Vec<Region>,
    fail_regions: bool,
    available_dates: Vec<NaiveDate>,
    fail_default_forecast: bool,
    failing_forecast_dates: HashSet<NaiveDate>,
    failing_summary_dates: HashSet<NaiveDate>,
    custom_fish: Vec<CustomFishEntry>,
    all_fish: Vec<FishTypeBrief>,
    fail_custom_fish: bool,
}

impl StubApi {
    fn with_regions(regions: Vec<Region>) -> Self {
        Self {
            regions,
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn forecast_response(&self, region_id: &str, forecast_date: NaiveDate) -> ForecastResponse {
        let region = self
            .regions
            .iter()
            .find(|r| r.id == region_id)
            .cloned()
            .unwrap();
        ForecastResponse {
            region,
            forecast_date,
            weather: WeatherSummary {
                temperature: Some(18.0),
                pressure: Some(755.0),
                wind_speed: Some(3.0),
                precipitation: None,
                moon_phase: Some(0.5),
                sunrise: None,
                sunset: None,
                timezone: None,
            },
            forecasts: Vec::new(),
            multi_day_forecast: None,
        }
    }
}

/// The server-side default day when no date is requested.
const TODAY: u32 = 1;

#[async_trait]
impl ForecastApi for StubApi {
    async fn regions(&self) -> Result<RegionsResponse, ApiError> {
        self.record("regions");
        if self.fail_regions {
            return Err(not_found());
        }
        Ok(RegionsResponse {
            total: self.regions.len() as i64,
            regions: self.regions.clone(),
        })
    }

    async fn forecast(
        &self,
        region_id: &str,
        forecast_date: Option<NaiveDate>,
    ) -> Result<ForecastResponse, ApiError> {
        match forecast_date {
            Some(d) => {
                self.record(format!("forecast {region_id} {d}"));
                if self.failing_forecast_dates.contains(&d) {
                    return Err(not_found());
                }
                Ok(self.forecast_response(region_id, d))
            }
            None => {
                self.record(format!("forecast {region_id} default"));
                if self.fail_default_forecast {
                    return Err(not_found());
                }
                Ok(self.forecast_response(region_id, date(TODAY)))
            }
        }
    }

    async fn available_dates(&self, region_id: &str) -> Result<AvailableDatesResponse, ApiError> {
        self.record(format!("available_dates {region_id}"));
        Ok(AvailableDatesResponse {
            region_id: region_id.to_string(),
            dates: self.available_dates.clone(),
        })
    }

    async fn day_summary(&self, region_id: &str, date: NaiveDate) -> Result<DaySummary, ApiError> {
        self.record(format!("day_summary {region_id} {date}"));
        if self.failing_summary_dates.contains(&date) {
            return Err(not_found());
        }
        Ok(DaySummary {
            date,
            temperature: Some(20.0),
            weather_icon: Some("sun".to_string()),
            wind_speed: Some(2.0),
        })
    }

    async fn custom_fish(
        &self,
        region_id: &str,
        _token: Option<&str>,
    ) -> Result<CustomFishListResponse, ApiError> {
        self.record(format!("custom_fish {region_id}"));
        if self.fail_custom_fish {
            return Err(not_found());
        }
        Ok(CustomFishListResponse {
            total: self.custom_fish.len() as i64,
            fish_types: self.custom_fish.clone(),
        })
    }

    async fn add_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        _token: Option<&str>,
    ) -> Result<AddCustomFishResponse, ApiError> {
        self.record(format!("add_custom_fish {region_id} {fish_type_id}"));
        Ok(AddCustomFishResponse {
            success: true,
            fish_type: fish(fish_type_id, "Pike"),
        })
    }

    async fn remove_custom_fish(
        &self,
        region_id: &str,
        fish_type_id: &str,
        _token: Option<&str>,
    ) -> Result<RemoveCustomFishResponse, ApiError> {
        self.record(format!("remove_custom_fish {region_id} {fish_type_id}"));
        Ok(RemoveCustomFishResponse { success: true })
    }

    async fn all_fish_types(
        &self,
        region_id: &str,
        _token: Option<&str>,
    ) -> Result<AllFishTypesResponse, ApiError> {
        self.record(format!("all_fish_types {region_id}"));
        Ok(AllFishTypesResponse {
            total: self.all_fish.len() as i64,
            fish_types: self.all_fish.clone(),
        })
    }
}

fn three_regions() -> Vec<Region> {
    vec![
        region("1", "SPE", 59.9343, 30.3351),
        region("2", "MOW", 55.7558, 37.6173),
        region("3", "KDA", 45.0355, 38.9753),
    ]
}

#[tokio::test]
async fn nearest_region_lookup_swallows_failures() {
    let mut api = StubApi::with_regions(three_regions());
    api.fail_regions = true;
    let missing =
        bitecast_toolbox::forecast::view::find_nearest_region(&api, 55.7, 37.6).await;
    assert!(missing.is_none());

    api.fail_regions = false;
    let nearest = bitecast_toolbox::forecast::view::find_nearest_region(&api, 55.7, 37.6)
        .await
        .unwrap();
    assert_eq!(nearest.code, "MOW");

    let empty = StubApi::default();
    assert!(
        bitecast_toolbox::forecast::view::find_nearest_region(&empty, 55.7, 37.6)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn default_initialization_selects_mow() {
    let api = StubApi::with_regions(three_regions());
    let mut view = ForecastView::new(api, None);
    view.initialize(None).await.unwrap();

    assert_eq!(view.selected.as_ref().unwrap().code, "MOW");
    assert!(matches!(view.forecast, ForecastState::Loaded(_)));
    assert_eq!(
        view.forecast.response().unwrap().forecast_date,
        date(TODAY)
    );
}

#[tokio::test]
async fn region_list_is_fetched_once_for_a_coordinate_choice() {
    let api = StubApi::with_regions(three_regions());
    let mut view = ForecastView::new(api, None);
    view.initialize(Some(RegionChoice::Coordinate {
        latitude: 45.0,
        longitude: 39.0,
    }))
    .await
    .unwrap();

    assert_eq!(view.selected.as_ref().unwrap().code, "KDA");
    let calls = view.api().calls();
    assert_eq!(calls.iter().filter(|c| *c == "regions").count(), 1);
    // The forecast follows the selection immediately.
    assert_eq!(calls[0], "regions");
    assert_eq!(calls[1], "forecast 3 default");
    assert_eq!(calls[2], "available_dates 3");
}

#[tokio::test]
async fn unknown_region_id_leaves_the_view_unselected() {
    let api = StubApi::with_regions(three_regions());
    let mut view = ForecastView::new(api, None);
    view.initialize(Some(RegionChoice::Id("nope".to_string())))
        .await
        .unwrap();

    assert!(view.selected.is_none());
    assert_eq!(view.forecast, ForecastState::Pending);
    assert_eq!(view.api().calls(), vec!["regions".to_string()]);
}

#[tokio::test]
async fn calendar_previews_are_bounded_and_tolerate_failures() {
    let mut api = StubApi::with_regions(three_regions());
    api.available_dates = (1..=15).map(date).collect();
    api.failing_summary_dates = HashSet::from([date(4)]);

    let mut view = ForecastView::new(api, None);
    view.initialize(Some(RegionChoice::Id("2".to_string())))
        .await
        .unwrap();

    assert_eq!(view.available_dates.len(), 15);
    let summary_calls = view
        .api()
        .calls()
        .iter()
        .filter(|c| c.starts_with("day_summary"))
        .count();
    assert_eq!(summary_calls, DAY_SUMMARY_PREFIX);

    // Nine of the first ten dates made it, the failing one is absent.
    assert_eq!(view.day_summaries.len(), DAY_SUMMARY_PREFIX - 1);
    assert!(!view.day_summaries.contains_key(&date(4)));
    assert!(view.day_summaries.contains_key(&date(10)));
    assert!(!view.day_summaries.contains_key(&date(11)));
}

#[tokio::test]
async fn date_selection_reloads_only_the_forecast() {
    let mut api = StubApi::with_regions(three_regions());
    api.available_dates = (1..=5).map(date).collect();

    let mut view = ForecastView::new(api, None);
    view.initialize(Some(RegionChoice::Id("2".to_string())))
        .await
        .unwrap();
    let calls_before = view.api().calls().len();

    view.select_date(date(3)).await;

    assert_eq!(view.selected_date, Some(date(3)));
    assert_eq!(view.forecast.response().unwrap().forecast_date, date(3));
    let calls = view.api().calls();
    assert_eq!(calls.len(), calls_before + 1);
    assert_eq!(calls.last().unwrap(), "forecast 2 2026-08-03");
}

#[tokio::test]
async fn missing_date_is_unavailable_not_failed() {
    let mut api = StubApi::with_regions(three_regions());
    api.failing_forecast_dates = HashSet::from([date(9)]);

    let mut view = ForecastView::new(api, None);
    view.initialize(Some(RegionChoice::Id("2".to_string())))
        .await
        .unwrap();
    view.select_date(date(9)).await;

    assert_eq!(view.forecast, ForecastState::Unavailable { date: date(9) });
}

#[tokio::test]
async fn failing_default_forecast_is_a_hard_failure_state() {
    let mut api = StubApi::with_regions(three_regions());
    api.fail_default_forecast = true;

    let mut view = ForecastView::new(api, None);
    view.initialize(None).await.unwrap();

    match &view.forecast {
        ForecastState::Failed { message } => {
            assert_eq!(message, "No weather data available");
        }
        other => panic!("unexpected forecast state: {other:?}"),
    }
}

#[tokio::test]
async fn fish_lists_are_skipped_without_a_token() {
    let mut api = StubApi::with_regions(three_regions());
    api.all_fish = vec![fish("f1", "Pike")];

    let mut view = ForecastView::new(api, None);
    view.initialize(None).await.unwrap();

    assert!(view.custom_fish_ids.is_empty());
    assert!(view.all_fish_types.is_empty());
    assert!(!view
        .api()
        .calls()
        .iter()
        .any(|c| c.starts_with("custom_fish") || c.starts_with("all_fish_types")));
}

#[tokio::test]
async fn failing_fish_list_falls_back_to_empty() {
    let mut api = StubApi::with_regions(three_regions());
    api.fail_custom_fish = true;
    api.all_fish = vec![fish("f1", "Pike"), fish("f2", "Perch")];

    let mut view = ForecastView::new(api, Some("token".to_string()));
    view.initialize(None).await.unwrap();

    assert!(view.custom_fish_ids.is_empty());
    assert_eq!(view.all_fish_types.len(), 2);
}

#[tokio::test]
async fn adding_a_custom_fish_refreshes_the_current_forecast() {
    let api = StubApi::with_regions(three_regions());
    let mut view = ForecastView::new(api, Some("token".to_string()));
    view.initialize(Some(RegionChoice::Id("2".to_string())))
        .await
        .unwrap();
    view.select_date(date(5)).await;

    view.add_custom_fish("f1").await.unwrap();

    assert_eq!(view.custom_fish_ids, vec!["f1".to_string()]);
    let calls = view.api().calls();
    let add_position = calls
        .iter()
        .position(|c| c == "add_custom_fish 2 f1")
        .unwrap();
    // The refresh keeps the selected date.
    assert_eq!(calls[add_position + 1], "forecast 2 2026-08-05");
}

#[tokio::test]
async fn adding_an_already_listed_fish_is_a_no_op() {
    let mut api = StubApi::with_regions(three_regions());
    api.custom_fish = vec![CustomFishEntry {
        id: "entry-1".to_string(),
        fish_type: fish("f1", "Pike"),
        created_at: None,
    }];

    let mut view = ForecastView::new(api, Some("token".to_string()));
    view.initialize(None).await.unwrap();
    assert_eq!(view.custom_fish_ids, vec!["f1".to_string()]);
    let calls_before = view.api().calls().len();

    view.add_custom_fish("f1").await.unwrap();

    assert_eq!(view.api().calls().len(), calls_before);
    assert_eq!(view.custom_fish_ids, vec!["f1".to_string()]);
}

#[tokio::test]
async fn removing_a_custom_fish_updates_ids_and_refreshes() {
    let mut api = StubApi::with_regions(three_regions());
    api.custom_fish = vec![
        CustomFishEntry {
            id: "entry-1".to_string(),
            fish_type: fish("f1", "Pike"),
            created_at: None,
        },
        CustomFishEntry {
            id: "entry-2".to_string(),
            fish_type: fish("f2", "Perch"),
            created_at: None,
        },
    ];

    let mut view = ForecastView::new(api, Some("token".to_string()));
    view.initialize(None).await.unwrap();

    view.remove_custom_fish("f1").await.unwrap();

    assert_eq!(view.custom_fish_ids, vec!["f2".to_string()]);
    let calls = view.api().calls();
    assert!(calls.iter().any(|c| c == "remove_custom_fish 2 f1"));
    assert_eq!(calls.last().unwrap(), "forecast 2 default");
}

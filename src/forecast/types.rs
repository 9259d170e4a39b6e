//! Wire model for the BiteCast forecast service.
//!
//! Shapes mirror the JSON the gateway returns verbatim; fields the server
//! may omit carry `#[serde(default)]` so older service builds keep decoding.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named geographic area, the unit of forecast granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    /// Short region code, e.g. "MOW".
    pub code: String,
    /// WGS84 latitude in decimal degrees.
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub latitude: f64,
    /// WGS84 longitude in decimal degrees.
    #[serde(deserialize_with = "lenient_f64::deserialize")]
    pub longitude: f64,
    pub timezone: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionsResponse {
    pub regions: Vec<Region>,
    pub total: i64,
}

/// Headline weather for a forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temperature: Option<f64>,
    /// Air pressure in mmHg.
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
    /// Moon phase in [0, 1], 0 = new moon, 0.5 = full moon.
    pub moon_phase: Option<f64>,
    /// Local-time strings, e.g. "05:12:00".
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishTypeBrief {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `false` when the fish was added to the region through a custom list.
    #[serde(default)]
    pub is_typical_for_region: Option<bool>,
}

/// The four fixed forecast buckets of a day, in chronological order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Day,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Day => "Day",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        };
        write!(f, "{label}")
    }
}

/// Bite prediction for one fish in one time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDayForecast {
    pub time_of_day: TimeOfDay,
    /// 0-100, higher is better.
    pub bite_score: f64,
    pub temperature_score: Option<f64>,
    pub pressure_score: Option<f64>,
    pub wind_score: Option<f64>,
    pub moon_score: Option<f64>,
    pub precipitation_score: Option<f64>,
    pub recommendation: Option<String>,
    #[serde(default)]
    pub best_baits: Option<Vec<String>>,
    #[serde(default)]
    pub best_depth: Option<String>,
    #[serde(default)]
    pub recommended_baits: Option<Vec<String>>,
    #[serde(default)]
    pub recommended_lures: Option<Vec<String>>,
    #[serde(default)]
    pub current_season: Option<String>,
}

/// All four bucket forecasts for one fish type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishForecast {
    pub fish_type: FishTypeBrief,
    pub forecasts: Vec<TimeOfDayForecast>,
    #[serde(default)]
    pub is_custom: Option<bool>,
}

impl FishForecast {
    /// Mean bite score across the buckets, rounded to the nearest integer.
    pub fn average_score(&self) -> i64 {
        if self.forecasts.is_empty() {
            return 0;
        }
        let sum: f64 = self.forecasts.iter().map(|f| f.bite_score).sum();
        (sum / self.forecasts.len() as f64).round() as i64
    }

    /// The bucket with the highest bite score.
    pub fn best_time_of_day(&self) -> Option<TimeOfDay> {
        self.forecasts
            .iter()
            .max_by(|a, b| a.bite_score.total_cmp(&b.bite_score))
            .map(|f| f.time_of_day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestFish {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiDayForecastItem {
    pub date: NaiveDate,
    pub best_fish: Vec<BestFish>,
}

/// Full forecast for one region and one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub region: Region,
    pub forecast_date: NaiveDate,
    pub weather: WeatherSummary,
    pub forecasts: Vec<FishForecast>,
    #[serde(default)]
    pub multi_day_forecast: Option<Vec<MultiDayForecastItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    pub region_id: String,
    pub dates: Vec<NaiveDate>,
}

/// Lightweight per-date weather snapshot for calendar previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub weather_icon: Option<String>,
    pub wind_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFishEntry {
    pub id: String,
    pub fish_type: FishTypeBrief,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFishListResponse {
    pub fish_types: Vec<CustomFishEntry>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllFishTypesResponse {
    pub fish_types: Vec<FishTypeBrief>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCustomFishRequest {
    pub fish_type_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCustomFishResponse {
    pub success: bool,
    pub fish_type: FishTypeBrief,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveCustomFishResponse {
    pub success: bool,
}

/// Verbal rating for a bite score, same thresholds the web client uses.
pub fn bite_score_label(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent"
    } else if score >= 65.0 {
        "Good"
    } else if score >= 50.0 {
        "Fair"
    } else if score >= 35.0 {
        "Slow"
    } else {
        "Poor"
    }
}

/// Coarse moon phase classification for a phase value in [0, 1].
pub fn moon_phase_label(phase: f64) -> &'static str {
    if phase <= 0.05 || phase >= 0.95 {
        "New moon"
    } else if (0.45..=0.55).contains(&phase) {
        "Full moon"
    } else if phase < 0.5 {
        "Waxing"
    } else {
        "Waning"
    }
}

/// Accepts both JSON numbers and numeric strings. The service serializes
/// coordinates from decimals, and some builds emit them as strings.
pub(crate) mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(value) => Ok(value),
            NumberOrString::String(value) => {
                value.trim().parse().map_err(serde::de::Error::custom)
            }
        }
    }
}

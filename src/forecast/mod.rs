pub mod client;
pub mod nearest;
pub mod types;
pub mod view;

pub use client::ForecastClient;
pub use nearest::nearest_region;
pub use view::{ForecastApi, ForecastState, ForecastView, RegionChoice};

pub mod dates;
pub mod fish;
pub mod forecast;
pub mod regions;

use anyhow::Context;

use crate::forecast::client::ForecastClient;
use crate::forecast::nearest::nearest_region;
use crate::forecast::types::Region;
use crate::forecast::view::{RegionChoice, DEFAULT_REGION_CODE};

/// Resolves the region a command operates on from a one-shot fetch of the
/// region list. Mirrors the selection order of the forecast view.
pub(crate) async fn resolve_region(
    client: &ForecastClient,
    choice: Option<RegionChoice>,
) -> anyhow::Result<Region> {
    let regions = client
        .get_regions()
        .await
        .context("Could not load the region list")?
        .regions;

    let region = match choice {
        Some(RegionChoice::Id(id)) => regions.iter().find(|r| r.id == id).cloned(),
        Some(RegionChoice::Coordinate {
            latitude,
            longitude,
        }) => nearest_region(&regions, latitude, longitude).cloned(),
        None => regions
            .iter()
            .find(|r| r.code == DEFAULT_REGION_CODE)
            .or_else(|| regions.first())
            .cloned(),
    };

    region.ok_or_else(|| anyhow::anyhow!("No matching region found"))
}

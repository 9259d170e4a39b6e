use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use indicatif::ProgressBar;

use crate::forecast::client::ForecastClient;
use crate::forecast::view::{RegionChoice, DAY_SUMMARY_PREFIX};

pub async fn list(client: &ForecastClient, choice: Option<RegionChoice>) -> anyhow::Result<()> {
    let region = super::resolve_region(client, choice).await?;
    let response = client.get_available_dates(&region.id).await?;

    if response.dates.is_empty() {
        println!("No forecast dates available for {}", region.name);
        return Ok(());
    }

    let preview: Vec<_> = response
        .dates
        .iter()
        .take(DAY_SUMMARY_PREFIX)
        .copied()
        .collect();

    let pb = ProgressBar::new(preview.len() as u64);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Temperature", "Wind", "Weather"]);

    for date in preview {
        match client.get_day_summary(&region.id, date).await {
            Ok(summary) => {
                table.add_row(vec![
                    Cell::new(summary.date),
                    Cell::new(
                        summary
                            .temperature
                            .map(|t| format!("{t:.0}°C"))
                            .unwrap_or_default(),
                    ),
                    Cell::new(
                        summary
                            .wind_speed
                            .map(|w| format!("{w:.0} m/s"))
                            .unwrap_or_default(),
                    ),
                    Cell::new(summary.weather_icon.unwrap_or_default()),
                ]);
            }
            Err(error) => {
                tracing::debug!(%error, %date, "day summary request failed");
                table.add_row(vec![Cell::new(date), Cell::new(""), Cell::new(""), Cell::new("")]);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("{} - forecast calendar", region.name);
    println!("{table}");

    if response.dates.len() > DAY_SUMMARY_PREFIX {
        let remaining: Vec<String> = response
            .dates
            .iter()
            .skip(DAY_SUMMARY_PREFIX)
            .map(|d| d.to_string())
            .collect();
        println!("Further dates: {}", remaining.join(", "));
    }

    Ok(())
}

use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;
use itertools::Itertools;

use crate::forecast::client::ForecastClient;
use crate::forecast::types::{bite_score_label, moon_phase_label, ForecastResponse, TimeOfDay};
use crate::forecast::view::{ForecastState, ForecastView, RegionChoice};

/// Fish shown in the highlighted "best bets" block.
const HIGHLIGHT_COUNT: usize = 4;

pub async fn show(
    client: ForecastClient,
    token: Option<String>,
    choice: Option<RegionChoice>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let mut view = ForecastView::new(client, token);
    view.initialize(choice).await?;

    if view.selected.is_none() {
        anyhow::bail!("No matching region found");
    }
    if let Some(date) = date {
        view.select_date(date).await;
    }

    match &view.forecast {
        ForecastState::Loaded(forecast) => print_forecast(forecast, &view.custom_fish_ids),
        ForecastState::Unavailable { date } => {
            println!(
                "{}",
                style(format!("No forecast available for {date}")).yellow()
            );
        }
        ForecastState::Failed { message } => {
            anyhow::bail!("Could not load forecast: {message}")
        }
        ForecastState::Pending => anyhow::bail!("Could not load forecast"),
    }

    if let (Some(first), Some(last)) = (view.available_dates.first(), view.available_dates.last())
    {
        println!(
            "\nForecasts available for {} dates ({first} to {last})",
            view.available_dates.len()
        );
    }

    Ok(())
}

fn print_forecast(forecast: &ForecastResponse, custom_fish_ids: &[String]) {
    println!(
        "{} - {}",
        style(&forecast.region.name).bold(),
        forecast.forecast_date
    );
    print_weather(forecast);

    let ranked = forecast
        .forecasts
        .iter()
        .sorted_by_key(|fish| std::cmp::Reverse(fish.average_score()))
        .collect::<Vec<_>>();

    if !ranked.is_empty() {
        println!("\n{}", style("Best bets").bold());
        for fish in ranked.iter().take(HIGHLIGHT_COUNT) {
            let score = fish.average_score();
            println!(
                "  {} {} ({})",
                style(format!("{score:>3}")).green().bold(),
                fish.fish_type.name,
                bite_score_label(score as f64)
            );
        }
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Fish", "Avg", "Rating", "Best time", "Morning", "Day", "Evening", "Night",
        ]);

    for fish in &ranked {
        let custom = fish.is_custom.unwrap_or(false)
            || custom_fish_ids.iter().any(|id| *id == fish.fish_type.id);
        let name = if custom {
            format!("{} *", fish.fish_type.name)
        } else {
            fish.fish_type.name.clone()
        };
        let score = fish.average_score();

        let mut row = vec![
            Cell::new(name),
            Cell::new(score),
            Cell::new(bite_score_label(score as f64)),
            Cell::new(
                fish.best_time_of_day()
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
            ),
        ];
        for time_of_day in TimeOfDay::ALL {
            let bucket = fish
                .forecasts
                .iter()
                .find(|f| f.time_of_day == time_of_day)
                .map(|f| format!("{:.0}", f.bite_score))
                .unwrap_or_default();
            row.push(Cell::new(bucket));
        }
        table.add_row(row);
    }

    println!("\n{table}");
    if ranked
        .iter()
        .any(|f| f.is_custom.unwrap_or(false) || custom_fish_ids.contains(&f.fish_type.id))
    {
        println!("* from your custom fish list");
    }
}

fn print_weather(forecast: &ForecastResponse) {
    let weather = &forecast.weather;
    let mut parts: Vec<String> = Vec::new();
    if let Some(temperature) = weather.temperature {
        parts.push(format!("{temperature:.0}°C"));
    }
    if let Some(pressure) = weather.pressure {
        parts.push(format!("{pressure:.0} mmHg"));
    }
    if let Some(wind_speed) = weather.wind_speed {
        parts.push(format!("wind {wind_speed:.0} m/s"));
    }
    if let Some(precipitation) = weather.precipitation {
        parts.push(format!("precipitation {precipitation:.1} mm"));
    }
    if let Some(moon_phase) = weather.moon_phase {
        parts.push(moon_phase_label(moon_phase).to_string());
    }
    if !parts.is_empty() {
        println!("{}", parts.join(", "));
    }
    if let (Some(sunrise), Some(sunset)) = (&weather.sunrise, &weather.sunset) {
        println!("Sunrise {sunrise}, sunset {sunset}");
    }
}

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;

use crate::forecast::client::ForecastClient;

pub async fn list(client: &ForecastClient) -> anyhow::Result<()> {
    let response = client.get_regions().await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Id", "Code", "Name", "Latitude", "Longitude", "Timezone", "Active",
        ]);

    for region in &response.regions {
        table.add_row(vec![
            Cell::new(&region.id),
            Cell::new(&region.code),
            Cell::new(&region.name),
            Cell::new(format!("{:.4}", region.latitude)),
            Cell::new(format!("{:.4}", region.longitude)),
            Cell::new(&region.timezone),
            Cell::new(if region.is_active { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    println!("{} regions", response.total);
    Ok(())
}

pub async fn nearest(
    client: &ForecastClient,
    latitude: f64,
    longitude: f64,
) -> anyhow::Result<()> {
    match client.find_nearest_region(latitude, longitude).await {
        Some(region) => {
            println!(
                "{} ({}) - {:.4}, {:.4}, {}",
                style(&region.name).bold(),
                region.code,
                region.latitude,
                region.longitude,
                region.timezone
            );
        }
        None => println!("No region found for ({latitude}, {longitude})"),
    }
    Ok(())
}

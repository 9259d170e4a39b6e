use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;

use crate::forecast::client::ForecastClient;
use crate::forecast::view::RegionChoice;

fn require_token(token: Option<&str>) -> anyhow::Result<&str> {
    token.ok_or_else(|| {
        anyhow::anyhow!("Managing the custom fish list requires a token, see `--token`")
    })
}

pub async fn list(
    client: &ForecastClient,
    token: Option<&str>,
    choice: Option<RegionChoice>,
) -> anyhow::Result<()> {
    let token = require_token(token)?;
    let region = super::resolve_region(client, choice).await?;

    let (custom, all) = futures::future::try_join(
        client.get_custom_fish(&region.id, Some(token)),
        client.get_all_fish_types(&region.id, Some(token)),
    )
    .await?;

    let custom_ids: Vec<&str> = custom
        .fish_types
        .iter()
        .map(|entry| entry.fish_type.id.as_str())
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Fish", "Category", "Typical", "Custom"]);

    for fish in &all.fish_types {
        table.add_row(vec![
            Cell::new(&fish.id),
            Cell::new(&fish.name),
            Cell::new(fish.category.as_deref().unwrap_or_default()),
            Cell::new(if fish.is_typical_for_region.unwrap_or(true) {
                "yes"
            } else {
                ""
            }),
            Cell::new(if custom_ids.contains(&fish.id.as_str()) {
                "yes"
            } else {
                ""
            }),
        ]);
    }

    println!("{} - fish types", region.name);
    println!("{table}");
    println!(
        "{} fish types, {} on your custom list",
        all.total, custom.total
    );
    Ok(())
}

pub async fn add(
    client: &ForecastClient,
    token: Option<&str>,
    choice: Option<RegionChoice>,
    fish_type_id: &str,
) -> anyhow::Result<()> {
    let token = require_token(token)?;
    let region = super::resolve_region(client, choice).await?;

    let response = client
        .add_custom_fish(&region.id, fish_type_id, Some(token))
        .await?;
    println!(
        "{} Added {} to the custom list for {}",
        style("✓").green(),
        response.fish_type.name,
        region.name
    );
    Ok(())
}

pub async fn remove(
    client: &ForecastClient,
    token: Option<&str>,
    choice: Option<RegionChoice>,
    fish_type_id: &str,
) -> anyhow::Result<()> {
    let token = require_token(token)?;
    let region = super::resolve_region(client, choice).await?;

    client
        .remove_custom_fish(&region.id, fish_type_id, Some(token))
        .await?;
    println!(
        "{} Removed fish type {} from the custom list for {}",
        style("✓").green(),
        fish_type_id,
        region.name
    );
    Ok(())
}

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::errors::PathError;
use crate::forecast::view::RegionChoice;
use crate::types::ToolboxConfig;

static CONFIG_FILE: &str = "bitecast/config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "BiteCast fishing forecast toolbox", name = "bitecast")]
pub struct Cli {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Path to the configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the API gateway, overriding the configuration file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Bearer token for the custom fish endpoints
    #[arg(long, global = true)]
    pub token: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all forecast regions
    Regions,
    /// Find the region nearest to a coordinate
    Nearest {
        /// Latitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        /// Longitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
    },
    /// Show the bite forecast for a region
    Forecast(ForecastOptions),
    /// Show the forecast calendar with weather previews
    Dates(RegionSelector),
    /// Manage the custom fish list of a region
    Fish {
        #[command(subcommand)]
        command: FishCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ForecastOptions {
    #[command(flatten)]
    pub selector: RegionSelector,
    /// Forecast date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Picks the region a command operates on. Without any of these flags the
/// default region is used.
#[derive(Args, Debug, Clone)]
pub struct RegionSelector {
    /// Region id
    #[arg(short, long, conflicts_with_all = ["latitude", "longitude"])]
    pub region: Option<String>,
    /// Latitude for a nearest-region lookup
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    /// Longitude for a nearest-region lookup
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,
}

impl RegionSelector {
    pub fn choice(&self) -> Option<RegionChoice> {
        if let Some(id) = &self.region {
            return Some(RegionChoice::Id(id.clone()));
        }
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(RegionChoice::Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FishCommands {
    /// Show the custom fish list and all selectable fish types
    List(RegionSelector),
    /// Add a fish type to the custom list
    Add {
        #[command(flatten)]
        selector: RegionSelector,
        /// Id of the fish type to add
        fish_type: String,
    },
    /// Remove a fish type from the custom list
    Remove {
        #[command(flatten)]
        selector: RegionSelector,
        /// Id of the fish type to remove
        fish_type: String,
    },
}

impl Cli {
    fn config_path(&self) -> Result<PathBuf, PathError> {
        match &self.config {
            Some(path) => std::fs::canonicalize(path).map_err(PathError::Canonicalize),
            None => dirs::config_dir()
                .ok_or(PathError::ConfigDir)
                .map(|p| p.join(CONFIG_FILE)),
        }
    }

    /// Effective configuration: the file, with command line overrides on top.
    pub fn config(&self) -> anyhow::Result<ToolboxConfig> {
        let mut config = ToolboxConfig::load(&self.config_path()?)?;
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        Ok(config)
    }
}

//! STAC catalog search command.

use chrono::{DateTime, Utc};
use clap::Args;
use kartlager::api::StacQuery;
use kartlager::coord::GeoBounds;

use super::common::build_service;
use crate::error::CliError;

/// Arguments for `kartlager stac`.
#[derive(Debug, Args)]
pub struct StacArgs {
    /// Minimum latitude in decimal degrees (WGS84)
    #[arg(long)]
    min_lat: f64,

    /// Minimum longitude in decimal degrees (WGS84)
    #[arg(long)]
    min_lon: f64,

    /// Maximum latitude in decimal degrees (WGS84)
    #[arg(long)]
    max_lat: f64,

    /// Maximum longitude in decimal degrees (WGS84)
    #[arg(long)]
    max_lon: f64,

    /// Collection id to search; repeatable
    #[arg(long = "collection")]
    collections: Vec<String>,

    /// Earliest item datetime, RFC 3339 (e.g. 2023-01-01T00:00:00Z)
    #[arg(long, requires = "until")]
    since: Option<String>,

    /// Latest item datetime, RFC 3339
    #[arg(long, requires = "since")]
    until: Option<String>,

    /// Result limit (1-1000)
    #[arg(long, default_value = "10")]
    limit: u32,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,
}

/// Run the stac command.
pub async fn run(args: StacArgs) -> Result<(), CliError> {
    let service = build_service()?;

    let bounds = GeoBounds::new(args.min_lat, args.min_lon, args.max_lat, args.max_lon);
    let mut query = StacQuery::new(bounds)
        .with_collections(args.collections)
        .with_limit(args.limit);

    if let (Some(since), Some(until)) = (&args.since, &args.until) {
        query = query.with_datetime(parse_datetime(since)?, parse_datetime(until)?);
    }

    let items = service.stac_search(&query).await?;

    if args.json {
        let values: Vec<_> = items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "id": item.id,
                    "collection": item.collection,
                    "datetime": item.datetime,
                    "assets": item
                        .assets
                        .iter()
                        .map(|a| serde_json::json!({
                            "key": a.key,
                            "href": a.href,
                            "title": a.title,
                        }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(values));
        return Ok(());
    }

    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for item in &items {
        println!(
            "{}  [{}]  {}",
            item.id,
            item.collection.as_deref().unwrap_or("-"),
            item.datetime.as_deref().unwrap_or("-")
        );
        for asset in &item.assets {
            println!("  {}: {}", asset.key, asset.href);
        }
    }

    Ok(())
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CliError::InvalidArguments(format!("invalid datetime '{}': {}", value, e)))
}

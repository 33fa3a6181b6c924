//! Print the persisted route.

use anyhow::Result;
use clap::Parser;

use waytrace_tracker::{init_store, RouteStore};

/// Show the route stored in the waytrace database
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Route database path
    #[arg(long, default_value = "data/waytrace.db", env = "WAYTRACE_DB")]
    db: String,

    /// Output the raw record list as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let store = init_store(&args.db, 1).await?;
    let Some(route) = store.load().await? else {
        println!("No route stored in {}", args.db);
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
        return Ok(());
    }

    println!("{} waypoints in {}:", route.len(), args.db);
    for (index, record) in route.iter().enumerate() {
        println!("  {:>2}. ({:.5}, {:.5})", index + 1, record.lat, record.lng);
    }

    Ok(())
}

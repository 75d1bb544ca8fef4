mod common;

use rapport::Rapport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rapport = Rapport::builder()
        .with_connector(common::get_connector())
        .build()?;

    let snapshot = rapport.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let unavailable = snapshot
        .assets
        .iter()
        .filter(|q| q.price.is_unavailable())
        .count();
    println!(
        "-- {} assets, {} without a price",
        snapshot.assets.len(),
        unavailable
    );
    Ok(())
}

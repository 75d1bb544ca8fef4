mod common;

use rapport::{CONTENT_DISPOSITION, CONTENT_TYPE, CacheConfig, Rapport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let rapport = Rapport::builder()
        .with_connector(common::get_connector())
        .with_cache(CacheConfig::default())
        .build()?;

    let bytes = rapport.generate_pdf().await;
    std::fs::write("kryptorapport.pdf", &bytes)?;
    println!("wrote kryptorapport.pdf ({} bytes)", bytes.len());
    println!("serve as: {CONTENT_TYPE}; {CONTENT_DISPOSITION}");
    Ok(())
}

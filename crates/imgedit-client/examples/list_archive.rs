//! List an IMG archive and print its metadata and members
//!
//! ```bash
//! cargo run --example list_archive -- models/gta3.img
//! ```

use imgedit_client::{ImgArchive, ListOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: list_archive <archive.img>")?;

    let archive = ImgArchive::open(&path).await;
    if archive.executable().as_os_str().is_empty() {
        eprintln!("warning: editor tool could not be resolved, listing will fail");
    }

    let listing = archive.list(ListOptions::default()).await?;

    println!("Command header:");
    for (label, value) in listing.header.iter() {
        println!("  {label}: {value}");
    }

    println!("\nArchive:");
    for (key, value) in listing.metadata.iter() {
        println!("  {key}: {value}");
    }

    println!("\n{} members:", listing.entries.len());
    for entry in &listing.entries {
        println!("  {entry}");
    }

    Ok(())
}

//! Debug script to run one live caption scrape
//!
//! Run with: RUST_LOG=downsub_core=debug cargo run --example debug_capture -p downsub-core -- <video-url>

use downsub_core::{DownsubScraper, TrackFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let video_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());

    let scraper = DownsubScraper::new()?;

    println!("Scraping captions for {}...\n", video_url);

    let report = scraper.scrape_with_trace(&video_url).await;
    println!("States: {:?}\n", report.history);

    let captions = match report.result {
        Ok(captions) => captions,
        Err(e) => {
            println!("Failed ({:?}): {}", e.kind(), e);
            return Ok(());
        }
    };

    if let Some(ref title) = captions.metadata.title {
        println!("Title: {}", title);
    }
    println!("Subtitles: {}", captions.subtitles.len());
    for track in &captions.subtitles {
        println!("   {} -> {}", track.language, track.urls.srt);
    }
    println!("Translations: {}", captions.translations.len());

    if let Some(track) = captions.subtitles.first() {
        let text = scraper.download_track(track, TrackFormat::Txt).await?;
        let preview: String = text.chars().take(500).collect();
        println!("\n=== First track (first 500 chars) ===\n{}", preview);
    }

    Ok(())
}

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use socials_parser::{
    DownloadResult, Platform, default_dispatcher,
    media::{FacebookDownload, InstagramLink, QualityLabel, TikTokDownload, YoutubeDownloads},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The URL of the post to extract download links from
    #[arg(short, long)]
    url: String,

    /// The platform the URL belongs to (e.g. "youtube", "tt", "fb", "ig")
    #[arg(short, long)]
    platform: String,

    /// Output the result in JSON format
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let platform = Platform::from_alias(&args.platform)
        .with_context(|| format!("Unknown platform: {}", &args.platform))?;

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ]),
    );
    pb.set_message(format!("Extracting {platform} download links..."));

    let dispatcher = default_dispatcher();
    let result = dispatcher
        .dispatch(&args.url, platform)
        .await
        .context("Failed to extract download links")?;

    pb.finish_with_message("Done");

    if args.json {
        let json = serde_json::to_string_pretty(&result).unwrap();
        println!("{}", json);
        return Ok(());
    }

    match result {
        DownloadResult::YouTube(downloads) => print_youtube(&downloads),
        DownloadResult::TikTok(download) => print_tiktok(&download),
        DownloadResult::Facebook(download) => print_facebook(&download),
        DownloadResult::Instagram(links) => print_instagram(&links),
    }

    Ok(())
}

fn print_youtube(downloads: &YoutubeDownloads) {
    println!("\n{}", "Video Information:".green().bold());
    if let Some(title) = downloads.info.get("title").and_then(Value::as_str) {
        println!("{} {}", "Title:".green(), title.cyan());
    }

    println!("\n{}", "Video Downloads:".green().bold());
    for option in &downloads.video {
        println!(
            "  {} {}",
            format!("{}p", field_text(option, "height")).yellow(),
            link_text(option).blue()
        );
    }

    println!("\n{}", "Audio Downloads:".green().bold());
    for option in &downloads.audio {
        println!(
            "  {} {}",
            format!("{} kbps", field_text(option, "bitrate")).yellow(),
            link_text(option).blue()
        );
    }
}

fn field_text(option: &Value, key: &str) -> String {
    match option.get(key) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "?".to_string(),
    }
}

fn link_text(option: &Value) -> &str {
    option.get("url").and_then(Value::as_str).unwrap_or_default()
}

fn print_tiktok(download: &TikTokDownload) {
    println!("\n{}", "Post Information:".green().bold());
    println!("{} {}", "Title:".green(), download.title.cyan());
    println!("{} {}", "Author:".green(), download.author.nickname.cyan());
    println!("{} {}", "Duration:".green(), download.duration.cyan());
    println!(
        "{} {} views, {} likes",
        "Stats:".green(),
        download.stats.views.cyan(),
        download.stats.likes.cyan()
    );
    println!("{} {}", "Music:".green(), download.music_info.title.cyan());

    println!("\n{}", "Download Links:".green().bold());
    for link in &download.data {
        println!(
            "  {} {}",
            format!("{}:", link.kind.as_str()).yellow(),
            link.url.blue()
        );
    }
}

fn print_facebook(download: &FacebookDownload) {
    println!("\n{}", "Video Information:".green().bold());
    if !download.caption.is_empty() {
        println!("{} {}", "Caption:".green(), download.caption.cyan());
    }
    if !download.preview.is_empty() {
        println!("{} {}", "Preview:".green(), download.preview.blue());
    }

    println!("\n{}", "Download Links:".green().bold());
    for link in &download.results {
        let quality = match link.quality {
            QualityLabel::Pixels(pixels) => format!("{pixels}p"),
            QualityLabel::Unknown => "?".to_string(),
        };
        println!(
            "  {} {} {}",
            quality.yellow(),
            link.kind.as_str().cyan(),
            link.url.blue()
        );
    }
}

fn print_instagram(links: &[InstagramLink]) {
    if links.is_empty() {
        println!("\n{}", "No downloadable media found.".yellow().bold());
        return;
    }

    println!("\n{}", "Download Links:".green().bold());
    for link in links {
        let title = if link.title.is_empty() {
            "Download"
        } else {
            &link.title
        };
        println!("  {} {}", format!("{title}:").yellow(), link.url.blue());
    }
}

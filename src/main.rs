use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use mural::core::config::{self, CliOverrides, MuralConfig};
use mural::core::feed;
use mural::tui;

#[derive(Parser)]
#[command(name = "mural", about = "Terminal feed with inline comments")]
struct Args {
    /// Feed file to display (.json or .toml); defaults to a built-in sample
    #[arg(short, long)]
    feed: Option<PathBuf>,

    /// Name shown on the comments you publish
    #[arg(short, long)]
    commenter: Option<String>,

    /// Config file to read instead of ~/.mural/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to mural.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("mural.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Config unusable, falling back to defaults: {}", e);
        MuralConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            feed_file: args.feed,
            commenter_name: args.commenter,
        },
    );

    let posts = match &resolved.feed_file {
        Some(path) => feed::load_feed(path).map_err(|e| {
            log::error!("Failed to load feed {}: {}", path.display(), e);
            eprintln!("mural: cannot load feed {}: {}", path.display(), e);
            std::io::Error::other(e)
        })?,
        None => feed::sample_feed(chrono::Utc::now()),
    };

    log::info!(
        "Mural starting up with {} posts (feed: {:?})",
        posts.len(),
        resolved.feed_file
    );

    tui::run(resolved, posts)
}

//! Agora CLI - forum page helpers.
//!
//! Provides commands for:
//! - `render`: Render a post body to HTML
//! - `links`: Build canonical/next/prev link tags for a listing page
//! - `avatar`, `category-image`: Resolve image URLs
//! - `themes`: List installed themes
//! - `rss`, `badge`: Build category feed and badge image URLs
//! - `ping`: Check whether a site is reachable
//! - `static`: Classify a request path

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AvatarArgs, BadgeArgs, CategoryImageArgs, LinksArgs, PingArgs, RenderArgs, RssArgs,
    StaticArgs, ThemesArgs,
};
use output::Output;

/// Agora - forum page helpers.
#[derive(Parser)]
#[command(name = "agora", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover agora.toml).
    #[arg(short, long, global = true, env = "AGORA_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post body to HTML.
    Render(RenderArgs),
    /// Build SEO link tags for a listing page.
    Links(LinksArgs),
    /// Resolve a member avatar URL.
    Avatar(AvatarArgs),
    /// Resolve a category image URL.
    CategoryImage(CategoryImageArgs),
    /// List installed themes.
    Themes(ThemesArgs),
    /// Print the RSS feed URL of a category.
    Rss(RssArgs),
    /// Print the URL of a badge image.
    Badge(BadgeArgs),
    /// Check whether a URL answers.
    Ping(PingArgs),
    /// Tell whether a request path is a static resource.
    Static(StaticArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render(args) => args.execute(config),
        Commands::Links(args) => args.execute(config),
        Commands::Avatar(args) => args.execute(config),
        Commands::CategoryImage(args) => args.execute(config),
        Commands::Themes(args) => args.execute(config),
        Commands::Rss(args) => args.execute(config),
        Commands::Badge(args) => args.execute(config),
        Commands::Ping(args) => {
            args.execute();
            Ok(())
        }
        Commands::Static(args) => {
            args.execute();
            Ok(())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level as TraceLevel, Subscriber};
use tracing_subscriber::FmtSubscriber;

use theme_sync::constants::env as env_keys;
use theme_sync::constants::marker::{DARK_CLASS, LIGHT_CLASS};
use theme_sync::{App, AppConfig, FileStore, RenderContext, RootClasses, ThemeHandle};

#[derive(Parser, Debug)]
#[command(name = "theme-sync", version, about = "Persisted light/dark theme switch")]
struct Cli {
    /// Store file (overrides config and THEME_SYNC_STORE)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Config file (default: <config_dir>/theme-sync/theme-sync.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Bootstrap without storage or document, like a server render pass
    /// (requires `ssr = true` in config or THEME_SYNC_SSR=true)
    #[arg(long)]
    headless: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Print the current theme and root classes
    Show,
    /// Switch between dark and light
    Toggle,
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn subscriber(level: TraceLevel) -> impl Subscriber + Send + Sync + 'static {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish()
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env_overrides();
            config
        }
        None => AppConfig::load()?,
    };
    if let Some(store) = &cli.store {
        config.theme.store_path = Some(store.clone());
    }
    Ok(config)
}

fn render_context(cli: &Cli, config: &AppConfig) -> RenderContext {
    if cli.headless {
        return RenderContext::server();
    }
    RenderContext::client(FileStore::new(config.store_path()), RootClasses::new())
}

/// Theme marker classes currently set on the document
fn marker_classes(theme: &ThemeHandle) -> String {
    [DARK_CLASS, LIGHT_CLASS]
        .into_iter()
        .filter(|class| theme.has_marker(class))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_theme(theme: &ThemeHandle) {
    println!("theme={}", theme.mode());
    println!("class=\"{}\"", marker_classes(theme));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_level = std::env::var(env_keys::LOG_LEVEL).ok();

    // Config loading logs through LOG_LEVEL (or info) until the real level is known
    let provisional = subscriber(parse_level(env_level.as_deref().unwrap_or("info")));
    let config = tracing::subscriber::with_default(provisional, || load_config(&cli))?;

    // LOG_LEVEL wins over the config file
    let log_level = parse_level(env_level.as_deref().unwrap_or(&config.log_level));
    tracing::subscriber::set_global_default(subscriber(log_level))?;

    let render = render_context(&cli, &config);
    info!(store = %config.store_path().display(), headless = cli.headless, "Starting");

    let app = App::bootstrap(config, render)?;
    let theme = app
        .theme()
        .context("theme plugin is not installed for this render pass")?;

    if let Command::Toggle = cli.command {
        theme.toggle();
    }
    print_theme(theme);
    Ok(())
}

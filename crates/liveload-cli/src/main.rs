use anyhow::Context;
use clap::{Parser, ValueEnum};
use liveload_core::{CliOverrides, Container, ImportStyle, LoaderConfig, Scenario};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "liveload.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// liveload - module cache and property definition demonstrations
#[derive(Parser, Debug)]
#[command(name = "liveload")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenarios to run (live-binding, define-property, load-order, proxy-get)
    #[arg(value_name = "SCENARIO", value_parser = parse_scenario)]
    scenarios: Vec<Scenario>,

    /// Path to a liveload.json or liveload.yaml configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format for scenario transcripts
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// How the live-binding scenario binds named exports (require, import)
    #[arg(long, value_name = "STYLE", value_parser = parse_style)]
    style: Option<ImportStyle>,

    /// Also run the throwing property definition in define-property
    #[arg(long)]
    legacy: bool,

    /// Print diagnostics without ANSI styling
    #[arg(long)]
    no_pretty: bool,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Write a default liveload.json to the current directory
    #[arg(long)]
    init: bool,
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    s.parse()
}

fn parse_style(s: &str) -> Result<ImportStyle, String> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only transcript lines.
    // Set RUST_LOG=debug for detailed logs.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    if cli.init {
        LoaderConfig::init_file(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;
        println!("Created {}", DEFAULT_CONFIG_FILE);
        return Ok(());
    }

    if cli.list {
        for scenario in Scenario::ALL {
            println!("{}", scenario);
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let scenarios = select_scenarios(&cli, &config)?;
    debug!("Import style: {}", config.loader_options.import_style);
    info!("Running {} scenario(s)", scenarios.len());

    let container = Container::new(config).context("Failed to register built-in modules")?;
    for scenario in scenarios {
        let lines = container
            .run_scenario(scenario)
            .with_context(|| format!("Scenario '{}' failed", scenario))?;
        print_transcript(scenario, &lines, cli.format)?;
    }

    Ok(())
}

/// Load the configuration file (explicit or default) and apply CLI overrides
fn load_config(cli: &Cli) -> anyhow::Result<LoaderConfig> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if default_path.exists() => {
            info!("Using {}", DEFAULT_CONFIG_FILE);
            LoaderConfig::from_file(default_path)
                .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_FILE))?
        }
        None => LoaderConfig::default(),
    };

    config.apply_overrides(&CliOverrides {
        import_style: cli.style,
        legacy_define: cli.legacy.then_some(true),
        pretty: cli.no_pretty.then_some(false),
    });
    Ok(config)
}

/// Scenarios named on the command line, or the configured defaults
fn select_scenarios(cli: &Cli, config: &LoaderConfig) -> anyhow::Result<Vec<Scenario>> {
    if !cli.scenarios.is_empty() {
        return Ok(cli.scenarios.clone());
    }
    config
        .scenarios
        .iter()
        .map(|name| {
            name.parse::<Scenario>()
                .map_err(|e| anyhow::anyhow!("Invalid scenario in config: {}", e))
        })
        .collect()
}

fn print_transcript(scenario: Scenario, lines: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for line in lines {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "scenario": scenario,
                "lines": lines,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

//! Inferds CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use inferds_cli::config::DemoConfig;
use inferds_cli::logging::{init_tracing, LogFormat, TracingConfig};
use inferds_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = cli.log_level.parse().unwrap_or(tracing::Level::INFO);
    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };

    init_tracing(TracingConfig {
        level: log_level,
        format,
        ..Default::default()
    })?;

    // Print banner
    if !cli.json {
        print_banner();
    }

    let mut config = DemoConfig::load(cli.config.as_deref())?;
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;
    debug!(scale = config.scale, seed = config.seed, "running demo");

    // Execute command
    match cli.command {
        Commands::Linear(args) => {
            commands::linear::execute(args, &config, cli.json)?;
        }
        Commands::Maps(args) => {
            commands::maps::execute(args, &config, cli.json)?;
        }
        Commands::Trees(args) => {
            commands::trees::execute(args, &config, cli.json)?;
        }
        Commands::Graphs(args) => {
            commands::graphs::execute(args, &config, cli.json)?;
        }
        Commands::All => {
            commands::linear::execute(commands::linear::LinearArgs::default(), &config, cli.json)?;
            commands::maps::execute(commands::maps::MapsArgs::default(), &config, cli.json)?;
            commands::trees::execute(commands::trees::TreesArgs::default(), &config, cli.json)?;
            commands::graphs::execute(commands::graphs::GraphsArgs::default(), &config, cli.json)?;
        }
        Commands::Version => {
            print_version(cli.json);
        }
    }

    Ok(())
}

/// Print the banner.
fn print_banner() {
    let banner = r#"
    _____      ____              __
   /  _/___  / __/__  _________/ /____
   / // __ \/ /_/ _ \/ ___/ __  / ___/
 _/ // / / / __/  __/ /  / /_/ (__  )
/___/_/ /_/_/  \___/_/   \__,_/____/
"#;

    println!("{}", banner.bright_cyan());
    println!(
        "  {} {} - {}\n",
        "Inferds".bright_green().bold(),
        env!("CARGO_PKG_VERSION").bright_yellow(),
        "Data structures for inference-serving workloads".white()
    );
}

/// Print version information.
fn print_version(json: bool) {
    if json {
        let version = serde_json::json!({
            "name": "Inferds",
            "version": env!("CARGO_PKG_VERSION"),
            "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&version).unwrap_or_default()
        );
    } else {
        println!(
            "{} {}",
            "Inferds".bright_green().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
        println!();
        println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    }
}

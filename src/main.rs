use anyhow::{Context, Result};
use clap::Parser;
use mods2dot::config::{find_config_file, get_config, load_config, Config};
use mods2dot::{ui, DotDigraph, DotStyle, ModsParser};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// mods2dot - Convert a MODS XML file into a GraphViz dot graph
#[derive(Parser, Debug)]
#[command(name = "mods2dot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert a MODS XML file into a GraphViz dot graph", long_about = None)]
struct Cli {
    /// MODS XML input file
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Output dot file (default: standard output)
    output: Option<PathBuf>,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("mods2dot={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config()?,
    };

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .context("An input file is required")?;

    let parser = ModsParser::from(&config.parser);
    let references = parser
        .parse_file(input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    tracing::info!(
        "Parsed {} references from {}",
        references.len(),
        input.display()
    );

    let mut graph = DotDigraph::with_style(DotStyle::from(&config.render));
    graph.extend(references);
    let output = graph.render();

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} nodes to {}", graph.len(), path.display());
            if !cli.quiet {
                ui::print_written(graph.len(), path);
            }
        }
        None => println!("{}", output),
    }

    Ok(())
}

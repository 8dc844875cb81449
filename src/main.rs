//! figcat - browse a collectible-figure checklist from the terminal.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (bad arguments, unreadable dataset, invalid query)

use anyhow::{Context, Result};
use figcat::cli::{Args, Command, OutputFormat};
use figcat::config::{Config, CONFIG_FILE};
use figcat::{pages, report, GroupRegistry, RecordStore};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load config first so its verbose setting reaches the logger
    let config = match load_config(&args) {
        Ok(mut config) => {
            config.merge_with_args(&args);
            config
        }
        Err(e) => {
            init_logging(args.log_level());
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(config.log_level(&args));

    debug!("figcat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(&args);

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .figcat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr so reports on stdout stay clean.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load everything the command needs, answer it and write the report.
fn run(args: &Args, config: &Config) -> Result<()> {
    let groups = config
        .group_registry()
        .context("Invalid group configuration")?;

    let Some(command) = args.command.as_ref() else {
        anyhow::bail!("No command given");
    };

    // `groups` needs no dataset
    let store = match command {
        Command::Groups => RecordStore::default(),
        _ => RecordStore::load(&config.general.data)?,
    };

    let output = answer(command, &store, &groups, config)?;
    write_output(args, &output)
}

/// Build and render the view for one command.
fn answer(
    command: &Command,
    store: &RecordStore,
    groups: &GroupRegistry,
    config: &Config,
) -> Result<String> {
    let format = config.report.format;

    match command {
        Command::Summary => {
            let view = pages::summary(store, groups)?;
            render(&view, format, report::generate_summary_markdown)
        }
        Command::List { field, sort } => {
            let mut view = pages::directory(store, *field);
            view.table.reorder(*sort);
            render(&view, format, report::generate_directory_markdown)
        }
        Command::Show { field, value } => {
            let view = pages::detail(store, *field, value);
            if view.total == 0 {
                warn!("No figures with {} '{}'", field, value);
            }
            render(&view, format, |v| {
                report::generate_detail_markdown(v, &config.report)
            })
        }
        Command::Group { field, name } => {
            let view = pages::group_detail(store, groups, *field, name)?;
            render(&view, format, |v| {
                report::generate_detail_markdown(v, &config.report)
            })
        }
        Command::Drill { .. } => {
            let drill = command.drilldown().unwrap_or_default();
            let view = pages::drilldown(store, &drill)?;
            info!("{} figures match the drilldown", view.total);
            render(&view, format, |v| {
                report::generate_detail_markdown(v, &config.report)
            })
        }
        Command::Groups => render(&groups.iter().collect::<Vec<_>>(), format, |_| {
            report::generate_groups_markdown(groups)
        }),
    }
}

fn render<T: Serialize>(
    view: &T,
    format: OutputFormat,
    markdown: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown(view)),
        OutputFormat::Json => report::generate_json_report(view),
    }
}

fn write_output(args: &Args, output: &str) -> Result<()> {
    match args.output {
        Some(ref path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// A config file that exists but fails to parse is an error, never
/// silently replaced by defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}

fn log_config_source(args: &Args) {
    match args.config {
        Some(ref config_path) => info!("Loaded config from: {}", config_path.display()),
        None if std::path::Path::new(CONFIG_FILE).exists() => {
            debug!("Loaded default config from {}", CONFIG_FILE)
        }
        None => debug!("No config file found, using defaults"),
    }
}

mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::demo::DEMO_FIELDS;
use logic::FieldSnapshotAggregator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive().context("Setup failed")?;
        }
        Some(Commands::Check) => {
            let config = Config::load(cli.config).context("Configuration error")?;
            run_check(&config).await?;
        }
        Some(Commands::Score {
            fields,
            json,
            demo,
            date,
        }) => {
            let config = load_or_default(cli.config.as_ref(), demo)?;
            run_score(&config, fields, json, demo, date).await?;
        }
        None => {
            if !Config::exists(cli.config.as_ref()) {
                println!("No configuration found.");
                Config::setup_interactive().context("Setup failed")?;
            }
            println!(
                "Run `fieldscore score <FIELD>...` to score fields, or `--demo` to try it out."
            );
        }
    }

    Ok(())
}

/// Demo runs work without a config file
fn load_or_default(path: Option<&std::path::PathBuf>, demo: bool) -> anyhow::Result<Config> {
    if demo && !Config::exists(path) {
        return Ok(Config::default());
    }
    Config::load(path.cloned()).context("Configuration error (run `fieldscore init`)")
}

async fn run_score(
    config: &Config,
    mut fields: Vec<String>,
    json: bool,
    demo: bool,
    date: Option<chrono::NaiveDate>,
) -> anyhow::Result<()> {
    let using_demo = demo || !config.farm_api.is_configured();
    let aggregator = FieldSnapshotAggregator::from_config(config, demo)?.with_date(date);

    if fields.is_empty() {
        if using_demo {
            fields = DEMO_FIELDS.iter().map(|f| f.to_string()).collect();
        } else {
            anyhow::bail!("No fields given. Usage: fieldscore score <FIELD>...");
        }
    }

    tracing::debug!(source = aggregator.source_name(), count = fields.len(), "Scoring fields");
    let scores = aggregator.score_fields(&fields).await;

    if json {
        println!("{}", report::render_json(&scores)?);
    } else {
        let reports: Vec<String> = scores
            .iter()
            .map(|s| report::render_text(s, config.language))
            .collect();
        println!("{}", reports.join("\n\n"));
    }

    Ok(())
}

fn online(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "OFFLINE"
    }
}

async fn run_check(config: &Config) -> anyhow::Result<()> {
    let farm_api = if config.farm_api.is_configured() {
        config.farm_api.url.as_str()
    } else {
        "(not configured, demo data)"
    };
    println!("Configuration OK");
    println!("  Farm API: {}", farm_api);

    let aggregator = FieldSnapshotAggregator::from_config(config, false)?;
    let engine = aggregator.engine();

    println!("\nScoring rules:");
    for (id, name) in engine.rules().list_rules() {
        println!("  {:<24} {}", id, name);
    }

    let thresholds = serde_yaml::to_string(engine.thresholds())
        .context("Failed to render scoring thresholds")?;
    println!("\nScoring thresholds:");
    for line in thresholds.lines() {
        println!("  {}", line);
    }

    println!("\nConnections:");
    let status = aggregator.check_connections().await;
    println!("  {}: {}", aggregator.source_name(), online(status.source));
    if let (Some(name), Some(weather)) = (aggregator.weather_provider_name(), status.weather) {
        println!("  {}: {}", name, online(weather));
    }

    if !status.all_connected() {
        anyhow::bail!("One or more data sources are unreachable");
    }

    Ok(())
}

//! Main entry point for the rankings driver
//!
//! Loads the team directory and raw season records from disk, runs the
//! ranking engine over every (season, gender) partition, and writes the
//! flattened rankings JSON for the rendering layer.

use anyhow::{Context, Result};
use baseline_rankings::config::AppConfig;
use baseline_rankings::directory::{DirectoryEntry, StaticTeamDirectory};
use baseline_rankings::engine::{PartitionInput, RankingEngine};
use baseline_rankings::ingest::SeasonRecord;
use baseline_rankings::types::{Gender, PartitionKey, PartitionRankings, RankedEntry, TeamId};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Baseline Rankings - season power rankings for high-school tennis duals
#[derive(Parser)]
#[command(
    name = "baseline-rankings",
    version,
    about = "Builds season power rankings from dual-meet match data",
    long_about = "Reads per-team raw season records and a team directory, computes the \
                 APR/FWS power ranking with head-to-head tiebreaks for every season and \
                 gender independently, and writes the finalized rankings as JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (TOML format)")]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Directory of per-season raw season records")]
    data_dir: Option<PathBuf>,

    /// Team directory file override
    #[arg(long, value_name = "FILE", help = "JSON listing of team metadata")]
    directory: Option<PathBuf>,

    /// Output file override
    #[arg(short, long, value_name = "FILE", help = "Where to write the rankings JSON")]
    out: Option<PathBuf>,

    /// Log level override
    #[arg(short, long, value_name = "LEVEL", help = "Override log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,

    /// First season override
    #[arg(long, value_name = "YEAR", help = "First season to process, inclusive")]
    first_season: Option<u16>,

    /// Last season override
    #[arg(long, value_name = "YEAR", help = "Last season to process, inclusive")]
    last_season: Option<u16>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without ranking")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(data_dir) = &args.data_dir {
        config.data.data_dir = data_dir.clone();
    }
    if let Some(directory) = &args.directory {
        config.data.directory_file = directory.clone();
    }
    if let Some(out) = &args.out {
        config.data.output_file = out.clone();
    }
    if let Some(first) = args.first_season {
        config.data.first_season = first;
    }
    if let Some(last) = args.last_season {
        config.data.last_season = last;
    }

    Ok(config)
}

/// Display startup information
fn display_startup_banner(config: &AppConfig) {
    info!("Baseline Rankings");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Data dir: {}", config.data.data_dir.display());
    info!(
        "   Seasons: {}-{}",
        config.data.first_season, config.data.last_season
    );
    info!("   Output: {}", config.data.output_file.display());
}

/// Load the team directory listing
fn load_directory(path: &Path) -> Result<StaticTeamDirectory> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read team directory {}", path.display()))?;
    let entries: Vec<DirectoryEntry> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse team directory {}", path.display()))?;

    info!("Loaded {} teams from directory", entries.len());
    Ok(StaticTeamDirectory::from_entries(entries))
}

/// Parse a record filename like "school_74814_gender_1.json"
fn parse_record_filename(stem: &str) -> Option<(TeamId, Gender)> {
    let parts: Vec<&str> = stem.split('_').collect();
    match parts.as_slice() {
        ["school", id, "gender", gender_id] => {
            let team_id = id.parse().ok()?;
            let gender = Gender::from_id(gender_id.parse().ok()?)?;
            Some((team_id, gender))
        }
        _ => None,
    }
}

/// Discover record files and group them into partitions
fn discover_partitions(config: &AppConfig) -> Result<BTreeMap<PartitionKey, Vec<(TeamId, PathBuf)>>> {
    let mut partitions: BTreeMap<PartitionKey, Vec<(TeamId, PathBuf)>> = BTreeMap::new();
    let data_dir = &config.data.data_dir;

    for year_entry in std::fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory {}", data_dir.display()))?
    {
        let year_dir = year_entry?.path();
        if !year_dir.is_dir() {
            continue;
        }

        let Some(season) = year_dir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.parse::<u16>().ok())
        else {
            continue;
        };
        if season < config.data.first_season || season > config.data.last_season {
            continue;
        }

        for file_entry in std::fs::read_dir(&year_dir)? {
            let path = file_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some((team_id, gender)) = parse_record_filename(stem) else {
                warn!(file = %path.display(), "Skipping unrecognized record filename");
                continue;
            };

            partitions
                .entry(PartitionKey { season, gender })
                .or_default()
                .push((team_id, path));
        }
    }

    Ok(partitions)
}

/// Load one partition's records and rank it
fn rank_partition_files(
    engine: &RankingEngine,
    directory: &StaticTeamDirectory,
    key: PartitionKey,
    files: Vec<(TeamId, PathBuf)>,
) -> Result<PartitionRankings> {
    let mut records = BTreeMap::new();
    for (team_id, path) in files {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read season record {}", path.display()))?;
        let record = SeasonRecord::from_json(&bytes)
            .with_context(|| format!("In season record {}", path.display()))?;
        records.insert(team_id, record);
    }

    let input = PartitionInput { key, records };
    engine.rank_partition(&input, directory)
}

/// Log summary counts the way the site generator expects to sanity-check
fn display_summary(entries: &[RankedEntry]) {
    let mut by_season: BTreeMap<u16, usize> = BTreeMap::new();
    let mut by_gender: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        *by_season.entry(entry.season).or_default() += 1;
        *by_gender.entry(entry.gender.to_string()).or_default() += 1;
    }

    for (season, count) in by_season {
        info!("   {}: {} rankings", season, count);
    }
    for (gender, count) in by_gender {
        info!("   {}: {} rankings", gender, count);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without ranking");
        return Ok(());
    }

    let directory = Arc::new(load_directory(&config.data.directory_file)?);
    let engine = RankingEngine::new(config.rating.clone(), config.tiebreak.clone())?;

    let partitions = discover_partitions(&config)?;
    if partitions.is_empty() {
        warn!(
            "No season records found under {}",
            config.data.data_dir.display()
        );
    }

    // Partitions are independent; fan out one blocking task per partition
    let mut tasks = JoinSet::new();
    for (key, files) in partitions {
        let engine = engine.clone();
        let directory = directory.clone();
        tasks.spawn_blocking(move || rank_partition_files(&engine, &directory, key, files));
    }

    let mut results: Vec<PartitionRankings> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.context("Partition task panicked")??);
    }
    results.sort_by_key(|r| r.key);

    let entries: Vec<RankedEntry> = results
        .into_iter()
        .flat_map(|r| r.entries)
        .collect();

    let json = serde_json::to_vec_pretty(&entries).context("Failed to serialize rankings")?;
    if let Some(parent) = config.data.output_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }
    std::fs::write(&config.data.output_file, json).with_context(|| {
        format!(
            "Failed to write rankings to {}",
            config.data.output_file.display()
        )
    })?;

    info!(
        "Wrote {} rankings to {}",
        entries.len(),
        config.data.output_file.display()
    );
    display_summary(&entries);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_filename() {
        assert_eq!(
            parse_record_filename("school_74814_gender_1"),
            Some((74814, Gender::Boys))
        );
        assert_eq!(
            parse_record_filename("school_75113_gender_2"),
            Some((75113, Gender::Girls))
        );
        assert_eq!(parse_record_filename("school_74814_gender_3"), None);
        assert_eq!(parse_record_filename("notes"), None);
        assert_eq!(parse_record_filename("school_x_gender_1"), None);
    }
}

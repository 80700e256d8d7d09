use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::{
    Arena, ArenaConfig, HumanAutopilot, JournalWriter, load_journal_from_file, replay_to_end,
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config_file;
mod report;
mod seed;

use config_file::load_config;
use report::MatchReport;
use seed::SeedChoice;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one match with the autopilot standing in for the human
    Run {
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long, default_value_t = 36_000)]
        frames: u64,
        /// TOML file overriding the default arena config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Where to write the JSON match report
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// Where to stream the JSONL intent journal
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },
    /// Verify a journal file and replay it to the end
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
        #[arg(short, long, default_value_t = 36_000)]
        frames: u64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    match Cli::parse().command {
        Command::Run { seed, frames, config, report, journal } => {
            let config = load_config(config.as_deref())?;
            run(SeedChoice::resolve(seed), frames, config, report.as_deref(), journal.as_deref())
        }
        Command::Replay { journal, frames } => replay(&journal, frames),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn run(
    seed: SeedChoice,
    max_frames: u64,
    config: ArenaConfig,
    report_path: Option<&Path>,
    journal_path: Option<&Path>,
) -> Result<()> {
    if let SeedChoice::Generated(value) = seed {
        info!(seed = value, "seed_generated");
    }
    let seed = seed.value();

    let mut writer = journal_path
        .map(|path| {
            JournalWriter::create(path, seed, &config)
                .with_context(|| format!("Failed to create journal file: {}", path.display()))
        })
        .transpose()?;
    let mut arena = Arena::new(seed, config).context("Arena config is invalid")?;
    let mut autopilot = HumanAutopilot::default();

    while !arena.is_finished() && arena.frame() < max_frames {
        let intent = autopilot.next_intent(&arena);
        if let Some(writer) = writer.as_mut() {
            writer.append(arena.frame(), &intent).context("Failed to append to journal")?;
        }
        arena.step(&intent);
    }

    let journal_records = writer.as_ref().map_or(0, JournalWriter::records_written);
    let report = MatchReport::from_arena(&arena, journal_records);
    match report.winner {
        Some(winner) => {
            info!(?winner, frames = report.frames, hash = %report.snapshot_hash_hex, "run_finished");
        }
        None => warn!(frames = report.frames, "run_budget_exhausted"),
    }
    if let Some(writer) = writer.as_ref() {
        info!(records = journal_records, chain_head = writer.chain_head(), "journal_written");
    }
    if let Some(path) = report_path {
        report
            .write_atomic(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    println!("Run complete.");
    println!("Seed: {seed}");
    println!("Final Frame: {}", report.frames);
    println!("Winner: {:?}", report.winner);
    println!("Snapshot Hash: {}", report.snapshot_hash_hex);
    Ok(())
}

fn replay(journal_path: &Path, max_frames: u64) -> Result<()> {
    let loaded = load_journal_from_file(journal_path)
        .with_context(|| format!("Failed to load journal file: {}", journal_path.display()))?;
    info!(
        seed = loaded.journal.seed,
        records = loaded.journal.records.len(),
        "journal_loaded"
    );

    let result = replay_to_end(&loaded.journal, max_frames).context("Replay failed")?;

    println!("Replay complete.");
    println!("Final Frame: {}", result.final_frame);
    println!("Winner: {:?}", result.winner);
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);
    println!("Chain Head: {}", loaded.last_sha256_hex);
    Ok(())
}

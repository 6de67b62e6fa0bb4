//! Command-line interface for the sofra concierge engine.
//!
//! Two subcommands: `query` ranks a JSON corpus against a free-text prompt
//! through the hybrid orchestrator, and `slots` resolves availability slots
//! against a date/time in a caller-chosen IANA timezone.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sofra_availability::{find_slot_for_time, resolve_target, suggested_slots};
use sofra_corpus::{AvailabilitySlot, Mode, RestaurantRecord, SelectionTarget};
use sofra_hybrid::{HybridOrchestrator, Lang, OrchestratorConfig, RemoteClient, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "sofra", version, about = "Concierge matching over a restaurant corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a corpus against a free-text prompt.
    Query {
        /// Free-text intent, e.g. "romantic rooftop dinner under 80".
        prompt: String,
        /// Path to a JSON array of restaurant records.
        #[arg(long)]
        corpus: PathBuf,
        /// Maximum shortlist length.
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Routing mode.
        #[arg(long, value_enum, default_value = "local")]
        mode: ModeArg,
        /// Response language for remote calls.
        #[arg(long, value_enum)]
        lang: Option<LangArg>,
        /// Recommendation service base URL.
        #[arg(long, env = "SOFRA_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
    /// Resolve availability slots for a date/time in a timezone.
    Slots {
        /// Path to a JSON array of availability slots.
        #[arg(long)]
        slots: PathBuf,
        /// Calendar date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Time of day, HH:MM.
        #[arg(long)]
        time: String,
        /// IANA zone identifier, e.g. Asia/Baku.
        #[arg(long)]
        tz: String,
        /// Instead of an exact match, suggest the N closest slots.
        #[arg(long)]
        suggest: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Local,
    Remote,
    Ab,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Local => Mode::Local,
            ModeArg::Remote => Mode::Remote,
            ModeArg::Ab => Mode::Ab,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LangArg {
    En,
    Az,
    Ru,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Lang::En,
            LangArg::Az => Lang::Az,
            LangArg::Ru => Lang::Ru,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Query {
            prompt,
            corpus,
            limit,
            mode,
            lang,
            base_url,
        } => run_query(&prompt, &corpus, limit, mode.into(), lang.map(Into::into), &base_url).await,
        Command::Slots {
            slots,
            date,
            time,
            tz,
            suggest,
        } => run_slots(&slots, &date, &time, &tz, suggest),
    }
}

async fn run_query(
    prompt: &str,
    corpus_path: &PathBuf,
    limit: usize,
    mode: Mode,
    lang: Option<Lang>,
    base_url: &str,
) -> Result<()> {
    let raw = fs::read_to_string(corpus_path)
        .with_context(|| format!("reading corpus from {}", corpus_path.display()))?;
    let corpus: Vec<RestaurantRecord> =
        serde_json::from_str(&raw).context("parsing corpus JSON")?;

    let config = OrchestratorConfig { mode, limit, lang };
    let orchestrator = HybridOrchestrator::new(config, RemoteClient::new(base_url), corpus)?;
    let result = orchestrator.query(prompt).await;

    println!("source: {}", result.source.label());
    if let Some(advisory) = &result.advisory {
        println!("note: {advisory}");
    }
    if result.candidates.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for (position, candidate) in result.candidates.iter().enumerate() {
        print!("{:>2}. {}", position + 1, candidate.restaurant.name);
        if candidate.score > 0.0 {
            print!("  ({:.2})", candidate.score);
        }
        println!();
        if let Some(explanation) = &candidate.explanation {
            println!("      {explanation}");
        }
    }
    Ok(())
}

fn run_slots(
    slots_path: &PathBuf,
    date: &str,
    time: &str,
    tz: &str,
    suggest: Option<usize>,
) -> Result<()> {
    let raw = fs::read_to_string(slots_path)
        .with_context(|| format!("reading slots from {}", slots_path.display()))?;
    let slots: Vec<AvailabilitySlot> = serde_json::from_str(&raw).context("parsing slots JSON")?;

    if let Some(count) = suggest {
        let target = SelectionTarget {
            date: date.to_string(),
            time: time.to_string(),
            timezone: tz.to_string(),
        };
        let Some(instant) = resolve_target(&target) else {
            println!("could not resolve {date} {time} in {tz}");
            return Ok(());
        };
        let nearby = suggested_slots(&slots, instant, count);
        if nearby.is_empty() {
            println!("no slots to suggest");
        }
        for slot in nearby {
            println!("{}  ({} tables)", slot.start.to_rfc3339(), slot.count);
        }
        return Ok(());
    }

    match find_slot_for_time(&slots, date, time, tz) {
        Some(slot) => println!("{}  ({} tables)", slot.start.to_rfc3339(), slot.count),
        None => println!("no slot at {date} {time} in {tz}"),
    }
    Ok(())
}

//! Tile Merge
//!
//! Plays one seeded game from a scripted or cycling input and verifies the
//! result by replaying the recorded directions.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_merge::{
    play, verify_replay, ClockSeed, CycleInput, InputSource, PlayConfig, ScriptedInput, Seed,
    SeedSource, Session, VERSION,
};

#[derive(Parser, Debug)]
#[command(version, about = "Deterministic 4x4 tile merge engine")]
struct Args {
    /// Generator seed as "de:ad", "0xadde" or a decimal counter. Defaults to the clock.
    #[arg(long)]
    seed: Option<Seed>,
    /// Direction keys to play (w/a/s/d or k/h/j/l). Cycles up, right, down, left when omitted.
    #[arg(long)]
    moves: Option<String>,
    /// Stop after this many turns.
    #[arg(long, default_value_t = 100_000)]
    max_turns: u32,
    /// Optional tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
    /// Print the session summary as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&args.log)
                .with_context(|| format!("invalid log filter {:?}", args.log))?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tile Merge v{}", VERSION);

    let seed = match args.seed {
        Some(seed) => seed,
        None => ClockSeed.next_seed(),
    };
    info!(%seed, "seed loaded");

    let mut input: Box<dyn InputSource> = match &args.moves {
        Some(keys) => Box::new(ScriptedInput::from_keys(keys).context("invalid --moves")?),
        None => Box::new(CycleInput::default()),
    };

    let config = PlayConfig {
        max_turns: args.max_turns,
        ..PlayConfig::default()
    };

    let mut session = Session::new(seed);
    let (summary, log) = play(&mut session, input.as_mut(), &config);

    for line in session.board().to_string().lines() {
        info!("{}", line);
    }
    info!("Score: {}", summary.score);
    info!("Final State Hash: {}", summary.final_hash);
    info!("Input Log Hash: {}", hex::encode(log.compute_hash()));

    info!("=== Verifying Determinism ===");
    match verify_replay(seed, &log, &session.compute_hash()) {
        Ok(_) => info!("DETERMINISM VERIFIED: Hashes match!"),
        Err(err) => {
            error!(%err, "DETERMINISM FAILURE");
            return Err(err.into());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

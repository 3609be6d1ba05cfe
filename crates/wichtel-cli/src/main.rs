// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Wichtel - the exhaustive Secret Santa pairing generator.
//!
//! Loads a JSON draw configuration (participants plus exclusion rules),
//! enumerates *every* valid assignment, and draws one uniformly at
//! random. Because the full feasible set is materialized before the draw,
//! each valid pairing has exactly the same probability of being chosen.

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use wichtel_model::{exclusion::ExclusionIndex, loading::DrawConfig, roster::Roster};
use wichtel_search::{engine::Enumerator, monitor::NoOperationMonitor, selector::Selector};

#[derive(Parser)]
#[command(name = "wichtel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exhaustive Secret Santa pairing generator", long_about = None)]
struct Cli {
    /// Path to the draw configuration (JSON)
    config: PathBuf,

    /// Seed for the random draw; omit for an entropy-seeded draw
    #[arg(long)]
    seed: Option<u64>,

    /// Print search statistics after the draw
    #[arg(long)]
    stats: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` for fine-grained filtering; falls back to the
/// supplied level when it is not set.
fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_tracing(level);

    let config = DrawConfig::from_path(&cli.config).with_context(|| {
        format!(
            "failed to load draw configuration from {}",
            cli.config.display()
        )
    })?;

    println!(
        "Loaded {} participants and {} exclusion rules from {}\n",
        config.num_participants(),
        config.num_exclusions(),
        cli.config.display()
    );

    let roster = Roster::from_names(config.participants).context("invalid participant list")?;
    let exclusions = ExclusionIndex::build(&roster, &config.exclusions);
    debug!(
        rules_applied = exclusions.num_rules_applied(),
        "built exclusion matrix"
    );

    let mut enumerator = Enumerator::preallocated(roster.len());
    let enumeration = enumerator.enumerate(&roster, &exclusions, NoOperationMonitor::new());

    println!(
        "Found {} possible unique pairings.",
        enumeration.num_solutions()
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match Selector::new().pick(&enumeration, &mut rng) {
        Some(assignment) => {
            println!("\n--- Selected Pairing ---");
            for (giver, receiver) in assignment.pairs(&roster) {
                println!("{giver} 🎁 --> {receiver}");
            }
        }
        None => println!("No valid pairings could be found with these rules!"),
    }

    if cli.stats {
        println!("\n{}", enumeration.statistics());
    }

    Ok(())
}

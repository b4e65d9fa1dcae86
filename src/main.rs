//! Self-play runner: pits two strategies against each other and reports
//! the match summary.

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chinchon_engine::engine::MatchEngine;
use chinchon_engine::strategies::{RandomBot, SearchBot, Strategy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotKind {
    /// Full-evaluation search on every choice
    Search,
    /// Legal moves picked at random
    Random,
}

impl BotKind {
    fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            BotKind::Search => Box::new(SearchBot::new()),
            BotKind::Random => match seed {
                Some(seed) => Box::new(RandomBot::with_seed(seed)),
                None => Box::new(RandomBot::new()),
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chinchon", about = "Chinchón self-play runner")]
struct Args {
    /// Strategy for the human seat
    #[arg(long, value_enum, default_value = "search")]
    human: BotKind,

    /// Strategy for the machine seat
    #[arg(long, value_enum, default_value = "search")]
    machine: BotKind,

    /// Stop after this many rounds even without a cycle winner
    #[arg(long, default_value_t = 50)]
    rounds: u32,

    /// Seed for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chinchon_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let human = args.human.build(args.seed);
    let machine = args.machine.build(args.seed.map(|s| s ^ 1));
    let mut engine = match args.seed {
        Some(seed) => MatchEngine::with_seed(human, machine, seed),
        None => MatchEngine::new(human, machine),
    };

    let summary = engine.play_match(args.rounds)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

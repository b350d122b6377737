use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use judge::{
    forward_objects, Config, Outcome, Recorder, Referee, StdioTransport, Timing, REFEREE_NAME,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Referees one Quarto match. Objects from the store are read from stdin as
/// JSON lines, and everything the referee publishes is written to stdout.
#[derive(Parser)]
struct Args {
    /// Identifies the match in the published result
    #[arg(long, env = "ROOM_ID")]
    room_id: String,

    /// RNG seed for choosing who moves first
    #[arg(long)]
    seed: Option<u64>,

    /// How long players have to register
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    registration_timeout_secs: u64,

    /// How often to look for registered players
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_secs: u64,

    /// How long each player has for a move
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    turn_timeout_secs: u64,

    /// Pause between attempts to publish a board or the result
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    retry_interval_secs: u64,

    /// Record the match's actions as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn timing(&self) -> Timing {
        Timing {
            registration_timeout: Duration::from_secs(self.registration_timeout_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            turn_timeout: Duration::from_secs(self.turn_timeout_secs),
            retry_interval: Duration::from_secs(self.retry_interval_secs),
        }
    }
}

async fn run(args: Args) -> anyhow::Result<Outcome> {
    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let recorder = if let Some(dir_path) = &args.record_games_to_directory {
        Some(Recorder::new(dir_path.clone())?)
    } else {
        None
    };
    let config = Config {
        room_id: args.room_id.clone(),
        timing: args.timing(),
        rng: StdRng::seed_from_u64(seed),
        recorder,
    };

    let transport = StdioTransport::new(REFEREE_NAME);
    let store = transport.store().clone();
    tokio::spawn(async move {
        if let Err(err) = forward_objects(store, BufReader::new(tokio::io::stdin())).await {
            error!(error = %err, "Could not read objects from stdin");
        }
    });

    Referee::new(transport, config).await?.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let code = match run(args).await {
        Ok(outcome) if outcome.is_aborted() => 1,
        Ok(_) => 0,
        Err(err) => {
            for cause in err.chain() {
                error!("{}", cause);
            }
            2
        }
    };
    // The stdin reader would keep the runtime from shutting down
    std::process::exit(code);
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout carries the published objects
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["judge", "--room-id", "room-1"]).unwrap();
        assert_eq!(args.room_id, "room-1");
        assert_eq!(args.timing(), Timing::default());
    }

    #[test]
    fn zero_durations_are_rejected() {
        for flag in [
            "--registration-timeout-secs",
            "--poll-interval-secs",
            "--turn-timeout-secs",
            "--retry-interval-secs",
        ] {
            let parsed = Args::try_parse_from(["judge", "--room-id", "room-1", flag, "0"]);
            assert!(parsed.is_err(), "{} accepted 0", flag);
        }
        let args =
            Args::try_parse_from(["judge", "--room-id", "room-1", "--poll-interval-secs", "5"])
                .unwrap();
        assert_eq!(args.timing().poll_interval, Duration::from_secs(5));
    }
}

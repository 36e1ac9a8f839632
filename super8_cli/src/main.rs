//! Command line driver for the Super 8 engine.
//!
//! Reads an event configuration and a roster from JSON files, then prints a
//! schedule, the current standings or an account of a rotating schedule.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;
use pico_args::Arguments;
use super8::domain::{EventId, Participant};
use super8_cli::commands::{self, Schedule, format_standings, load_config, read_json};

const HELP: &str = "\
Schedule and rank a Super 8 beach-tennis event

USAGE:
  super8 <COMMAND> [OPTIONS]

COMMANDS:
  schedule              Generate every match and print them as JSON
  rank                  Print the standings for a set of matches
  explain               Describe how a rotating schedule is built

OPTIONS:
  --config FILE         Event configuration (JSON)  [default: built-in defaults]
  --participants FILE   Roster of 8 participants (JSON array)
  --matches FILE        Output of `schedule` with results filled in (rank only)
  --event-id N          Event id stamped on generated matches  [default: 1]

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  RUST_LOG              Log filter (e.g., info, super8=debug)
";

enum Command {
    Schedule,
    Rank { matches: PathBuf },
    Explain,
}

struct Args {
    command: Command,
    config: Option<PathBuf>,
    participants: PathBuf,
    event_id: EventId,
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let command = match pargs.subcommand()?.as_deref() {
        Some("schedule") => Command::Schedule,
        Some("rank") => Command::Rank {
            matches: pargs
                .value_from_str("--matches")
                .context("rank needs --matches FILE")?,
        },
        Some("explain") => Command::Explain,
        Some(other) => bail!("unknown command `{other}`, see --help"),
        None => {
            print!("{HELP}");
            std::process::exit(1);
        }
    };

    let args = Args {
        command,
        config: pargs.opt_value_from_str("--config")?,
        participants: pargs
            .value_from_str("--participants")
            .context("--participants FILE is required")?,
        event_id: pargs.opt_value_from_str("--event-id")?.unwrap_or(1),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("unexpected arguments: {remaining:?}");
    }

    env_logger::builder().format_target(false).init();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let participants: Vec<Participant> = read_json(&args.participants)?;
    info!(
        "Loaded {} participants for \"{}\" ({})",
        participants.len(),
        config.name,
        config.format
    );

    match args.command {
        Command::Schedule => {
            let schedule = commands::schedule(&config, &participants, args.event_id)?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        Command::Rank { matches } => {
            let schedule: Schedule = read_json(&matches)?;
            print!(
                "{}",
                format_standings(&commands::rank(&config, &participants, &schedule))
            );
        }
        Command::Explain => {
            print!(
                "{}",
                commands::explain(&config, &participants, args.event_id)?
            );
        }
    }

    Ok(())
}

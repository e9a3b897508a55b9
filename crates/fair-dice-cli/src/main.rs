//! Fair Dice CLI
//!
//! Plays a provably fair non-transitive dice game against the computer.
//!
//! Commands:
//! - `fair-dice <DICE>...` or `fair-dice play <DICE>...` - play one session
//! - `fair-dice table <DICE>...` - print the win-probability table
//! - `fair-dice verify --hmac <HEX> --key <HEX> --value <N>` - check a reveal

mod terminal;
mod transcript;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fair_dice_core::{
    Commitment, ConfigError, DiceSet, GameEngine, ProbabilityTable, RngEntropy, SecretKey,
    SessionOutcome,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use terminal::TerminalConsole;

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "fair-dice",
    version,
    about = "Provably fair non-transitive dice game",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one session against the computer
    Play(PlayArgs),
    /// Print the probability that each die beats each other die
    Table(DiceArgs),
    /// Recompute HMAC-SHA3-256(KEY, VALUE) and compare it to a published HMAC
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct DiceArgs {
    /// Dice as six comma-separated integers each, e.g. 2,2,4,4,9,9 (at least three)
    #[arg(value_name = "DICE", allow_hyphen_values = true)]
    dice: Vec<String>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    dice: DiceArgs,

    /// Write a JSON transcript of every reveal to this file
    #[arg(long, env = "FAIR_DICE_TRANSCRIPT", value_name = "PATH")]
    transcript: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// HMAC published before the round, in hex
    #[arg(long)]
    hmac: String,
    /// KEY revealed after the round, in hex
    #[arg(long)]
    key: String,
    /// Number revealed after the round
    #[arg(long)]
    value: u32,
}

// ============================================================================
// Commands
// ============================================================================

fn parse_dice(args: &DiceArgs) -> Result<DiceSet, ConfigError> {
    DiceSet::parse(&args.dice)
}

fn usage_error(err: ConfigError) -> ExitCode {
    eprintln!("Error: {}", err);
    eprintln!();
    eprintln!("Example: fair-dice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7");
    eprintln!();
    // Help goes to stdout; the error already went to stderr
    let _ = Cli::command().print_help();
    ExitCode::from(2)
}

fn play(args: PlayArgs) -> anyhow::Result<ExitCode> {
    let dice = match parse_dice(&args.dice) {
        Ok(dice) => dice,
        Err(err) => return Ok(usage_error(err)),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = TerminalConsole::new(dice.clone(), stdin.lock(), stdout.lock());
    let mut engine = GameEngine::new(dice, RngEntropy::system(), &mut console);
    let outcome = engine.run().context("game aborted")?;
    let session_id = engine.session().id;
    drop(engine);

    if let Some(path) = args.transcript {
        let transcript = console.into_transcript().finish(session_id, &outcome);
        let json = serde_json::to_string_pretty(&transcript)?;
        fs::write(&path, json)
            .with_context(|| format!("writing transcript to {}", path.display()))?;
        info!(path = %path.display(), "transcript written");
    }

    match outcome {
        SessionOutcome::Completed(_) => info!(%session_id, "session completed"),
        SessionOutcome::Cancelled => info!(%session_id, "session cancelled"),
    }
    Ok(ExitCode::SUCCESS)
}

fn table(args: DiceArgs) -> anyhow::Result<ExitCode> {
    let dice = match parse_dice(&args) {
        Ok(dice) => dice,
        Err(err) => return Ok(usage_error(err)),
    };
    let table = ProbabilityTable::build(&dice);
    terminal::write_table(&mut io::stdout().lock(), &table)?;
    Ok(ExitCode::SUCCESS)
}

fn verify(args: VerifyArgs) -> anyhow::Result<ExitCode> {
    let commitment: Commitment = args.hmac.parse().context("parsing --hmac")?;
    let key: SecretKey = args.key.parse().context("parsing --key")?;

    if commitment.verify(&key, args.value) {
        println!("OK: HMAC matches value {}.", args.value);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("MISMATCH: HMAC does not match value {}.", args.value);
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the game dialogue
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Table(args)) => table(args),
        Some(Commands::Verify(args)) => verify(args),
        None => play(cli.play),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dice_without_subcommand() {
        let cli = Cli::try_parse_from(["fair-dice", "2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.play.dice.dice.len(), 3);
    }

    #[test]
    fn test_negative_faces_accepted() {
        let cli = Cli::try_parse_from(["fair-dice", "play", "-1,0,1,2,3,4"]).unwrap();
        let Some(Commands::Play(args)) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.dice.dice, vec!["-1,0,1,2,3,4".to_string()]);
    }

    #[test]
    fn test_verify_args() {
        let cli = Cli::try_parse_from([
            "fair-dice", "verify", "--hmac", "AA", "--key", "BB", "--value", "3",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Verify(VerifyArgs { value: 3, .. }))));
    }

    #[test]
    fn test_too_few_dice_rejected() {
        let args = DiceArgs {
            dice: vec!["1,2,3,4,5,6".to_string()],
        };
        assert_eq!(parse_dice(&args).unwrap_err(), ConfigError::TooFewDice(1));
    }
}

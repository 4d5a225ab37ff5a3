use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use colored::Colorize;
use gecko_lib::{Error, GameId, Repository};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod code;
mod game;

#[derive(Parser, Debug)]
#[command(name = "gecko")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// The game to operate on, e.g. GALE01
    #[arg(short, long, global = true)]
    game: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on games
    #[command(subcommand)]
    Game(game::Command),
    /// Operate on the selected game's Gecko codes
    #[command(subcommand)]
    Code(code::Command),
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();

    let repo = match Repository::load(cli.config.as_deref()) {
        Ok(repo) => repo,
        Err(err) => return fail(&err),
    };

    let result = match &cli.command {
        Command::Game(cmd) => game::handle(&repo, cmd),
        Command::Code(cmd) => {
            let Some(game) = cli.game.as_deref() else {
                eprintln!("{} no game selected, pass one with --game", "error:".red().bold());
                return sysexits::ExitCode::Usage.into();
            };
            code::handle(&repo, &GameId::from(game), cmd)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

fn fail(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "error:".red().bold());

    let code = match err {
        Error::UnknownCode { .. } => sysexits::ExitCode::DataErr,
        Error::ConfigParse { .. } | Error::ConfigSerialize(_) | Error::NoHome(_) => {
            sysexits::ExitCode::Config
        }
        Error::Io { .. } | Error::Walk(_) => sysexits::ExitCode::IoErr,
    };

    code.into()
}

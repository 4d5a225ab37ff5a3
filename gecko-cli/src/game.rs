use clap::Subcommand;
use gecko_lib::{Repository, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List games that have a shared or user INI
    List,
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for game in repo.games()? {
                println!("{game}");
            }
        }
    }

    Ok(())
}

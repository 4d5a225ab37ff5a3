use clap::Subcommand;
use colored::Colorize;
use gecko_lib::{Entry, Error, GameId, Repository, Result};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List codes and whether they are enabled
    List,
    /// Show the patches and notes of a code
    Show { name: String },
    /// Enable a code
    Enable { name: String },
    /// Disable a code
    Disable { name: String },
    /// Reset the enabled codes to the shared defaults
    Bootstrap,
}

pub fn handle(repo: &Repository, game: &GameId, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            let report = repo.codes_with_report(game)?;
            for entry in &report.codes {
                println!("{}", row(entry));
            }
            for entry in &report.discarded {
                eprintln!(
                    "{} user code '{}' is hidden by a shared code with the same name",
                    "warning:".yellow().bold(),
                    entry.name
                );
            }
        }
        Command::Show { name } => {
            let codes = repo.codes(game)?;
            let matching: Vec<&Entry> = codes.iter().filter(|e| &e.name == name).collect();
            if matching.is_empty() {
                return Err(Error::UnknownCode {
                    game: game.clone(),
                    name: name.clone(),
                });
            }
            for entry in matching {
                print_details(entry);
            }
        }
        Command::Enable { name } => repo.set_active(game, name, true)?,
        Command::Disable { name } => repo.set_active(game, name, false)?,
        Command::Bootstrap => repo.bootstrap(game)?,
    }

    Ok(())
}

fn row(entry: &Entry) -> String {
    let marker = if entry.active {
        "[x]".green()
    } else {
        "[ ]".normal()
    };
    let origin = if entry.is_local { "user" } else { "shared" };

    if entry.creator.is_empty() {
        format!("{marker} {} ({origin})", entry.name.bold())
    } else {
        format!(
            "{marker} {} ({origin}) by {}",
            entry.name.bold(),
            entry.creator
        )
    }
}

fn print_details(entry: &Entry) {
    println!("{}", entry.header().bold());
    println!("  enabled: {}, on by default: {}", entry.active, entry.default_active);

    for patch in &entry.codes {
        println!(
            "  {:08X} {:08X}  {}",
            patch.address,
            patch.value,
            patch.original_text.dimmed()
        );
    }
    for note in &entry.notes {
        println!("  * {note}");
    }
}

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::repository::GameId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("Could not determine the {0} directory, is $HOME set?")]
    NoHome(&'static str),
    #[error("Failed to scan game settings: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{game} has no Gecko code named '{name}'")]
    UnknownCode { game: GameId, name: String },
}

/// Attach `path` to an [`io::Error`], for use with `map_err`.
pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
    let path = path.into();
    move |source| Error::Io { path, source }
}

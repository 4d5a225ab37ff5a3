//! Gecko cheat code configuration.
//!
//! Codes for a game are split between a shared INI, shipped with the emulator, and the user's
//! own INI. [`codes`] parses, merges and writes back the code sections of those files, and
//! [`Repository`] ties them to the per-game files on disk.

pub mod codes;
mod error;
pub mod fs;
pub mod repository;
pub mod store;

pub use codes::{Entry, Patch};
pub use error::{Error, Result};
pub use repository::{GameId, Repository};
pub use store::LineStore;

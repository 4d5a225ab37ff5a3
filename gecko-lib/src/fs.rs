use std::{fs::create_dir_all, path::PathBuf};

use xdg::BaseDirectories;

use crate::{Error, Result, error::io_at};

/// Name of the directories holding per-game INI files.
pub const GAME_SETTINGS: &str = "GameSettings";

/// Returns the path to the Gecko configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> Result<PathBuf> {
    let path = xdg_prefix()
        .get_config_home()
        .ok_or(Error::NoHome("config"))?;

    create_dir_all(&path).map_err(io_at(&path))?;

    Ok(path)
}

/// Default location of the shared, read-only game INIs.
pub fn default_global_dir() -> Result<PathBuf> {
    game_settings_in(xdg_prefix().get_data_home(), "data")
}

/// Default location of the user's game INIs.
pub fn default_user_dir() -> Result<PathBuf> {
    game_settings_in(xdg_prefix().get_config_home(), "config")
}

fn game_settings_in(base: Option<PathBuf>, kind: &'static str) -> Result<PathBuf> {
    base.map(|base| base.join(GAME_SETTINGS))
        .ok_or(Error::NoHome(kind))
}

fn xdg_prefix() -> BaseDirectories {
    xdg::BaseDirectories::with_prefix("gecko")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_game_settings_without_home() {
        assert!(matches!(
            game_settings_in(None, "data"),
            Err(Error::NoHome("data"))
        ));
        assert_eq!(
            game_settings_in(Some(PathBuf::from("/home/me/.config/gecko")), "config").unwrap(),
            PathBuf::from("/home/me/.config/gecko/GameSettings")
        );
    }
}

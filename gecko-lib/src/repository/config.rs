use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    error::io_at,
    fs::{config_dir, default_global_dir, default_user_dir},
};

const FILE_NAME: &str = "gecko.toml";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, CopyGetters)]
pub struct CoreConfig {
    /// Directory of the shared game INIs, which are never written to
    #[getset(get = "pub")]
    global_dir: PathBuf,
    /// Directory of the user's game INIs
    #[getset(get = "pub")]
    user_dir: PathBuf,
    /// Keep a timestamped copy of a user INI before overwriting it
    #[getset(get_copy = "pub")]
    backup_on_save: bool,
}

/// The configuration as written on disk. Missing keys fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    global_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    backup_on_save: Option<bool>,
}

impl RawConfig {
    fn resolve(self) -> Result<CoreConfig> {
        let global_dir = match self.global_dir {
            Some(dir) => dir,
            None => default_global_dir()?,
        };
        let user_dir = match self.user_dir {
            Some(dir) => dir,
            None => default_user_dir()?,
        };

        Ok(CoreConfig::new(global_dir, user_dir)
            .with_backup_on_save(self.backup_on_save.unwrap_or(true)))
    }
}

impl CoreConfig {
    /// The default configuration. Fails if the XDG directories can't be determined.
    pub fn defaults() -> Result<Self> {
        RawConfig::default().resolve()
    }

    pub fn new(global_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            user_dir: user_dir.into(),
            backup_on_save: true,
        }
    }

    pub fn with_backup_on_save(mut self, backup_on_save: bool) -> Self {
        self.backup_on_save = backup_on_save;
        self
    }

    /// `$XDG_CONFIG_HOME/gecko/gecko.toml`
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    /// Load the configuration at `path`, writing out the defaults first if there is none.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).map_err(io_at(path))?;
            let raw: RawConfig =
                toml::from_str(&contents).map_err(|source| Error::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                })?;
            raw.resolve()
        } else {
            let cfg = Self::defaults()?;
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_at(parent))?;
        }

        fs::write(path, contents).map_err(io_at(path))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = CoreConfig::load(&path).unwrap();

        assert!(path.exists());
        assert!(cfg.backup_on_save());
        assert_eq!(CoreConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "user_dir = \"/tmp/gecko-user\"\nbackup_on_save = false\n").unwrap();

        let cfg = CoreConfig::load(&path).unwrap();

        assert_eq!(cfg.user_dir(), Path::new("/tmp/gecko-user"));
        assert_eq!(cfg.global_dir(), &default_global_dir().unwrap());
        assert!(!cfg.backup_on_save());
    }

    #[test]
    fn test_explicit_dirs_skip_defaults() {
        let raw = RawConfig {
            global_dir: Some("/srv/gecko".into()),
            user_dir: Some("/home/me/gecko".into()),
            backup_on_save: None,
        };

        let cfg = raw.resolve().unwrap();

        assert_eq!(cfg, CoreConfig::new("/srv/gecko", "/home/me/gecko"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "backup_on_save = \"sometimes\"\n").unwrap();

        assert!(matches!(
            CoreConfig::load(&path),
            Err(Error::ConfigParse { .. })
        ));
    }
}

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use derive_more::{Deref, Display, From};
use parking_lot::RwLock;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    Error, Result,
    codes::{
        Entry, MergeReport, Section, bootstrap_local_config, fill_store, mark_default_enabled,
        mark_enabled, merge_codes_with_report, parse_codes,
    },
    error::io_at,
    store::LineStore,
};

mod config;
mod ini;

pub use config::{Cfg, CoreConfig};
pub use ini::IniFile;

/// Identifies a game, e.g. `GALE01`. It doubles as the stem of the game's INI files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Deref)]
pub struct GameId(String);

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl GameId {
    fn file_name(&self) -> String {
        format!("{}.ini", self.0)
    }
}

/// Central access point for the Gecko codes of every game.
///
/// Each game has a shared INI in the global directory and a user INI in the user directory.
/// The shared one is only ever read; everything the user changes goes to their own file.
#[derive(Clone, Debug)]
pub struct Repository {
    cfg: Cfg,
}

impl Repository {
    pub fn new(cfg: CoreConfig) -> Self {
        Self {
            cfg: Arc::new(RwLock::new(cfg)),
        }
    }

    /// Open the repository described by the configuration file at `path`, or at the default
    /// location if `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(path) => CoreConfig::load(path)?,
            None => CoreConfig::load(&CoreConfig::default_path()?)?,
        };

        Ok(Self::new(cfg))
    }

    pub fn cfg(&self) -> Cfg {
        self.cfg.clone()
    }

    pub fn global_path(&self, game: &GameId) -> PathBuf {
        self.cfg.read().global_dir().join(game.file_name())
    }

    pub fn user_path(&self, game: &GameId) -> PathBuf {
        self.cfg.read().user_dir().join(game.file_name())
    }

    /// Every game that has an INI in either directory, sorted.
    pub fn games(&self) -> Result<Vec<GameId>> {
        let dirs = {
            let cfg = self.cfg.read();
            [cfg.global_dir().clone(), cfg.user_dir().clone()]
        };

        let mut games = BTreeSet::new();
        for dir in dirs.iter().filter(|d| d.is_dir()) {
            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
            {
                let entry = entry?;
                let path = entry.path();
                let is_ini = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"));

                if entry.file_type().is_file()
                    && is_ini
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    games.insert(GameId::from(stem));
                }
            }
        }

        Ok(games.into_iter().collect())
    }

    /// The merged working set of codes for `game`, with activation resolved.
    pub fn codes(&self, game: &GameId) -> Result<Vec<Entry>> {
        Ok(self.codes_with_report(game)?.codes)
    }

    /// Like [`Repository::codes`], but also returns the user codes that were shadowed by a
    /// shared code of the same name.
    ///
    /// If the user INI has no `[Gecko_Enabled]` section yet, the shared defaults decide which
    /// codes are active.
    pub fn codes_with_report(&self, game: &GameId) -> Result<MergeReport> {
        let global = IniFile::load(&self.global_path(game))?;
        let mut local = IniFile::load(&self.user_path(game))?;

        let mut report = merge_codes_with_report(&global, &local);
        mark_default_enabled(&global, &mut report.codes);

        if !local.has_section(Section::Enabled.as_ref()) {
            debug!("No enabled codes saved for {game}, using the defaults");
            bootstrap_local_config(&mut local, &report.codes);
        }
        mark_enabled(&local, &mut report.codes);

        Ok(report)
    }

    /// Write the user's codes and the active set back to the user INI. Shared codes are only
    /// recorded as enabled or not.
    pub fn save_codes(&self, game: &GameId, codes: &[Entry]) -> Result<()> {
        let path = self.user_path(game);
        let mut local = IniFile::load(&path)?;

        fill_store(&mut local, codes);

        self.write_user_ini(&path, &local)
    }

    /// Turn every code called `name` on or off and save the result.
    pub fn set_active(&self, game: &GameId, name: &str, active: bool) -> Result<()> {
        let mut codes = self.codes(game)?;

        let mut found = false;
        for entry in codes.iter_mut().filter(|e| e.name == name) {
            entry.active = active;
            found = true;
        }

        if !found {
            return Err(Error::UnknownCode {
                game: game.clone(),
                name: name.to_string(),
            });
        }

        self.save_codes(game, &codes)
    }

    /// Reset the user's `[Gecko_Enabled]` section to the shared defaults.
    pub fn bootstrap(&self, game: &GameId) -> Result<()> {
        let global = IniFile::load(&self.global_path(game))?;
        let mut global_codes = parse_codes(&global, false);
        mark_default_enabled(&global, &mut global_codes);

        let path = self.user_path(game);
        let mut local = IniFile::load(&path)?;
        bootstrap_local_config(&mut local, &global_codes);

        self.write_user_ini(&path, &local)
    }

    fn write_user_ini(&self, path: &Path, ini: &IniFile) -> Result<()> {
        if self.cfg.read().backup_on_save() && path.exists() {
            backup(path)?;
        }

        ini.save(path)
    }

    #[cfg(test)]
    /// Return a [`Repository`] whose global and user directories live under `dir`.
    pub(crate) fn mock(dir: &Path) -> Self {
        Self::new(CoreConfig::new(dir.join("global"), dir.join("user")))
    }
}

/// Copy `path` to `<file>.<timestamp>.bak` next to it. A numeric suffix keeps backups taken
/// within the same second apart.
fn backup(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");

    let mut backup = path.with_file_name(format!("{file_name}.{timestamp}.bak"));
    let mut counter = 1u32;
    while backup.exists() {
        backup = path.with_file_name(format!("{file_name}.{timestamp}-{counter}.bak"));
        counter = counter.saturating_add(1);
    }

    fs::copy(path, &backup).map_err(io_at(&backup))?;

    debug!("Backed up {} to {}", path.display(), backup.display());

    Ok(backup)
}

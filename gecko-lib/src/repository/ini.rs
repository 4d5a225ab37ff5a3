use std::{
    fmt::{self, Display, Formatter},
    fs, io,
    path::Path,
};

use tracing::debug;

use crate::{Result, error::io_at, store::LineStore};

/// An INI file viewed as ordered sections of raw lines.
///
/// Lines are kept as text rather than split into keys and values, so sections this crate
/// doesn't understand survive a load and save unchanged apart from whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    sections: Vec<IniSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IniSection {
    /// Empty for lines that come before the first header
    name: String,
    lines: Vec<String>,
}

impl IniFile {
    /// Parse INI text. Lines are trimmed and blank lines dropped. A header that repeats an
    /// earlier section continues it.
    pub fn parse(text: &str) -> Self {
        let mut ini = Self::default();
        let mut current = String::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some((name, _)) = line
                .strip_prefix('[')
                .and_then(|header| header.split_once(']'))
            {
                current = name.to_string();
                ini.section_mut(&current);
            } else {
                ini.section_mut(&current).lines.push(line.to_string());
            }
        }

        ini
    }

    /// Load an INI file. A file that doesn't exist yet loads as empty.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist, starting empty", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(io_at(path)(err)),
        }
    }

    /// Write the file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_at(parent))?;
        }

        fs::write(path, self.to_string()).map_err(io_at(path))?;

        debug!("Wrote {}", path.display());

        Ok(())
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
    }

    fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut(&mut self, name: &str) -> &mut IniSection {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(IniSection {
                    name: name.to_string(),
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        };

        self.sections
            .get_mut(index)
            .expect("index was just found or pushed")
    }
}

impl LineStore for IniFile {
    fn get_lines(&self, section: &str) -> Vec<String> {
        self.section(section)
            .map(|s| s.lines.clone())
            .unwrap_or_default()
    }

    fn set_lines(&mut self, section: &str, lines: Vec<String>) {
        self.section_mut(section).lines = lines;
    }

    fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }
}

impl Display for IniFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for section in &self.sections {
            if section.name.is_empty() && section.lines.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;

            if !section.name.is_empty() {
                writeln!(f, "[{}]", section.name)?;
            }
            for line in &section.lines {
                writeln!(f, "{line}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = "\
; leading comment
[Core]
CPUThread = True

[Gecko]
$Infinite Health [Ralf]
  0401A2B4 3F800000\r
*note

[Gecko_Enabled]
$Infinite Health
";

    #[test]
    fn test_parse() {
        let ini = IniFile::parse(SAMPLE);

        assert_eq!(
            ini.section_names().collect::<Vec<_>>(),
            vec!["Core", "Gecko", "Gecko_Enabled"]
        );
        assert_eq!(ini.get_lines(""), vec!["; leading comment"]);
        assert_eq!(
            ini.get_lines("Gecko"),
            vec!["$Infinite Health [Ralf]", "0401A2B4 3F800000", "*note"]
        );
        assert!(ini.has_section("Gecko_Enabled"));
        assert!(!ini.has_section("Video"));
        assert!(ini.get_lines("Video").is_empty());
    }

    #[test]
    fn test_repeated_header_continues_section() {
        let ini = IniFile::parse("[A]\none\n[B]\ntwo\n[A]\nthree\n");

        assert_eq!(ini.get_lines("A"), vec!["one", "three"]);
        assert_eq!(ini.section_names().count(), 2);
    }

    #[test]
    fn test_empty_section_is_present() {
        let ini = IniFile::parse("[Gecko_Enabled]\n");

        assert!(ini.has_section("Gecko_Enabled"));
        assert!(ini.get_lines("Gecko_Enabled").is_empty());
    }

    #[test]
    fn test_set_lines_keeps_order() {
        let mut ini = IniFile::parse("[A]\none\n[B]\ntwo\n");

        ini.set_lines("A", vec!["uno".into()]);
        ini.set_lines("C", vec!["tres".into()]);

        assert_eq!(ini.to_string(), "[A]\nuno\n\n[B]\ntwo\n\n[C]\ntres\n");
    }

    #[test]
    fn test_display_reparses() {
        let ini = IniFile::parse(SAMPLE);

        assert_eq!(IniFile::parse(&ini.to_string()), ini);
    }

    #[test]
    fn test_load_missing_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("GALE01.ini");

        let mut ini = IniFile::load(&path).unwrap();
        assert_eq!(ini, IniFile::default());

        ini.set_lines("Gecko_Enabled", vec!["$A".into()]);
        ini.save(&path).unwrap();

        assert_eq!(IniFile::load(&path).unwrap(), ini);
    }
}

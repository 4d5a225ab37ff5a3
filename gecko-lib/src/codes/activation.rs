use crate::{
    codes::{Entry, Section},
    store::LineStore,
};

/// Enable every entry named in the `[Gecko_Enabled]` section of the user's INI.
pub fn mark_enabled(local: &impl LineStore, entries: &mut [Entry]) {
    for name in marked_names(local) {
        for entry in entries.iter_mut().filter(|e| e.name == name) {
            entry.active = true;
        }
    }
}

/// In a shared INI, `[Gecko_Enabled]` lists the codes that are on by default. They are used to
/// seed the user's own `[Gecko_Enabled]` section when it doesn't exist yet.
pub fn mark_default_enabled(global: &impl LineStore, entries: &mut [Entry]) {
    for name in marked_names(global) {
        for entry in entries.iter_mut().filter(|e| e.name == name) {
            entry.default_active = true;
        }
    }
}

fn marked_names(store: &impl LineStore) -> Vec<String> {
    store
        .get_lines(Section::Enabled.as_ref())
        .iter()
        .filter_map(|line| line.strip_prefix('$'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{codes::parse_lines, repository::IniFile};

    fn enabled_section(lines: &[&str]) -> IniFile {
        let mut ini = IniFile::default();
        ini.set_lines(
            Section::Enabled.as_ref(),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        ini
    }

    #[test]
    fn test_mark_enabled() {
        let mut entries = parse_lines(["$X", "$Y"], true);

        mark_enabled(&enabled_section(&["$X"]), &mut entries);

        let flags: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.active)).collect();
        assert_eq!(flags, vec![("X", true), ("Y", false)]);
        assert!(entries.iter().all(|e| !e.default_active));
    }

    #[test]
    fn test_mark_default_enabled() {
        let mut entries = parse_lines(["$X", "$Y"], false);

        mark_default_enabled(&enabled_section(&["$Y"]), &mut entries);

        let flags: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.default_active))
            .collect();
        assert_eq!(flags, vec![("X", false), ("Y", true)]);
        assert!(entries.iter().all(|e| !e.active));
    }

    #[test]
    fn test_matching_is_exact() {
        let mut entries = parse_lines(["$Moon Jump", "$moon jump", "$Moon"], true);

        mark_enabled(
            &enabled_section(&["$Moon Jump", "Moon", "", "$Moon Jum"]),
            &mut entries,
        );

        let active: Vec<_> = entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(active, vec!["Moon Jump"]);
    }

    #[test]
    fn test_duplicates_are_all_marked() {
        let mut entries = parse_lines(["$A", "$A", "$B"], false);

        mark_enabled(&enabled_section(&["$A"]), &mut entries);

        assert_eq!(entries.iter().filter(|e| e.active).count(), 2);
    }

    #[test]
    fn test_missing_section_marks_nothing() {
        let mut entries = parse_lines(["$A"], false);

        mark_enabled(&IniFile::default(), &mut entries);
        mark_default_enabled(&IniFile::default(), &mut entries);

        let entry = entries.first().unwrap();
        assert!(!entry.active);
        assert!(!entry.default_active);
    }
}

use crate::{
    codes::{Entry, Section, marker},
    store::LineStore,
};

/// Section contents produced from a working set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializedCodes {
    /// `[Gecko]` lines. Only user codes are written here.
    pub codes: Vec<String>,
    /// `[Gecko_Enabled]` lines, one per active code wherever it came from.
    pub enabled: Vec<String>,
}

/// Convert a working set back into section lines.
///
/// Shared codes are never written back, since the shared INI isn't ours to edit. Patch lines
/// are emitted exactly as they were read.
pub fn to_lines(entries: &[Entry]) -> SerializedCodes {
    let mut out = SerializedCodes::default();

    for entry in entries {
        if entry.active {
            out.enabled.push(marker(&entry.name));
        }

        if !entry.is_local {
            continue;
        }

        out.codes.push(entry.header());
        out.codes
            .extend(entry.codes.iter().map(|patch| patch.original_text.clone()));
        out.codes
            .extend(entry.notes.iter().map(|note| format!("*{note}")));
    }

    out
}

/// Write both code sections of `store` from `entries`. Nothing is flushed to disk.
pub fn fill_store(store: &mut impl LineStore, entries: &[Entry]) {
    let SerializedCodes { codes, enabled } = to_lines(entries);
    store.set_lines(Section::Codes.as_ref(), codes);
    store.set_lines(Section::Enabled.as_ref(), enabled);
}

/// `[Gecko_Enabled]` lines for every code the shared INI turns on by default.
pub fn bootstrap_lines(global_codes: &[Entry]) -> Vec<String> {
    global_codes
        .iter()
        .filter(|e| e.default_active)
        .map(|e| marker(&e.name))
        .collect()
}

/// Seed the user's `[Gecko_Enabled]` section from the shared defaults. The `[Gecko]` section
/// is left as is.
pub fn bootstrap_local_config(local: &mut impl LineStore, global_codes: &[Entry]) {
    local.set_lines(Section::Enabled.as_ref(), bootstrap_lines(global_codes));
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{codes::parse_lines, repository::IniFile};

    #[test]
    fn test_round_trip() {
        let lines = [
            "$Infinite Health [Ralf]",
            "0401a2b4 3F800000",
            "  C2000000 00000002  ",
            "*Hold L",
            "*",
        ];
        let mut entries = parse_lines(lines, true);
        entries.iter_mut().for_each(|e| e.active = true);

        let out = to_lines(&entries);
        assert_eq!(out.codes, lines);
        assert_eq!(out.enabled, vec!["$Infinite Health"]);

        let reparsed = parse_lines(&out.codes, true);
        let (before, after) = (entries.first().unwrap(), reparsed.first().unwrap());
        assert_eq!(after.name, before.name);
        assert_eq!(after.creator, before.creator);
        assert_eq!(after.codes, before.codes);
        assert_eq!(after.notes, before.notes);
    }

    #[test]
    fn test_header_without_creator() {
        let entries = parse_lines(["$Moon Jump", "00000000 00000001"], true);

        assert_eq!(
            to_lines(&entries).codes,
            vec!["$Moon Jump", "00000000 00000001"]
        );
    }

    #[test]
    fn test_global_codes_are_not_written() {
        let mut entries = parse_lines(["$A [X]", "00000000 00000001", "$B"], false);
        entries.iter_mut().for_each(|e| e.active = true);

        let out = to_lines(&entries);

        assert!(out.codes.is_empty());
        assert_eq!(out.enabled, vec!["$A", "$B"]);
    }

    #[test]
    fn test_mixed_working_set() {
        let mut entries = parse_lines(["$G"], false);
        entries.extend(parse_lines(["$L", "*note"], true));
        entries.iter_mut().for_each(|e| e.active = e.name == "G");

        let out = to_lines(&entries);

        assert_eq!(out.codes, vec!["$L", "*note"]);
        assert_eq!(out.enabled, vec!["$G"]);
    }

    #[test]
    fn test_fill_store() {
        let mut ini = IniFile::default();
        ini.set_lines("Core", vec!["CPUThread = True".into()]);
        let mut entries = parse_lines(["$L", "00000001 00000002"], true);
        entries.iter_mut().for_each(|e| e.active = true);

        fill_store(&mut ini, &entries);

        assert_eq!(
            ini.get_lines(Section::Codes.as_ref()),
            vec!["$L", "00000001 00000002"]
        );
        assert_eq!(ini.get_lines(Section::Enabled.as_ref()), vec!["$L"]);
        assert_eq!(ini.get_lines("Core"), vec!["CPUThread = True"]);
    }

    #[test]
    fn test_bootstrap() {
        let mut entries = parse_lines(["$X", "$Y"], false);
        if let Some(x) = entries.first_mut() {
            x.default_active = true;
        }

        assert_eq!(bootstrap_lines(&entries), vec!["$X"]);

        let mut local = IniFile::default();
        local.set_lines(Section::Codes.as_ref(), vec!["$Mine".into()]);
        bootstrap_local_config(&mut local, &entries);

        assert_eq!(local.get_lines(Section::Enabled.as_ref()), vec!["$X"]);
        assert_eq!(local.get_lines(Section::Codes.as_ref()), vec!["$Mine"]);
    }
}

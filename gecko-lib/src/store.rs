//! Section based line storage.

/// Storage that maps a section name to an ordered list of text lines.
///
/// Code parsing and serialization only ever go through this trait, so they work the same
/// against an [`IniFile`](crate::repository::IniFile) or anything else that can hand out
/// lines by section.
pub trait LineStore {
    /// Lines of `section`, or nothing if the section doesn't exist.
    fn get_lines(&self, section: &str) -> Vec<String>;

    /// Replace the contents of `section`, creating it if needed.
    fn set_lines(&mut self, section: &str, lines: Vec<String>);

    fn has_section(&self, section: &str) -> bool;
}

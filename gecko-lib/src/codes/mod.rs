//! Gecko code entries and the line format they are stored in.
//!
//! A game's codes live in two sections of its INI files: `[Gecko]` holds the code
//! definitions themselves and `[Gecko_Enabled]` lists which of them are switched on. The
//! functions in this module turn those line sequences into [`Entry`] records and back.

use strum::{AsRefStr, Display, EnumString};

mod activation;
mod merge;
mod parse;
mod serialize;

pub use activation::{mark_default_enabled, mark_enabled};
pub use merge::{MergeReport, merge_codes, merge_codes_with_report, merge_entries};
pub use parse::{parse_codes, parse_lines};
pub use serialize::{
    SerializedCodes, bootstrap_lines, bootstrap_local_config, fill_store, to_lines,
};

/// The INI sections read and written by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
pub enum Section {
    /// Code definitions
    #[strum(serialize = "Gecko")]
    Codes,
    /// Activation markers
    #[strum(serialize = "Gecko_Enabled")]
    Enabled,
}

/// One named Gecko code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Attribution; empty when the header had none.
    pub creator: String,
    pub notes: Vec<String>,
    /// Patches in the order they are applied.
    pub codes: Vec<Patch>,
    /// Whether this entry came from the user's INI rather than the shared one.
    pub is_local: bool,
    /// Set by [`mark_enabled`].
    pub active: bool,
    /// Set by [`mark_default_enabled`]. Seeds the user's `[Gecko_Enabled]` section.
    pub default_active: bool,
}

impl Entry {
    pub(crate) fn new(name: &str, creator: &str, is_local: bool) -> Self {
        Self {
            name: name.to_string(),
            creator: creator.to_string(),
            is_local,
            ..Default::default()
        }
    }

    /// The `$Name [Creator]` line that introduces this entry.
    pub fn header(&self) -> String {
        if self.creator.is_empty() {
            format!("${}", self.name)
        } else {
            format!("${} [{}]", self.name, self.creator)
        }
    }
}

/// A single address/value write.
///
/// The line the patch was decoded from is kept so it can be written back untouched, whatever
/// its padding or hex digit case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub address: u32,
    pub value: u32,
    pub original_text: String,
}

/// Marker line naming an entry in a `[Gecko_Enabled]` section.
pub(crate) fn marker(name: &str) -> String {
    format!("${name}")
}

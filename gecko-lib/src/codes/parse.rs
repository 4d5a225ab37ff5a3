use std::mem;

use tracing::trace;

use crate::{
    codes::{Entry, Patch, Section},
    store::LineStore,
};

/// What a single line of a `[Gecko]` section means, decided by its first character.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// `$Name [Creator]`, holding everything after the `$`
    Header(&'a str),
    /// `*text`, holding everything after the `*`
    Note(&'a str),
    Patch,
    Empty,
}

impl<'a> LineKind<'a> {
    fn classify(line: &'a str) -> Self {
        if line.is_empty() {
            LineKind::Empty
        } else if let Some(rest) = line.strip_prefix('$') {
            LineKind::Header(rest)
        } else if let Some(rest) = line.strip_prefix('*') {
            LineKind::Note(rest)
        } else {
            LineKind::Patch
        }
    }
}

/// Parse the `[Gecko]` section of `store`.
pub fn parse_codes(store: &impl LineStore, is_local: bool) -> Vec<Entry> {
    parse_lines(store.get_lines(Section::Codes.as_ref()), is_local)
}

/// Parse `[Gecko]` section lines into entries, in the order they appear.
///
/// Parsing never fails. Patch lines that can't be decoded keep their text with zeroed
/// fields, and entries without a name are dropped.
pub fn parse_lines<I, S>(lines: I, is_local: bool) -> Vec<Entry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = Vec::new();
    // Patch or note lines before the first header land here and are thrown away
    let mut current = Entry::default();

    for line in lines {
        let line = line.as_ref();
        match LineKind::classify(line) {
            LineKind::Empty => continue,
            LineKind::Header(header) => {
                let (name, creator) = split_header(header);
                let finished = mem::replace(&mut current, Entry::new(name, creator, is_local));
                if !finished.name.is_empty() {
                    entries.push(finished);
                }
            }
            LineKind::Note(note) => current.notes.push(note.to_string()),
            LineKind::Patch => current.codes.push(decode_patch(line)),
        }
    }

    if !current.name.is_empty() {
        entries.push(current);
    }

    entries
}

/// Split the text after `$` into a trimmed name and a creator.
///
/// The creator runs from the first `[` to the next `]`, or to the end of the line if the
/// bracket is never closed.
fn split_header(header: &str) -> (&str, &str) {
    match header.split_once('[') {
        Some((name, rest)) => {
            let creator = rest.split_once(']').map_or(rest, |(creator, _)| creator);
            (name.trim(), creator)
        }
        None => (header.trim(), ""),
    }
}

fn decode_patch(line: &str) -> Patch {
    let mut scanner = HexScanner::new(line);
    let address = scanner.next_u32();
    let value = address.and_then(|_| scanner.next_u32());

    if value.is_none() {
        trace!("Malformed Gecko patch line: {line:?}");
    }

    Patch {
        address: address.unwrap_or_default(),
        value: value.unwrap_or_default(),
        original_text: line.to_string(),
    }
}

/// Reads whitespace separated hexadecimal numbers off the front of a string.
struct HexScanner<'a> {
    rest: &'a str,
}

impl<'a> HexScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// Read the next number, or `None` if the next token doesn't start with hex digits or
    /// doesn't fit in a `u32`. Non-hex characters directly after the digits are left for the
    /// next read.
    fn next_u32(&mut self) -> Option<u32> {
        let text = self.rest.trim_start();
        let text = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);

        let end = text
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(text.len());
        let (digits, rest) = text.split_at(end);
        if digits.is_empty() {
            return None;
        }

        let number = u32::from_str_radix(digits, 16).ok()?;
        self.rest = rest;
        Some(number)
    }
}

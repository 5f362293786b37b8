use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const DEFAULT_SCHEME: &str = "https://";

/// Unicode whitespace plus the byte order mark.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Canonicalize one raw address token.
///
/// Trims surrounding whitespace, including a byte order mark, and prepends
/// `https://` when the token does not already start with `http://` or
/// `https://` (ASCII case-insensitive).
/// A blank token yields an empty string, which callers treat as "no value".
/// Hosts are not validated.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim_matches(is_blank);
    if trimmed.is_empty() {
        return String::new();
    }
    if has_http_scheme(trimmed) {
        trimmed.to_owned()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    }
}

fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        s.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Split a free-text blob into candidate address tokens.
///
/// Runs of newlines, commas, and whitespace count as a single delimiter.
pub fn split(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || is_blank(c))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reduce raw address inputs to a [`LinkSet`].
pub fn dedupe<I, S>(raw_inputs: I) -> LinkSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = LinkSet::default();
    for raw in raw_inputs {
        set.insert(raw.as_ref());
    }
    set
}

/// Ordered collection of normalized links without duplicates.
///
/// The first occurrence of a normalized value wins; later occurrences are
/// dropped silently, including distinct raw strings that normalize to the
/// same link (`example.com` and `https://example.com`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LinkSet {
    links: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl LinkSet {
    /// Normalize `raw` and append it unless it is blank or already present.
    ///
    /// Returns `true` if the link was appended.
    pub fn insert(&mut self, raw: &str) -> bool {
        let link = normalize(raw);
        if link.is_empty() || self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.links
    }

    /// Serialize the links as a JSON array string (the `links_json` form field).
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.links.clone()).to_string()
    }
}

impl From<Vec<String>> for LinkSet {
    fn from(raw: Vec<String>) -> Self {
        dedupe(raw)
    }
}

impl From<LinkSet> for Vec<String> {
    fn from(set: LinkSet) -> Self {
        set.links
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Editable list of link rows as an operator types them.
///
/// Rows hold raw input and may be blank. [`LinkDraft::links`] rebuilds the
/// deduplicated [`LinkSet`] from the current rows on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDraft {
    rows: Vec<String>,
}

impl Default for LinkDraft {
    fn default() -> Self {
        Self {
            rows: vec![String::new()],
        }
    }
}

impl LinkDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        self.rows.push(String::new());
    }

    /// Replace the content of row `index`. Out-of-range indices are ignored.
    pub fn set_row(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            *row = value.into();
        }
    }

    /// Remove row `index`. Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Merge a pasted blob into the rows.
    ///
    /// Tokens are split and normalized; blank existing rows are dropped, the
    /// new links are appended, and a single empty row is kept at the end.
    /// Returns the number of links appended (zero leaves the draft untouched).
    pub fn apply_bulk(&mut self, text: &str) -> usize {
        let parts: Vec<String> = split(text)
            .iter()
            .map(|token| normalize(token))
            .filter(|link| !link.is_empty())
            .collect();
        if parts.is_empty() {
            return 0;
        }

        let added = parts.len();
        self.rows.retain(|row| !row.trim_matches(is_blank).is_empty());
        self.rows.extend(parts);
        self.rows.push(String::new());
        added
    }

    /// Reset to a single empty row.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn links(&self) -> LinkSet {
        dedupe(&self.rows)
    }
}

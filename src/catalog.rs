use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

const CHARACTERS: &str = include_str!("../assets/characters.txt");

/// A single drillable catalog entry. Identity is the literal text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A contiguous slice `[start, end)` of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Chapter {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// One-based inclusive label, e.g. `101-200`.
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.start + 1, self.end)
    }
}

/// Fixed, ordered sequence of items partitioned into equal-size chapters
/// (the last one may be shorter).
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<Item>,
    chapter_size: usize,
}

impl Catalog {
    /// The compiled-in character list.
    pub fn load(chapter_size: usize) -> Self {
        Self::parse(CHARACTERS, chapter_size)
    }

    /// Whitespace-separated items; lines starting with `#` are comments.
    /// Duplicates are collapsed, first occurrence wins.
    pub fn parse(source: &str, chapter_size: usize) -> Self {
        let mut seen = HashSet::new();
        let items = source
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .filter(|token| seen.insert(token.to_string()))
            .map(Item::from)
            .collect();
        Self::from_items(items, chapter_size)
    }

    pub fn from_items(items: Vec<Item>, chapter_size: usize) -> Self {
        Self {
            items,
            chapter_size: chapter_size.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn chapter_count(&self) -> usize {
        self.items.len().div_ceil(self.chapter_size)
    }

    pub fn chapter(&self, index: usize) -> Option<Chapter> {
        let start = index.checked_mul(self.chapter_size)?;
        if start >= self.items.len() {
            return None;
        }
        let end = (start + self.chapter_size).min(self.items.len());
        Some(Chapter { index, start, end })
    }

    pub fn chapters(&self) -> impl Iterator<Item = Chapter> + '_ {
        (0..self.chapter_count()).filter_map(|i| self.chapter(i))
    }

    pub fn items_in(&self, chapter: &Chapter) -> &[Item] {
        &self.items[chapter.start..chapter.end]
    }
}

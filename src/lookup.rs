use std::collections::HashMap;

use pinyin::ToPinyinMulti;
use thiserror::Error;
use tracing::warn;

use crate::catalog::Item;

/// How tones are rendered in a reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToneMode {
    /// `ma`
    Plain,
    /// `mā`
    ToneSymbol,
    /// `ma1`, neutral tone without a digit
    ToneNumber,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("item {0:?} is not a single character")]
    NotSingleChar(String),
    #[error("no reading known for {0:?}")]
    Unknown(String),
}

/// Source of valid readings for an item.
pub trait ReadingLookup {
    fn lookup(&self, item: &Item, mode: ToneMode) -> Result<Vec<String>, LookupError>;
}

/// Readings for `item`, or an empty list if the lookup fails. The failure is
/// logged and never reaches the session.
pub fn fetch_readings(lookup: &dyn ReadingLookup, item: &Item, mode: ToneMode) -> Vec<String> {
    match lookup.lookup(item, mode) {
        Ok(readings) => readings,
        Err(e) => {
            warn!(item = %item, ?mode, error = %e, "reading lookup failed");
            Vec::new()
        }
    }
}

/// Display form: distinct readings joined by ` / `.
pub fn join_readings(readings: &[String]) -> String {
    readings.join(" / ")
}

/// Lower-case and drop duplicates, keeping first-seen order.
fn dedup_lowercase(readings: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for reading in readings {
        let reading = reading.to_lowercase();
        if !reading.is_empty() && !out.contains(&reading) {
            out.push(reading);
        }
    }
    out
}

/// Neutral tone carries no digit in the tone-number grammar.
fn strip_neutral_digit(reading: &str) -> &str {
    reading
        .strip_suffix('5')
        .or_else(|| reading.strip_suffix('0'))
        .unwrap_or(reading)
}

/// Readings from the bundled pinyin dictionary, heteronyms included.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinyinLookup;

impl ReadingLookup for PinyinLookup {
    fn lookup(&self, item: &Item, mode: ToneMode) -> Result<Vec<String>, LookupError> {
        let mut chars = item.as_str().chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => return Err(LookupError::NotSingleChar(item.to_string())),
        };
        let multi = ch
            .to_pinyin_multi()
            .ok_or_else(|| LookupError::Unknown(item.to_string()))?;

        let readings = multi.into_iter().map(|p| match mode {
            ToneMode::Plain => p.plain().to_string(),
            ToneMode::ToneSymbol => p.with_tone().to_string(),
            ToneMode::ToneNumber => strip_neutral_digit(p.with_tone_num_end()).to_string(),
        });
        let readings = dedup_lowercase(readings);
        if readings.is_empty() {
            return Err(LookupError::Unknown(item.to_string()));
        }
        Ok(readings)
    }
}

/// Fixed table of readings, keyed by item then mode.
#[derive(Clone, Debug, Default)]
pub struct StaticLookup {
    table: HashMap<Item, HashMap<ToneMode, Vec<String>>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one item. `tone_number` readings use trailing digits and drive
    /// the tone-symbol form too when `tone_symbol` is empty.
    pub fn with(mut self, item: &str, plain: &[&str], tone_symbol: &[&str], tone_number: &[&str]) -> Self {
        let owned = |v: &[&str]| dedup_lowercase(v.iter().map(|s| s.to_string()));
        let symbols = if tone_symbol.is_empty() { tone_number } else { tone_symbol };
        let modes = HashMap::from([
            (ToneMode::Plain, owned(plain)),
            (ToneMode::ToneSymbol, owned(symbols)),
            (ToneMode::ToneNumber, owned(tone_number)),
        ]);
        self.table.insert(Item::from(item), modes);
        self
    }
}

impl ReadingLookup for StaticLookup {
    fn lookup(&self, item: &Item, mode: ToneMode) -> Result<Vec<String>, LookupError> {
        self.table
            .get(item)
            .and_then(|modes| modes.get(&mode))
            .cloned()
            .ok_or_else(|| LookupError::Unknown(item.to_string()))
    }
}

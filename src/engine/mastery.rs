use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Item;

pub const DEFAULT_MASTERY_THRESHOLD: u32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    #[serde(default)]
    pub correct_streak: u32,
    #[serde(default)]
    pub mastered: bool,
}

/// Per-item mastery state for the whole catalog. Records are created lazily;
/// an absent item reads as `{0, false}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    records: BTreeMap<Item, MasteryRecord>,
}

impl ProgressStore {
    pub fn get(&self, item: &Item) -> MasteryRecord {
        self.records.get(item).copied().unwrap_or_default()
    }

    pub fn is_mastered(&self, item: &Item) -> bool {
        self.get(item).mastered
    }

    fn entry(&mut self, item: &Item) -> &mut MasteryRecord {
        self.records.entry(item.clone()).or_default()
    }

    /// A correct answer extends the streak, and reaching `threshold` masters
    /// the item. A miss resets the streak. Mastery is never revoked here.
    pub fn record_attempt(&mut self, item: &Item, correct: bool, threshold: u32) -> MasteryRecord {
        let threshold = threshold.max(1);
        let record = self.entry(item);
        if correct {
            record.correct_streak = (record.correct_streak + 1).min(threshold);
            if record.correct_streak >= threshold {
                record.mastered = true;
            }
        } else {
            record.correct_streak = 0;
        }
        *record
    }

    /// Revealing the answer costs the same as a miss.
    pub fn record_hint_used(&mut self, item: &Item) -> MasteryRecord {
        let record = self.entry(item);
        record.correct_streak = 0;
        *record
    }

    pub fn reset_items<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>) {
        for item in items {
            self.records.insert(item.clone(), MasteryRecord::default());
        }
    }

    /// Bring loaded records in line with `threshold`, which may have been
    /// lowered since they were written. Returns how many records changed.
    pub fn normalize(&mut self, threshold: u32) -> usize {
        let threshold = threshold.max(1);
        let mut changed = 0;
        for record in self.records.values_mut() {
            let before = *record;
            record.correct_streak = record.correct_streak.min(threshold);
            if record.correct_streak >= threshold {
                record.mastered = true;
            }
            if *record != before {
                changed += 1;
            }
        }
        changed
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn mastered_count(&self, items: &[Item]) -> usize {
        items.iter().filter(|item| self.is_mastered(item)).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

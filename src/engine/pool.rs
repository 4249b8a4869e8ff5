use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::Item;
use crate::engine::mastery::{MasteryRecord, ProgressStore};

/// Working set of not-yet-mastered items for the active chapter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionPool {
    items: Vec<Item>,
}

impl SessionPool {
    /// Every chapter item whose record is not mastered. Never-seen items
    /// default to un-mastered, so a fresh chapter yields the full slice.
    pub fn build(chapter_items: &[Item], progress: &ProgressStore) -> Self {
        let items = chapter_items
            .iter()
            .filter(|item| !progress.is_mastered(item))
            .cloned()
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Uniformly random pick, never repeating `previous` while another
    /// item is available. `None` means the chapter is complete.
    pub fn select_next<R: Rng + ?Sized>(
        &self,
        previous: Option<&Item>,
        rng: &mut R,
    ) -> Option<Item> {
        match (self.items.len(), previous) {
            (0, _) => None,
            (1, _) | (_, None) => self.items.choose(rng).cloned(),
            (_, Some(prev)) => {
                let candidates: Vec<&Item> =
                    self.items.iter().filter(|item| *item != prev).collect();
                if candidates.is_empty() {
                    self.items.choose(rng).cloned()
                } else {
                    candidates.choose(rng).map(|item| (*item).clone())
                }
            }
        }
    }

    /// Drops `item` once its record is mastered. Returns whether anything
    /// was removed; absent items are a no-op.
    pub fn remove_if_mastered(&mut self, item: &Item, record: &MasteryRecord) -> bool {
        if !record.mastered {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|i| i != item);
        self.items.len() != before
    }
}

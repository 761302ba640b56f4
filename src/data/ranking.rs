use rand::Rng;
use rand::seq::SliceRandom;

use super::model::Item;

// ---------------------------------------------------------------------------
// Sampling: which items get ranked
// ---------------------------------------------------------------------------

/// An item placed in the ranking, with a key unique within the draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem {
    /// `"{id}-{position in the draw}"`, stable across reorders.
    pub key: String,
    pub item: Item,
}

/// Pick up to `size` random items from `items`.
pub fn draw_sample<R: Rng + ?Sized>(items: &[Item], size: usize, rng: &mut R) -> Vec<RankedItem> {
    let mut pool: Vec<&Item> = items.iter().collect();
    pool.shuffle(rng);
    pool.into_iter()
        .take(size)
        .enumerate()
        .map(|(i, item)| RankedItem {
            key: format!("{}-{i}", item.id),
            item: item.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking – ordered snapshot, least preferred first
// ---------------------------------------------------------------------------

/// The current order of the drawn items. Position 0 is rank 1.
///
/// Every reorder bumps `revision`; consumers refit when it changes rather
/// than patching earlier results.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankedItem>,
    revision: u64,
}

impl Ranking {
    pub fn entries(&self) -> &[RankedItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Items in rank order, ready for projection onto an attribute.
    pub fn snapshot(&self) -> Vec<Item> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }

    /// Remove the entry at `from` and reinsert it at `to`.
    ///
    /// Returns whether anything changed; out-of-range positions are ignored.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.revision += 1;
        log::debug!("Moved rank {} to {} (revision {})", from + 1, to + 1, self.revision);
        true
    }

    /// Replace the drawn items wholesale.
    pub fn replace(&mut self, entries: Vec<RankedItem>) {
        self.entries = entries;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("L{i}"), BTreeMap::new()))
            .collect()
    }

    fn ids(r: &Ranking) -> Vec<String> {
        r.entries().iter().map(|e| e.item.id.clone()).collect()
    }

    fn fresh(entries: Vec<RankedItem>) -> Ranking {
        Ranking {
            entries,
            revision: 0,
        }
    }

    #[test]
    fn sample_is_capped_and_keyed_by_draw_position() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = draw_sample(&items(20), 5, &mut rng);
        assert_eq!(drawn.len(), 5);
        for (i, entry) in drawn.iter().enumerate() {
            assert_eq!(entry.key, format!("{}-{i}", entry.item.id));
        }
        let mut unique: Vec<&str> = drawn.iter().map(|e| e.item.id.as_str()).collect();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn small_pools_are_drawn_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_sample(&items(3), 5, &mut rng).len(), 3);
        assert!(draw_sample(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_draw() {
        let pool = items(50);
        let a = draw_sample(&pool, 5, &mut StdRng::seed_from_u64(42));
        let b = draw_sample(&pool, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn move_uses_splice_semantics() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ranking = fresh(draw_sample(&items(5), 5, &mut rng));
        let before = ids(&ranking);

        assert!(ranking.move_item(0, 3));
        let after = ids(&ranking);
        assert_eq!(after[3], before[0]);
        assert_eq!(after[0], before[1]);
        assert_eq!(after[4], before[4]);
        assert_eq!(ranking.revision(), 1);

        assert!(ranking.move_item(3, 0));
        assert_eq!(ids(&ranking), before);
        assert_eq!(ranking.revision(), 2);
    }

    #[test]
    fn invalid_moves_are_ignored() {
        let mut ranking = fresh(draw_sample(&items(2), 2, &mut StdRng::seed_from_u64(0)));
        assert!(!ranking.move_item(0, 2));
        assert!(!ranking.move_item(5, 0));
        assert!(!ranking.move_item(1, 1));
        assert_eq!(ranking.revision(), 0);
    }

    #[test]
    fn snapshot_follows_current_order() {
        let mut ranking = fresh(draw_sample(&items(4), 4, &mut StdRng::seed_from_u64(9)));
        ranking.move_item(2, 0);
        let snap: Vec<String> = ranking.snapshot().into_iter().map(|i| i.id).collect();
        assert_eq!(snap, ids(&ranking));
    }
}

//! Catalog generation.
//!
//! Membership is a pure function of the quota; only display order is random.

use adclick_types::{CatalogQuota, Category, Item};

/// Source of uniform random indices for shuffling.
///
/// Every [`rand::Rng`] is a source, so callers pass `rand::thread_rng()` in
/// production and a seeded `StdRng` in tests.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is always at least 1.
    fn index_below(&mut self, upper: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn index_below(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Fisher-Yates shuffle: every permutation is equally likely given a uniform source.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogGenerator {
    quota: CatalogQuota,
}

impl CatalogGenerator {
    #[must_use]
    pub const fn new(quota: CatalogQuota) -> Self {
        Self { quota }
    }

    /// Number of items every generation produces.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.quota.total()
    }

    /// Items in build order: each category in [`Category::ALL`] order, ids
    /// numbered from zero within the category.
    #[must_use]
    pub fn ordered(&self) -> Vec<Item> {
        Category::ALL
            .into_iter()
            .flat_map(|category| {
                (0..self.quota.for_category(category))
                    .filter_map(move |index| Item::from_product(category, index))
            })
            .collect()
    }

    /// A fresh, unclicked catalog in shuffled display order.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<Item> {
        let mut items = self.ordered();
        shuffle(&mut items, rng);
        items
    }
}

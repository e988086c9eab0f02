//! Property tests for the suggestion engine: the deck is always a
//! duplicate-free subset of the catalog with a predictable size,
//! whatever the catalog, history and hour look like.

use chrono::{TimeZone, Utc};
use mealdeck_core::{suggest, HistoryEntry, SelectionSource};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::collections::HashSet;

fn catalog_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-zà-ỹ]{2,10}", 0..40)
        .prop_map(|set| set.into_iter().collect())
}

fn history_from(catalog: &[String], picks: &[usize]) -> Vec<HistoryEntry> {
    let ts = Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap();
    picks
        .iter()
        .filter_map(|&i| catalog.get(i % catalog.len().max(1)))
        .map(|food| {
            HistoryEntry::new(
                food.clone(),
                ts,
                ts.date_naive(),
                SelectionSource::Suggestion,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn deck_is_a_unique_subset_of_the_catalog(
        catalog in catalog_strategy(),
        picks in proptest::collection::vec(0usize..100, 0..30),
        hour in 0u32..24,
        count in 0usize..12,
        seed in any::<u64>(),
    ) {
        let history = if catalog.is_empty() {
            Vec::new()
        } else {
            history_from(&catalog, &picks)
        };
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let deck = suggest(&catalog, &history, hour, count, &mut rng);

        prop_assert_eq!(deck.len(), count.min(catalog.len()));

        let unique: HashSet<&String> = deck.iter().collect();
        prop_assert_eq!(unique.len(), deck.len());

        let catalog_set: HashSet<&String> = catalog.iter().collect();
        prop_assert!(deck.iter().all(|d| catalog_set.contains(d)));
    }

    #[test]
    fn small_catalogs_are_returned_whole(
        catalog in proptest::collection::hash_set("[a-z]{2,8}", 0..6),
        hour in 0u32..24,
        seed in any::<u64>(),
    ) {
        let catalog: Vec<String> = catalog.into_iter().collect();
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let deck = suggest(&catalog, &[], hour, 6, &mut rng);

        let expected: HashSet<&String> = catalog.iter().collect();
        let got: HashSet<&String> = deck.iter().collect();
        prop_assert_eq!(got, expected);
    }
}

//! Smart suggestion scoring and selection.
//!
//! Ranks the catalog for "what should I eat now" from selection history
//! and the current civil hour, then picks a deck of candidates with a
//! per-category cap so one category cannot dominate the deck.
//!
//! Scores carry a uniform random jitter to break ties and avoid serving
//! the same deck every time; the random source is injected so tests can
//! pin it.

use rand::Rng;

use crate::storage::HistoryEntry;
use crate::suggest::category::{food_category, meal_bonus, MealContext};

/// Default deck size.
pub const DEFAULT_SUGGESTION_COUNT: usize = 6;

/// How many recent entries feed the recency penalty.
const RECENCY_WINDOW: usize = 15;

/// How many recent entries feed the category diversity signal.
const DIVERSITY_WINDOW: usize = 8;

struct ScoredFood<'a> {
    food: &'a str,
    category: &'static str,
    score: f64,
}

/// Rank the catalog and pick up to `count` suggestions.
///
/// When the catalog is no larger than `count` the whole catalog is
/// returned. Otherwise dishes are scored (base 100, penalties for recent
/// and frequent picks, bonuses for meal-time fit and category diversity,
/// plus jitter), sorted descending, and accepted greedily with at most
/// `ceil(count * 0.4)` dishes per category; remaining slots are backfilled
/// by score regardless of category.
pub fn suggest<R: Rng + ?Sized>(
    catalog: &[String],
    history: &[HistoryEntry],
    civil_hour: u32,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    if catalog.is_empty() || count == 0 {
        return Vec::new();
    }
    if catalog.len() <= count {
        return catalog.to_vec();
    }

    let recent_foods: Vec<&str> = history
        .iter()
        .take(RECENCY_WINDOW)
        .map(|e| e.food.as_str())
        .collect();

    let meal_context = MealContext::from_hour(civil_hour);

    let recent_categories: Vec<&'static str> = recent_foods
        .iter()
        .take(DIVERSITY_WINDOW)
        .map(|f| food_category(f))
        .collect();

    let mut scored: Vec<ScoredFood> = catalog
        .iter()
        .map(|food| {
            let mut score = 100.0;

            // Recent picks are penalized hardest when they are freshest.
            if let Some(i) = recent_foods.iter().position(|f| *f == food.as_str()) {
                score -= (RECENCY_WINDOW - i) as f64 * 8.0;
            }

            // Logarithmic penalty for overall frequency.
            let frequency = history.iter().filter(|e| e.food == *food).count();
            if frequency > 0 {
                score -= ((frequency + 1) as f64).ln() * 8.0;
            }

            score += meal_bonus(food, meal_context);

            // Reward categories absent from the recent window; penalize
            // each recent occurrence otherwise.
            let category = food_category(food);
            let category_count = recent_categories.iter().filter(|c| **c == category).count();
            if category_count == 0 {
                score += 15.0;
            } else {
                score -= category_count as f64 * 5.0;
            }

            score += rng.gen_range(0.0..25.0);

            ScoredFood {
                food,
                category,
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let max_same_category = (count as f64 * 0.4).ceil() as usize;
    let mut selected: Vec<&str> = Vec::with_capacity(count);
    let mut category_counts: std::collections::HashMap<&'static str, usize> =
        std::collections::HashMap::new();

    for item in &scored {
        if selected.len() >= count {
            break;
        }
        let seen = category_counts.entry(item.category).or_insert(0);
        if *seen < max_same_category {
            selected.push(item.food);
            *seen += 1;
        }
    }

    // Backfill past the category cap with the next best scores.
    if selected.len() < count {
        for item in &scored {
            if selected.len() >= count {
                break;
            }
            if !selected.contains(&item.food) {
                selected.push(item.food);
            }
        }
    }

    selected.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SelectionSource;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn catalog(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn entry(food: &str) -> HistoryEntry {
        HistoryEntry::new(
            food,
            Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            SelectionSource::Suggestion,
        )
    }

    /// Rng producing constant zero jitter, making scores deterministic.
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn small_catalog_returned_whole() {
        let catalog = catalog(&["Phở bò", "Cơm tấm", "Lẩu gà"]);
        let out = suggest(&catalog, &[], 12, 6, &mut zero_rng());
        assert_eq!(out, catalog);
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(suggest(&[], &[], 12, 6, &mut zero_rng()).is_empty());
    }

    #[test]
    fn returns_exactly_count_without_duplicates() {
        let catalog = catalog(&[
            "Phở bò", "Bún bò", "Cơm tấm", "Bánh mì", "Bún riêu", "Hủ tiếu", "Mì Quảng", "Cơm gà",
            "Bánh xèo", "Gỏi cuốn", "Lẩu thái", "Cháo gà",
        ]);
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let out = suggest(&catalog, &[], 12, 6, &mut rng);
        assert_eq!(out.len(), 6);
        let unique: std::collections::HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), 6);
        assert!(out.iter().all(|f| catalog.contains(f)));
    }

    #[test]
    fn most_recent_pick_is_crowded_out() {
        // With zero jitter and late-night hour (no meal bonus), the only
        // signals are recency, frequency and diversity. The dish eaten
        // most recently takes the full (15-0)*8 penalty and loses its
        // deck slot to the seventh candidate.
        let catalog = catalog(&[
            "Phở bò", "Bún bò", "Cơm tấm", "Bánh xèo", "Gỏi cuốn", "Lẩu thái", "Cháo gà",
        ]);
        let history = vec![entry("Phở bò")];
        let out = suggest(&catalog, &history, 2, 6, &mut zero_rng());
        assert_eq!(out.len(), 6);
        assert!(!out.contains(&"Phở bò".to_string()));
    }

    #[test]
    fn category_cap_limits_one_category() {
        // Six "cơm" dishes and two others: the cap (ceil(6*0.4)=3) admits
        // at most three "cơm" in the first pass; backfill then completes
        // the deck by score.
        let catalog = catalog(&[
            "Cơm tấm", "Cơm gà", "Cơm chiên", "Cơm sườn", "Cơm niêu", "Cơm cháy", "Phở bò",
            "Lẩu thái",
        ]);
        let out = suggest(&catalog, &[], 2, 6, &mut zero_rng());
        assert_eq!(out.len(), 6);
        assert!(out.contains(&"Phở bò".to_string()));
        assert!(out.contains(&"Lẩu thái".to_string()));
    }

    #[test]
    fn meal_time_bonus_prefers_fitting_dish() {
        // At breakfast, "Xôi gà" (+20) outranks "Lẩu thái" (no bonus)
        // when everything else is equal.
        let catalog = catalog(&[
            "Xôi gà", "Lẩu thái", "Nem rán", "Trứng luộc", "Canh chua", "Sushi cá", "Steak bò",
        ]);
        let out = suggest(&catalog, &[], 7, 2, &mut zero_rng());
        assert_eq!(out.first().map(String::as_str), Some("Xôi gà"));
    }
}

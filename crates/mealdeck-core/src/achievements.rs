//! Achievement rules and evaluation.
//!
//! Fifteen one-way unlockable flags over the ledger, history and catalog.
//! Evaluation is a pure function returning the keys that newly unlocked;
//! already-unlocked keys are skipped so celebratory side effects can never
//! fire twice. The "explorer" family counts distinct civil days with at
//! least one selection, not distinct foods; users' unlock thresholds were
//! built on that behavior.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::storage::{Achievements, HistoryEntry, Stats};

/// Stable identifier of an achievement. Declaration order is the
/// definition order used for deterministic evaluation output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKey {
    First,
    Streak3,
    Streak7,
    Streak14,
    Streak30,
    Explorer7,
    Explorer14,
    Explorer30,
    Collector20,
    Collector35,
    Collector75,
    Collector150,
    Variety,
    Dedicated,
    Perfectweek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Bronze,
    Silver,
    Gold,
    Legend,
}

/// Display metadata for one achievement.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDef {
    pub key: AchievementKey,
    pub name: &'static str,
    pub icon: &'static str,
    pub tier: Tier,
}

/// The fixed achievement set, in definition order.
pub const DEFINITIONS: [AchievementDef; 15] = [
    AchievementDef { key: AchievementKey::First, name: "Bắt Đầu", icon: "🎉", tier: Tier::Basic },
    AchievementDef { key: AchievementKey::Streak3, name: "Khởi Đầu", icon: "🔥", tier: Tier::Bronze },
    AchievementDef { key: AchievementKey::Streak7, name: "Kiên Trì", icon: "🔥", tier: Tier::Silver },
    AchievementDef { key: AchievementKey::Streak14, name: "Quyết Tâm", icon: "🔥", tier: Tier::Gold },
    AchievementDef { key: AchievementKey::Streak30, name: "Huyền Thoại", icon: "👑", tier: Tier::Legend },
    AchievementDef { key: AchievementKey::Explorer7, name: "Thám Hiểm", icon: "🧭", tier: Tier::Silver },
    AchievementDef { key: AchievementKey::Explorer14, name: "Mạo Hiểm", icon: "🗺️", tier: Tier::Gold },
    AchievementDef { key: AchievementKey::Explorer30, name: "Nhà Khám Phá", icon: "🌟", tier: Tier::Legend },
    AchievementDef { key: AchievementKey::Collector20, name: "Sưu Tầm", icon: "📝", tier: Tier::Bronze },
    AchievementDef { key: AchievementKey::Collector35, name: "Sành Ăn", icon: "👨‍🍳", tier: Tier::Silver },
    AchievementDef { key: AchievementKey::Collector75, name: "Chuyên Gia", icon: "🎓", tier: Tier::Gold },
    AchievementDef { key: AchievementKey::Collector150, name: "Đại Sư", icon: "💎", tier: Tier::Legend },
    AchievementDef { key: AchievementKey::Variety, name: "Đa Dạng", icon: "🌈", tier: Tier::Gold },
    AchievementDef { key: AchievementKey::Dedicated, name: "Tận Tâm", icon: "⭐", tier: Tier::Legend },
    AchievementDef { key: AchievementKey::Perfectweek, name: "Tuần Hoàn Hảo", icon: "✨", tier: Tier::Gold },
];

/// Look up display metadata for a key.
pub fn definition(key: AchievementKey) -> &'static AchievementDef {
    DEFINITIONS
        .iter()
        .find(|d| d.key == key)
        .expect("every key has a definition")
}

struct HistoryFacts {
    distinct_days: BTreeSet<NaiveDate>,
    distinct_foods: usize,
}

impl HistoryFacts {
    fn gather(history: &[HistoryEntry]) -> Self {
        let distinct_days: BTreeSet<NaiveDate> =
            history.iter().map(|e| e.civil_date).collect();
        let distinct_foods = history
            .iter()
            .map(|e| e.food.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        Self {
            distinct_days,
            distinct_foods,
        }
    }

    /// Any run of 7 consecutive calendar days, each with an entry.
    fn has_perfect_week(&self) -> bool {
        for start in self.distinct_days.iter().rev() {
            if (1..7).all(|j| self.distinct_days.contains(&(*start - Duration::days(j)))) {
                return true;
            }
        }
        false
    }
}

fn rule_met(
    key: AchievementKey,
    stats: &Stats,
    catalog_size: usize,
    facts: &HistoryFacts,
) -> bool {
    use AchievementKey::*;
    match key {
        First => stats.total_suggestions >= 1,
        Streak3 => stats.streak >= 3,
        Streak7 => stats.streak >= 7,
        Streak14 => stats.streak >= 14,
        Streak30 => stats.streak >= 30,
        Explorer7 => facts.distinct_days.len() >= 7,
        Explorer14 => facts.distinct_days.len() >= 14,
        Explorer30 => facts.distinct_days.len() >= 30,
        Collector20 => catalog_size >= 20,
        Collector35 => catalog_size >= 35,
        Collector75 => catalog_size >= 75,
        Collector150 => catalog_size >= 150,
        Variety => facts.distinct_foods >= 20,
        Dedicated => facts.distinct_days.len() >= 50,
        Perfectweek => facts.has_perfect_week(),
    }
}

/// Evaluate all rules, returning newly unlocked keys in definition order.
///
/// Pure: the caller flips the flags and emits events. Keys already set in
/// `achievements` are never returned again.
pub fn evaluate(
    stats: &Stats,
    history: &[HistoryEntry],
    catalog_size: usize,
    achievements: &Achievements,
) -> Vec<AchievementKey> {
    let facts = HistoryFacts::gather(history);
    DEFINITIONS
        .iter()
        .map(|d| d.key)
        .filter(|key| !achievements.is_unlocked(*key) && rule_met(*key, stats, catalog_size, &facts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SelectionSource;
    use chrono::{TimeZone, Utc};

    fn entry_on(food: &str, date: NaiveDate) -> HistoryEntry {
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 1, 5, 0, 0)
            .unwrap();
        HistoryEntry::new(food, ts, date, SelectionSource::Suggestion)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_unlocks_on_first_suggestion() {
        let stats = Stats {
            total_suggestions: 1,
            ..Default::default()
        };
        let newly = evaluate(&stats, &[], 10, &Achievements::default());
        assert_eq!(newly, vec![AchievementKey::First]);
    }

    #[test]
    fn already_unlocked_keys_are_skipped() {
        let stats = Stats {
            total_suggestions: 1,
            streak: 3,
            ..Default::default()
        };
        let mut achievements = Achievements::default();
        achievements.unlock(AchievementKey::First);
        let newly = evaluate(&stats, &[], 10, &achievements);
        assert_eq!(newly, vec![AchievementKey::Streak3]);
    }

    #[test]
    fn explorer_counts_days_not_foods() {
        // Seven distinct days, all with the same single dish: explorer7
        // still unlocks, explorer14 does not.
        let history: Vec<_> = (1..=7)
            .map(|d| entry_on("Phở bò", day(2024, 3, d)))
            .collect();
        let newly = evaluate(&Stats::default(), &history, 10, &Achievements::default());
        assert!(newly.contains(&AchievementKey::Explorer7));
        assert!(!newly.contains(&AchievementKey::Explorer14));
    }

    #[test]
    fn variety_needs_twenty_distinct_foods() {
        let history: Vec<_> = (0..20)
            .map(|i| entry_on(&format!("food-{i}"), day(2024, 3, 1)))
            .collect();
        let newly = evaluate(&Stats::default(), &history, 10, &Achievements::default());
        assert!(newly.contains(&AchievementKey::Variety));
        assert!(!newly.contains(&AchievementKey::Explorer7));
    }

    #[test]
    fn perfect_week_needs_unbroken_run() {
        // Days 1-6 and 8: a gap on day 7 breaks the run.
        let mut history: Vec<_> = (1..=6)
            .map(|d| entry_on("Phở bò", day(2024, 3, d)))
            .collect();
        history.push(entry_on("Phở bò", day(2024, 3, 8)));
        let newly = evaluate(&Stats::default(), &history, 10, &Achievements::default());
        assert!(!newly.contains(&AchievementKey::Perfectweek));

        // Filling the gap completes a 7-day window.
        history.push(entry_on("Phở bò", day(2024, 3, 7)));
        let newly = evaluate(&Stats::default(), &history, 10, &Achievements::default());
        assert!(newly.contains(&AchievementKey::Perfectweek));
    }

    #[test]
    fn perfect_week_spans_month_boundary() {
        let history: Vec<_> = [
            day(2024, 2, 26),
            day(2024, 2, 27),
            day(2024, 2, 28),
            day(2024, 2, 29),
            day(2024, 3, 1),
            day(2024, 3, 2),
            day(2024, 3, 3),
        ]
        .into_iter()
        .map(|d| entry_on("Phở bò", d))
        .collect();
        let newly = evaluate(&Stats::default(), &history, 10, &Achievements::default());
        assert!(newly.contains(&AchievementKey::Perfectweek));
    }

    #[test]
    fn collector_thresholds_follow_catalog_size() {
        let newly = evaluate(&Stats::default(), &[], 35, &Achievements::default());
        assert!(newly.contains(&AchievementKey::Collector20));
        assert!(newly.contains(&AchievementKey::Collector35));
        assert!(!newly.contains(&AchievementKey::Collector75));
    }

    #[test]
    fn output_preserves_definition_order() {
        let stats = Stats {
            total_suggestions: 5,
            streak: 7,
            ..Default::default()
        };
        let newly = evaluate(&stats, &[], 20, &Achievements::default());
        assert_eq!(
            newly,
            vec![
                AchievementKey::First,
                AchievementKey::Streak3,
                AchievementKey::Streak7,
                AchievementKey::Collector20,
            ]
        );
    }
}

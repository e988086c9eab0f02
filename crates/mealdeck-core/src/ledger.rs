//! Streak and points ledger.
//!
//! The streak is a civil-day state machine: it advances when the user
//! comes back the next day, survives exactly one missed day through the
//! auto-freeze mechanic (spending points), and resets otherwise. Points
//! are awarded only through the explicit award functions here; the state
//! machine itself only spends them for a freeze.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{HistoryEntry, SelectionSource, Settings, Stats};
use crate::suggest::category::{food_category, OTHER_CATEGORY};

/// Points spent to freeze the streak across one missed day.
pub const FREEZE_COST: i64 = 50;

/// Streak bonus is one point per five streak days, capped here.
pub const MAX_STREAK_BONUS: i64 = 10;

/// Window of recent entries that disqualifies the "new food" bonus.
const NEW_FOOD_WINDOW: usize = 10;

/// A redo counts as nostalgia when the dish was last chosen this long ago.
const NOSTALGIA_DAYS: i64 = 30;

/// Explanation attached to a streak reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StreakNotice {
    /// One day was missed and the freeze could not be afforded.
    MissedOneShortOnPoints { shortfall: i64 },
    /// One day was missed with auto-freeze disabled.
    MissedOneFreezeDisabled,
    /// More than one day was missed; no freeze applies.
    MissedMany { missed_days: i64 },
}

/// Outcome of evaluating the streak for "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Already counted today; nothing changes.
    SameDay,
    /// First ever selection.
    Started,
    /// Came back exactly one day later.
    Advanced { streak: u32 },
    /// One missed day covered by spending [`FREEZE_COST`] points.
    Frozen { streak: u32, cost: i64 },
    /// Streak went back to 1.
    Reset { notice: StreakNotice },
}

/// Advance the streak state machine for a selection made on `today`.
///
/// Mutates `streak`, `points` and `last_suggestion_date` together;
/// the caller persists the stats in one write. Multiple selections on
/// the same civil day are idempotent.
pub fn advance_streak(
    stats: &mut Stats,
    settings: &Settings,
    today: NaiveDate,
) -> StreakTransition {
    let last = match stats.last_suggestion_date {
        None => {
            stats.streak = 1;
            stats.last_suggestion_date = Some(today);
            return StreakTransition::Started;
        }
        Some(last) => last,
    };

    let gap_days = (today - last).num_days();
    if gap_days <= 0 {
        // Same day, or a clock that moved backwards; leave the ledger alone.
        return StreakTransition::SameDay;
    }

    if gap_days == 1 {
        stats.streak += 1;
        stats.last_suggestion_date = Some(today);
        return StreakTransition::Advanced {
            streak: stats.streak,
        };
    }

    if gap_days == 2 && settings.auto_freeze && stats.points >= FREEZE_COST {
        stats.streak += 1;
        stats.points -= FREEZE_COST;
        stats.last_suggestion_date = Some(today);
        return StreakTransition::Frozen {
            streak: stats.streak,
            cost: FREEZE_COST,
        };
    }

    let missed_days = gap_days - 1;
    let notice = if missed_days == 1 && stats.points < FREEZE_COST {
        StreakNotice::MissedOneShortOnPoints {
            shortfall: FREEZE_COST - stats.points,
        }
    } else if missed_days == 1 && !settings.auto_freeze {
        StreakNotice::MissedOneFreezeDisabled
    } else {
        StreakNotice::MissedMany { missed_days }
    };

    stats.streak = 1;
    stats.last_suggestion_date = Some(today);
    StreakTransition::Reset { notice }
}

/// Why extra points were granted on top of the base award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BonusReason {
    /// Sustained streak (one point per five days, capped).
    Streak,
    /// Dish absent from the recent selections.
    NewFood,
    /// Category differs from the previous selection.
    Diversity,
    /// Re-selected a dish last chosen long ago.
    Nostalgia,
    /// Catalog reached a size milestone.
    Milestone { size: usize },
    /// Several recent manual additions.
    Engagement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub reason: BonusReason,
    pub points: i64,
}

/// A points award: base amount plus itemized bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub base: i64,
    pub bonuses: Vec<Bonus>,
}

impl Award {
    pub fn total(&self) -> i64 {
        self.base + self.bonuses.iter().map(|b| b.points).sum::<i64>()
    }
}

fn streak_bonus(streak: u32) -> Option<Bonus> {
    if streak < 5 {
        return None;
    }
    Some(Bonus {
        reason: BonusReason::Streak,
        points: (i64::from(streak) / 5).min(MAX_STREAK_BONUS),
    })
}

/// Points for accepting a suggested dish.
///
/// `history` is the log before this selection is appended.
pub fn selection_award(food: &str, streak: u32, history: &[HistoryEntry]) -> Award {
    let mut bonuses = Vec::new();

    if let Some(bonus) = streak_bonus(streak) {
        bonuses.push(bonus);
    }

    let recently_eaten = history
        .iter()
        .take(NEW_FOOD_WINDOW)
        .any(|e| e.food == food);
    if !recently_eaten {
        bonuses.push(Bonus {
            reason: BonusReason::NewFood,
            points: 3,
        });
    }

    if let Some(last) = history.first() {
        let category = food_category(food);
        if category != food_category(&last.food) && category != OTHER_CATEGORY {
            bonuses.push(Bonus {
                reason: BonusReason::Diversity,
                points: 2,
            });
        }
    }

    Award { base: 5, bonuses }
}

/// Points for re-selecting a dish from history.
///
/// `history` is the log before the redo entry is appended.
pub fn redo_award(
    food: &str,
    streak: u32,
    history: &[HistoryEntry],
    now: DateTime<Utc>,
) -> Award {
    let mut bonuses = Vec::new();

    if let Some(bonus) = streak_bonus(streak) {
        bonuses.push(bonus);
    }

    if let Some(last_pick) = history.iter().find(|e| e.food == food) {
        let days_since = (now - last_pick.timestamp).num_days();
        if days_since >= NOSTALGIA_DAYS {
            bonuses.push(Bonus {
                reason: BonusReason::Nostalgia,
                points: 2,
            });
        }
    }

    Award { base: 4, bonuses }
}

/// Catalog size milestones, highest first; at most one applies.
const MILESTONES: [(usize, i64); 4] = [(100, 20), (50, 20), (25, 10), (10, 5)];

/// Points for adding a new dish to the catalog.
///
/// `catalog_size` is the size after the add.
pub fn add_food_award(catalog_size: usize, history: &[HistoryEntry]) -> Award {
    let mut bonuses = Vec::new();

    for (size, points) in MILESTONES {
        if catalog_size == size {
            bonuses.push(Bonus {
                reason: BonusReason::Milestone { size },
                points,
            });
            break;
        }
    }

    let manual_adds = history
        .iter()
        .filter(|e| e.source == SelectionSource::Manual)
        .take(5)
        .count();
    if manual_adds >= 3 {
        bonuses.push(Bonus {
            reason: BonusReason::Engagement,
            points: 1,
        });
    }

    Award { base: 3, bonuses }
}

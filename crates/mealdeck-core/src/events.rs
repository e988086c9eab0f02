use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementKey;
use crate::ledger::{Award, StreakNotice};
use crate::storage::SelectionSource;

/// Every accepted user action produces Events. Presentation layers render
/// them (toast, sound, confetti); the core never performs side effects
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SelectionAccepted {
        food: String,
        source: SelectionSource,
        award: Award,
        total_points: i64,
        at: DateTime<Utc>,
    },
    FoodAdded {
        food: String,
        award: Award,
        catalog_size: usize,
        at: DateTime<Utc>,
    },
    FoodRemoved {
        food: String,
        at: DateTime<Utc>,
    },
    /// First selection ever recorded.
    StreakStarted {
        at: DateTime<Utc>,
    },
    StreakAdvanced {
        streak: u32,
        at: DateTime<Utc>,
    },
    /// A missed day was covered by spending points.
    StreakFrozen {
        streak: u32,
        cost: i64,
        at: DateTime<Utc>,
    },
    StreakReset {
        notice: StreakNotice,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        key: AchievementKey,
        name: String,
        at: DateTime<Utc>,
    },
}

//! Typed application state over the key-value store.
//!
//! Each record (catalog, history, stats, achievements, settings) lives
//! under its own `mealdeck_*` key as a JSON document. Reads fall back to
//! defaults when a key is absent; every mutation is a single
//! read-modify-write so a failed write can never split one record's
//! update across keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::achievements::AchievementKey;
use crate::clock::CIVIL_TIMEZONE;
use crate::error::StorageError;
use crate::storage::kv::KvStore;

const KEY_FOODS: &str = "mealdeck_foods";
const KEY_HISTORY: &str = "mealdeck_history";
const KEY_STATS: &str = "mealdeck_stats";
const KEY_ACHIEVEMENTS: &str = "mealdeck_achievements";
const KEY_SETTINGS: &str = "mealdeck_settings";

/// History keeps only the most recent entries; the oldest is evicted.
pub const HISTORY_CAP: usize = 30;

/// Dishes seeded into an empty catalog.
pub const DEFAULT_FOODS: [&str; 10] = [
    "Phở bò",
    "Bún bò",
    "Cơm tấm",
    "Bánh mì",
    "Bún riêu",
    "Hủ tiếu",
    "Mì Quảng",
    "Cơm gà",
    "Bánh xèo",
    "Gỏi cuốn",
];

/// How a history entry came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Picked from the suggestion deck.
    #[default]
    Suggestion,
    /// Re-selected from history.
    Redo,
    /// Logged directly by the user.
    Manual,
}

/// One accepted dish selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub food: String,
    pub timestamp: DateTime<Utc>,
    /// Calendar date of the selection in the fixed civil zone.
    pub civil_date: NaiveDate,
    #[serde(default)]
    pub source: SelectionSource,
}

impl HistoryEntry {
    pub fn new(
        food: impl Into<String>,
        timestamp: DateTime<Utc>,
        civil_date: NaiveDate,
        source: SelectionSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            food: food.into(),
            timestamp,
            civil_date,
            source,
        }
    }
}

/// Engagement counters. `streak` and `last_suggestion_date` are always
/// written together.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Stats {
    pub streak: u32,
    pub points: i64,
    pub total_suggestions: u64,
    pub last_suggestion_date: Option<NaiveDate>,
}

/// Per-meal reminder preferences, snapshotted into push subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderPrefs {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub breakfast: bool,
    #[serde(default = "default_true")]
    pub lunch: bool,
    #[serde(default = "default_true")]
    pub dinner: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ReminderPrefs {
    fn default() -> Self {
        Self {
            enabled: false,
            breakfast: true,
            lunch: true,
            dinner: true,
            timezone: default_timezone(),
        }
    }
}

/// User settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub auto_freeze: bool,
    #[serde(default)]
    pub reminders: ReminderPrefs,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_freeze: true,
            reminders: ReminderPrefs::default(),
        }
    }
}

/// Partial settings update. `None` fields keep their current value;
/// nested reminder fields merge the same way rather than replacing the
/// whole block.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub auto_freeze: Option<bool>,
    pub reminders: Option<ReminderPrefsUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReminderPrefsUpdate {
    pub enabled: Option<bool>,
    pub breakfast: Option<bool>,
    pub lunch: Option<bool>,
    pub dinner: Option<bool>,
    pub timezone: Option<String>,
}

impl Settings {
    /// Apply a deep partial update.
    pub fn merge(&mut self, update: SettingsUpdate) {
        if let Some(auto_freeze) = update.auto_freeze {
            self.auto_freeze = auto_freeze;
        }
        if let Some(reminders) = update.reminders {
            if let Some(enabled) = reminders.enabled {
                self.reminders.enabled = enabled;
            }
            if let Some(breakfast) = reminders.breakfast {
                self.reminders.breakfast = breakfast;
            }
            if let Some(lunch) = reminders.lunch {
                self.reminders.lunch = lunch;
            }
            if let Some(dinner) = reminders.dinner {
                self.reminders.dinner = dinner;
            }
            if let Some(timezone) = reminders.timezone {
                self.reminders.timezone = timezone;
            }
        }
    }
}

/// Unlock flags for the fixed achievement set. Flags are monotonic:
/// once true they never reset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Achievements {
    #[serde(flatten)]
    flags: BTreeMap<AchievementKey, bool>,
}

impl Achievements {
    pub fn is_unlocked(&self, key: AchievementKey) -> bool {
        self.flags.get(&key).copied().unwrap_or(false)
    }

    /// Set the flag; returns true only when it was previously unset.
    pub fn unlock(&mut self, key: AchievementKey) -> bool {
        !std::mem::replace(self.flags.entry(key).or_insert(false), true)
    }

    pub fn unlocked_count(&self) -> usize {
        self.flags.values().filter(|v| **v).count()
    }
}

fn default_true() -> bool {
    true
}

fn default_timezone() -> String {
    CIVIL_TIMEZONE.to_string()
}

/// Typed accessors over a [`KvStore`].
pub struct AppState<S: KvStore> {
    store: S,
}

impl<S: KvStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, &raw)
    }

    /// Catalog of dish names, set semantics by exact string match.
    pub fn foods(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .get_json(KEY_FOODS)?
            .unwrap_or_else(|| DEFAULT_FOODS.iter().map(|f| f.to_string()).collect()))
    }

    pub fn set_foods(&self, foods: &[String]) -> Result<(), StorageError> {
        self.set_json(KEY_FOODS, &foods)
    }

    /// Add a dish; returns false when it already exists.
    pub fn add_food(&self, food: &str) -> Result<bool, StorageError> {
        let mut foods = self.foods()?;
        if foods.iter().any(|f| f == food) {
            return Ok(false);
        }
        foods.push(food.to_string());
        self.set_foods(&foods)?;
        Ok(true)
    }

    /// Remove a dish; returns false when it was not present.
    pub fn delete_food(&self, food: &str) -> Result<bool, StorageError> {
        let mut foods = self.foods()?;
        let before = foods.len();
        foods.retain(|f| f != food);
        if foods.len() == before {
            return Ok(false);
        }
        self.set_foods(&foods)?;
        Ok(true)
    }

    /// History, most recent first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        Ok(self.get_json(KEY_HISTORY)?.unwrap_or_default())
    }

    pub fn set_history(&self, history: &[HistoryEntry]) -> Result<(), StorageError> {
        self.set_json(KEY_HISTORY, &history)
    }

    /// Insert an entry at the head, evicting the oldest past the cap.
    pub fn push_history(&self, entry: HistoryEntry) -> Result<(), StorageError> {
        let mut history = self.history()?;
        history.insert(0, entry);
        history.truncate(HISTORY_CAP);
        self.set_history(&history)
    }

    /// Delete a single entry by id; returns false when not found.
    pub fn delete_history_entry(&self, id: &str) -> Result<bool, StorageError> {
        let mut history = self.history()?;
        let before = history.len();
        history.retain(|e| e.id != id);
        if history.len() == before {
            return Ok(false);
        }
        self.set_history(&history)?;
        Ok(true)
    }

    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.set_history(&[])
    }

    pub fn stats(&self) -> Result<Stats, StorageError> {
        Ok(self.get_json(KEY_STATS)?.unwrap_or_default())
    }

    pub fn set_stats(&self, stats: &Stats) -> Result<(), StorageError> {
        self.set_json(KEY_STATS, stats)
    }

    /// Read-modify-write partial update; untouched fields are retained.
    pub fn update_stats(
        &self,
        apply: impl FnOnce(&mut Stats),
    ) -> Result<Stats, StorageError> {
        let mut stats = self.stats()?;
        apply(&mut stats);
        self.set_stats(&stats)?;
        Ok(stats)
    }

    pub fn achievements(&self) -> Result<Achievements, StorageError> {
        Ok(self.get_json(KEY_ACHIEVEMENTS)?.unwrap_or_default())
    }

    /// Monotonic unlock; returns true only on the first transition.
    pub fn unlock_achievement(&self, key: AchievementKey) -> Result<bool, StorageError> {
        let mut achievements = self.achievements()?;
        if !achievements.unlock(key) {
            return Ok(false);
        }
        self.set_json(KEY_ACHIEVEMENTS, &achievements)?;
        Ok(true)
    }

    pub fn settings(&self) -> Result<Settings, StorageError> {
        Ok(self.get_json(KEY_SETTINGS)?.unwrap_or_default())
    }

    pub fn set_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.set_json(KEY_SETTINGS, settings)
    }

    /// Deep-merge a partial update into the stored settings.
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<Settings, StorageError> {
        let mut settings = self.settings()?;
        settings.merge(update);
        self.set_settings(&settings)?;
        Ok(settings)
    }
}

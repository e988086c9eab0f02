//! Application facade tying storage, scoring, ledger, achievements and
//! events together.
//!
//! Every user-facing operation is one method here. Methods validate,
//! mutate state through [`AppState`], and return the [`Event`]s the
//! mutation produced so a frontend can render them. The facade never
//! performs I/O beyond the injected store.

use rand::Rng;

use crate::achievements::{self, definition, AchievementDef};
use crate::clock::{civil_date_of, Clock};
use crate::error::{CoreError, ValidationError};
use crate::events::Event;
use crate::ledger::{
    add_food_award, advance_streak, redo_award, selection_award, StreakTransition,
};
use crate::storage::{
    AppState, HistoryEntry, KvStore, SelectionSource, Settings, SettingsUpdate, Stats,
};
use crate::suggest::{suggest, DEFAULT_SUGGESTION_COUNT};

/// Aggregate view over the history log.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub unique_foods: usize,
    /// Most frequently selected dish, if any history exists.
    pub favorite: Option<String>,
}

/// The application. Generic over its store, clock and randomness so
/// tests run fully deterministic.
pub struct MealDeck<S: KvStore, C: Clock, R: Rng> {
    state: AppState<S>,
    clock: C,
    rng: R,
}

impl<S: KvStore, C: Clock, R: Rng> MealDeck<S, C, R> {
    pub fn new(store: S, clock: C, rng: R) -> Self {
        Self {
            state: AppState::new(store),
            clock,
            rng,
        }
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    /// A fresh suggestion deck for the current meal context.
    pub fn suggestions(&mut self, count: usize) -> Result<Vec<String>, CoreError> {
        let catalog = self.state.foods()?;
        let history = self.state.history()?;
        let hour = self.clock.civil_hour();
        Ok(suggest(&catalog, &history, hour, count, &mut self.rng))
    }

    /// Convenience wrapper using the default deck size.
    pub fn suggest_default(&mut self) -> Result<Vec<String>, CoreError> {
        self.suggestions(DEFAULT_SUGGESTION_COUNT)
    }

    /// Accept a dish from the deck (or log one manually).
    ///
    /// The dish must exist in the catalog. Advances the streak, awards
    /// points, appends history and evaluates achievements; the whole
    /// mutation is reported as events in celebration order.
    pub fn select(&mut self, food: &str, source: SelectionSource) -> Result<Vec<Event>, CoreError> {
        let catalog = self.state.foods()?;
        if !catalog.iter().any(|f| f == food) {
            return Err(ValidationError::UnknownFood(food.to_string()).into());
        }
        self.record_selection(food, source, &catalog)
    }

    /// Re-select a dish from history.
    ///
    /// Unlike [`select`](Self::select) the dish only has to appear in
    /// history; it may have been removed from the catalog since.
    pub fn redo(&mut self, food: &str) -> Result<Vec<Event>, CoreError> {
        let history = self.state.history()?;
        if !history.iter().any(|e| e.food == food) {
            return Err(ValidationError::UnknownFood(food.to_string()).into());
        }
        let catalog = self.state.foods()?;
        self.record_selection(food, SelectionSource::Redo, &catalog)
    }

    fn record_selection(
        &mut self,
        food: &str,
        source: SelectionSource,
        catalog: &[String],
    ) -> Result<Vec<Event>, CoreError> {
        let now = self.clock.now();
        let today = self.clock.civil_date();
        let settings = self.state.settings()?;
        let mut stats = self.state.stats()?;
        let history = self.state.history()?;

        let transition = advance_streak(&mut stats, &settings, today);

        // Awards are computed against the log as it was before this
        // selection; the fresh entry must not count as "recently eaten".
        let award = match source {
            SelectionSource::Redo => redo_award(food, stats.streak, &history, now),
            _ => selection_award(food, stats.streak, &history),
        };
        stats.points += award.total();
        stats.total_suggestions += 1;

        self.state
            .push_history(HistoryEntry::new(food, now, civil_date_of(now), source))?;
        self.state.set_stats(&stats)?;

        let mut events = Vec::new();
        match transition {
            StreakTransition::SameDay => {}
            StreakTransition::Started => events.push(Event::StreakStarted { at: now }),
            StreakTransition::Advanced { streak } => {
                events.push(Event::StreakAdvanced { streak, at: now })
            }
            StreakTransition::Frozen { streak, cost } => {
                events.push(Event::StreakFrozen { streak, cost, at: now })
            }
            StreakTransition::Reset { notice } => {
                events.push(Event::StreakReset { notice, at: now })
            }
        }
        events.push(Event::SelectionAccepted {
            food: food.to_string(),
            source,
            award,
            total_points: stats.points,
            at: now,
        });

        let history = self.state.history()?;
        self.unlock_new_achievements(&stats, &history, catalog.len(), &mut events)?;
        Ok(events)
    }

    /// Add a dish to the catalog. The name is trimmed first.
    pub fn add_food(&mut self, name: &str) -> Result<Vec<Event>, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyFoodName.into());
        }
        if !self.state.add_food(name)? {
            return Err(ValidationError::DuplicateFood(name.to_string()).into());
        }

        let now = self.clock.now();
        let catalog = self.state.foods()?;
        let history = self.state.history()?;
        let award = add_food_award(catalog.len(), &history);
        let stats = self.state.update_stats(|s| s.points += award.total())?;

        let mut events = vec![Event::FoodAdded {
            food: name.to_string(),
            award,
            catalog_size: catalog.len(),
            at: now,
        }];
        self.unlock_new_achievements(&stats, &history, catalog.len(), &mut events)?;
        Ok(events)
    }

    /// Remove a dish from the catalog. History entries for it remain.
    pub fn delete_food(&mut self, name: &str) -> Result<Event, CoreError> {
        if !self.state.delete_food(name)? {
            return Err(ValidationError::UnknownFood(name.to_string()).into());
        }
        Ok(Event::FoodRemoved {
            food: name.to_string(),
            at: self.clock.now(),
        })
    }

    pub fn foods(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.state.foods()?)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, CoreError> {
        Ok(self.state.history()?)
    }

    /// Delete one history entry by id; false when the id is unknown.
    /// Never touches points or streak already earned from the entry.
    pub fn delete_history_entry(&mut self, id: &str) -> Result<bool, CoreError> {
        Ok(self.state.delete_history_entry(id)?)
    }

    pub fn clear_history(&mut self) -> Result<(), CoreError> {
        Ok(self.state.clear_history()?)
    }

    pub fn stats(&self) -> Result<Stats, CoreError> {
        Ok(self.state.stats()?)
    }

    pub fn settings(&self) -> Result<Settings, CoreError> {
        Ok(self.state.settings()?)
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<Settings, CoreError> {
        Ok(self.state.update_settings(update)?)
    }

    /// Every achievement with its unlocked flag, in definition order.
    pub fn achievements(&self) -> Result<Vec<(&'static AchievementDef, bool)>, CoreError> {
        let unlocked = self.state.achievements()?;
        Ok(achievements::DEFINITIONS
            .iter()
            .map(|def| (def, unlocked.is_unlocked(def.key)))
            .collect())
    }

    /// History grouped by civil day, most recent day first. Entries
    /// within a day keep their most-recent-first order.
    pub fn history_by_day(
        &self,
    ) -> Result<Vec<(chrono::NaiveDate, Vec<HistoryEntry>)>, CoreError> {
        let mut groups: Vec<(chrono::NaiveDate, Vec<HistoryEntry>)> = Vec::new();
        for entry in self.state.history()? {
            match groups.last_mut() {
                Some((date, entries)) if *date == entry.civil_date => entries.push(entry),
                _ => groups.push((entry.civil_date, vec![entry])),
            }
        }
        Ok(groups)
    }

    /// Totals over the history log.
    pub fn history_summary(&self) -> Result<HistorySummary, CoreError> {
        let history = self.state.history()?;
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for entry in &history {
            match counts.iter_mut().find(|(food, _)| *food == entry.food) {
                Some((_, n)) => *n += 1,
                None => counts.push((&entry.food, 1)),
            }
        }
        let favorite = counts
            .iter()
            .max_by_key(|(_, n)| *n)
            .map(|(food, _)| food.to_string());
        Ok(HistorySummary {
            total: history.len(),
            unique_foods: counts.len(),
            favorite,
        })
    }

    fn unlock_new_achievements(
        &self,
        stats: &Stats,
        history: &[HistoryEntry],
        catalog_size: usize,
        events: &mut Vec<Event>,
    ) -> Result<(), CoreError> {
        let unlocked = self.state.achievements()?;
        let now = self.clock.now();
        for key in achievements::evaluate(stats, history, catalog_size, &unlocked) {
            if self.state.unlock_achievement(key)? {
                events.push(Event::AchievementUnlocked {
                    key,
                    name: definition(key).name.to_string(),
                    at: now,
                });
            }
        }
        Ok(())
    }
}

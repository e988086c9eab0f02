//! CLI command implementations.

pub mod achievements;
pub mod food;
pub mod history;
pub mod pick;
pub mod push;
pub mod remind;
pub mod settings;
pub mod stats;
pub mod suggest;

use mealdeck_core::{Event, MealDeck, SqliteStore, StreakNotice, SystemClock};
use rand::rngs::ThreadRng;

pub(crate) type App = MealDeck<SqliteStore, SystemClock, ThreadRng>;

/// Open the application over the default data directory.
pub(crate) fn open_app() -> Result<App, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(MealDeck::new(store, SystemClock, rand::thread_rng()))
}

/// Render events the way the app would toast them.
pub(crate) fn print_events(events: &[Event]) {
    for event in events {
        match event {
            Event::SelectionAccepted {
                food,
                award,
                total_points,
                ..
            } => {
                println!("✅ {food} (+{} points, total {total_points})", award.total());
            }
            Event::FoodAdded {
                food,
                award,
                catalog_size,
                ..
            } => {
                println!(
                    "➕ {food} added (+{} points, catalog now {catalog_size})",
                    award.total()
                );
            }
            Event::FoodRemoved { food, .. } => println!("➖ {food} removed"),
            Event::StreakStarted { .. } => println!("🔥 Streak started!"),
            Event::StreakAdvanced { streak, .. } => println!("🔥 Streak: {streak} days"),
            Event::StreakFrozen { streak, cost, .. } => {
                println!("🧊 Streak frozen through a missed day (-{cost} points, {streak} days)");
            }
            Event::StreakReset { notice, .. } => match notice {
                StreakNotice::MissedOneShortOnPoints { shortfall } => {
                    println!("💔 Streak reset: {shortfall} more points would have frozen it");
                }
                StreakNotice::MissedOneFreezeDisabled => {
                    println!("💔 Streak reset: auto-freeze is disabled");
                }
                StreakNotice::MissedMany { missed_days } => {
                    println!("💔 Streak reset after {missed_days} missed days");
                }
            },
            Event::AchievementUnlocked { name, .. } => {
                println!("🏆 Achievement unlocked: {name}");
            }
        }
    }
}

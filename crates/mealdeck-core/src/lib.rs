//! # MealDeck Core Library
//!
//! Core business logic for MealDeck, a "what should I eat today" helper
//! with light gamification. All operations are available via a standalone
//! CLI binary; any GUI is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Suggestion engine**: scores the dish catalog against recent
//!   history and the current meal context, with bounded random jitter
//! - **Ledger**: a civil-day streak state machine plus itemized point
//!   awards, including the point-funded streak freeze
//! - **Achievements**: fifteen monotonic unlock flags evaluated as a
//!   pure function over stats, history and catalog
//! - **Push**: subscription registration with per-endpoint rate limiting
//!   and a meal-window reminder dispatcher
//!
//! ## Key Components
//!
//! - [`MealDeck`]: application facade over an injected store, clock and
//!   randomness source
//! - [`AppState`]: typed state records over a [`KvStore`]
//! - [`suggest`]: the scoring function itself
//! - [`ReminderDispatcher`]: fan-out worker over stored subscriptions

pub mod achievements;
pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod push;
pub mod storage;
pub mod suggest;

pub use achievements::{AchievementDef, AchievementKey, Tier};
pub use app::{HistorySummary, MealDeck};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, PushError, StorageError, ValidationError};
pub use events::Event;
pub use ledger::{Award, Bonus, BonusReason, StreakNotice, StreakTransition};
pub use push::{
    DispatchOutcome, DispatchSummary, MealSlot, PushSubscription, ReminderDispatcher,
    SubscribeClient, SubscriptionStore, WebhookTransport,
};
pub use storage::{
    AppState, HistoryEntry, KvStore, MemoryStore, ReminderPrefs, SelectionSource, Settings,
    SettingsUpdate, SqliteStore, Stats,
};
pub use suggest::{suggest, MealContext};

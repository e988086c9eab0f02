//! Meal-time reminder dispatch.
//!
//! Intended to run from a scheduler every hour or so. Each run checks the
//! civil hour against the three meal windows, and inside a window fans a
//! slot-specific notification out to every opted-in subscription. A
//! permanently dead endpoint (HTTP 404/410) is dropped from the store;
//! transient failures are counted and left for the next run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{CoreError, PushError};
use crate::push::subscription::SubscriptionStore;
use crate::push::transport::{NotificationPayload, PushTransport};
use crate::storage::{KvStore, ReminderPrefs};

/// The meal a reminder window belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// Slot covering a civil hour, if any. Windows: 06-09 breakfast,
    /// 11-13 lunch, 17-19 dinner; everything else is quiet.
    pub fn for_hour(hour: u32) -> Option<Self> {
        match hour {
            6..=9 => Some(MealSlot::Breakfast),
            11..=13 => Some(MealSlot::Lunch),
            17..=19 => Some(MealSlot::Dinner),
            _ => None,
        }
    }

    /// Whether these preferences opt into this slot.
    pub fn wanted_by(self, prefs: &ReminderPrefs) -> bool {
        if !prefs.enabled {
            return false;
        }
        match self {
            MealSlot::Breakfast => prefs.breakfast,
            MealSlot::Lunch => prefs.lunch,
            MealSlot::Dinner => prefs.dinner,
        }
    }

    /// The notification shown for this slot.
    pub fn payload(self) -> NotificationPayload {
        let (title, body) = match self {
            MealSlot::Breakfast => (
                "🌅 Bữa sáng đến rồi!",
                "Hôm nay ăn gì nhỉ? Mở app để xem gợi ý!",
            ),
            MealSlot::Lunch => (
                "☀️ Bữa trưa đến rồi!",
                "Đã đến giờ ăn trưa! Chọn món ngay nào!",
            ),
            MealSlot::Dinner => (
                "🌙 Bữa tối đến rồi!",
                "Đừng quên bữa tối nha! Xem gợi ý ngay!",
            ),
        };
        NotificationPayload {
            title: title.to_string(),
            body: body.to_string(),
            icon: "/images/icon-192x192.png".to_string(),
            badge: "/images/icon-192x192.png".to_string(),
            tag: "meal-reminder".to_string(),
            require_interaction: false,
        }
    }
}

/// Result of one dispatcher run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The civil hour fell outside every meal window; nothing was sent.
    NotMealTime { hour: u32 },
    Dispatched(DispatchSummary),
}

/// Delivery counts for a run inside a meal window.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    pub meal: MealSlot,
    pub hour: u32,
    /// Subscriptions in the store, including opted-out ones.
    pub total_subscriptions: usize,
    pub sent: usize,
    pub failed: usize,
    pub timestamp: DateTime<Utc>,
}

/// Fan-out worker over the subscription store.
pub struct ReminderDispatcher<S: KvStore, C: Clock, T: PushTransport> {
    store: SubscriptionStore<S>,
    clock: C,
    transport: T,
}

impl<S: KvStore, C: Clock, T: PushTransport> ReminderDispatcher<S, C, T> {
    pub fn new(store: SubscriptionStore<S>, clock: C, transport: T) -> Self {
        Self {
            store,
            clock,
            transport,
        }
    }

    pub fn store(&self) -> &SubscriptionStore<S> {
        &self.store
    }

    /// Run one dispatch pass.
    ///
    /// Per-subscription failures never abort the pass: a dead endpoint is
    /// deleted and counted as failed, an unreadable record or transient
    /// transport error is counted as failed and left in place.
    pub fn run(&self) -> Result<DispatchOutcome, CoreError> {
        let hour = self.clock.civil_hour();
        let Some(meal) = MealSlot::for_hour(hour) else {
            return Ok(DispatchOutcome::NotMealTime { hour });
        };

        let payload = meal.payload();
        let ids = self.store.ids()?;
        let total_subscriptions = ids.len();
        let mut sent = 0;
        let mut failed = 0;

        for id in ids {
            let record = match self.store.get(&id) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(_) => {
                    failed += 1;
                    continue;
                }
            };
            if !meal.wanted_by(&record.preferences) {
                continue;
            }
            match self.transport.send(&record.subscription, &payload) {
                Ok(()) => sent += 1,
                Err(PushError::Gone) => {
                    failed += 1;
                    // A delete that fails leaves the record for the next
                    // pass; it never aborts the rest of the fan-out.
                    let _ = self.store.delete(&id);
                }
                Err(_) => failed += 1,
            }
        }

        Ok(DispatchOutcome::Dispatched(DispatchSummary {
            meal,
            hour,
            total_subscriptions,
            sent,
            failed,
            timestamp: self.clock.now(),
        }))
    }
}

//! Push subscription registration.
//!
//! Subscriptions live in a shared store keyed by an id derived from the
//! endpoint URL, so registering the same device twice upserts one record.
//! The server-side rate limit (30 s per endpoint) is authoritative; the
//! client mirrors the same window locally only to avoid pointless round
//! trips, and guards against overlapping attempts from the same process.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::clock::Clock;
use crate::error::{CoreError, PushError, StorageError, ValidationError};
use crate::storage::{KvStore, ReminderPrefs};

/// Seconds an endpoint must wait between subscription updates.
pub const SUBSCRIBE_COOLDOWN_SECS: i64 = 30;

/// Store key prefix for subscription records.
const SUBSCRIPTION_KEY_PREFIX: &str = "mealdeck_push_sub_";

/// Local store key holding the client's last subscribe attempt.
const LAST_ATTEMPT_KEY: &str = "mealdeck_push_subscribe_last";

/// Maximum length of a derived subscription id.
const SUBSCRIPTION_ID_LEN: usize = 50;

/// Opaque transport endpoint descriptor, as handed out by the device's
/// push service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushSubscription {
    pub endpoint: String,
    #[serde(default)]
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SubscriptionKeys {
    #[serde(default)]
    pub p256dh: String,
    #[serde(default)]
    pub auth: String,
}

/// One stored subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub subscription: PushSubscription,
    pub preferences: ReminderPrefs,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derive the stable record id for an endpoint: base64 of the URL with
/// non-alphanumerics stripped, truncated to 50 characters.
pub fn subscription_id(endpoint: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(endpoint);
    encoded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(SUBSCRIPTION_ID_LEN)
        .collect()
}

/// Shared subscription store, authoritative for rate limiting.
pub struct SubscriptionStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> SubscriptionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn record_key(id: &str) -> String {
        format!("{SUBSCRIPTION_KEY_PREFIX}{id}")
    }

    /// Register or refresh a subscription.
    ///
    /// Preserves the original `created_at`, refreshes `updated_at`, and
    /// replaces the preference snapshot. An existing record updated less
    /// than 30 seconds ago is rejected with [`PushError::RateLimited`].
    /// Records that no longer parse are overwritten rather than wedging
    /// the endpoint forever.
    pub fn subscribe(
        &self,
        subscription: &PushSubscription,
        preferences: ReminderPrefs,
        now: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        if subscription.endpoint.is_empty() {
            return Err(ValidationError::InvalidSubscription("missing endpoint".into()).into());
        }
        url::Url::parse(&subscription.endpoint).map_err(|e| {
            CoreError::from(ValidationError::InvalidSubscription(format!(
                "bad endpoint URL: {e}"
            )))
        })?;

        let id = subscription_id(&subscription.endpoint);
        let key = Self::record_key(&id);

        let existing: Option<SubscriptionRecord> = self
            .store
            .get(&key)?
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let mut created_at = now;
        if let Some(existing) = existing {
            let elapsed_ms = (now - existing.updated_at).num_milliseconds();
            let window_ms = SUBSCRIBE_COOLDOWN_SECS * 1000;
            if elapsed_ms < window_ms {
                let seconds_left = ((window_ms - elapsed_ms) as u64).div_ceil(1000);
                return Err(PushError::RateLimited { seconds_left }.into());
            }
            created_at = existing.created_at;
        }

        let record = SubscriptionRecord {
            subscription: subscription.clone(),
            preferences,
            created_at,
            updated_at: now,
        };
        self.store.set(&key, &serde_json::to_string(&record)?)?;
        Ok(id)
    }

    /// Ids of all stored subscriptions.
    pub fn ids(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(SUBSCRIPTION_KEY_PREFIX)
                    .map(str::to_string)
            })
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Option<SubscriptionRecord>, StorageError> {
        let key = Self::record_key(id);
        match self.store.get(&key)? {
            Some(raw) => {
                let record = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                    key,
                    message: e.to_string(),
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    pub fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(&Self::record_key(id))
    }
}

/// Client-side subscribe flow: cooldown mirror plus an in-flight guard.
///
/// The cooldown is tracked against a locally persisted last-attempt
/// timestamp, independent of server state; the server remains the source
/// of truth.
pub struct SubscribeClient<S: KvStore, C: Clock> {
    local: S,
    clock: C,
    in_flight: AtomicBool,
}

impl<S: KvStore, C: Clock> SubscribeClient<S, C> {
    pub fn new(local: S, clock: C) -> Self {
        Self {
            local,
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Seconds remaining in the local cooldown window (0 when clear).
    pub fn cooldown_remaining(&self) -> Result<u64, CoreError> {
        let last: Option<DateTime<Utc>> = self
            .local
            .get(LAST_ATTEMPT_KEY)?
            .and_then(|raw| raw.parse().ok());
        let Some(last) = last else {
            return Ok(0);
        };
        let elapsed_ms = (self.clock.now() - last).num_milliseconds();
        let window_ms = SUBSCRIBE_COOLDOWN_SECS * 1000;
        if elapsed_ms >= window_ms {
            return Ok(0);
        }
        Ok(((window_ms - elapsed_ms) as u64).div_ceil(1000))
    }

    fn mark_attempt(&self) -> Result<(), CoreError> {
        self.local
            .set(LAST_ATTEMPT_KEY, &self.clock.now().to_rfc3339())?;
        Ok(())
    }

    /// Run one subscribe attempt through `send` (the server call).
    ///
    /// Fails fast with [`PushError::InProgress`] when another attempt is
    /// mid-flight, and with [`PushError::RateLimited`] when the local
    /// cooldown window has not elapsed. The attempt timestamp is recorded
    /// on success and on a server-side rate limit, matching when the
    /// server itself starts a window.
    pub fn subscribe<F>(&self, send: F) -> Result<String, CoreError>
    where
        F: FnOnce() -> Result<String, CoreError>,
    {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(PushError::InProgress.into());
        }

        let result = self.attempt(send);
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn attempt<F>(&self, send: F) -> Result<String, CoreError>
    where
        F: FnOnce() -> Result<String, CoreError>,
    {
        let seconds_left = self.cooldown_remaining()?;
        if seconds_left > 0 {
            return Err(PushError::RateLimited { seconds_left }.into());
        }

        match send() {
            Ok(id) => {
                self.mark_attempt()?;
                Ok(id)
            }
            Err(err) => {
                if matches!(err, CoreError::Push(PushError::RateLimited { .. })) {
                    self.mark_attempt()?;
                }
                Err(err)
            }
        }
    }
}

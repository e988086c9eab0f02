pub mod dispatcher;
pub mod http;
pub mod subscription;
pub mod transport;

pub use dispatcher::{DispatchOutcome, DispatchSummary, MealSlot, ReminderDispatcher};
pub use subscription::{
    subscription_id, PushSubscription, SubscribeClient, SubscriptionRecord, SubscriptionStore,
};
pub use transport::{NotificationPayload, PushTransport, WebhookTransport};

use crate::error::ConfigError;

/// VAPID credentials for web-push delivery, read from the environment.
#[derive(Debug, Clone)]
pub struct VapidConfig {
    pub public_key: String,
    pub private_key: String,
    pub subject: String,
}

impl VapidConfig {
    /// Load credentials from `MEALDECK_VAPID_*` environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingKey`] when either key is absent;
    /// the subject falls back to a mailto default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_key = std::env::var("MEALDECK_VAPID_PUBLIC_KEY")
            .map_err(|_| ConfigError::MissingKey("MEALDECK_VAPID_PUBLIC_KEY".into()))?;
        let private_key = std::env::var("MEALDECK_VAPID_PRIVATE_KEY")
            .map_err(|_| ConfigError::MissingKey("MEALDECK_VAPID_PRIVATE_KEY".into()))?;
        let subject = std::env::var("MEALDECK_VAPID_SUBJECT")
            .unwrap_or_else(|_| "mailto:mealdeck@example.com".to_string());
        Ok(Self {
            public_key,
            private_key,
            subject,
        })
    }
}

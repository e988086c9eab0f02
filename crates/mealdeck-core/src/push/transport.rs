//! Notification delivery.
//!
//! The dispatcher talks to a [`PushTransport`] trait so tests can swap in
//! a recording fake. The production implementation posts the payload as
//! JSON to the subscription endpoint.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PushError;
use crate::push::subscription::PushSubscription;

/// Delivery timeout per notification.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// What a notification shows on the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Collapse key: a new reminder replaces the previous one.
    pub tag: String,
    pub require_interaction: bool,
}

/// Sends one notification to one subscription.
pub trait PushTransport {
    fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushError>;
}

/// HTTP transport posting the payload to the subscription endpoint.
pub struct WebhookTransport {
    client: reqwest::blocking::Client,
}

impl WebhookTransport {
    pub fn new() -> Result<Self, PushError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| PushError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl PushTransport for WebhookTransport {
    fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushError> {
        let response = self
            .client
            .post(&subscription.endpoint)
            .json(payload)
            .send()
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(PushError::Gone);
        }
        if !status.is_success() {
            return Err(PushError::Transport(format!(
                "endpoint returned {status}"
            )));
        }
        Ok(())
    }
}

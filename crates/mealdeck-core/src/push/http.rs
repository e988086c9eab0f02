//! HTTP boundary for the subscribe endpoint.
//!
//! Framework-neutral: the handler maps a request value to a response
//! value and an embedding (serverless function, axum route, test) does
//! the wire work. Responses always carry permissive CORS headers because
//! the endpoint is called cross-origin from the web client.

use serde::Deserialize;
use serde_json::json;

use crate::error::{CoreError, PushError};
use crate::push::subscription::{PushSubscription, SubscriptionStore};
use crate::storage::{KvStore, ReminderPrefs};
use chrono::{DateTime, Utc};

/// Minimal request shape the handler needs.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub body: String,
}

/// Minimal response shape the embedding writes out.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct SubscribeRequest {
    subscription: PushSubscription,
    #[serde(default)]
    preferences: ReminderPrefs,
}

fn cors_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Content-Type", "application/json"),
    ]
}

fn respond(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        headers: cors_headers(),
        body: body.to_string(),
    }
}

/// Handle one subscribe request against the shared store.
///
/// `now` is the server's current instant; the store enforces the
/// per-endpoint rate limit against it.
pub fn handle_subscribe<S: KvStore>(
    store: &SubscriptionStore<S>,
    request: &HttpRequest,
    now: DateTime<Utc>,
) -> HttpResponse {
    match request.method.as_str() {
        "OPTIONS" => {
            return HttpResponse {
                status: 200,
                headers: cors_headers(),
                body: String::new(),
            }
        }
        "POST" => {}
        _ => return respond(405, json!({ "error": "Method not allowed" })),
    }

    let parsed: SubscribeRequest = match serde_json::from_str(&request.body) {
        Ok(parsed) => parsed,
        Err(_) => return respond(400, json!({ "error": "Invalid subscription data" })),
    };

    match store.subscribe(&parsed.subscription, parsed.preferences, now) {
        Ok(id) => respond(200, json!({ "success": true, "subscriptionId": id })),
        Err(CoreError::Validation(e)) => respond(400, json!({ "error": e.to_string() })),
        Err(CoreError::Push(PushError::RateLimited { seconds_left })) => respond(
            429,
            json!({
                "error": "Too many requests. Please wait before subscribing again.",
                "secondsLeft": seconds_left,
            }),
        ),
        Err(_) => respond(500, json!({ "error": "Failed to save subscription" })),
    }
}

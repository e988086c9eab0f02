use clap::Subcommand;
use mealdeck_core::push::subscription::{PushSubscription, SubscriptionKeys};
use mealdeck_core::{SqliteStore, SubscribeClient, SubscriptionStore, SystemClock};

#[derive(Subcommand)]
pub enum PushAction {
    /// Register (or refresh) a push subscription
    Subscribe {
        /// Push service endpoint URL
        endpoint: String,
        /// Client public key
        #[arg(long, default_value = "")]
        p256dh: String,
        /// Client auth secret
        #[arg(long, default_value = "")]
        auth: String,
    },
    /// List stored subscriptions
    List,
    /// Remove a subscription by id
    Unsubscribe {
        /// Subscription id
        id: String,
    },
}

pub fn run(action: PushAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SubscriptionStore::new(SqliteStore::open()?);

    match action {
        PushAction::Subscribe {
            endpoint,
            p256dh,
            auth,
        } => {
            let app = super::open_app()?;
            let preferences = app.settings()?.reminders;
            let subscription = PushSubscription {
                endpoint,
                keys: SubscriptionKeys { p256dh, auth },
            };

            // Separate connection for the client's local cooldown state.
            let client = SubscribeClient::new(SqliteStore::open()?, SystemClock);
            let id = client.subscribe(|| {
                store.subscribe(&subscription, preferences.clone(), chrono::Utc::now())
            })?;
            println!("Subscribed: {id}");
        }
        PushAction::List => {
            for id in store.ids()? {
                match store.get(&id)? {
                    Some(record) => println!(
                        "{id}  {}  (updated {})",
                        record.subscription.endpoint, record.updated_at
                    ),
                    None => println!("{id}  <missing>"),
                }
            }
        }
        PushAction::Unsubscribe { id } => {
            store.delete(&id)?;
            println!("Unsubscribed: {id}");
        }
    }
    Ok(())
}

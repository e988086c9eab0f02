use clap::Subcommand;
use mealdeck_core::push::VapidConfig;
use mealdeck_core::{
    ReminderDispatcher, SqliteStore, SubscriptionStore, SystemClock, WebhookTransport,
};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Run one dispatch pass; meant to be invoked by a scheduler
    Run,
}

pub fn run(action: RemindAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RemindAction::Run => {
            // Fail before touching the store when push credentials are absent.
            VapidConfig::from_env()?;
            let store = SubscriptionStore::new(SqliteStore::open()?);
            let dispatcher =
                ReminderDispatcher::new(store, SystemClock, WebhookTransport::new()?);
            let outcome = dispatcher.run()?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}

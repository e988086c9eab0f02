use clap::Subcommand;
use mealdeck_core::storage::{ReminderPrefsUpdate, SettingsUpdate};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Update settings; omitted flags keep their current value
    Set {
        /// Spend points to cover one missed streak day
        #[arg(long)]
        auto_freeze: Option<bool>,
        /// Master switch for meal reminders
        #[arg(long)]
        reminders: Option<bool>,
        #[arg(long)]
        breakfast: Option<bool>,
        #[arg(long)]
        lunch: Option<bool>,
        #[arg(long)]
        dinner: Option<bool>,
        /// IANA timezone name carried with the subscription
        #[arg(long)]
        timezone: Option<String>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;

    match action {
        SettingsAction::Show => {
            let settings = app.settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            auto_freeze,
            reminders,
            breakfast,
            lunch,
            dinner,
            timezone,
        } => {
            let update = SettingsUpdate {
                auto_freeze,
                reminders: Some(ReminderPrefsUpdate {
                    enabled: reminders,
                    breakfast,
                    lunch,
                    dinner,
                    timezone,
                }),
            };
            let settings = app.update_settings(update)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

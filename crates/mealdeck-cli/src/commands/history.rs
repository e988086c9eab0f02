use clap::Subcommand;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show the history log, most recent first
    Show,
    /// Totals and the favorite dish
    Summary,
    /// Delete one entry by id
    Delete {
        /// Entry id
        id: String,
    },
    /// Clear the whole log
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;

    match action {
        HistoryAction::Show => {
            let history = app.history()?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        HistoryAction::Summary => {
            let summary = app.history_summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        HistoryAction::Delete { id } => {
            if app.delete_history_entry(&id)? {
                println!("Deleted entry {id}");
            } else {
                println!("No entry with id {id}");
            }
        }
        HistoryAction::Clear => {
            app.clear_history()?;
            println!("History cleared");
        }
    }
    Ok(())
}

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mealdeck-cli", version, about = "MealDeck CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest dishes for the current meal
    Suggest {
        /// Deck size
        #[arg(long, default_value = "6")]
        count: usize,
    },
    /// Accept a dish (from the deck or logged manually)
    Pick {
        /// Dish name
        food: String,
        /// Log as a manual selection instead of a suggestion
        #[arg(long)]
        manual: bool,
    },
    /// Re-select a dish from history
    Redo {
        /// Dish name
        food: String,
    },
    /// Catalog management
    Food {
        #[command(subcommand)]
        action: commands::food::FoodAction,
    },
    /// Selection history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Streak and points
    Stats,
    /// Achievement progress
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Push subscription management
    Push {
        #[command(subcommand)]
        action: commands::push::PushAction,
    },
    /// Reminder dispatch
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Suggest { count } => commands::suggest::run(count),
        Commands::Pick { food, manual } => commands::pick::run(&food, manual),
        Commands::Redo { food } => commands::pick::run_redo(&food),
        Commands::Food { action } => commands::food::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Achievements { action } => commands::achievements::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Push { action } => commands::push::run(action),
        Commands::Remind { action } => commands::remind::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

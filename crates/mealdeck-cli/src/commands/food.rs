use clap::Subcommand;
use mealdeck_core::suggest::emoji_for;

#[derive(Subcommand)]
pub enum FoodAction {
    /// Add a dish to the catalog
    Add {
        /// Dish name
        name: String,
    },
    /// Remove a dish from the catalog
    Remove {
        /// Dish name
        name: String,
    },
    /// List the catalog
    List,
}

pub fn run(action: FoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;

    match action {
        FoodAction::Add { name } => {
            let events = app.add_food(&name)?;
            super::print_events(&events);
        }
        FoodAction::Remove { name } => {
            let event = app.delete_food(&name)?;
            super::print_events(&[event]);
        }
        FoodAction::List => {
            for food in app.foods()? {
                println!("{} {}", emoji_for(&food), food);
            }
        }
    }
    Ok(())
}

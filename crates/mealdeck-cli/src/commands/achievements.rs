use clap::Subcommand;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List all achievements with their unlock state
    List,
    /// Only unlocked achievements
    Unlocked,
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = super::open_app()?;
    let achievements = app.achievements()?;

    let only_unlocked = matches!(action, AchievementsAction::Unlocked);
    for (def, unlocked) in achievements {
        if only_unlocked && !unlocked {
            continue;
        }
        let mark = if unlocked { "🏆" } else { "🔒" };
        println!("{mark} {} {} ({:?})", def.icon, def.name, def.tier);
    }
    Ok(())
}

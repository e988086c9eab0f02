use mealdeck_core::suggest::emoji_for;

pub fn run(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;
    let deck = app.suggestions(count)?;
    if deck.is_empty() {
        println!("The catalog is empty. Add dishes with `food add`.");
        return Ok(());
    }
    for (i, food) in deck.iter().enumerate() {
        println!("{}. {} {}", i + 1, emoji_for(food), food);
    }
    Ok(())
}

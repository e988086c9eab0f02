use mealdeck_core::SelectionSource;

pub fn run(food: &str, manual: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;
    let source = if manual {
        SelectionSource::Manual
    } else {
        SelectionSource::Suggestion
    };
    let events = app.select(food, source)?;
    super::print_events(&events);
    Ok(())
}

pub fn run_redo(food: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::open_app()?;
    let events = app.redo(food)?;
    super::print_events(&events);
    Ok(())
}

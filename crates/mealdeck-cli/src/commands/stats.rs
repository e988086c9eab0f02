pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let app = super::open_app()?;
    let stats = app.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

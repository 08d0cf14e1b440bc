use htmlfaker_generate::{HtmlFaker, PartialConfiguration};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut faker = HtmlFaker::seeded(42);
    let document = faker.generate_with_report(&PartialConfiguration::default())?;
    println!("{}", document.html);
    eprintln!("{}", serde_json::to_string_pretty(&document.report)?);
    Ok(())
}

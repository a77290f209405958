use anyhow::Result;
use carecal_core::carecal::Carecal;
use carecal_core::carecal_config::CarecalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = CarecalConfig::config_path()?;
    let carecal = Carecal::load()?;
    let config = carecal.config();

    println!("{} {}", "Config file:".bold(), config_path.display());
    println!("{} {}", "Data directory:".bold(), carecal.data_path().display());
    println!("  {}", carecal.events_path().display().dimmed());
    println!("  {}", carecal.profiles_path().display().dimmed());
    println!("{} {}", "Upcoming limit:".bold(), config.upcoming_limit);
    println!(
        "{} {}",
        "Default profile:".bold(),
        config.default_profile.as_deref().unwrap_or("all")
    );

    Ok(())
}

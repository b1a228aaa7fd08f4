use anyhow::Result;
use feedcal_core::FeedConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let config_path = FeedConfig::config_path()?;

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            FeedConfig::create_default_config(&config_path)?;
            println!("Created {}", config_path.display());
        }
    }

    let config = FeedConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:           {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!(
        "  feed_url:         {}",
        config.feed_url.as_deref().unwrap_or("(not set)")
    );
    println!("  default_limit:    {}", config.default_limit);
    println!("  request_timeout:  {:?}", config.request_timeout);
    println!("  bind:             {}", config.bind);

    Ok(())
}

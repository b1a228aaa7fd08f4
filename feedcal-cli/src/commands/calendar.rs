use anyhow::Result;
use feedcal_core::{SystemClock, calendar_months};

use super::Source;
use crate::render::render_months;
use crate::utils::tui::create_spinner;

pub async fn run(source: Source, json: bool) -> Result<()> {
    let spinner = create_spinner("Fetching calendar...".to_string());
    let months = calendar_months(&source, &SystemClock).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&months)?);
    } else {
        println!("{}", render_months(&months));
    }

    Ok(())
}

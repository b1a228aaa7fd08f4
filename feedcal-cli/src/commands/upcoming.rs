use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use feedcal_core::{Event, SystemClock, categorize_all, upcoming_events};
use owo_colors::OwoColorize;
use tokio::task::JoinSet;

use super::Source;
use crate::render::render_strip;
use crate::utils::tui::{CLEAR_SCREEN, create_spinner};

pub async fn run(source: Source, limit: usize, json: bool) -> Result<()> {
    let spinner = create_spinner("Fetching calendar...".to_string());
    let events = upcoming_events(&source, &SystemClock, limit).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        println!("{}", render_strip(&categorize_all(events), None));
    }

    Ok(())
}

/// What the watch view currently shows.
#[derive(Debug, Default)]
pub struct Strip {
    events: Option<Vec<Event>>,
    featured: usize,
}

impl Strip {
    /// Replace the shown list. Nothing is merged with the previous one.
    pub fn replace(&mut self, latest: Vec<Event>) {
        self.events = Some(categorize_all(latest));
    }

    /// Move the featured marker on. Returns false until a list has loaded.
    pub fn advance(&mut self) -> bool {
        if self.events.is_none() {
            return false;
        }
        self.featured = self.featured.wrapping_add(1);
        true
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_deref().unwrap_or_default()
    }

    /// Position of the featured event, wrapping around the list.
    pub fn featured_index(&self) -> Option<usize> {
        let len = self.events().len();
        (len > 0).then(|| self.featured % len)
    }

    pub fn render(&self) -> String {
        render_strip(self.events(), self.featured_index())
    }
}

/// Wait for whichever in-flight fetch finishes next and show its result.
///
/// Completion order decides: a fetch that started earlier but finishes
/// later still replaces the list. Returns false once nothing is in flight.
pub async fn apply_next(in_flight: &mut JoinSet<Vec<Event>>, strip: &mut Strip) -> bool {
    let Some(joined) = in_flight.join_next().await else {
        return false;
    };

    match joined {
        Ok(latest) => strip.replace(latest),
        Err(e) => tracing::warn!(error = %e, "refresh task failed"),
    }
    true
}

/// Refresh every `secs` seconds until ctrl-c.
///
/// A fetch is started on every tick without waiting for earlier ones. The
/// featured entry advances on every tick.
pub async fn watch(source: Source, limit: usize, secs: u64) -> Result<()> {
    let source = Arc::new(source);
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    let mut in_flight = JoinSet::new();
    let mut strip = Strip::default();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let source = Arc::clone(&source);
                in_flight.spawn(async move { upcoming_events(&*source, &SystemClock, limit).await });

                if strip.advance() {
                    draw(&strip, secs)?;
                }
            }
            true = apply_next(&mut in_flight, &mut strip) => draw(&strip, secs)?,
            _ = &mut shutdown => break,
        }
    }

    in_flight.abort_all();
    Ok(())
}

fn draw(strip: &Strip, secs: u64) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{CLEAR_SCREEN}")?;
    writeln!(stdout, "{}", strip.render())?;
    writeln!(stdout)?;
    writeln!(
        stdout,
        "{}",
        format!("Refreshing every {secs}s, ctrl-c to quit").dimmed()
    )?;
    stdout.flush()?;
    Ok(())
}

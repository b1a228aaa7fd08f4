//! TUI rendering for feedcal types.
//!
//! Extension traits that add colored terminal rendering to feedcal-core
//! types using owo_colors.

use feedcal_core::{Event, MonthBucket};
use owo_colors::{OwoColorize, Style};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Style for a category label. Unknown labels get a plain dimmed style so a
/// label added upstream still renders.
pub fn category_style(label: &str) -> Style {
    match label {
        "Parents" => Style::new().magenta(),
        "Closure" => Style::new().red().bold(),
        "Exams" => Style::new().yellow(),
        "Trips" => Style::new().green(),
        "Sixth Form" => Style::new().blue(),
        "General" => Style::new().cyan(),
        _ => Style::new().dimmed(),
    }
}

/// `[Label]` badge, styled for the label.
pub fn category_badge(label: &str) -> String {
    format!("[{label}]").style(category_style(label)).to_string()
}

/// Format the time portion of an event (e.g. "18:00" or "all-day")
fn format_time(event: &Event) -> String {
    if event.all_day {
        "all-day".to_string()
    } else {
        format!("{:>7}", event.start.format("%H:%M"))
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let day = self.start.format("%a %e %b").to_string();
        let mut line = format!("{} {} {}", day.dimmed(), format_time(self), self.title);

        if !self.location.is_empty() {
            line.push_str(&format!(" {}", format!("@ {}", self.location).dimmed()));
        }
        if let Some(category) = self.category {
            line.push(' ');
            line.push_str(&category_badge(category.label()));
        }

        line
    }
}

impl Render for MonthBucket {
    fn render(&self) -> String {
        let mut lines = vec![self.label().bold().to_string()];
        lines.extend(self.events.iter().map(|event| format!("  {}", event.render())));
        lines.join("\n")
    }
}

pub fn render_empty() -> String {
    "No upcoming events.".dimmed().to_string()
}

/// The upcoming strip, with the `featured` entry (modulo length) marked.
pub fn render_strip(events: &[Event], featured: Option<usize>) -> String {
    if events.is_empty() {
        return render_empty();
    }

    let featured = featured.map(|i| i % events.len());
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            if Some(i) == featured {
                format!("{} {}", ">".bold(), event.render())
            } else {
                format!("  {}", event.render())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Month-grouped calendar with a blank line between months.
pub fn render_months(months: &[MonthBucket]) -> String {
    if months.is_empty() {
        return render_empty();
    }

    months
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use feedcal_core::{Category, group_by_month};

    fn event(title: &str, month: u32, day: u32) -> Event {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, month, day, 18, 30, 0)
            .unwrap();
        Event::new(title, start)
    }

    #[test]
    fn test_event_line_contents() {
        let mut e = event("Parents' Evening", 1, 15);
        e.location = "Main Hall".to_string();
        let e = e.with_category(Category::Parents);

        let line = e.render();
        assert!(line.contains("Wed 15 Jan"));
        assert!(line.contains("18:30"));
        assert!(line.contains("Parents' Evening"));
        assert!(line.contains("@ Main Hall"));
        assert!(line.contains(&category_badge("Parents")));
    }

    #[test]
    fn test_all_day_events() {
        let mut e = event("INSET Day", 2, 3);
        e.all_day = true;
        let line = e.render();

        assert!(line.contains("all-day"));
        assert!(!line.contains("18:30"));
    }

    #[test]
    fn test_unknown_category_label_falls_back() {
        assert_eq!(
            category_badge("Sports"),
            "[Sports]".style(Style::new().dimmed()).to_string()
        );
        assert_ne!(category_badge("Exams"), category_badge("Sports"));
    }

    #[test]
    fn test_every_category_has_its_own_style() {
        let badges: Vec<String> = Category::ALL
            .iter()
            .map(|c| category_badge(c.label()).replace(c.label(), ""))
            .collect();
        for (i, a) in badges.iter().enumerate() {
            for b in &badges[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_strip_marks_featured_event() {
        let events = vec![event("One", 1, 1), event("Two", 1, 2)];
        let strip = render_strip(&events, Some(3));
        let lines: Vec<&str> = strip.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  "));
        assert!(lines[1].contains("Two"));
        assert!(!lines[1].starts_with("  "));
    }

    #[test]
    fn test_empty_views() {
        assert!(render_strip(&[], Some(0)).contains("No upcoming events."));
        assert!(render_months(&[]).contains("No upcoming events."));
    }

    #[test]
    fn test_months_render_in_order() {
        let months = group_by_month(vec![event("a", 1, 10), event("b", 3, 1)]);
        let rendered = render_months(&months);

        let jan = rendered.find("January 2025").unwrap();
        let mar = rendered.find("March 2025").unwrap();
        assert!(jan < mar);
    }
}

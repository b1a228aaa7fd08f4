//! Heuristic event categorization.
//!
//! Categories are derived from the event text on every request and never
//! stored. Rules are evaluated in a fixed priority order and the first match
//! wins, so an entry like "Year 12 Mock Exams" lands in [`Category::Exams`]
//! rather than [`Category::SixthForm`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Display category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Parents,
    Closure,
    Exams,
    Trips,
    #[serde(rename = "Sixth Form")]
    SixthForm,
    General,
}

impl Category {
    /// Every category, in rule priority order. `General` is the catch-all.
    pub const ALL: [Category; 6] = [
        Category::Parents,
        Category::Closure,
        Category::Exams,
        Category::Trips,
        Category::SixthForm,
        Category::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Parents => "Parents",
            Category::Closure => "Closure",
            Category::Exams => "Exams",
            Category::Trips => "Trips",
            Category::SixthForm => "Sixth Form",
            Category::General => "General",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered (pattern, category) rules. Matching is against lowercased text,
/// and patterns anchor on word starts only so "parent" also covers
/// "parents'" and "exam" covers "exams".
static RULES: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    [
        (
            r"\b(parent|famil|carer|guardian|pta\b)",
            Category::Parents,
        ),
        (
            r"\b(inset|training day|school closed|closure|closed to students|bank holiday|half[- ]term|end of term|term ends)",
            Category::Closure,
        ),
        (
            r"\b(exam|mock|assessment|gcse|a[- ]level results|results day|test)",
            Category::Exams,
        ),
        (
            r"\b(trip|excursion|visit|residential|field ?work|tours?\b)",
            Category::Trips,
        ),
        (
            r"\b(sixth form|6th form|year 1[23]|y1[23]\b|ucas)",
            Category::SixthForm,
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, category)| match Regex::new(pattern) {
        Ok(regex) => Some((regex, category)),
        Err(e) => {
            tracing::error!(%pattern, error = %e, "invalid category pattern");
            None
        }
    })
    .collect()
});

/// Assign a category to an event. Total: falls back to `General`.
pub fn categorize(event: &Event) -> Category {
    categorize_text(&event.search_text())
}

/// Categorize already-lowercased search text.
pub fn categorize_text(text: &str) -> Category {
    RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

/// Attach a category to every event, preserving order.
pub fn categorize_all(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .map(|event| {
            let category = categorize(&event);
            event.with_category(category)
        })
        .collect()
}
